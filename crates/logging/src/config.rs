const LOG_LEVEL_ENV: &str = "DOCK_LOG_LEVEL";

pub fn resolve_log_level() -> String {
    level_from_env_value(std::env::var(LOG_LEVEL_ENV).ok().as_deref())
}

pub(super) fn level_from_env_value(value: Option<&str>) -> String {
    let env_level = value.map(|value| value.trim().to_ascii_lowercase());
    if let Some(level) = env_level
        && matches!(
            level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        )
    {
        return level;
    }

    if cfg!(debug_assertions) {
        "debug".to_string()
    } else {
        "info".to_string()
    }
}
