use super::*;
use std::time::{Duration, SystemTime};

fn temp_log_dir() -> PathBuf {
    std::env::temp_dir().join(format!("dockd-logging-test-{}", uuid::Uuid::new_v4()))
}

#[test]
fn level_from_env_value_should_accept_known_levels() {
    assert_eq!(config::level_from_env_value(Some("WARN")), "warn");
    assert_eq!(config::level_from_env_value(Some(" trace ")), "trace");
}

#[test]
fn level_from_env_value_should_fall_back_on_unknown_level() {
    let expected = if cfg!(debug_assertions) { "debug" } else { "info" };
    assert_eq!(config::level_from_env_value(Some("verbose")), expected);
    assert_eq!(config::level_from_env_value(None), expected);
}

#[test]
fn cleanup_should_remove_only_expired_files() {
    let dir = temp_log_dir();
    fs::create_dir_all(&dir).expect("create log dir");
    fs::write(dir.join("dockd.2026-01-01.log"), b"old").expect("write log");
    fs::create_dir_all(dir.join("nested")).expect("create nested dir");

    let now = SystemTime::now();
    let kept = cleanup_expired_logs_with_duration(&dir, Duration::from_secs(3600), now)
        .expect("cleanup with long window");
    assert_eq!(kept, 0);

    let later = now + Duration::from_secs(7200);
    let removed = cleanup_expired_logs_with_duration(&dir, Duration::from_secs(3600), later)
        .expect("cleanup with expired window");
    assert_eq!(removed, 1);
    assert!(!dir.join("dockd.2026-01-01.log").exists());
    assert!(dir.join("nested").exists());

    fs::remove_dir_all(&dir).expect("cleanup temp dir");
}

#[test]
fn cleanup_should_ignore_missing_dir() {
    let dir = temp_log_dir();
    let removed = cleanup_expired_logs_with_duration(&dir, Duration::ZERO, SystemTime::now())
        .expect("missing dir is not an error");
    assert_eq!(removed, 0);
}

#[test]
fn init_logging_should_create_log_dir() {
    let dir = temp_log_dir();
    let guard = init_logging(&dir).expect("init logging");
    assert!(guard.log_dir().ends_with(LOG_DIR_NAME));
    assert!(guard.log_dir().is_dir());
    assert!(!guard.level().is_empty());
    let _ = fs::remove_dir_all(&dir);
}
