use crate::errors::{DockErrorCode, dock_error};
use crate::{AppResult, ResultExt};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_PATH_ENV: &str = "DOCK_CONFIG";
const SCRATCH_DIR_ENV: &str = "DOCK_SCRATCH_DIR";
const STATE_FILE_ENV: &str = "DOCK_STATE_FILE";
const DEFAULT_DATA_DIRS: [&str; 2] = ["/usr/local/share", "/usr/share"];

/// Process-wide dock configuration, resolved once at startup and passed explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockConfig {
    pub scratch_dir: PathBuf,
    pub user_applications_dir: PathBuf,
    pub system_applications_dirs: Vec<PathBuf>,
    pub docked_store_path: PathBuf,
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DockConfigOverrides {
    scratch_dir: Option<PathBuf>,
    user_applications_dir: Option<PathBuf>,
    system_applications_dirs: Option<Vec<PathBuf>>,
    docked_store_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
}

/// Snapshot of the environment variables the defaults are derived from.
#[derive(Debug, Clone, Default)]
pub struct ConfigEnv {
    pub home: Option<PathBuf>,
    pub xdg_data_home: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,
    pub xdg_data_dirs: Option<String>,
    pub scratch_dir: Option<PathBuf>,
    pub state_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

impl ConfigEnv {
    pub fn from_process() -> Self {
        let path_var = |name: &str| {
            std::env::var_os(name)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };
        Self {
            home: path_var("HOME"),
            xdg_data_home: path_var("XDG_DATA_HOME"),
            xdg_config_home: path_var("XDG_CONFIG_HOME"),
            xdg_data_dirs: std::env::var("XDG_DATA_DIRS")
                .ok()
                .filter(|value| !value.trim().is_empty()),
            scratch_dir: path_var(SCRATCH_DIR_ENV),
            state_file: path_var(STATE_FILE_ENV),
            config_file: path_var(CONFIG_PATH_ENV),
        }
    }
}

impl DockConfig {
    pub fn resolve() -> AppResult<Self> {
        Self::resolve_from(&ConfigEnv::from_process())
    }

    pub fn resolve_from(env: &ConfigEnv) -> AppResult<Self> {
        let home = env.home.clone().ok_or_else(|| {
            dock_error(
                DockErrorCode::ConfigHomeMissing,
                "cannot locate the home directory, check HOME",
            )
        })?;
        let data_home = env
            .xdg_data_home
            .clone()
            .unwrap_or_else(|| home.join(".local").join("share"));
        let config_home = env
            .xdg_config_home
            .clone()
            .unwrap_or_else(|| home.join(".config"));

        let system_applications_dirs = env
            .xdg_data_dirs
            .as_deref()
            .map(|value| {
                value
                    .split(':')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(PathBuf::from)
                    .collect::<Vec<_>>()
            })
            .filter(|dirs| !dirs.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIRS.iter().map(PathBuf::from).collect())
            .into_iter()
            .map(|dir| dir.join("applications"))
            .collect();

        let mut config = Self {
            scratch_dir: config_home.join("dock").join("scratch"),
            user_applications_dir: data_home.join("applications"),
            system_applications_dirs,
            docked_store_path: config_home.join("dock").join("docked-apps.json"),
            data_dir: data_home.join("dockd"),
        };

        let config_file = env
            .config_file
            .clone()
            .unwrap_or_else(|| config_home.join("dock").join("config.json"));
        if let Some(overrides) = read_overrides(config_file.as_path())? {
            config.apply(overrides);
        }

        if let Some(scratch_dir) = env.scratch_dir.clone() {
            config.scratch_dir = scratch_dir;
        }
        if let Some(state_file) = env.state_file.clone() {
            config.docked_store_path = state_file;
        }
        Ok(config)
    }

    /// Every directory whose launchers count as installed, user dir first.
    pub fn application_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::with_capacity(self.system_applications_dirs.len() + 1);
        dirs.push(self.user_applications_dir.clone());
        dirs.extend(self.system_applications_dirs.iter().cloned());
        dirs
    }

    fn apply(&mut self, overrides: DockConfigOverrides) {
        if let Some(value) = overrides.scratch_dir {
            self.scratch_dir = value;
        }
        if let Some(value) = overrides.user_applications_dir {
            self.user_applications_dir = value;
        }
        if let Some(value) = overrides.system_applications_dirs {
            self.system_applications_dirs = value;
        }
        if let Some(value) = overrides.docked_store_path {
            self.docked_store_path = value;
        }
        if let Some(value) = overrides.data_dir {
            self.data_dir = value;
        }
    }
}

fn read_overrides(path: &Path) -> AppResult<Option<DockConfigOverrides>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(error) => {
            return Err(
                dock_error(DockErrorCode::ConfigReadFailed, "failed to read dock config")
                    .with_source(error)
                    .with_context("configFile", path.display().to_string()),
            );
        }
    };

    let overrides = serde_json::from_str::<DockConfigOverrides>(&content)
        .with_context(|| format!("invalid dock config: {}", path.display()))
        .with_code(
            DockErrorCode::ConfigParseFailed.as_str(),
            "failed to parse dock config",
        )
        .with_ctx("configFile", path.display().to_string())?;
    tracing::debug!(event = "dock_config_overrides_loaded", config_file = %path.display());
    Ok(Some(overrides))
}

#[cfg(test)]
#[path = "../tests/config/config_tests.rs"]
mod tests;
