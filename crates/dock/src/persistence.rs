use crate::config::DockConfig;
use crate::entry::AppEntry;
use crate::errors::{DockErrorCode, dock_error};
use crate::{AppResult, ResultExt};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SCRATCH_CODE: &str = "/S@";
const USER_APPS_CODE: &str = "/H@";
const LOCAL_APPS_CODE: &str = "/L@";
const SYSTEM_APPS_CODE: &str = "/D@";
const LOCAL_APPS_DIR: &str = "/usr/local/share/applications";
const SYSTEM_APPS_DIR: &str = "/usr/share/applications";

/// Portable path encoding: well-known launcher directories become short codes so a
/// persisted list survives a different home or scratch root.
#[derive(Debug, Clone)]
pub struct PathCodec {
    rules: Vec<(PathBuf, &'static str)>,
}

impl PathCodec {
    pub fn new(scratch_dir: &Path, user_applications_dir: &Path) -> Self {
        Self {
            rules: vec![
                (scratch_dir.to_path_buf(), SCRATCH_CODE),
                (user_applications_dir.to_path_buf(), USER_APPS_CODE),
                (PathBuf::from(LOCAL_APPS_DIR), LOCAL_APPS_CODE),
                (PathBuf::from(SYSTEM_APPS_DIR), SYSTEM_APPS_CODE),
            ],
        }
    }

    pub fn from_config(config: &DockConfig) -> Self {
        Self::new(&config.scratch_dir, &config.user_applications_dir)
    }

    pub fn zip(&self, path: &Path) -> String {
        for (dir, code) in &self.rules {
            if let Ok(rest) = path.strip_prefix(dir)
                && !rest.as_os_str().is_empty()
            {
                return format!("{code}{}", rest.to_string_lossy());
            }
        }
        path.to_string_lossy().to_string()
    }

    pub fn unzip(&self, value: &str) -> PathBuf {
        for (dir, code) in &self.rules {
            if let Some(rest) = value.strip_prefix(code) {
                return dir.join(rest);
            }
        }
        PathBuf::from(value)
    }
}

/// Durable home of the docked list.
pub trait DockedStore: Send + Sync {
    fn load(&self) -> AppResult<Vec<String>>;
    fn save(&self, list: &[String]) -> AppResult<()>;
}

/// Stores the docked list as a JSON array, replaced atomically through a temp file.
#[derive(Debug, Clone)]
pub struct JsonDockedStore {
    path: PathBuf,
}

impl JsonDockedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}

impl DockedStore for JsonDockedStore {
    fn load(&self) -> AppResult<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => {
                return Err(dock_error(
                    DockErrorCode::DockedStoreReadFailed,
                    "failed to read docked apps",
                )
                .with_source(error)
                .with_context("storeFile", self.path.display().to_string()));
            }
        };
        serde_json::from_str::<Vec<String>>(&content)
            .with_context(|| format!("invalid docked apps file: {}", self.path.display()))
            .with_code(
                DockErrorCode::DockedStoreReadFailed.as_str(),
                "failed to parse docked apps",
            )
            .with_ctx("storeFile", self.path.display().to_string())
    }

    fn save(&self, list: &[String]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create store dir: {}", parent.display()))
                .with_code(
                    DockErrorCode::DockedStoreWriteFailed.as_str(),
                    "failed to save docked apps",
                )
                .with_ctx("storeDir", parent.display().to_string())?;
        }
        let content = serde_json::to_string_pretty(list)
            .with_context(|| "failed to serialize docked apps".to_string())
            .with_code(
                DockErrorCode::DockedStoreWriteFailed.as_str(),
                "failed to save docked apps",
            )?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .and_then(|_| fs::rename(&temp_path, &self.path))
            .with_context(|| format!("failed to write docked apps: {}", self.path.display()))
            .with_code(
                DockErrorCode::DockedStoreWriteFailed.as_str(),
                "failed to save docked apps",
            )
            .with_ctx("storeFile", self.path.display().to_string())
    }
}

/// Rebuilds the full encoded list of docked launchers, in entry order.
pub fn rebuild_docked_list(entries: &[Arc<AppEntry>], codec: &PathCodec) -> Vec<String> {
    let mut list = Vec::new();
    for entry in entries {
        let state = entry.read();
        if !state.is_docked {
            continue;
        }
        match state.desktop_file() {
            Some(path) => list.push(codec.zip(path)),
            None => tracing::warn!(
                event = "docked_entry_without_launcher",
                entry_id = entry.id(),
                inner_id = state.inner_id.as_str()
            ),
        }
    }
    list
}

#[cfg(test)]
#[path = "../tests/persistence/persistence_tests.rs"]
mod tests;
