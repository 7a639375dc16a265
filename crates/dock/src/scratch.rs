use crate::desktop_file::DESKTOP_EXT;
use crate::entry::EntryState;
use crate::errors::{DockErrorCode, dock_error};
use crate::icon::{DEFAULT_APP_ICON, data_uri_to_png, is_data_uri_image};
use crate::models::CleanupFailureDto;
use crate::provenance::is_file_in_dir;
use crate::{AppResult, ResultExt};
use anyhow::Context;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const SCRIPT_EXT: &str = "sh";
const ICON_EXT: &str = "png";
/// Sibling extensions deleted together as one scratch set.
pub const SCRATCH_EXTENSIONS: [&str; 3] = [DESKTOP_EXT, SCRIPT_EXT, ICON_EXT];
const FILE_ARG_PLACEHOLDER: &str = "%U";

const SCRATCH_DIR_MODE: u32 = 0o755;
const DESKTOP_FILE_MODE: u32 = 0o644;
const SCRIPT_FILE_MODE: u32 = 0o744;

const DOCKED_ITEM_TEMPLATE: &str = "[Desktop Entry]
Name={name}
Exec={exec}
Icon={icon}
Type=Application
Terminal=false
StartupNotify=false
";

fn render_docked_item(name: &str, exec: &str, icon: &str) -> String {
    DOCKED_ITEM_TEMPLATE
        .replace("{name}", name)
        .replace("{exec}", exec)
        .replace("{icon}", icon)
}

/// Outcome of a best-effort scratch set removal. Only observability reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<CleanupFailureDto>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn log_summary(&self, base: &Path) {
        if self.is_clean() {
            tracing::debug!(
                event = "scratch_set_removed",
                base = %base.display(),
                removed = self.removed.len()
            );
            return;
        }
        tracing::warn!(
            event = "scratch_set_remove_incomplete",
            base = %base.display(),
            removed = self.removed.len(),
            failed = self.failed.len(),
            failed_paths = self
                .failed
                .iter()
                .map(|item| item.path.as_str())
                .collect::<Vec<_>>()
                .join(" | ")
        );
    }
}

/// Owns the scratch directory where synthesized launchers live.
#[derive(Debug, Clone)]
pub struct ScratchStore {
    dir: PathBuf,
}

impl ScratchStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        self.dir.as_path()
    }

    pub fn contains(&self, file: &Path) -> bool {
        is_file_in_dir(file, self.dir.as_path())
    }

    /// Creates the scratch dir with its fixed mode. An existing dir keeps its permissions.
    pub fn ensure_dir(&self) -> AppResult<()> {
        if self.dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create scratch dir: {}", self.dir.display()))
            .with_code(
                DockErrorCode::ScratchDirCreateFailed.as_str(),
                "failed to create scratch directory",
            )
            .with_ctx("scratchDir", self.dir.display().to_string())?;
        set_mode(&self.dir, SCRATCH_DIR_MODE)
            .with_code(
                DockErrorCode::ScratchDirCreateFailed.as_str(),
                "failed to set scratch directory permissions",
            )
            .with_ctx("scratchDir", self.dir.display().to_string())
    }

    /// Writes `<dir>/<id>.desktop` from the fixed template. `id` must be filesystem-safe.
    pub fn create_launcher(
        &self,
        id: &str,
        title: &str,
        icon: &str,
        exec: &str,
    ) -> AppResult<PathBuf> {
        tracing::debug!(event = "scratch_launcher_create", id);
        self.ensure_dir()?;
        let file = self.dir.join(format!("{id}.{DESKTOP_EXT}"));
        let content = render_docked_item(title, exec, icon);
        fs::write(&file, content)
            .and_then(|_| set_mode(&file, DESKTOP_FILE_MODE))
            .with_context(|| format!("failed to write scratch launcher: {}", file.display()))
            .with_code(
                DockErrorCode::ScratchWriteFailed.as_str(),
                "failed to write scratch launcher",
            )
            .with_ctx("desktopFile", file.display().to_string())?;
        Ok(file)
    }

    /// Synthesizes the scratch set that lets `state` be docked.
    ///
    /// A known launcher is copied verbatim under its identity; a window-only entry
    /// gets an icon, a launch script and a descriptor built from its current window.
    pub fn create_scratch_set_for_entry(&self, state: &EntryState) -> AppResult<PathBuf> {
        self.ensure_dir()?;

        if let Some(info) = state.launcher_info.as_ref() {
            let source = info.file_path();
            let target = self.dir.join(format!("{}.{DESKTOP_EXT}", info.inner_id));
            fs::copy(source, &target)
                .and_then(|_| set_mode(&target, DESKTOP_FILE_MODE))
                .with_context(|| {
                    format!(
                        "failed to copy launcher {} to {}",
                        source.display(),
                        target.display()
                    )
                })
                .with_code(
                    DockErrorCode::ScratchCopyFailed.as_str(),
                    "failed to copy launcher into scratch directory",
                )
                .with_ctx("desktopFile", source.display().to_string())?;
            tracing::debug!(
                event = "scratch_launcher_copied",
                source = %source.display(),
                target = %target.display()
            );
            return Ok(target);
        }

        let window = state.current().ok_or_else(|| {
            dock_error(
                DockErrorCode::EntryWithoutSource,
                "entry has neither a launcher nor a window",
            )
            .with_context("innerId", state.inner_id.clone())
        })?;
        let app_id = window.inner_id.as_str();
        let title = window.title.as_str();

        let mut icon = window.icon.clone();
        if is_data_uri_image(&icon) {
            let icon_file = self.dir.join(format!("{app_id}.{ICON_EXT}"));
            match data_uri_to_png(&icon, &icon_file) {
                Ok(()) => icon = icon_file.to_string_lossy().to_string(),
                Err(error) => {
                    tracing::warn!(
                        event = "scratch_icon_materialize_failed",
                        app_id,
                        error = error.to_string()
                    );
                    icon.clear();
                }
            }
        }
        if icon.is_empty() {
            icon = DEFAULT_APP_ICON.to_string();
        }

        let script_file = self.dir.join(format!("{app_id}.{SCRIPT_EXT}"));
        fs::write(&script_file, state.exec())
            .and_then(|_| set_mode(&script_file, SCRIPT_FILE_MODE))
            .with_context(|| format!("failed to write launch script: {}", script_file.display()))
            .with_code(
                DockErrorCode::ScriptWriteFailed.as_str(),
                "failed to write launch script",
            )
            .with_ctx("scriptFile", script_file.display().to_string())?;
        let exec = format!("{} {FILE_ARG_PLACEHOLDER}", script_file.display());

        self.create_launcher(app_id, title, &icon, &exec)
    }

    /// Deletes every recognized sibling sharing `file`'s base name. Never fails.
    pub fn remove_scratch_set(&self, file: &Path) -> CleanupReport {
        let base = file.with_extension("");
        let mut report = CleanupReport::default();
        for ext in SCRATCH_EXTENSIONS {
            let mut candidate = OsString::from(base.as_os_str());
            candidate.push(".");
            candidate.push(ext);
            let candidate = PathBuf::from(candidate);
            match fs::remove_file(&candidate) {
                Ok(()) => {
                    tracing::debug!(event = "scratch_file_removed", path = %candidate.display());
                    report.removed.push(candidate);
                }
                Err(error) if error.kind() == io::ErrorKind::NotFound => {}
                Err(error) => {
                    tracing::warn!(
                        event = "scratch_file_remove_failed",
                        path = %candidate.display(),
                        error = error.to_string()
                    );
                    report.failed.push(CleanupFailureDto {
                        path: candidate.to_string_lossy().to_string(),
                        error: error.to_string(),
                    });
                }
            }
        }
        report.log_summary(&base);
        report
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "../tests/scratch/scratch_tests.rs"]
mod tests;
