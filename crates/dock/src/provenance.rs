use crate::desktop_file::LauncherInfo;
use std::path::Path;

/// True only when `file`'s immediate parent is `dir`; subdirectories do not count.
pub fn is_file_in_dir(file: &Path, dir: &Path) -> bool {
    file.parent().is_some_and(|parent| parent == dir)
}

/// Whether docking needs a synthesized launcher. Only installed launchers and
/// launchers already living in the scratch dir are trusted as-is.
pub fn needs_scratch(info: Option<&LauncherInfo>, scratch_dir: &Path) -> bool {
    let Some(info) = info else {
        tracing::debug!(event = "needs_scratch", reason = "launcher_missing", result = true);
        return true;
    };
    if info.is_installed {
        tracing::debug!(event = "needs_scratch", reason = "installed", result = false);
        return false;
    }
    if is_file_in_dir(info.file_path(), scratch_dir) {
        tracing::debug!(event = "needs_scratch", reason = "in_scratch_dir", result = false);
        return false;
    }
    tracing::debug!(
        event = "needs_scratch",
        reason = "untrusted_location",
        result = true,
        desktop = %info.file_path().display()
    );
    true
}

#[cfg(test)]
#[path = "../tests/provenance/provenance_tests.rs"]
mod tests;
