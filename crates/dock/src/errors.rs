use crate::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockErrorCode {
    ConfigHomeMissing,
    ConfigReadFailed,
    ConfigParseFailed,
    ScratchDirCreateFailed,
    ScratchWriteFailed,
    ScratchCopyFailed,
    ScriptWriteFailed,
    IconWriteFailed,
    IconDecodeFailed,
    DesktopInvalid,
    EntryWithoutSource,
    EntryNotFound,
    DockedStoreReadFailed,
    DockedStoreWriteFailed,
}

impl DockErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConfigHomeMissing => "dock_config_home_missing",
            Self::ConfigReadFailed => "dock_config_read_failed",
            Self::ConfigParseFailed => "dock_config_parse_failed",
            Self::ScratchDirCreateFailed => "dock_scratch_dir_create_failed",
            Self::ScratchWriteFailed => "dock_scratch_write_failed",
            Self::ScratchCopyFailed => "dock_scratch_copy_failed",
            Self::ScriptWriteFailed => "dock_script_write_failed",
            Self::IconWriteFailed => "dock_icon_write_failed",
            Self::IconDecodeFailed => "dock_icon_decode_failed",
            Self::DesktopInvalid => "dock_desktop_invalid",
            Self::EntryWithoutSource => "dock_entry_without_source",
            Self::EntryNotFound => "dock_entry_not_found",
            Self::DockedStoreReadFailed => "dock_docked_store_read_failed",
            Self::DockedStoreWriteFailed => "dock_docked_store_write_failed",
        }
    }
}

pub(crate) fn dock_error(code: DockErrorCode, message: impl Into<String>) -> AppError {
    AppError::new(code.as_str(), message.into())
}

#[cfg(test)]
#[path = "../tests/errors/errors_tests.rs"]
mod tests;
