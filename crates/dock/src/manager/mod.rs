use crate::config::DockConfig;
use crate::desktop_file::{DesktopFileResolver, LauncherInfo, LauncherResolver};
use crate::entries::Entries;
use crate::entry::{AppEntry, EntryState};
use crate::errors::{DockErrorCode, dock_error};
use crate::identity::is_window_derived;
use crate::models::DockEntryDto;
use crate::persistence::{DockedStore, JsonDockedStore, PathCodec, rebuild_docked_list};
use crate::provenance::needs_scratch;
use crate::scratch::ScratchStore;
use crate::window::{WindowIdentifier, WindowInfo, WmClassIdentifier};
use crate::{AppError, AppResult};
use dock_kernel::sync::lock_mutex;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

mod api;
mod persist;
mod transition;
mod windows;

const APPEND_INDEX: i32 = -1;

/// Result of a dock transition. `AlreadyDocked` is an observation, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockOutcome {
    Docked,
    AlreadyDocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndockOutcome {
    /// The entry stays tracked as window-only.
    Undocked,
    /// No window was left, so the entry was dropped from the tracked set.
    Removed,
    NotDocked,
    MissingLauncher,
}

impl UndockOutcome {
    pub fn changed(self) -> bool {
        matches!(self, Self::Undocked | Self::Removed)
    }
}

/// Owns the tracked entries and drives their dock lifecycle.
pub struct DockManager {
    scratch: ScratchStore,
    codec: PathCodec,
    resolver: Arc<dyn LauncherResolver>,
    identifier: Arc<dyn WindowIdentifier>,
    store: Arc<dyn DockedStore>,
    entries: Entries,
    docked_apps: Mutex<Vec<String>>,
}

impl DockManager {
    pub fn new(
        config: &DockConfig,
        resolver: Arc<dyn LauncherResolver>,
        identifier: Arc<dyn WindowIdentifier>,
        store: Arc<dyn DockedStore>,
    ) -> Self {
        Self {
            scratch: ScratchStore::new(config.scratch_dir.clone()),
            codec: PathCodec::from_config(config),
            resolver,
            identifier,
            store,
            entries: Entries::new(),
            docked_apps: Mutex::new(Vec::new()),
        }
    }

    /// Desktop-file resolver, wm-class identifier and JSON store built from `config`.
    pub fn with_defaults(config: &DockConfig) -> Self {
        let application_dirs = config.application_dirs();
        let resolver: Arc<dyn LauncherResolver> =
            Arc::new(DesktopFileResolver::new(application_dirs.clone()));
        let identifier = Arc::new(WmClassIdentifier::new(
            application_dirs,
            Arc::clone(&resolver),
        ));
        let store = Arc::new(JsonDockedStore::new(config.docked_store_path.clone()));
        Self::new(config, resolver, identifier, store)
    }

    pub fn scratch(&self) -> &ScratchStore {
        &self.scratch
    }

    pub fn codec(&self) -> &PathCodec {
        &self.codec
    }

    pub fn entry(&self, id: &str) -> Option<Arc<AppEntry>> {
        self.entries.get(id)
    }

    pub fn entries_snapshot(&self) -> Vec<DockEntryDto> {
        self.entries
            .snapshot()
            .iter()
            .map(|entry| entry.snapshot())
            .collect()
    }

    fn require_entry(&self, id: &str) -> AppResult<Arc<AppEntry>> {
        self.entries.get(id).ok_or_else(|| entry_not_found(id))
    }

    fn resolve_launcher(&self, desktop_file: &Path) -> AppResult<LauncherInfo> {
        self.resolver.resolve(desktop_file).ok_or_else(|| {
            dock_error(DockErrorCode::DesktopInvalid, "launcher file is not usable")
                .with_context("desktopFile", desktop_file.display().to_string())
        })
    }
}

fn entry_not_found(id: &str) -> AppError {
    dock_error(DockErrorCode::EntryNotFound, "dock entry not found").with_context("entryId", id)
}

#[cfg(test)]
#[path = "../../tests/manager/manager_tests.rs"]
mod tests;
