use super::*;

impl DockManager {
    /// Docks the launcher at `desktop_file`, tracking a new entry at `index` if needed.
    ///
    /// Returns `false` when it was already docked.
    pub fn request_dock(&self, desktop_file: &Path, index: i32) -> AppResult<bool> {
        let info = self.resolve_launcher(desktop_file)?;
        let fresh = info.clone();
        let (entry, created) = self.entries.upsert_where(
            |state| state.inner_id == info.inner_id,
            index,
            || AppEntry::new(fresh.inner_id.clone(), Some(fresh)),
            |state, _| state.pending_docks += 1,
        );

        let result = self.dock_with(&entry, Some(info));
        self.release_pin(&entry);
        match result {
            Ok(DockOutcome::Docked) => {
                self.persist();
                Ok(true)
            }
            Ok(DockOutcome::AlreadyDocked) => Ok(false),
            Err(error) => {
                tracing::warn!(
                    event = "request_dock_failed",
                    desktop = %desktop_file.display(),
                    created,
                    error_code = error.code.as_str(),
                    error = error.to_string()
                );
                Err(error)
            }
        }
    }

    /// Undocks whichever docked entry is backed by `desktop_file`. Returns whether one was.
    pub fn request_undock(&self, desktop_file: &Path) -> AppResult<bool> {
        let Some(entry) = self.find_docked(desktop_file) else {
            tracing::debug!(event = "request_undock_not_docked", desktop = %desktop_file.display());
            return Ok(false);
        };
        let outcome = self.undock(&entry);
        self.persist();
        Ok(outcome.changed())
    }

    pub fn is_docked(&self, desktop_file: &Path) -> bool {
        self.find_docked(desktop_file).is_some()
    }

    pub fn dock_entry(&self, id: &str) -> AppResult<DockOutcome> {
        let entry = self
            .entries
            .update(id, |state| state.pending_docks += 1)
            .ok_or_else(|| entry_not_found(id))?;
        let result = self.dock(&entry);
        self.release_pin(&entry);
        let outcome = result?;
        if outcome == DockOutcome::Docked {
            self.persist();
        }
        Ok(outcome)
    }

    pub fn undock_entry(&self, id: &str) -> AppResult<UndockOutcome> {
        let entry = self.require_entry(id)?;
        let outcome = self.undock(&entry);
        self.persist();
        Ok(outcome)
    }

    /// Matches by launcher path first; a launcher that was copied into the scratch
    /// dir on dock is still found through its identity.
    fn find_docked(&self, desktop_file: &Path) -> Option<Arc<AppEntry>> {
        if let Some(entry) = self.entries.get_docked_by_desktop_file(desktop_file) {
            return Some(entry);
        }
        let info = self.resolver.resolve(desktop_file)?;
        self.entries
            .get_by_inner_id(&info.inner_id)
            .filter(|entry| entry.read().is_docked)
    }

    /// Drops one pending-dock pin; an entry left with nothing keeping it is untracked.
    pub(super) fn release_pin(&self, entry: &AppEntry) {
        let disposable = {
            let mut state = entry.write();
            state.pending_docks = state.pending_docks.saturating_sub(1);
            state.is_disposable()
        };
        if disposable && self.entries.remove_if(entry.id(), EntryState::is_disposable) {
            tracing::debug!(event = "entry_removed_after_dock", entry_id = entry.id());
        }
    }
}
