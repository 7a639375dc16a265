use super::*;

impl DockManager {
    /// Encoded docked list as last saved or restored.
    pub fn docked_apps(&self) -> Vec<String> {
        lock_mutex(&self.docked_apps, "dock_docked_apps").clone()
    }

    /// Rebuilds the docked list from every tracked entry and replaces the stored one.
    pub fn save_docked_apps(&self) -> AppResult<()> {
        let list = rebuild_docked_list(&self.entries.snapshot(), &self.codec);
        self.store.save(&list)?;
        tracing::debug!(event = "docked_apps_saved", count = list.len());
        *lock_mutex(&self.docked_apps, "dock_docked_apps") = list;
        Ok(())
    }

    /// Recreates a docked entry for every stored launcher that still resolves.
    /// Returns how many entries were restored.
    pub fn restore_docked_apps(&self) -> AppResult<usize> {
        let stored = self.store.load()?;
        let mut restored = 0;
        for encoded in &stored {
            let desktop_file: PathBuf = self.codec.unzip(encoded);
            let Some(info) = self.resolver.resolve(&desktop_file) else {
                tracing::warn!(
                    event = "docked_app_unresolved",
                    encoded = encoded.as_str(),
                    desktop = %desktop_file.display()
                );
                continue;
            };
            let inner_id = info.inner_id.clone();
            let fresh = info.clone();
            let mut duplicate = false;
            let (entry, _) = self.entries.upsert_where(
                |state| state.inner_id == inner_id,
                APPEND_INDEX,
                || AppEntry::new(fresh.inner_id.clone(), Some(fresh)),
                |state, _| {
                    if state.is_docked {
                        duplicate = true;
                        return;
                    }
                    state.set_launcher_info(Some(Arc::new(info)));
                    state.is_docked = true;
                    state.refresh_display();
                },
            );
            if duplicate {
                tracing::debug!(
                    event = "docked_app_duplicate",
                    entry_id = entry.id(),
                    desktop = %desktop_file.display()
                );
                continue;
            }
            restored += 1;
        }

        let list = rebuild_docked_list(&self.entries.snapshot(), &self.codec);
        *lock_mutex(&self.docked_apps, "dock_docked_apps") = list;
        tracing::info!(
            event = "docked_apps_restored",
            stored = stored.len(),
            restored
        );
        Ok(restored)
    }

    /// Saves after a transition. A failed save never undoes the transition.
    pub(super) fn persist(&self) {
        if let Err(error) = self.save_docked_apps() {
            tracing::warn!(
                event = "docked_apps_save_failed",
                error_code = error.code.as_str(),
                error = error.to_string()
            );
        }
    }
}
