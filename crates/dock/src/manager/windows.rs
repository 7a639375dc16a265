use super::*;

impl DockManager {
    /// Tracks a newly mapped window, joining the entry it belongs to or creating one.
    ///
    /// The window is attached before the collection lock is released, so a
    /// concurrent detach can never drop the entry it lands in.
    pub fn attach_window(&self, window: WindowInfo) -> Arc<AppEntry> {
        let xid = window.xid;
        let known = self.entries.update_where(
            |_, state| state.windows.contains_key(&xid),
            |state| {
                state.attach_window(window.clone());
                state.refresh_display();
            },
        );
        if let Some(entry) = known {
            return entry;
        }

        let (identity, info) = self.identifier.identify_window(&window);
        let seed = info.clone();
        let (entry, created) = self.entries.upsert_where(
            |state| state.inner_id == identity || self.is_scratch_launcher_of(state, &identity),
            APPEND_INDEX,
            || AppEntry::new(identity.clone(), seed),
            |state, created| {
                if !created
                    && state.launcher_info.is_none()
                    && let Some(info) = info
                {
                    state.set_launcher_info(Some(Arc::new(info)));
                }
                state.attach_window(window);
                state.refresh_display();
            },
        );
        tracing::debug!(event = "window_attached", xid, entry_id = entry.id(), created);
        entry
    }

    /// Forgets a closed window. An undocked entry left without windows is dropped.
    pub fn detach_window(&self, xid: u32) -> bool {
        let Some(entry) = self.entries.update_where(
            |_, state| state.windows.contains_key(&xid),
            |state| {
                state.detach_window(xid);
                state.refresh_display();
            },
        ) else {
            return false;
        };
        let disposable = entry.read().is_disposable();
        if disposable && self.entries.remove_if(entry.id(), EntryState::is_disposable) {
            tracing::debug!(event = "entry_removed_last_window", entry_id = entry.id(), xid);
        }
        true
    }

    /// A docked window-only entry carries its launcher's identity, but its scratch
    /// file is still named after the window.
    fn is_scratch_launcher_of(&self, state: &EntryState, identity: &str) -> bool {
        state.desktop_file().is_some_and(|file| {
            self.scratch.contains(file)
                && file.file_stem().and_then(|stem| stem.to_str()) == Some(identity)
        })
    }
}
