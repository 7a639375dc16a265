use super::*;

impl DockManager {
    /// Docks `entry`, synthesizing a scratch launcher when its launcher cannot be trusted.
    ///
    /// The entry lock is held exclusively for the whole transition; nothing is
    /// committed until synthesis and resolution have both succeeded.
    pub fn dock(&self, entry: &AppEntry) -> AppResult<DockOutcome> {
        self.dock_with(entry, None)
    }

    /// Like [`DockManager::dock`], with `offered` standing in for a missing launcher.
    /// The offer is committed only if the dock succeeds.
    pub(super) fn dock_with(
        &self,
        entry: &AppEntry,
        offered: Option<LauncherInfo>,
    ) -> AppResult<DockOutcome> {
        let mut state = entry.write();
        if state.is_docked {
            tracing::debug!(event = "dock_already_docked", entry_id = entry.id());
            return Ok(DockOutcome::AlreadyDocked);
        }

        let staged = match offered {
            Some(info) if state.launcher_info.is_none() => {
                let mut staged = state.clone();
                staged.set_launcher_info(Some(Arc::new(info)));
                Some(staged)
            }
            _ => None,
        };

        let synthesized = {
            let source: &EntryState = staged.as_ref().unwrap_or(&*state);
            if needs_scratch(source.launcher_info.as_deref(), self.scratch.dir()) {
                let file = self.scratch.create_scratch_set_for_entry(source)?;
                let Some(info) = self.resolver.resolve(&file) else {
                    self.scratch.remove_scratch_set(&file);
                    return Err(dock_error(
                        DockErrorCode::DesktopInvalid,
                        "synthesized launcher could not be resolved",
                    )
                    .with_context("desktopFile", file.display().to_string()));
                };
                Some(info)
            } else {
                None
            }
        };

        match (synthesized, staged) {
            (Some(info), _) => {
                state.inner_id = info.inner_id.clone();
                state.set_launcher_info(Some(Arc::new(info)));
            }
            (None, Some(staged)) => state.set_launcher_info(staged.launcher_info),
            (None, None) => {}
        }

        state.is_docked = true;
        state.refresh_display();
        tracing::info!(
            event = "entry_docked",
            entry_id = entry.id(),
            inner_id = state.inner_id.as_str(),
            desktop = ?state.desktop_file()
        );
        Ok(DockOutcome::Docked)
    }

    /// Undocks `entry` in two phases: inspection and scratch cleanup under the
    /// shared lock, then the field commit under the exclusive lock.
    pub fn undock(&self, entry: &AppEntry) -> UndockOutcome {
        let (desktop_file, scratch_backed, has_window) = {
            let state = entry.read();
            if !state.is_docked {
                tracing::warn!(event = "undock_not_docked", entry_id = entry.id());
                return UndockOutcome::NotDocked;
            }
            let Some(desktop_file) = state.desktop_file().map(Path::to_path_buf) else {
                tracing::warn!(event = "undock_missing_launcher", entry_id = entry.id());
                return UndockOutcome::MissingLauncher;
            };
            let scratch_backed = self.scratch.contains(&desktop_file);
            if scratch_backed {
                self.scratch.remove_scratch_set(&desktop_file);
            }
            (desktop_file, scratch_backed, state.has_window())
        };

        if !has_window && self.remove_windowless(entry) {
            return UndockOutcome::Removed;
        }

        let window_derived = is_window_derived(&desktop_file);
        let identified = if scratch_backed && !window_derived {
            let window = entry.read().current().cloned();
            window.map(|window| self.identifier.identify_window(&window))
        } else {
            None
        };

        let still_has_window = {
            let mut state = entry.write();
            if !state.is_docked {
                tracing::debug!(event = "undock_raced", entry_id = entry.id());
                return UndockOutcome::NotDocked;
            }
            if scratch_backed {
                match identified {
                    Some((inner_id, info)) => {
                        tracing::debug!(
                            event = "entry_reidentified",
                            entry_id = entry.id(),
                            inner_id = inner_id.as_str(),
                            matched_launcher = info.is_some()
                        );
                        state.inner_id = inner_id;
                        state.set_launcher_info(info.map(Arc::new));
                    }
                    None => make_window_only(&mut state),
                }
            }
            state.is_docked = false;
            state.refresh_display();
            state.has_window()
        };

        if !still_has_window && self.remove_windowless(entry) {
            return UndockOutcome::Removed;
        }

        tracing::info!(
            event = "entry_undocked",
            entry_id = entry.id(),
            scratch_backed,
            desktop = %desktop_file.display()
        );
        UndockOutcome::Undocked
    }

    /// Drops `entry` if it still has no window and no pending dock under the collection lock.
    fn remove_windowless(&self, entry: &AppEntry) -> bool {
        let removable = |state: &EntryState| !state.has_window() && state.pending_docks == 0;
        if !self.entries.remove_if(entry.id(), removable) {
            return false;
        }
        let mut state = entry.write();
        state.is_docked = false;
        state.refresh_display();
        tracing::info!(
            event = "entry_removed",
            entry_id = entry.id(),
            inner_id = state.inner_id.as_str()
        );
        true
    }
}

/// Falls back to the current window's identity and drops the launcher.
fn make_window_only(state: &mut EntryState) {
    if let Some(inner_id) = state.current().map(|window| window.inner_id.clone()) {
        state.inner_id = inner_id;
    }
    state.set_launcher_info(None);
}
