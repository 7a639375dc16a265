use crate::desktop_file::LauncherInfo;
use crate::icon::DEFAULT_APP_ICON;
use crate::models::{DockEntryDto, MenuItemDto};
use crate::window::WindowInfo;
use dock_kernel::sync::{read_lock, write_lock};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub const MENU_ID_LAUNCH: &str = "launch";
pub const MENU_ID_DOCK: &str = "dock";
pub const MENU_ID_UNDOCK: &str = "undock";
pub const MENU_ID_CLOSE_ALL: &str = "close_all";

/// One tracked application. Mutable fields sit behind a per-entry lock.
#[derive(Debug)]
pub struct AppEntry {
    id: String,
    state: RwLock<EntryState>,
}

#[derive(Debug, Clone, Default)]
pub struct EntryState {
    pub inner_id: String,
    pub is_docked: bool,
    pub launcher_info: Option<Arc<LauncherInfo>>,
    pub current_window: Option<u32>,
    pub windows: BTreeMap<u32, WindowInfo>,
    pub name: String,
    pub icon: String,
    pub menu: Vec<MenuItemDto>,
    /// Dock requests in flight; a pinned entry is never dropped from the tracked set.
    pub pending_docks: u32,
}

impl AppEntry {
    pub fn new(inner_id: impl Into<String>, launcher_info: Option<LauncherInfo>) -> Self {
        let mut state = EntryState {
            inner_id: inner_id.into(),
            launcher_info: launcher_info.map(Arc::new),
            ..EntryState::default()
        };
        state.refresh_display();
        Self {
            id: format!("e{}", uuid::Uuid::new_v4().simple()),
            state: RwLock::new(state),
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, EntryState> {
        read_lock(&self.state, "dock_entry")
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, EntryState> {
        write_lock(&self.state, "dock_entry")
    }

    pub fn snapshot(&self) -> DockEntryDto {
        self.read().to_dto(self.id.as_str())
    }
}

impl EntryState {
    pub fn current(&self) -> Option<&WindowInfo> {
        self.current_window
            .and_then(|xid| self.windows.get(&xid))
            .or_else(|| self.windows.values().next())
    }

    pub fn has_window(&self) -> bool {
        !self.windows.is_empty()
    }

    /// Neither docked, windowed nor pinned: nothing keeps the entry alive.
    pub fn is_disposable(&self) -> bool {
        !self.is_docked && !self.has_window() && self.pending_docks == 0
    }

    pub fn set_launcher_info(&mut self, info: Option<Arc<LauncherInfo>>) {
        self.launcher_info = info;
    }

    pub fn desktop_file(&self) -> Option<&std::path::Path> {
        self.launcher_info.as_deref().map(LauncherInfo::file_path)
    }

    /// Launch command: the launcher's Exec, else the current window's command line.
    pub fn exec(&self) -> String {
        if let Some(info) = self.launcher_info.as_ref() {
            return info.exec.clone();
        }
        self.current()
            .map(|window| window.exec.clone())
            .unwrap_or_default()
    }

    pub fn attach_window(&mut self, window: WindowInfo) {
        let xid = window.xid;
        self.windows.insert(xid, window);
        self.current_window = Some(xid);
    }

    /// Returns whether the window belonged to this entry.
    pub fn detach_window(&mut self, xid: u32) -> bool {
        if self.windows.remove(&xid).is_none() {
            return false;
        }
        if self.current_window == Some(xid) {
            self.current_window = self.windows.keys().next_back().copied();
        }
        true
    }

    pub fn update_name(&mut self) {
        let launcher_name = self
            .launcher_info
            .as_ref()
            .map(|info| info.name.trim())
            .filter(|name| !name.is_empty());
        self.name = match launcher_name {
            Some(name) => name.to_string(),
            None => self
                .current()
                .map(|window| window.title.trim())
                .filter(|title| !title.is_empty())
                .unwrap_or(self.inner_id.as_str())
                .to_string(),
        };
    }

    pub fn update_icon(&mut self) {
        let launcher_icon = self
            .launcher_info
            .as_ref()
            .map(|info| info.icon.as_str())
            .filter(|icon| !icon.is_empty());
        self.icon = launcher_icon
            .or_else(|| {
                self.current()
                    .map(|window| window.icon.as_str())
                    .filter(|icon| !icon.is_empty())
            })
            .unwrap_or(DEFAULT_APP_ICON)
            .to_string();
    }

    pub fn update_menu(&mut self) {
        let dock_item = if self.is_docked {
            menu_item(MENU_ID_UNDOCK, "Undock", true)
        } else {
            menu_item(MENU_ID_DOCK, "Dock", true)
        };
        self.menu = vec![
            menu_item(MENU_ID_LAUNCH, "Open", true),
            dock_item,
            menu_item(MENU_ID_CLOSE_ALL, "Close All", self.has_window()),
        ];
    }

    pub fn refresh_display(&mut self) {
        self.update_name();
        self.update_icon();
        self.update_menu();
    }

    pub fn to_dto(&self, id: &str) -> DockEntryDto {
        DockEntryDto {
            id: id.to_string(),
            inner_id: self.inner_id.clone(),
            name: self.name.clone(),
            icon: self.icon.clone(),
            is_docked: self.is_docked,
            desktop_file: self
                .desktop_file()
                .map(|path| path.to_string_lossy().to_string()),
            window_ids: self.windows.keys().copied().collect(),
            current_window: self.current().map(|window| window.xid),
            menu: self.menu.clone(),
        }
    }
}

fn menu_item(id: &str, label: &str, enabled: bool) -> MenuItemDto {
    MenuItemDto {
        id: id.to_string(),
        label: label.to_string(),
        enabled,
    }
}

#[cfg(test)]
#[path = "../tests/entry/entry_tests.rs"]
mod tests;
