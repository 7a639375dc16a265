use crate::AppResult;
use crate::manager::{DockManager, DockOutcome, UndockOutcome};
use dock_kernel::runtime::run_blocking;
use std::path::PathBuf;
use std::sync::Arc;

/// Async facade: every call runs the blocking file I/O on the blocking pool.
#[derive(Clone)]
pub struct DockService {
    manager: Arc<DockManager>,
}

impl DockService {
    pub fn new(manager: Arc<DockManager>) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &Arc<DockManager> {
        &self.manager
    }

    pub async fn request_dock(&self, desktop_file: PathBuf, index: i32) -> AppResult<bool> {
        let manager = Arc::clone(&self.manager);
        run_blocking("dock_request_dock", move || {
            manager.request_dock(&desktop_file, index)
        })
        .await
    }

    pub async fn request_undock(&self, desktop_file: PathBuf) -> AppResult<bool> {
        let manager = Arc::clone(&self.manager);
        run_blocking("dock_request_undock", move || {
            manager.request_undock(&desktop_file)
        })
        .await
    }

    pub async fn dock_entry(&self, id: String) -> AppResult<DockOutcome> {
        let manager = Arc::clone(&self.manager);
        run_blocking("dock_dock_entry", move || manager.dock_entry(&id)).await
    }

    pub async fn undock_entry(&self, id: String) -> AppResult<UndockOutcome> {
        let manager = Arc::clone(&self.manager);
        run_blocking("dock_undock_entry", move || manager.undock_entry(&id)).await
    }

    pub async fn restore_docked_apps(&self) -> AppResult<usize> {
        let manager = Arc::clone(&self.manager);
        run_blocking("dock_restore_docked_apps", move || {
            manager.restore_docked_apps()
        })
        .await
    }

    pub async fn save_docked_apps(&self) -> AppResult<()> {
        let manager = Arc::clone(&self.manager);
        run_blocking("dock_save_docked_apps", move || manager.save_docked_apps()).await
    }
}

#[cfg(test)]
#[path = "../tests/service/service_tests.rs"]
mod tests;
