use crate::desktop_file::{DESKTOP_EXT, LauncherInfo, LauncherResolver};
use crate::identity::window_inner_id;
use std::path::PathBuf;
use std::sync::Arc;

/// Window facts handed over by the window-manager integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub xid: u32,
    pub inner_id: String,
    pub wm_class: String,
    pub title: String,
    pub icon: String,
    pub exec: String,
}

impl WindowInfo {
    pub fn new(
        xid: u32,
        wm_class: impl Into<String>,
        title: impl Into<String>,
        icon: impl Into<String>,
        exec: impl Into<String>,
    ) -> Self {
        let wm_class = wm_class.into();
        let exec = exec.into();
        Self {
            xid,
            inner_id: window_inner_id(&wm_class, &exec),
            wm_class,
            title: title.into(),
            icon: icon.into(),
            exec,
        }
    }
}

/// Maps a window to an identity token and, when one matches, a launcher.
pub trait WindowIdentifier: Send + Sync {
    fn identify_window(&self, window: &WindowInfo) -> (String, Option<LauncherInfo>);
}

/// Matches `<wm_class>.desktop` in the application dirs, falling back to the window identity.
pub struct WmClassIdentifier {
    application_dirs: Vec<PathBuf>,
    resolver: Arc<dyn LauncherResolver>,
}

impl WmClassIdentifier {
    pub fn new(application_dirs: Vec<PathBuf>, resolver: Arc<dyn LauncherResolver>) -> Self {
        Self {
            application_dirs,
            resolver,
        }
    }
}

impl WindowIdentifier for WmClassIdentifier {
    fn identify_window(&self, window: &WindowInfo) -> (String, Option<LauncherInfo>) {
        let wm_class = window.wm_class.trim().to_ascii_lowercase();
        if !wm_class.is_empty() && !wm_class.contains('/') {
            let file_name = format!("{wm_class}.{DESKTOP_EXT}");
            for dir in &self.application_dirs {
                let candidate = dir.join(file_name.as_str());
                if !candidate.is_file() {
                    continue;
                }
                if let Some(info) = self.resolver.resolve(&candidate) {
                    tracing::debug!(
                        event = "window_identified_by_wm_class",
                        xid = window.xid,
                        desktop = %candidate.display()
                    );
                    return (info.inner_id.clone(), Some(info));
                }
            }
        }
        (window.inner_id.clone(), None)
    }
}

#[cfg(test)]
#[path = "../tests/window/window_tests.rs"]
mod tests;
