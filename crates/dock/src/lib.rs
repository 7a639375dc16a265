pub mod config;
pub mod desktop_file;
pub mod entries;
pub mod entry;
pub mod errors;
pub mod icon;
pub mod identity;
pub mod manager;
pub mod persistence;
pub mod provenance;
pub mod scratch;
pub mod service;
pub mod window;

pub use config::DockConfig;
pub use desktop_file::{DesktopFileResolver, LauncherInfo, LauncherResolver};
pub use entries::Entries;
pub use entry::{AppEntry, EntryState};
pub use manager::{DockManager, DockOutcome, UndockOutcome};
pub use persistence::{DockedStore, JsonDockedStore, PathCodec};
pub use scratch::{CleanupReport, ScratchStore};
pub use service::DockService;
pub use window::{WindowIdentifier, WindowInfo, WmClassIdentifier};

pub use protocol::models;
pub use protocol::{AppError, AppResult, ResultExt};

#[cfg(test)]
#[path = "../tests/support/mod.rs"]
pub(crate) mod test_support;
