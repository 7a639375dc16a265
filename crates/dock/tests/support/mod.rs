use std::fs;
use std::path::{Path, PathBuf};

/// Unique temp directory removed on drop.
pub(crate) struct TempRoot {
    path: PathBuf,
}

impl TempRoot {
    pub(crate) fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!("dockd-{label}-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&path).expect("failed to create temp root");
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

pub(crate) fn write_desktop_file(dir: &Path, file_name: &str, name: &str, exec: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("failed to create desktop dir");
    let path = dir.join(file_name);
    let content = format!(
        "[Desktop Entry]\nName={name}\nExec={exec}\nIcon={icon}\nType=Application\n",
        icon = name.to_ascii_lowercase()
    );
    fs::write(&path, content).expect("failed to write desktop file");
    path
}
