use crate::identity::desktop_inner_id;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DESKTOP_EXT: &str = "desktop";
const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";

/// Resolved metadata of one launcher file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherInfo {
    pub file_path: PathBuf,
    pub inner_id: String,
    pub name: String,
    pub icon: String,
    pub exec: String,
    pub is_installed: bool,
    pub no_display: bool,
    pub terminal: bool,
}

impl LauncherInfo {
    pub fn file_path(&self) -> &Path {
        self.file_path.as_path()
    }
}

/// Turns a launcher path into metadata. `None` means the file is unusable.
pub trait LauncherResolver: Send + Sync {
    fn resolve(&self, path: &Path) -> Option<LauncherInfo>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopEntryFields {
    pub name: String,
    pub exec: String,
    pub icon: String,
    pub entry_type: String,
    pub no_display: bool,
    pub terminal: bool,
}

/// Reads the `[Desktop Entry]` group. Localized keys are ignored.
pub fn parse_desktop_entry(content: &str) -> Option<DesktopEntryFields> {
    let mut in_entry_group = false;
    let mut seen_entry_group = false;
    let mut values: HashMap<&str, String> = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(group) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            in_entry_group = group == DESKTOP_ENTRY_GROUP;
            seen_entry_group |= in_entry_group;
            continue;
        }
        if !in_entry_group {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.contains('[') {
            continue;
        }
        values
            .entry(key)
            .or_insert_with(|| unescape_value(value.trim()));
    }

    if !seen_entry_group {
        return None;
    }

    let exec = values.remove("Exec").unwrap_or_default();
    if exec.trim().is_empty() {
        return None;
    }

    Some(DesktopEntryFields {
        name: values.remove("Name").unwrap_or_default(),
        exec,
        icon: values.remove("Icon").unwrap_or_default(),
        entry_type: values.remove("Type").unwrap_or_default(),
        no_display: values.get("NoDisplay").is_some_and(|value| is_true(value)),
        terminal: values.get("Terminal").is_some_and(|value| is_true(value)),
    })
}

fn is_true(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn unescape_value(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            output.push(ch);
            continue;
        }
        match chars.next() {
            Some('s') => output.push(' '),
            Some('n') => output.push('\n'),
            Some('t') => output.push('\t'),
            Some('r') => output.push('\r'),
            Some('\\') => output.push('\\'),
            Some(other) => {
                output.push('\\');
                output.push(other);
            }
            None => output.push('\\'),
        }
    }
    output
}

pub fn has_desktop_ext(path: &Path) -> bool {
    path.extension()
        .and_then(|value| value.to_str())
        .is_some_and(|value| value.eq_ignore_ascii_case(DESKTOP_EXT))
}

/// Resolves `.desktop` files; files under `application_dirs` count as installed.
#[derive(Debug, Clone)]
pub struct DesktopFileResolver {
    application_dirs: Vec<PathBuf>,
}

impl DesktopFileResolver {
    pub fn new(application_dirs: Vec<PathBuf>) -> Self {
        Self { application_dirs }
    }

    pub fn application_dirs(&self) -> &[PathBuf] {
        &self.application_dirs
    }

    fn is_installed(&self, path: &Path) -> bool {
        self.application_dirs.iter().any(|dir| path.starts_with(dir))
    }
}

impl LauncherResolver for DesktopFileResolver {
    fn resolve(&self, path: &Path) -> Option<LauncherInfo> {
        if !has_desktop_ext(path) {
            tracing::debug!(event = "desktop_file_ext_rejected", path = %path.display());
            return None;
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => {
                tracing::debug!(
                    event = "desktop_file_read_failed",
                    path = %path.display(),
                    error = error.to_string()
                );
                return None;
            }
        };

        let Some(fields) = parse_desktop_entry(&content) else {
            tracing::debug!(event = "desktop_file_invalid", path = %path.display());
            return None;
        };

        Some(LauncherInfo {
            file_path: path.to_path_buf(),
            inner_id: desktop_inner_id(&fields.exec),
            name: fields.name,
            icon: fields.icon,
            exec: fields.exec,
            is_installed: self.is_installed(path),
            no_display: fields.no_display,
            terminal: fields.terminal,
        })
    }
}

#[cfg(test)]
#[path = "../tests/desktop_file/desktop_file_tests.rs"]
mod tests;
