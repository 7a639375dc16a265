//! Inner identity tokens.
//!
//! Window-derived identities carry the `w:` prefix and launcher-derived ones `d:`.
//! Scratch launchers are named after the identity of their source, so the prefix
//! of a scratch file name tells how it was synthesized.

use std::path::Path;

pub const WINDOW_HASH_PREFIX: &str = "w:";
pub const DESKTOP_HASH_PREFIX: &str = "d:";

const HASH_HEX_LEN: usize = 32;

pub fn stable_hash(value: &str) -> String {
    let hash = blake3::hash(value.as_bytes());
    hash.to_hex().as_str()[..HASH_HEX_LEN].to_string()
}

pub fn desktop_inner_id(command_line: &str) -> String {
    format!("{DESKTOP_HASH_PREFIX}{}", stable_hash(command_line.trim()))
}

/// Prefers the window class; falls back to the command line when the class is unset.
pub fn window_inner_id(wm_class: &str, exec: &str) -> String {
    let wm_class = wm_class.trim();
    let source = if wm_class.is_empty() {
        exec.trim().to_string()
    } else {
        wm_class.to_ascii_lowercase()
    };
    format!("{WINDOW_HASH_PREFIX}{}", stable_hash(source.as_str()))
}

pub fn is_window_derived(file: &Path) -> bool {
    file.file_name()
        .and_then(|value| value.to_str())
        .is_some_and(|name| name.starts_with(WINDOW_HASH_PREFIX))
}

#[cfg(test)]
#[path = "../tests/identity/identity_tests.rs"]
mod tests;
