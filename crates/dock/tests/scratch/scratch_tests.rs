use super::*;
use crate::desktop_file::{DesktopFileResolver, LauncherResolver};
use crate::entry::AppEntry;
use crate::test_support::{TempRoot, write_desktop_file};
use crate::window::WindowInfo;

#[test]
fn create_launcher_should_render_template() {
    let root = TempRoot::new("scratch-launcher");
    let store = ScratchStore::new(root.join("scratch"));

    let file = store
        .create_launcher("w:abc", "Title", "icon-name", "run-me %U")
        .expect("create launcher");

    assert_eq!(file, root.join("scratch").join("w:abc.desktop"));
    let content = fs::read_to_string(&file).expect("read launcher");
    assert!(content.starts_with("[Desktop Entry]\n"));
    assert!(content.contains("Name=Title\n"));
    assert!(content.contains("Exec=run-me %U\n"));
    assert!(content.contains("Icon=icon-name\n"));
    assert!(content.contains("Type=Application\n"));
}

#[cfg(unix)]
#[test]
fn create_launcher_should_apply_file_modes() {
    use std::os::unix::fs::PermissionsExt;

    let root = TempRoot::new("scratch-modes");
    let store = ScratchStore::new(root.join("scratch"));
    let file = store
        .create_launcher("w:abc", "Title", "icon", "exec")
        .expect("create launcher");

    let file_mode = fs::metadata(&file).expect("file meta").permissions().mode();
    let dir_mode = fs::metadata(store.dir()).expect("dir meta").permissions().mode();
    assert_eq!(file_mode & 0o777, 0o644);
    assert_eq!(dir_mode & 0o777, 0o755);
}

#[cfg(unix)]
#[test]
fn existing_scratch_dir_should_keep_its_mode() {
    use std::os::unix::fs::PermissionsExt;

    let root = TempRoot::new("scratch-existing");
    let dir = root.join("scratch");
    fs::create_dir_all(&dir).expect("create scratch dir");
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o700)).expect("chmod scratch dir");

    let store = ScratchStore::new(dir.clone());
    store
        .create_launcher("w:abc", "Title", "icon", "exec")
        .expect("create launcher");
    store.ensure_dir().expect("ensure dir");

    let dir_mode = fs::metadata(&dir).expect("dir meta").permissions().mode();
    assert_eq!(dir_mode & 0o777, 0o700);
}

#[test]
fn window_only_entry_should_synthesize_script_and_launcher() {
    let root = TempRoot::new("scratch-window");
    let store = ScratchStore::new(root.join("scratch"));
    let window = WindowInfo::new(9, "Foo", "Foo", "", "foo-bin");
    let app_id = window.inner_id.clone();
    let entry = AppEntry::new(app_id.clone(), None);
    entry.write().attach_window(window);

    let file = store
        .create_scratch_set_for_entry(&entry.read())
        .expect("create scratch set");

    let script = store.dir().join(format!("{app_id}.sh"));
    assert_eq!(file, store.dir().join(format!("{app_id}.desktop")));
    assert_eq!(fs::read_to_string(&script).expect("read script"), "foo-bin");

    let resolver = DesktopFileResolver::new(Vec::new());
    let info = resolver.resolve(&file).expect("synthesized launcher resolves");
    assert_eq!(info.name, "Foo");
    assert_eq!(info.icon, DEFAULT_APP_ICON);
    assert_eq!(info.exec, format!("{} %U", script.display()));
    assert!(!info.is_installed);
}

#[test]
fn launcher_entry_should_copy_source_verbatim() {
    let root = TempRoot::new("scratch-copy");
    let source = write_desktop_file(&root.join("downloads"), "tool.desktop", "Tool", "tool --x");
    let info = DesktopFileResolver::new(Vec::new())
        .resolve(&source)
        .expect("resolve source");
    let inner_id = info.inner_id.clone();
    let entry = AppEntry::new(inner_id.clone(), Some(info));
    let store = ScratchStore::new(root.join("scratch"));

    let file = store
        .create_scratch_set_for_entry(&entry.read())
        .expect("copy launcher");

    assert_eq!(file, store.dir().join(format!("{inner_id}.desktop")));
    assert_eq!(
        fs::read_to_string(&file).expect("read copy"),
        fs::read_to_string(&source).expect("read source")
    );
    assert!(!store.dir().join(format!("{inner_id}.sh")).exists());
}

#[test]
fn entry_without_source_should_fail() {
    let root = TempRoot::new("scratch-empty");
    let store = ScratchStore::new(root.join("scratch"));
    let entry = AppEntry::new("w:none", None);

    let error = store
        .create_scratch_set_for_entry(&entry.read())
        .expect_err("nothing to synthesize from");
    assert_eq!(error.code, DockErrorCode::EntryWithoutSource.as_str());
}

#[test]
fn remove_scratch_set_should_delete_siblings_and_tolerate_missing() {
    let root = TempRoot::new("scratch-remove");
    let store = ScratchStore::new(root.join("scratch"));
    store.ensure_dir().expect("ensure dir");
    for name in ["app1.desktop", "app1.sh", "app1.png", "app2.desktop"] {
        fs::write(store.dir().join(name), "x").expect("seed file");
    }

    let report = store.remove_scratch_set(&store.dir().join("app1.desktop"));
    assert!(report.is_clean());
    assert_eq!(report.removed.len(), 3);
    assert!(!store.dir().join("app1.sh").exists());
    assert!(store.dir().join("app2.desktop").exists());

    let again = store.remove_scratch_set(&store.dir().join("app1.desktop"));
    assert!(again.is_clean());
    assert!(again.removed.is_empty());
}

#[test]
fn contains_should_only_match_direct_children() {
    let store = ScratchStore::new("/tmp/dock-scratch");
    assert!(store.contains(Path::new("/tmp/dock-scratch/a.desktop")));
    assert!(!store.contains(Path::new("/tmp/dock-scratch/sub/a.desktop")));
}
