use super::*;
use std::path::PathBuf;

fn launcher(name: &str, icon: &str) -> LauncherInfo {
    LauncherInfo {
        file_path: PathBuf::from("/usr/share/applications/foo.desktop"),
        inner_id: "d:foo".to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        exec: "foo-bin %U".to_string(),
        is_installed: true,
        no_display: false,
        terminal: false,
    }
}

#[test]
fn new_entry_should_derive_display_from_launcher() {
    let entry = AppEntry::new("d:foo", Some(launcher("Foo", "foo")));
    let state = entry.read();
    assert_eq!(state.name, "Foo");
    assert_eq!(state.icon, "foo");
    assert_eq!(state.exec(), "foo-bin %U");
    assert!(entry.id().starts_with('e'));
}

#[test]
fn display_should_fall_back_to_window_then_defaults() {
    let entry = AppEntry::new("w:bar", None);
    {
        let state = entry.read();
        assert_eq!(state.name, "w:bar");
        assert_eq!(state.icon, DEFAULT_APP_ICON);
    }

    let mut state = entry.write();
    state.attach_window(WindowInfo::new(3, "Bar", "Bar Window", "bar-icon", "bar-bin"));
    state.refresh_display();
    assert_eq!(state.name, "Bar Window");
    assert_eq!(state.icon, "bar-icon");
    assert_eq!(state.exec(), "bar-bin");
}

#[test]
fn menu_should_follow_dock_state_and_windows() {
    let entry = AppEntry::new("d:foo", Some(launcher("Foo", "foo")));
    let mut state = entry.write();
    let ids = |state: &EntryState| {
        state
            .menu
            .iter()
            .map(|item| item.id.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&*state), vec![MENU_ID_LAUNCH, MENU_ID_DOCK, MENU_ID_CLOSE_ALL]);
    assert!(!state.menu[2].enabled);

    state.is_docked = true;
    state.attach_window(WindowInfo::new(1, "Foo", "t", "", "x"));
    state.update_menu();
    assert_eq!(ids(&*state), vec![MENU_ID_LAUNCH, MENU_ID_UNDOCK, MENU_ID_CLOSE_ALL]);
    assert!(state.menu[2].enabled);
}

#[test]
fn detach_window_should_move_current_to_remaining_window() {
    let entry = AppEntry::new("w:baz", None);
    let mut state = entry.write();
    state.attach_window(WindowInfo::new(1, "Baz", "one", "", "baz"));
    state.attach_window(WindowInfo::new(2, "Baz", "two", "", "baz"));
    assert_eq!(state.current().map(|window| window.xid), Some(2));

    assert!(state.detach_window(2));
    assert_eq!(state.current().map(|window| window.xid), Some(1));
    assert!(!state.detach_window(2));

    assert!(state.detach_window(1));
    assert!(!state.has_window());
    assert!(state.current().is_none());
}

#[test]
fn snapshot_should_expose_entry_fields() {
    let entry = AppEntry::new("d:foo", Some(launcher("Foo", "foo")));
    entry
        .write()
        .attach_window(WindowInfo::new(9, "Foo", "t", "", "x"));
    let dto = entry.snapshot();
    assert_eq!(dto.id, entry.id());
    assert_eq!(
        dto.desktop_file.as_deref(),
        Some("/usr/share/applications/foo.desktop")
    );
    assert_eq!(dto.window_ids, vec![9]);
    assert_eq!(dto.current_window, Some(9));
}

#[test]
fn entry_should_be_disposable_only_when_nothing_keeps_it() {
    let entry = AppEntry::new("d:foo", Some(launcher("Foo", "foo")));
    let mut state = entry.write();
    assert!(state.is_disposable());

    state.pending_docks = 1;
    assert!(!state.is_disposable());
    state.pending_docks = 0;

    state.attach_window(WindowInfo::new(1, "Foo", "Foo", "", "foo-bin"));
    assert!(!state.is_disposable());
    state.detach_window(1);

    state.is_docked = true;
    assert!(!state.is_disposable());
}
