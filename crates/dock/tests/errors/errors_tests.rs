use super::*;

#[test]
fn codes_should_be_prefixed() {
    assert_eq!(
        DockErrorCode::EntryWithoutSource.as_str(),
        "dock_entry_without_source"
    );
    assert_eq!(
        DockErrorCode::DockedStoreWriteFailed.as_str(),
        "dock_docked_store_write_failed"
    );
}

#[test]
fn dock_error_should_carry_code_and_message() {
    let error = dock_error(DockErrorCode::EntryNotFound, "dock entry not found")
        .with_context("entryId", "e1");
    assert_eq!(error.code, "dock_entry_not_found");
    assert_eq!(error.message, "dock entry not found");
    assert_eq!(error.context_value("entryId"), Some("e1"));
}
