use super::*;
use anyhow::Context as _;
use std::io;

#[test]
fn from_anyhow_should_downcast_app_error() {
    let app_error = AppError::new("dock_scratch_write_failed", "failed to write scratch launcher")
        .with_cause("disk full")
        .with_context("desktopFile", "/tmp/foo.desktop");
    let restored = AppError::from_anyhow(anyhow::Error::new(app_error));

    assert_eq!(restored.code, "dock_scratch_write_failed");
    assert_eq!(restored.context_value("desktopFile"), Some("/tmp/foo.desktop"));
    assert_eq!(restored.causes, vec!["disk full".to_string()]);
}

#[test]
fn from_anyhow_should_collect_context_chain() {
    let result: anyhow::Result<()> = (|| {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        Err::<(), io::Error>(io_err).context("write scratch file")?;
        Ok(())
    })();

    let error = AppError::from_anyhow(result.expect_err("should fail"));
    assert_eq!(error.code, DEFAULT_CODE);
    assert!(error.causes.iter().any(|cause| cause == "write scratch file"));
    assert!(error.causes.iter().any(|cause| cause == "permission denied"));
}

#[test]
fn with_source_should_capture_chain_and_type() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file missing");
    let error = AppError::new("io_error", "I/O failed").with_source(io_err);

    assert!(
        error
            .context_value("sourceType")
            .is_some_and(|value| value.contains("std::io"))
    );
    assert_eq!(error.context_value("sourceChainDepth"), Some("1"));
    assert!(error.causes.iter().any(|cause| cause.contains("file missing")));
}

#[test]
fn result_ext_should_override_code_and_append_context() {
    let result: Result<(), io::Error> = Err(io::Error::other("boom"));
    let error = result
        .with_code("dock_script_write_failed", "failed to write launch script")
        .with_ctx("scriptFile", "/tmp/w:abc.sh")
        .expect_err("should fail");

    assert_eq!(error.code, "dock_script_write_failed");
    assert_eq!(error.message, "failed to write launch script");
    assert_eq!(error.context_value("scriptFile"), Some("/tmp/w:abc.sh"));
}

#[test]
fn with_cause_should_skip_blank_text() {
    let error = AppError::new("x", "y").with_cause("  ").with_cause("real");
    assert_eq!(error.causes, vec!["real".to_string()]);
}

#[test]
fn serialize_should_flatten_payload() {
    let error = AppError::new("dock_entry_not_found", "entry not found").with_context("id", "e1");
    let value = serde_json::to_value(&error).expect("serialize app error");
    assert_eq!(value["code"], "dock_entry_not_found");
    assert_eq!(value["context"][0]["key"], "id");
    assert!(value.get("causes").is_none());
}
