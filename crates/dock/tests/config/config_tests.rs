use super::*;
use crate::test_support::TempRoot;

fn env_with_home(home: &Path) -> ConfigEnv {
    ConfigEnv {
        home: Some(home.to_path_buf()),
        config_file: Some(home.join("missing-config.json")),
        ..ConfigEnv::default()
    }
}

#[test]
fn resolve_should_derive_xdg_defaults_from_home() {
    let root = TempRoot::new("config-defaults");
    let config = DockConfig::resolve_from(&env_with_home(root.path())).expect("resolve config");

    assert_eq!(config.scratch_dir, root.join(".config/dock/scratch"));
    assert_eq!(
        config.user_applications_dir,
        root.join(".local/share/applications")
    );
    assert_eq!(
        config.system_applications_dirs,
        vec![
            PathBuf::from("/usr/local/share/applications"),
            PathBuf::from("/usr/share/applications"),
        ]
    );
    assert_eq!(
        config.docked_store_path,
        root.join(".config/dock/docked-apps.json")
    );
    assert_eq!(config.application_dirs()[0], config.user_applications_dir);
}

#[test]
fn resolve_should_fail_without_home() {
    let error = DockConfig::resolve_from(&ConfigEnv::default()).expect_err("home is required");
    assert_eq!(error.code, DockErrorCode::ConfigHomeMissing.as_str());
}

#[test]
fn resolve_should_honor_xdg_data_dirs_and_env_overrides() {
    let root = TempRoot::new("config-env");
    let env = ConfigEnv {
        xdg_data_dirs: Some("/opt/share: :/srv/share".to_string()),
        scratch_dir: Some(root.join("scratch")),
        state_file: Some(root.join("state.json")),
        ..env_with_home(root.path())
    };
    let config = DockConfig::resolve_from(&env).expect("resolve config");

    assert_eq!(
        config.system_applications_dirs,
        vec![
            PathBuf::from("/opt/share/applications"),
            PathBuf::from("/srv/share/applications"),
        ]
    );
    assert_eq!(config.scratch_dir, root.join("scratch"));
    assert_eq!(config.docked_store_path, root.join("state.json"));
}

#[test]
fn resolve_should_apply_json_overrides() {
    let root = TempRoot::new("config-file");
    let config_file = root.join("config.json");
    fs::write(
        &config_file,
        r#"{"scratchDir": "/var/tmp/dock-scratch", "dataDir": "/var/tmp/dockd"}"#,
    )
    .expect("write config file");
    let env = ConfigEnv {
        config_file: Some(config_file),
        ..env_with_home(root.path())
    };

    let config = DockConfig::resolve_from(&env).expect("resolve config");
    assert_eq!(config.scratch_dir, PathBuf::from("/var/tmp/dock-scratch"));
    assert_eq!(config.data_dir, PathBuf::from("/var/tmp/dockd"));
    assert_eq!(
        config.user_applications_dir,
        root.join(".local/share/applications")
    );
}

#[test]
fn resolve_should_report_malformed_config() {
    let root = TempRoot::new("config-bad");
    let config_file = root.join("config.json");
    fs::write(&config_file, "{not json").expect("write config file");
    let env = ConfigEnv {
        config_file: Some(config_file),
        ..env_with_home(root.path())
    };

    let error = DockConfig::resolve_from(&env).expect_err("malformed config");
    assert_eq!(error.code, DockErrorCode::ConfigParseFailed.as_str());
    assert!(error.context_value("configFile").is_some());
}
