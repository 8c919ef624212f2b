use std::env;
use std::path::PathBuf;

use stackselect::settings::{self, AppSettings};
use tempfile::TempDir;

#[test]
fn profile_dir_round_trips_through_the_settings_file() {
    let workspace = TempDir::new().expect("failed to create temp workspace");
    env::set_var(settings::HOME_ENV_VAR, workspace.path());

    // A fresh workspace has no settings file yet.
    let settings_before = settings::load_or_default().unwrap();
    assert!(settings_before.profile_dir.is_none());

    let configured = AppSettings {
        profile_dir: Some(PathBuf::from("/srv/deploy/configs")),
    };
    settings::save(&configured).unwrap();
    assert!(
        workspace.path().join(settings::SETTINGS_FILE_NAME).exists(),
        "save should create the settings file under the workspace root"
    );

    let reloaded = settings::load_or_default().unwrap();
    assert_eq!(
        reloaded.profile_dir,
        Some(PathBuf::from("/srv/deploy/configs"))
    );

    // The persisted directory feeds profile-dir resolution when nothing
    // overrides it.
    if env::var(settings::CONFIG_DIR_ENV_VAR).is_err() {
        let dir = settings::resolve_profile_dir(None, &reloaded);
        assert_eq!(dir, PathBuf::from("/srv/deploy/configs"));
    }

    env::remove_var(settings::HOME_ENV_VAR);
}
