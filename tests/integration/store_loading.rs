use stackselect::{LoadError, LoadWarning};

use crate::support::ProfileDirFixture;

#[test]
fn duplicate_names_keep_the_last_loaded_definition() {
    let fixture = ProfileDirFixture::new();
    fixture
        .write_profile(
            "a_first.yaml",
            "name: full_stack\ndescription: first definition\n",
        )
        .write_profile(
            "b_second.yaml",
            "name: full_stack\ndescription: second definition\n",
        );

    let (store, report) = fixture.load().unwrap();
    assert_eq!(store.len(), 1, "one record per name");
    assert_eq!(
        store.lookup("full_stack").unwrap().description.as_deref(),
        Some("second definition"),
        "later file wins"
    );
    assert!(
        report
            .warnings
            .iter()
            .any(|w| matches!(w, LoadWarning::DuplicateName { name, source }
                if name == "full_stack" && source == "b_second.yaml")),
        "duplicate should be reported: {:?}",
        report.warnings
    );
}

#[test]
fn disabled_profiles_are_invisible_to_lookup_and_listing() {
    let fixture = ProfileDirFixture::new();
    fixture
        .write_profile("active.yaml", "name: active\n")
        .write_profile("paused.yaml", "name: paused\nenabled: false\n");

    let (store, report) = fixture.load().unwrap();
    assert!(store.lookup("paused").is_none());
    assert_eq!(store.names(), vec!["active"]);
    assert!(report
        .warnings
        .contains(&LoadWarning::DisabledSkipped {
            name: "paused".into()
        }));
}

#[test]
fn one_broken_file_does_not_abort_the_batch() {
    let fixture = ProfileDirFixture::new();
    fixture
        .write_profile("broken.yaml", "name: [never closed\n")
        .write_profile("good.yaml", "name: good\n");

    let (store, report) = fixture.load().unwrap();
    assert_eq!(store.names(), vec!["good"]);
    assert!(report
        .warnings
        .iter()
        .any(|w| matches!(w, LoadWarning::ParseFailure { source, .. } if source == "broken.yaml")));
}

#[test]
fn all_sources_broken_is_fatal() {
    let fixture = ProfileDirFixture::new();
    fixture.write_profile("broken.yaml", "name: [never closed\n");

    let err = fixture.load().unwrap_err();
    assert!(matches!(err, LoadError::NoUsableProfiles));
}

#[test]
fn missing_profile_directory_is_fatal() {
    let fixture = ProfileDirFixture::new();
    let absent = fixture.workspace_path().join("nowhere");
    let err = stackselect::discovery::read_profile_dir(&absent).unwrap_err();
    assert!(matches!(err, LoadError::SourceDirectoryMissing { dir } if dir == absent));
}

#[test]
fn suspect_sizing_is_warned_about_but_loaded() {
    let fixture = ProfileDirFixture::new();
    fixture.write_profile(
        "sized.yaml",
        concat!(
            "name: sized\n",
            "cluster_config:\n",
            "  min_nodes: 6\n",
            "  desired_nodes: 4\n",
            "  max_nodes: 5\n",
            "  spot_enabled: true\n",
            "  spot_percentage: 140\n",
        ),
    );

    let (store, report) = fixture.load().unwrap();
    assert!(store.contains("sized"), "lenient loading keeps the record");
    assert!(report
        .warnings
        .iter()
        .any(|w| matches!(w, LoadWarning::ClusterBoundsSuspect { name, .. } if name == "sized")));
    assert!(report.warnings.iter().any(
        |w| matches!(w, LoadWarning::SpotPercentageOutOfRange { value: 140, .. })
    ));
}

#[test]
fn name_deployment_type_mismatch_is_flagged() {
    let fixture = ProfileDirFixture::new();
    fixture.write_profile("odd.yaml", "name: odd\ndeployment_type: something_else\n");

    let (store, report) = fixture.load().unwrap();
    // `name` stays the canonical index key.
    assert!(store.contains("odd"));
    assert!(store.lookup("something_else").is_none());
    assert!(report.warnings.iter().any(
        |w| matches!(w, LoadWarning::DeploymentTypeMismatch { name, declared }
            if name == "odd" && declared == "something_else")
    ));
}
