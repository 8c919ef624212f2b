use std::fs;
use std::path::Path;

use stackselect::orchestration::{describe_stack, select_stack, SelectError};
use stackselect::view::StackFileStatus;
use stackselect::TenantConfigError;

use crate::support::{valid_tenant_yaml, ProfileDirFixture};

const FULL_STACK: &str = concat!(
    "name: full_stack\n",
    "description: Everything enabled\n",
    "stack_file: stacks/full_stack.hcl\n",
    "components: [network, cluster, registry]\n",
    "cluster_config:\n",
    "  min_nodes: 2\n",
    "  max_nodes: 8\n",
);

#[test]
fn select_packages_exports_in_stable_order() {
    let fixture = ProfileDirFixture::new();
    fixture.write_profile("full_stack.yaml", FULL_STACK);
    let store = fixture.store();
    let config_path = fixture.write_tenant("tenant.yaml", &valid_tenant_yaml(Some("full_stack")));

    let outcome = select_stack(
        &store,
        &valid_tenant_yaml(Some("full_stack")),
        &config_path,
        None,
        fixture.workspace_path(),
    )
    .unwrap();

    let expected = vec![
        (
            "TENANT_CONFIG_PATH".to_string(),
            config_path.display().to_string(),
        ),
        ("SELECTED_STACK".to_string(), "stacks/full_stack.hcl".into()),
        ("DEPLOYMENT_TYPE".to_string(), "full_stack".into()),
        ("NODE_MIN".to_string(), "2".into()),
        ("NODE_MAX".to_string(), "8".into()),
    ];
    assert_eq!(outcome.exports, expected);

    // Identical inputs, identical outputs.
    let again = select_stack(
        &store,
        &valid_tenant_yaml(Some("full_stack")),
        &config_path,
        None,
        fixture.workspace_path(),
    )
    .unwrap();
    assert_eq!(again.exports, outcome.exports);
    assert_eq!(again.selected_name, outcome.selected_name);
}

#[test]
fn select_fails_without_a_stack_file_but_describe_does_not() {
    let fixture = ProfileDirFixture::new();
    fixture.write_profile("planned.yaml", "name: planned\ndescription: Not built yet\n");
    let store = fixture.store();
    let raw = valid_tenant_yaml(Some("planned"));
    let config_path = fixture.write_tenant("tenant.yaml", &raw);

    let err = select_stack(&store, &raw, &config_path, None, fixture.workspace_path()).unwrap_err();
    assert!(
        matches!(&err, SelectError::StackFile(inner) if inner.name == "planned"),
        "selection needs an artifact: {err}"
    );

    // Same profile data, inspect semantics: no error, just an unconfigured
    // status.
    let outcome =
        describe_stack(&store, &raw, &config_path, None, fixture.workspace_path()).unwrap();
    assert_eq!(outcome.stack_status, StackFileStatus::Unconfigured);
    assert_eq!(outcome.summary.stack_file, None);

    // The failed selection left the store fully usable.
    assert!(store.lookup("planned").is_some());
}

#[test]
fn stack_file_missing_on_disk_is_a_warning_not_a_failure() {
    let fixture = ProfileDirFixture::new();
    fixture.write_profile("full_stack.yaml", FULL_STACK);
    let store = fixture.store();
    let raw = valid_tenant_yaml(Some("full_stack"));
    let config_path = fixture.write_tenant("tenant.yaml", &raw);

    let outcome = select_stack(&store, &raw, &config_path, None, fixture.workspace_path()).unwrap();
    let expected_path = fixture.workspace_path().join("stacks/full_stack.hcl");
    assert_eq!(
        outcome.stack_status,
        StackFileStatus::MissingOnDisk(expected_path.clone())
    );
    // The path is still exported so downstream automation can decide.
    assert_eq!(outcome.stack_file, "stacks/full_stack.hcl");

    fs::create_dir_all(expected_path.parent().unwrap()).unwrap();
    fs::write(&expected_path, "# terragrunt stack\n").unwrap();
    let outcome = select_stack(&store, &raw, &config_path, None, fixture.workspace_path()).unwrap();
    assert_eq!(outcome.stack_status, StackFileStatus::Present(expected_path));
}

#[test]
fn invalid_tenant_document_fails_with_typed_errors() {
    let fixture = ProfileDirFixture::new();
    fixture.write_profile("full_stack.yaml", FULL_STACK);
    let store = fixture.store();
    let config_path = fixture.write_tenant("tenant.yaml", "");

    let err = select_stack(&store, "", &config_path, None, fixture.workspace_path()).unwrap_err();
    assert!(matches!(
        err,
        SelectError::Tenant(TenantConfigError::EmptyOrInvalidDocument)
    ));

    let err = select_stack(
        &store,
        "org: acme\n",
        &config_path,
        None,
        fixture.workspace_path(),
    )
    .unwrap_err();
    match err {
        SelectError::Tenant(TenantConfigError::MissingRequiredFields { fields }) => {
            assert_eq!(fields, vec!["env", "region", "deployment", "account_id"]);
        }
        other => panic!("expected missing-field failure, got {other}"),
    }
}

#[test]
fn machine_summary_has_the_stable_automation_shape() {
    let fixture = ProfileDirFixture::new();
    fixture.write_profile("full_stack.yaml", FULL_STACK);
    let store = fixture.store();
    let raw = valid_tenant_yaml(None);
    let config_path = fixture.write_tenant("tenant.yaml", &raw);

    let outcome = select_stack(&store, &raw, &config_path, None, Path::new(".")).unwrap();
    let json = serde_json::to_value(&outcome.summary).unwrap();
    let object = json.as_object().unwrap();
    for key in [
        "deployment_type",
        "stack_file",
        "config_path",
        "account_id",
        "region",
        "environment",
    ] {
        assert!(object.contains_key(key), "summary missing {key}");
    }
    assert_eq!(json["deployment_type"], "full_stack");
    assert_eq!(json["account_id"], "123456789012");
    assert_eq!(json["environment"], "test");
}
