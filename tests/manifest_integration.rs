// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! End-to-end tests for manifest rendering through the public provider API.
//!
//! These run entirely offline: a read never touches a cluster.
//!
//! Run with: cargo test --test manifest_integration

use k8s_manifests::crd::{Database, Migration};
use k8s_manifests::provider::ManifestProvider;
use kube::{CustomResourceExt, Resource, ResourceExt};
use serde_json::{json, Value};

const DATABASE: &str = "k8s_databases_schemahero_io_database_v1alpha4_manifest";
const MIGRATION: &str = "k8s_schemas_schemahero_io_migration_v1alpha4_manifest";

// ============================================================================
// Helper Functions
// ============================================================================

fn render(type_name: &str, config: Value) -> String {
    let response = ManifestProvider::new().read_data_source(type_name, config);
    assert!(
        !response.diagnostics.has_error(),
        "unexpected diagnostics:\n{}",
        response.diagnostics
    );
    response.yaml().expect("successful read has yaml").to_string()
}

// ============================================================================
// Database
// ============================================================================

#[test]
fn test_database_manifest_is_a_valid_custom_resource() {
    let yaml = render(
        DATABASE,
        json!({
            "metadata": {
                "name": "app-db",
                "namespace": "schemahero",
                "labels": { "app.kubernetes.io/name": "app" },
                "annotations": { "example.com/owner": "platform team" }
            },
            "spec": {
                "immediate_deploy": true,
                "schemahero": { "node_selector": { "kubernetes.io/os": "linux" } },
                "connection": {
                    "postgres": {
                        "uri": {
                            "value_from": {
                                "vault": {
                                    "role": "schemahero",
                                    "secret": "database/creds/app",
                                    "agent_inject": true
                                }
                            }
                        }
                    }
                }
            }
        }),
    );

    // The manifest must deserialize as the real custom resource type
    let database: Database = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(database.name_any(), "app-db");
    assert_eq!(database.namespace().as_deref(), Some("schemahero"));
    assert_eq!(database.labels()["app.kubernetes.io/name"], "app");
    assert_eq!(database.annotations()["example.com/owner"], "platform team");
    assert_eq!(database.spec.immediate_deploy, Some(true));

    let vault = database
        .spec
        .connection
        .and_then(|c| c.postgres)
        .and_then(|p| p.uri)
        .and_then(|u| u.value_from)
        .and_then(|v| v.vault)
        .unwrap();
    assert_eq!(vault.role, "schemahero");
    assert_eq!(vault.agent_inject, Some(true));
}

#[test]
fn test_database_identity_matches_crd() {
    let yaml = render(
        DATABASE,
        json!({ "metadata": { "name": "db1", "namespace": "default" } }),
    );
    let manifest: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

    let crd = Database::crd();
    assert_eq!(
        manifest["apiVersion"],
        format!("{}/{}", crd.spec.group, crd.spec.versions[0].name).as_str()
    );
    assert_eq!(manifest["kind"], crd.spec.names.kind.as_str());
    assert_eq!(manifest["apiVersion"], Database::api_version(&()).as_ref());
}

#[test]
fn test_database_sqlite_connection_only() {
    let yaml = render(
        DATABASE,
        json!({
            "metadata": { "name": "db1", "namespace": "default" },
            "spec": { "connection": { "sqlite": { "dsn": "file::memory:" } } }
        }),
    );
    let manifest: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    let connection = manifest["spec"]["connection"].as_mapping().unwrap();
    assert_eq!(connection.len(), 1);
    assert_eq!(manifest["spec"]["connection"]["sqlite"]["dsn"], "file::memory:");
}

#[test]
fn test_database_yaml_is_deterministic() {
    let config = json!({
        "metadata": {
            "name": "db1",
            "namespace": "default",
            "labels": { "z": "1", "a": "2" }
        },
        "spec": {
            "connection": {
                "mysql": {
                    "host": { "value": "mysql" },
                    "port": { "value": "3306" },
                    "disable_tls": false
                }
            }
        }
    });
    let first = render(DATABASE, config.clone());
    let second = render(DATABASE, config);
    assert_eq!(first, second);

    // Keys are emitted in a stable, sorted order
    let a = first.find("a: '2'").or_else(|| first.find("a: \"2\"")).unwrap();
    let z = first.find("z: '1'").or_else(|| first.find("z: \"1\"")).unwrap();
    assert!(a < z);
    assert!(first.contains("disableTLS: false"));
}

#[test]
fn test_database_invalid_configuration_reports_every_error() {
    let response = ManifestProvider::new().read_data_source(
        DATABASE,
        json!({
            "metadata": { "name": "DB", "namespace": "Default" },
            "spec": { "connection": { "sqlite": {} }, "bogus": true }
        }),
    );
    assert!(response.state.is_none());

    let paths: Vec<&str> = response
        .diagnostics
        .errors()
        .filter_map(|d| d.attribute.as_deref())
        .collect();
    assert_eq!(
        paths,
        vec![
            "metadata.name",
            "metadata.namespace",
            "spec.bogus",
            "spec.connection.sqlite.dsn",
        ]
    );
}

// ============================================================================
// Migration
// ============================================================================

#[test]
fn test_migration_manifest_is_a_valid_custom_resource() {
    let yaml = render(
        MIGRATION,
        json!({
            "metadata": { "name": "users-0001", "namespace": "schemahero" },
            "spec": {
                "database_name": "app-db",
                "table_name": "users",
                "table_namespace": "schemahero",
                "generated_ddl": "CREATE TABLE users (id bigint PRIMARY KEY)",
                "edited_ddl": "CREATE TABLE users (id bigint PRIMARY KEY, email text)"
            }
        }),
    );

    let migration: Migration = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(migration.name_any(), "users-0001");
    assert_eq!(migration.spec.database_name, "app-db");
    assert_eq!(
        migration.spec.edited_ddl.as_deref(),
        Some("CREATE TABLE users (id bigint PRIMARY KEY, email text)")
    );
    assert!(yaml.contains("editedDDL:"));
    assert!(yaml.contains("generatedDDL:"));
}

#[test]
fn test_migration_requires_table_fields() {
    let response = ManifestProvider::new().read_data_source(
        MIGRATION,
        json!({
            "metadata": { "name": "users-0001", "namespace": "schemahero" },
            "spec": { "database_name": "app-db" }
        }),
    );
    let paths: Vec<&str> = response
        .diagnostics
        .errors()
        .filter_map(|d| d.attribute.as_deref())
        .collect();
    assert_eq!(paths, vec!["spec.table_name", "spec.table_namespace"]);
}

// ============================================================================
// Provider
// ============================================================================

#[test]
fn test_every_schema_renders_minimal_config() {
    let provider = ManifestProvider::new();
    for type_name in provider.data_source_type_names() {
        let schema = provider.schema(type_name).unwrap();
        assert!(schema.attributes["yaml"].computed, "{type_name}");
        assert!(schema.attributes["metadata"].required, "{type_name}");

        let response = provider.read_data_source(
            type_name,
            json!({ "metadata": { "name": "minimal", "namespace": "default" } }),
        );
        assert!(!response.diagnostics.has_error(), "{type_name}: {}", response.diagnostics);
        assert!(response.yaml().unwrap().contains("name: minimal"));
    }
}
