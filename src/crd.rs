// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definitions (CRDs) exposed as manifest data sources.
//!
//! Each spec type here is the single source of truth for one CRD version: the
//! OpenAPI schema that drives the Terraform schema is derived from it, and the
//! manifest YAML is serialized from it.
//!
//! # Resource Types
//!
//! - [`Database`] - `databases.schemahero.io/v1alpha4`, a database connection managed by `SchemaHero`
//! - [`Migration`] - `schemas.schemahero.io/v1alpha4`, a planned schema migration
//!
//! Fields are declared in alphabetical order of their manifest names so the
//! rendered YAML has stable, sorted keys.
//!
//! # Example: A Postgres connection
//!
//! ```rust,no_run
//! use k8s_manifests::crd::{DatabaseConnection, DatabaseSpec, PostgresConnection, ValueOrValueFrom};
//!
//! let spec = DatabaseSpec {
//!     connection: Some(DatabaseConnection {
//!         postgres: Some(PostgresConnection {
//!             host: Some(ValueOrValueFrom::value("localhost")),
//!             ..Default::default()
//!         }),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//! ```

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Value-or-value-from
// ============================================================================

/// A literal value, or a reference to where the value can be read from.
///
/// Used for every connection parameter that may be a secret.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValueOrValueFrom {
    /// Literal value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Source to read the value from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<ValueFrom>,
}

impl ValueOrValueFrom {
    /// A literal value.
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            value_from: None,
        }
    }

    /// A value read from a key of a Kubernetes Secret.
    pub fn secret_key_ref(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            value: None,
            value_from: Some(ValueFrom {
                secret_key_ref: Some(SecretKeyRef {
                    key: key.into(),
                    name: name.into(),
                }),
                ..Default::default()
            }),
        }
    }
}

/// Where a value is read from. Exactly one source is normally set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValueFrom {
    /// Key of a Kubernetes Secret in the same namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<SecretKeyRef>,

    /// AWS SSM parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssm: Option<Ssm>,

    /// `HashiCorp` Vault secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<Vault>,
}

/// Reference to a key in a Kubernetes Secret.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SecretKeyRef {
    /// Key within the Secret.
    pub key: String,

    /// Name of the Secret.
    pub name: String,
}

/// AWS SSM parameter store reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ssm {
    /// AWS access key id used to read the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<SsmCredential>,

    /// Parameter name.
    pub name: String,

    /// AWS region of the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// AWS secret access key used to read the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<SsmCredential>,

    /// Decrypt `SecureString` parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_decryption: Option<bool>,
}

/// Credential for SSM access: a literal, or a Secret key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SsmCredential {
    /// Literal value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Source to read the value from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<SsmCredentialSource>,
}

/// Source of an SSM credential.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SsmCredentialSource {
    /// Key of a Kubernetes Secret in the same namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<SecretKeyRef>,
}

/// `HashiCorp` Vault secret reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vault {
    /// Use the Vault agent injector instead of reading the secret directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_inject: Option<bool>,

    /// Go template used to build the connection string from the secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_template: Option<String>,

    /// Vault server address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Path of the Kubernetes auth method in Vault.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_auth_endpoint: Option<String>,

    /// Vault role to authenticate as.
    pub role: String,

    /// Secret path.
    pub secret: String,

    /// Service account used for Vault authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,

    /// Namespace of the service account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_namespace: Option<String>,
}

// ============================================================================
// Database (databases.schemahero.io/v1alpha4)
// ============================================================================

/// Connection parameters for Postgres-compatible databases
/// (Postgres, `CockroachDB`, `TimescaleDB`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PostgresConnection {
    /// Database name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbname: Option<ValueOrValueFrom>,

    /// Server host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<ValueOrValueFrom>,

    /// Password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<ValueOrValueFrom>,

    /// Server port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<ValueOrValueFrom>,

    /// Schema to manage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<ValueOrValueFrom>,

    /// SSL mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sslmode: Option<ValueOrValueFrom>,

    /// Full connection URI. Takes precedence over the individual parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<ValueOrValueFrom>,

    /// User name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ValueOrValueFrom>,
}

/// Connection parameters for `MySQL`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MysqlConnection {
    /// Collation for new tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<ValueOrValueFrom>,

    /// Database name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbname: Option<ValueOrValueFrom>,

    /// Default character set for new tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_charset: Option<ValueOrValueFrom>,

    /// Connect without TLS.
    #[serde(
        default,
        rename = "disableTLS",
        skip_serializing_if = "Option::is_none"
    )]
    pub disable_tls: Option<bool>,

    /// Server host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<ValueOrValueFrom>,

    /// Password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<ValueOrValueFrom>,

    /// Server port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<ValueOrValueFrom>,

    /// Full connection URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<ValueOrValueFrom>,

    /// User name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ValueOrValueFrom>,
}

/// Connection parameters for rqlite.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RqliteConnection {
    /// Database name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbname: Option<ValueOrValueFrom>,

    /// Server host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<ValueOrValueFrom>,

    /// Password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<ValueOrValueFrom>,

    /// Server port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<ValueOrValueFrom>,

    /// Full connection URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<ValueOrValueFrom>,

    /// User name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ValueOrValueFrom>,
}

/// Connection parameters for Cassandra.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CassandraConnection {
    /// Contact points.
    pub hosts: Vec<String>,

    /// Keyspace to manage.
    pub keyspace: ValueOrValueFrom,

    /// Password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<ValueOrValueFrom>,

    /// User name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<ValueOrValueFrom>,
}

/// Connection parameters for `SQLite`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SqliteConnection {
    /// Data source name, e.g. `file::memory:`.
    pub dsn: String,
}

/// Database connection. Exactly one driver is normally set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DatabaseConnection {
    /// Cassandra connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cassandra: Option<CassandraConnection>,

    /// `CockroachDB` connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cockroachdb: Option<PostgresConnection>,

    /// `MySQL` connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mysql: Option<MysqlConnection>,

    /// Postgres connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres: Option<PostgresConnection>,

    /// rqlite connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rqlite: Option<RqliteConnection>,

    /// `SQLite` connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqlite: Option<SqliteConnection>,

    /// `TimescaleDB` connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timescaledb: Option<PostgresConnection>,
}

/// Settings for the `SchemaHero` manager pod deployed for this database.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaHeroSettings {
    /// Manager image override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Node selector for the manager pod. Omitted when empty.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_selector: BTreeMap<String, String>,
}

/// Metadata applied to the pods `SchemaHero` creates for this database.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DatabaseTemplateMetadata {
    /// Extra annotations.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    /// Extra labels.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Pod template for this database.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DatabaseTemplate {
    /// Pod metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DatabaseTemplateMetadata>,
}

/// `Database` declares a database that `SchemaHero` manages schemas for.
///
/// # Example
///
/// ```yaml
/// apiVersion: databases.schemahero.io/v1alpha4
/// kind: Database
/// metadata:
///   name: db1
///   namespace: default
/// spec:
///   connection:
///     postgres:
///       uri:
///         valueFrom:
///           secretKeyRef:
///             key: uri
///             name: postgres
/// ```
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "databases.schemahero.io",
    version = "v1alpha4",
    kind = "Database",
    namespaced,
    doc = "Database is the Schema for the databases API. It describes how SchemaHero connects to one database."
)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSpec {
    /// How to connect to the database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<DatabaseConnection>,

    /// Deploy seed data defined on tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_seed_data: Option<bool>,

    /// Allow `kubectl schemahero shell` against this database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_shell_command: Option<bool>,

    /// Apply planned migrations without waiting for approval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immediate_deploy: Option<bool>,

    /// Manager pod settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemahero: Option<SchemaHeroSettings>,

    /// Pod template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<DatabaseTemplate>,
}

// ============================================================================
// Migration (schemas.schemahero.io/v1alpha4)
// ============================================================================

/// `Migration` is a planned schema change for one table.
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "schemas.schemahero.io",
    version = "v1alpha4",
    kind = "Migration",
    namespaced,
    doc = "Migration is the Schema for the migrations API. It holds the DDL planned for one table."
)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSpec {
    /// Name of the `Database` the table belongs to.
    pub database_name: String,

    /// DDL edited by an operator, applied instead of the generated DDL.
    #[serde(
        default,
        rename = "editedDDL",
        skip_serializing_if = "Option::is_none"
    )]
    pub edited_ddl: Option<String>,

    /// DDL generated by the planner.
    #[serde(
        default,
        rename = "generatedDDL",
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_ddl: Option<String>,

    /// Name of the `Table` resource.
    pub table_name: String,

    /// Namespace of the `Table` resource.
    pub table_namespace: String,
}
