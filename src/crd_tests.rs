// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for CRD spec types.

#[cfg(test)]
mod tests {
    use crate::constants::{
        API_GROUP_DATABASES, API_GROUP_SCHEMAS, API_VERSION_V1ALPHA4, KIND_DATABASE,
        KIND_MIGRATION, SCOPE_NAMESPACED,
    };
    use crate::crd::*;
    use kube::{CustomResourceExt, Resource};
    use std::collections::BTreeMap;

    #[test]
    fn test_database_resource_identity() {
        assert_eq!(Database::group(&()), API_GROUP_DATABASES);
        assert_eq!(Database::version(&()), API_VERSION_V1ALPHA4);
        assert_eq!(Database::kind(&()), KIND_DATABASE);
        assert_eq!(Database::api_version(&()), "databases.schemahero.io/v1alpha4");
    }

    #[test]
    fn test_migration_resource_identity() {
        assert_eq!(Migration::group(&()), API_GROUP_SCHEMAS);
        assert_eq!(Migration::version(&()), API_VERSION_V1ALPHA4);
        assert_eq!(Migration::kind(&()), KIND_MIGRATION);
        assert_eq!(Migration::api_version(&()), "schemas.schemahero.io/v1alpha4");
    }

    #[test]
    fn test_database_crd_is_namespaced() {
        let crd = Database::crd();
        assert_eq!(crd.spec.scope, SCOPE_NAMESPACED);
        assert_eq!(crd.spec.names.plural, "databases");
        assert_eq!(crd.spec.versions.len(), 1);
        assert!(crd.spec.versions[0].schema.is_some());
    }

    #[test]
    fn test_value_or_value_from_literal() {
        let value = ValueOrValueFrom::value("localhost");
        assert_eq!(value.value.as_deref(), Some("localhost"));
        assert!(value.value_from.is_none());

        let yaml = serde_yaml::to_string(&value).unwrap();
        assert_eq!(yaml, "value: localhost\n");
    }

    #[test]
    fn test_value_or_value_from_secret_key_ref() {
        let value = ValueOrValueFrom::secret_key_ref("postgres", "uri");
        assert!(value.value.is_none());

        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["valueFrom"]["secretKeyRef"]["name"], "postgres");
        assert_eq!(json["valueFrom"]["secretKeyRef"]["key"], "uri");
        assert!(json["valueFrom"].get("ssm").is_none());
        assert!(json["valueFrom"].get("vault").is_none());
    }

    #[test]
    fn test_ssm_serializes_camel_case() {
        let ssm = Ssm {
            access_key_id: Some(SsmCredential {
                value: None,
                value_from: Some(SsmCredentialSource {
                    secret_key_ref: Some(SecretKeyRef {
                        key: "id".into(),
                        name: "aws".into(),
                    }),
                }),
            }),
            name: "/prod/db/uri".into(),
            region: Some("us-east-1".into()),
            secret_access_key: None,
            with_decryption: Some(true),
        };

        let json = serde_json::to_value(&ssm).unwrap();
        assert_eq!(json["accessKeyId"]["valueFrom"]["secretKeyRef"]["name"], "aws");
        assert_eq!(json["withDecryption"], true);
        assert_eq!(json["region"], "us-east-1");
        assert!(json.get("secretAccessKey").is_none());
    }

    #[test]
    fn test_vault_required_fields_always_serialized() {
        let vault = Vault {
            role: "schemahero".into(),
            secret: "database/creds/app".into(),
            ..Default::default()
        };

        let json = serde_json::to_value(&vault).unwrap();
        assert_eq!(json["role"], "schemahero");
        assert_eq!(json["secret"], "database/creds/app");
        assert!(json.get("agentInject").is_none());
        assert!(json.get("serviceAccountNamespace").is_none());
    }

    #[test]
    fn test_mysql_disable_tls_field_name() {
        let mysql = MysqlConnection {
            disable_tls: Some(true),
            default_charset: Some(ValueOrValueFrom::value("utf8mb4")),
            ..Default::default()
        };

        let json = serde_json::to_value(&mysql).unwrap();
        assert_eq!(json["disableTLS"], true);
        assert_eq!(json["defaultCharset"]["value"], "utf8mb4");
    }

    #[test]
    fn test_database_spec_default_serializes_empty() {
        let spec = DatabaseSpec::default();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_database_spec_schemahero_settings() {
        let mut node_selector = BTreeMap::new();
        node_selector.insert("kubernetes.io/os".to_string(), "linux".to_string());

        let spec = DatabaseSpec {
            immediate_deploy: Some(true),
            schemahero: Some(SchemaHeroSettings {
                image: Some("schemahero/schemahero:0.17.0".into()),
                node_selector,
            }),
            ..Default::default()
        };

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["immediateDeploy"], true);
        assert_eq!(json["schemahero"]["nodeSelector"]["kubernetes.io/os"], "linux");
        assert!(json.get("connection").is_none());
    }

    #[test]
    fn test_empty_nested_maps_are_omitted() {
        let settings = SchemaHeroSettings {
            image: Some("schemahero/schemahero:0.17.0".into()),
            node_selector: BTreeMap::new(),
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert!(json.get("nodeSelector").is_none());

        let template = DatabaseTemplate {
            metadata: Some(DatabaseTemplateMetadata::default()),
        };
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json, serde_json::json!({ "metadata": {} }));

        // Missing maps deserialize as empty
        let parsed: SchemaHeroSettings = serde_yaml::from_str("image: x\n").unwrap();
        assert!(parsed.node_selector.is_empty());
    }

    #[test]
    fn test_cassandra_connection_round_trip() {
        let cassandra = CassandraConnection {
            hosts: vec!["cassandra-0".into(), "cassandra-1".into()],
            keyspace: ValueOrValueFrom::value("app"),
            password: None,
            username: Some(ValueOrValueFrom::secret_key_ref("cassandra", "username")),
        };

        let yaml = serde_yaml::to_string(&cassandra).unwrap();
        let parsed: CassandraConnection = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, cassandra);
    }

    #[test]
    fn test_migration_spec_ddl_field_names() {
        let spec = MigrationSpec {
            database_name: "db1".into(),
            edited_ddl: None,
            generated_ddl: Some("create table users (id integer)".into()),
            table_name: "users".into(),
            table_namespace: "default".into(),
        };

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["generatedDDL"], "create table users (id integer)");
        assert_eq!(json["databaseName"], "db1");
        assert!(json.get("editedDDL").is_none());
    }
}
