// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the provider registry.

#[cfg(test)]
mod tests {
    use crate::crd::Database;
    use crate::datasource::{
        DataSource, ManifestDataSource, MetadataRequest, MetadataResponse, ReadRequest,
        ReadResponse,
    };
    use crate::diagnostics::Diagnostic;
    use crate::errors::ManifestError;
    use crate::provider::ManifestProvider;
    use crate::schema::{Attribute, AttributeType, Schema};
    use serde_json::json;

    const DATABASE: &str = "k8s_databases_schemahero_io_database_v1alpha4_manifest";
    const MIGRATION: &str = "k8s_schemas_schemahero_io_migration_v1alpha4_manifest";

    /// Data source that always warns and returns a fixed state
    #[derive(Debug)]
    struct EchoDataSource;

    impl DataSource for EchoDataSource {
        fn metadata(&self, req: &MetadataRequest) -> MetadataResponse {
            MetadataResponse {
                type_name: format!("{}_echo", req.provider_type_name),
            }
        }

        fn schema(&self) -> Result<Schema, ManifestError> {
            let mut schema = Schema::default();
            schema
                .attributes
                .insert("yaml".into(), Attribute::computed(AttributeType::String));
            Ok(schema)
        }

        fn read(&self, req: &ReadRequest) -> ReadResponse {
            ReadResponse {
                state: Some(json!({ "yaml": req.config.to_string() })),
                diagnostics: Diagnostic::warning("Echo", "echoing configuration").into(),
            }
        }
    }

    #[test]
    fn test_default_provider_registers_builtin_data_sources() {
        let provider = ManifestProvider::new();
        assert_eq!(provider.type_name(), "k8s");
        assert_eq!(provider.data_source_type_names(), vec![DATABASE, MIGRATION]);
        assert!(provider.data_source(DATABASE).is_some());
        assert!(provider.data_source("k8s_nope").is_none());
    }

    #[test]
    fn test_custom_type_name_prefixes_data_sources() {
        let provider = ManifestProvider::with_type_name("schemahero");
        assert_eq!(
            provider.data_source_type_names(),
            vec![
                "schemahero_databases_schemahero_io_database_v1alpha4_manifest",
                "schemahero_schemas_schemahero_io_migration_v1alpha4_manifest",
            ]
        );
    }

    #[test]
    fn test_empty_provider() {
        let provider = ManifestProvider::empty("k8s");
        assert!(provider.data_source_type_names().is_empty());
        assert!(provider.schemas().unwrap().is_empty());
    }

    #[test]
    fn test_register_replaces_same_type_name() {
        let mut provider = ManifestProvider::empty("k8s");
        provider.register(ManifestDataSource::<Database>::new());
        provider.register(ManifestDataSource::<Database>::new());
        assert_eq!(provider.data_source_type_names(), vec![DATABASE]);
    }

    #[test]
    fn test_register_custom_data_source() {
        let mut provider = ManifestProvider::empty("test");
        provider.register(EchoDataSource);

        let response = provider.read_data_source("test_echo", json!({ "a": 1 }));
        assert!(!response.diagnostics.has_error());
        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(response.yaml(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_schema_lookup() {
        let provider = ManifestProvider::new();
        let schema = provider.schema(MIGRATION).unwrap();
        assert!(schema.attribute("spec.table_name").is_some());

        let err = provider.schema("k8s_nope").unwrap_err();
        assert!(matches!(err, ManifestError::UnknownDataSource { .. }));
    }

    #[test]
    fn test_schemas_keyed_by_type_name() {
        let provider = ManifestProvider::new();
        let schemas = provider.schemas().unwrap();
        let keys: Vec<&str> = schemas.keys().map(String::as_str).collect();
        assert_eq!(keys, vec![DATABASE, MIGRATION]);
        assert!(schemas[DATABASE].attribute("spec.connection").is_some());
    }

    #[test]
    fn test_read_data_source_dispatches() {
        let provider = ManifestProvider::new();
        let response = provider.read_data_source(
            DATABASE,
            json!({
                "metadata": { "name": "db1", "namespace": "default" },
                "spec": { "connection": { "sqlite": { "dsn": "file::memory:" } } }
            }),
        );
        assert!(response.diagnostics.is_empty(), "{}", response.diagnostics);
        assert!(response.yaml().unwrap().contains("kind: Database"));
    }

    #[test]
    fn test_read_unknown_data_source() {
        let provider = ManifestProvider::new();
        let response = provider.read_data_source("k8s_nope", json!({}));
        assert!(response.state.is_none());
        assert_eq!(response.diagnostics.len(), 1);
        let diagnostic = response.diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.summary, "Unknown data source");
        assert!(diagnostic.detail.contains("k8s_nope"));
    }
}
