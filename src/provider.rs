// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider-level registry of manifest data sources.
//!
//! The provider owns one [`DataSource`] per CRD version and knows each one by
//! its full type name (`<provider>_<group>_<kind>_<version>_manifest`).
//!
//! # Example
//!
//! ```rust,no_run
//! use k8s_manifests::provider::ManifestProvider;
//! use serde_json::json;
//!
//! let provider = ManifestProvider::new();
//! let response = provider.read_data_source(
//!     "k8s_databases_schemahero_io_database_v1alpha4_manifest",
//!     json!({
//!         "metadata": { "name": "db1", "namespace": "default" },
//!         "spec": { "connection": { "sqlite": { "dsn": "file::memory:" } } }
//!     }),
//! );
//! println!("{}", response.yaml().unwrap_or_default());
//! ```

use crate::constants::DEFAULT_PROVIDER_TYPE_NAME;
use crate::crd::{Database, Migration};
use crate::datasource::{DataSource, ManifestDataSource, MetadataRequest, ReadRequest, ReadResponse};
use crate::errors::ManifestError;
use crate::schema::Schema;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Registry of manifest data sources.
#[derive(Debug)]
pub struct ManifestProvider {
    type_name: String,
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
}

impl Default for ManifestProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestProvider {
    /// Create the provider with the default type name and every built-in data source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_type_name(DEFAULT_PROVIDER_TYPE_NAME)
    }

    /// Create the provider under a custom type name.
    #[must_use]
    pub fn with_type_name(type_name: impl Into<String>) -> Self {
        let mut provider = Self::empty(type_name);
        provider.register(ManifestDataSource::<Database>::new());
        provider.register(ManifestDataSource::<Migration>::new());
        provider
    }

    /// Create a provider with no data sources registered.
    #[must_use]
    pub fn empty(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            data_sources: BTreeMap::new(),
        }
    }

    /// Register a data source under the type name it reports.
    ///
    /// A data source reporting an already registered type name replaces it.
    pub fn register<D: DataSource + 'static>(&mut self, data_source: D) {
        let type_name = data_source
            .metadata(&MetadataRequest {
                provider_type_name: self.type_name.clone(),
            })
            .type_name;
        debug!("Registering data source {}", type_name);
        self.data_sources.insert(type_name, Box::new(data_source));
    }

    /// Provider type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Type names of all registered data sources, sorted.
    #[must_use]
    pub fn data_source_type_names(&self) -> Vec<&str> {
        self.data_sources.keys().map(String::as_str).collect()
    }

    /// Look up a data source by type name.
    #[must_use]
    pub fn data_source(&self, type_name: &str) -> Option<&dyn DataSource> {
        self.data_sources.get(type_name).map(Box::as_ref)
    }

    /// Schema of one data source.
    ///
    /// # Errors
    ///
    /// Returns an error if the type name is unknown or the schema cannot be built.
    pub fn schema(&self, type_name: &str) -> Result<Schema, ManifestError> {
        self.data_source(type_name)
            .ok_or_else(|| ManifestError::UnknownDataSource {
                type_name: type_name.to_string(),
            })?
            .schema()
    }

    /// Schemas of all data sources, keyed by type name.
    ///
    /// # Errors
    ///
    /// Returns the first schema that cannot be built.
    pub fn schemas(&self) -> Result<BTreeMap<String, Schema>, ManifestError> {
        self.data_sources
            .iter()
            .map(|(name, ds)| Ok((name.clone(), ds.schema()?)))
            .collect()
    }

    /// Read a data source by type name.
    ///
    /// An unknown type name yields a response with a single error diagnostic.
    #[must_use]
    pub fn read_data_source(&self, type_name: &str, config: Value) -> ReadResponse {
        match self.data_source(type_name) {
            Some(data_source) => data_source.read(&ReadRequest { config }),
            None => ReadResponse::from_diagnostic(
                ManifestError::UnknownDataSource {
                    type_name: type_name.to_string(),
                }
                .into(),
            ),
        }
    }
}
