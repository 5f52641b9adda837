// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Manifest data sources.
//!
//! The [`DataSource`] trait is the capability a Terraform data source exposes:
//! report its type name, describe its schema, and read. [`ManifestDataSource`]
//! implements it once for any CRD type, so adding a data source for another CRD
//! is a matter of defining the spec type and implementing [`ManifestResource`].
//!
//! # Read
//!
//! 1. Decode and validate the configuration against the schema
//! 2. Build the typed [`ManifestModel`] and stamp `apiVersion` and `kind`
//! 3. Marshal the model to YAML
//! 4. Return the state with the computed `yaml` attribute filled in
//!
//! The read is pure: no I/O and no cluster access. The only failure besides
//! invalid configuration is a YAML marshal error.

use crate::constants::{ATTR_YAML, MANIFEST_TYPE_NAME_SUFFIX};
use crate::convert::{decode_config, encode_state};
use crate::crd::{Database, DatabaseSpec, Migration, MigrationSpec};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::errors::ManifestError;
use crate::model::ManifestModel;
use crate::schema::{manifest_schema, Schema};
use kube::{CustomResourceExt, Resource};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// Request for a data source's type name.
#[derive(Clone, Debug)]
pub struct MetadataRequest {
    /// Type name of the provider, e.g. `k8s`
    pub provider_type_name: String,
}

/// Response carrying a data source's type name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataResponse {
    /// Full data source type name
    pub type_name: String,
}

/// Request to read a data source.
#[derive(Clone, Debug)]
pub struct ReadRequest {
    /// Configuration tree, keyed by attribute name
    pub config: Value,
}

/// Result of reading a data source.
#[derive(Clone, Debug, Default)]
pub struct ReadResponse {
    /// New state, `None` when the read failed
    pub state: Option<Value>,
    /// Diagnostics produced by the read
    pub diagnostics: Diagnostics,
}

impl ReadResponse {
    /// A failed read carrying a single diagnostic.
    #[must_use]
    pub fn from_diagnostic(diagnostic: Diagnostic) -> Self {
        Self {
            state: None,
            diagnostics: diagnostic.into(),
        }
    }

    /// The computed `yaml` attribute of the state, if the read succeeded.
    #[must_use]
    pub fn yaml(&self) -> Option<&str> {
        self.state.as_ref()?.get(ATTR_YAML)?.as_str()
    }
}

/// A Terraform data source.
pub trait DataSource: Send + Sync + fmt::Debug {
    /// Report the data source type name.
    fn metadata(&self, req: &MetadataRequest) -> MetadataResponse;

    /// Describe the data source schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be built.
    fn schema(&self) -> Result<Schema, ManifestError>;

    /// Read the data source.
    fn read(&self, req: &ReadRequest) -> ReadResponse;
}

/// A custom resource that can be rendered as a manifest.
pub trait ManifestResource: CustomResourceExt + Resource<DynamicType = ()> {
    /// Typed spec serialized under `spec`
    type Spec: Serialize + DeserializeOwned + Clone + Default + fmt::Debug + PartialEq;
}

impl ManifestResource for Database {
    type Spec = DatabaseSpec;
}

impl ManifestResource for Migration {
    type Spec = MigrationSpec;
}

/// Type name suffix of the data source for `R`, without the provider prefix.
///
/// `databases.schemahero.io/v1alpha4` `Database` becomes
/// `databases_schemahero_io_database_v1alpha4_manifest`.
#[must_use]
pub fn type_name_suffix<R: ManifestResource>() -> String {
    format!(
        "{}_{}_{}_{MANIFEST_TYPE_NAME_SUFFIX}",
        R::group(&()).replace(['.', '-'], "_"),
        R::kind(&()).to_lowercase(),
        R::version(&()),
    )
}

/// Render a model as YAML, stamping the resource's `apiVersion` and `kind`.
///
/// # Errors
///
/// Returns an error if YAML marshalling fails.
pub fn render_manifest<R: ManifestResource>(
    model: &mut ManifestModel<R::Spec>,
) -> Result<String, ManifestError> {
    model.api_version = Some(R::api_version(&()).into_owned());
    model.kind = Some(R::kind(&()).into_owned());
    let yaml = serde_yaml::to_string(model)?;
    model.yaml = Some(yaml.clone());
    Ok(yaml)
}

/// The manifest data source for custom resource `R`.
pub struct ManifestDataSource<R> {
    _resource: PhantomData<fn() -> R>,
}

impl<R> ManifestDataSource<R> {
    /// Create the data source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _resource: PhantomData,
        }
    }
}

impl<R> Default for ManifestDataSource<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ManifestResource> fmt::Debug for ManifestDataSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestDataSource")
            .field("api_version", &R::api_version(&()))
            .field("kind", &R::kind(&()))
            .finish()
    }
}

impl<R: ManifestResource> ManifestDataSource<R> {
    fn decode(
        &self,
        schema: &Schema,
        config: &Value,
    ) -> Result<ManifestModel<R::Spec>, Diagnostics> {
        let (decoded, diagnostics) = decode_config(schema, config);
        if diagnostics.has_error() {
            return Err(diagnostics);
        }
        serde_json::from_value(decoded).map_err(|source| {
            Diagnostic::from(ManifestError::Decode {
                kind: R::kind(&()).into_owned(),
                source,
            })
            .into()
        })
    }

    fn encode(
        &self,
        schema: &Schema,
        model: &ManifestModel<R::Spec>,
    ) -> Result<Value, ManifestError> {
        let manifest = serde_json::to_value(model).map_err(|source| ManifestError::Encode {
            kind: R::kind(&()).into_owned(),
            source,
        })?;
        let mut state = encode_state(schema, &manifest);
        if let (Value::Object(fields), Some(yaml)) = (&mut state, &model.yaml) {
            fields.insert(ATTR_YAML.to_string(), Value::String(yaml.clone()));
        }
        Ok(state)
    }
}

impl<R: ManifestResource> DataSource for ManifestDataSource<R> {
    fn metadata(&self, req: &MetadataRequest) -> MetadataResponse {
        MetadataResponse {
            type_name: format!("{}_{}", req.provider_type_name, type_name_suffix::<R>()),
        }
    }

    fn schema(&self) -> Result<Schema, ManifestError> {
        manifest_schema(&R::crd(), &R::version(&()))
    }

    fn read(&self, req: &ReadRequest) -> ReadResponse {
        let kind = R::kind(&());
        debug!("Read {} manifest", kind);

        let schema = match self.schema() {
            Ok(schema) => schema,
            Err(e) => return ReadResponse::from_diagnostic(e.into()),
        };

        let mut model = match self.decode(&schema, &req.config) {
            Ok(model) => model,
            Err(diagnostics) => {
                warn!(
                    "Invalid {} configuration: {} error(s)",
                    kind,
                    diagnostics.errors().count()
                );
                return ReadResponse {
                    state: None,
                    diagnostics,
                };
            }
        };

        // A marshal failure aborts the read with a single diagnostic
        if let Err(e) = render_manifest::<R>(&mut model) {
            return ReadResponse::from_diagnostic(e.into());
        }

        match self.encode(&schema, &model) {
            Ok(state) => {
                debug!("Rendered {} manifest {}", kind, model.metadata.name);
                ReadResponse {
                    state: Some(state),
                    diagnostics: Diagnostics::new(),
                }
            }
            Err(e) => ReadResponse::from_diagnostic(e.into()),
        }
    }
}
