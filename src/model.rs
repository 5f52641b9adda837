// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The manifest model shared by every data source.
//!
//! A [`ManifestModel`] is built fresh for each read: decoded from configuration,
//! stamped with `apiVersion` and `kind`, serialized, and discarded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Object metadata a user may set on a manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Object name.
    pub name: String,

    /// Object namespace. Always `None` for cluster-scoped kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Labels. Omitted from the manifest when empty.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    /// Annotations. Omitted from the manifest when empty.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// A Kubernetes manifest for a resource with spec type `S`.
///
/// Field order is the serialized order: `apiVersion`, `kind`, `metadata`, `spec`.
/// The computed `yaml` never appears in its own output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestModel<S> {
    /// The rendered manifest, filled in by a read.
    #[serde(skip)]
    pub yaml: Option<String>,

    /// `<group>/<version>` of the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Kind of the resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Object metadata.
    pub metadata: ManifestMetadata,

    /// Resource spec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<S>,
}

impl<S> ManifestModel<S> {
    /// Create a model with the given metadata and spec.
    pub fn new(metadata: ManifestMetadata, spec: Option<S>) -> Self {
        Self {
            yaml: None,
            api_version: None,
            kind: None,
            metadata,
            spec,
        }
    }
}
