// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for manifest rendering.
//!
//! This module provides specialized error types for:
//! - Building Terraform schemas from CRD OpenAPI schemas
//! - Decoding configuration into typed manifest models
//! - Marshalling manifests to YAML
//! - Kubernetes metadata validation (names, namespaces, labels, annotations)
//!
//! Library errors are converted into [`Diagnostic`](crate::diagnostics::Diagnostic)s
//! before they reach the caller of a data source.

use thiserror::Error;

/// Errors that can occur while building or reading a manifest data source.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The CRD generated for a kind carries no OpenAPI schema for the served version.
    ///
    /// Every CRD derived with `kube::CustomResource` has a schema, so this only
    /// happens for hand-built CRDs.
    #[error("CRD {kind} has no OpenAPI v3 schema for version {version}")]
    MissingSchema {
        /// The kind whose schema is missing
        kind: String,
        /// The version that was requested
        version: String,
    },

    /// The CRD schema has no `spec` property.
    #[error("CRD {kind} schema has no spec property")]
    MissingSpecSchema {
        /// The kind whose spec schema is missing
        kind: String,
    },

    /// The decoded configuration does not fit the typed model.
    #[error("Failed to decode configuration into {kind} model: {source}")]
    Decode {
        /// The kind being decoded
        kind: String,
        /// Underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// The typed model could not be converted into a state tree.
    #[error("Failed to encode {kind} model: {source}")]
    Encode {
        /// The kind being encoded
        kind: String,
        /// Underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// YAML marshalling of the manifest failed.
    #[error("Failed to marshal manifest to YAML: {0}")]
    MarshalYaml(#[from] serde_yaml::Error),

    /// No data source is registered under the requested type name.
    #[error("Unknown data source type '{type_name}'")]
    UnknownDataSource {
        /// The type name that was requested
        type_name: String,
    },
}

/// Errors returned by the Kubernetes metadata validators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value is shorter than the required minimum length.
    #[error("must be at least {min} characters long, got {actual}")]
    TooShort {
        /// Required minimum length
        min: usize,
        /// Actual length
        actual: usize,
    },

    /// Value exceeds the allowed maximum length.
    #[error("must be no more than {max} characters, got {actual}")]
    TooLong {
        /// Allowed maximum length
        max: usize,
        /// Actual length
        actual: usize,
    },

    /// Value is not a valid DNS-1123 subdomain.
    #[error("'{value}' is not a valid DNS-1123 subdomain: must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character")]
    InvalidSubdomain {
        /// The rejected value
        value: String,
    },

    /// Value is not a valid DNS-1123 label.
    #[error("'{value}' is not a valid DNS-1123 label: must consist of lower case alphanumeric characters or '-', and must start and end with an alphanumeric character")]
    InvalidLabel {
        /// The rejected value
        value: String,
    },

    /// Key is not a valid qualified name (`[prefix/]name`).
    #[error("'{key}' is not a valid qualified name: {reason}")]
    InvalidQualifiedName {
        /// The rejected key
        key: String,
        /// Why the key was rejected
        reason: String,
    },

    /// Label value is malformed.
    #[error("label value '{value}' for key '{key}' is invalid: must be empty or consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character")]
    InvalidLabelValue {
        /// The label key
        key: String,
        /// The rejected value
        value: String,
    },

    /// Total annotation size exceeds the Kubernetes limit.
    #[error("annotations size {actual} bytes exceeds the limit of {max} bytes")]
    AnnotationsTooLarge {
        /// Allowed maximum size
        max: usize,
        /// Actual size
        actual: usize,
    },
}
