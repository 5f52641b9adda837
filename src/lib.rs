// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # k8s-manifests - Kubernetes manifests as Terraform data sources
//!
//! This crate renders Kubernetes custom resources as YAML manifests from
//! Terraform configuration, without talking to a cluster. Each CRD version is
//! exposed as a read-only data source whose computed `yaml` attribute holds the
//! manifest, ready for `kubectl apply` or a GitOps repository.
//!
//! ## Overview
//!
//! One generic template serves every CRD:
//!
//! - The spec is a Rust type deriving `kube::CustomResource` and `JsonSchema`
//! - The Terraform schema is generated from that type's OpenAPI schema
//! - A read decodes configuration into the typed model, stamps `apiVersion`
//!   and `kind`, and marshals it to YAML
//!
//! ## Modules
//!
//! - [`crd`] - Custom resource spec types
//! - [`schema`] - Terraform schema generation from CRD OpenAPI schemas
//! - [`convert`] - Configuration and state tree conversion
//! - [`datasource`] - The manifest data source and its `Read`
//! - [`provider`] - Registry of data sources by type name
//! - [`validators`] - Kubernetes name, namespace, label and annotation rules
//! - [`diagnostics`] - Terraform-style diagnostics
//!
//! ## Example
//!
//! ```rust,no_run
//! use k8s_manifests::crd::Database;
//! use k8s_manifests::datasource::{DataSource, ManifestDataSource, ReadRequest};
//! use serde_json::json;
//!
//! let data_source = ManifestDataSource::<Database>::new();
//! let response = data_source.read(&ReadRequest {
//!     config: json!({
//!         "metadata": { "name": "db1", "namespace": "default" },
//!         "spec": {
//!             "connection": { "postgres": { "host": { "value": "localhost" } } }
//!         }
//!     }),
//! });
//! assert!(!response.diagnostics.has_error());
//! ```

pub mod constants;
pub mod convert;
pub mod crd;
pub mod datasource;
pub mod diagnostics;
pub mod errors;
pub mod model;
pub mod provider;
pub mod schema;
pub mod validators;

#[cfg(test)]
mod crd_tests;
#[cfg(test)]
mod provider_tests;
