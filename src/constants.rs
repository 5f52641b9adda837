// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the manifest provider.
//!
//! This module contains the string and numeric constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Provider Constants
// ============================================================================

/// Default Terraform provider type name, used as the prefix of every data source type name
pub const DEFAULT_PROVIDER_TYPE_NAME: &str = "k8s";

/// Suffix appended to every manifest data source type name
pub const MANIFEST_TYPE_NAME_SUFFIX: &str = "manifest";

// ============================================================================
// API Constants
// ============================================================================

/// API group for `SchemaHero` database connections
pub const API_GROUP_DATABASES: &str = "databases.schemahero.io";

/// API group for `SchemaHero` schema objects (tables, migrations)
pub const API_GROUP_SCHEMAS: &str = "schemas.schemahero.io";

/// API version shared by the `SchemaHero` CRDs exposed here
pub const API_VERSION_V1ALPHA4: &str = "v1alpha4";

/// Kind name for `Database` resource
pub const KIND_DATABASE: &str = "Database";

/// Kind name for `Migration` resource
pub const KIND_MIGRATION: &str = "Migration";

/// Value of `spec.scope` for namespaced CRDs
pub const SCOPE_NAMESPACED: &str = "Namespaced";

// ============================================================================
// Schema Attribute Names
// ============================================================================

/// Computed attribute holding the rendered manifest
pub const ATTR_YAML: &str = "yaml";

/// Attribute holding object metadata
pub const ATTR_METADATA: &str = "metadata";

/// Attribute holding the resource spec
pub const ATTR_SPEC: &str = "spec";

/// `metadata.name` attribute
pub const ATTR_NAME: &str = "name";

/// `metadata.namespace` attribute
pub const ATTR_NAMESPACE: &str = "namespace";

/// `metadata.labels` attribute
pub const ATTR_LABELS: &str = "labels";

/// `metadata.annotations` attribute
pub const ATTR_ANNOTATIONS: &str = "annotations";

// ============================================================================
// Kubernetes Validation Limits
// ============================================================================

/// Maximum length of a DNS-1123 subdomain (object names, label key prefixes)
pub const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

/// Maximum length of a DNS-1123 label (namespaces)
pub const DNS1123_LABEL_MAX_LENGTH: usize = 63;

/// Maximum length of the name part of a qualified name
pub const QUALIFIED_NAME_MAX_LENGTH: usize = 63;

/// Maximum length of a label value
pub const LABEL_VALUE_MAX_LENGTH: usize = 63;

/// Maximum combined size of all annotation keys and values (256 KiB)
pub const TOTAL_ANNOTATION_SIZE_LIMIT_BYTES: usize = 256 * 1024;
