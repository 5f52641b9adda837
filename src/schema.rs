// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Terraform schemas generated from CRD OpenAPI schemas.
//!
//! Every manifest data source has the same outer shape:
//!
//! - `yaml` - computed string holding the rendered manifest
//! - `metadata` - required block with `name`, `namespace` (namespaced kinds only),
//!   `labels` and `annotations`
//! - `spec` - optional block mirroring the CRD's `spec` property
//!
//! The `spec` block is produced by walking the CRD's OpenAPI v3 schema. Each
//! property becomes an attribute named with the snake_case form of the property,
//! and remembers the camelCase manifest name it maps back to. Because the CRD
//! schema is itself derived from the Rust spec type, the Terraform schema and the
//! model cannot drift apart.

use crate::constants::{
    ATTR_ANNOTATIONS, ATTR_LABELS, ATTR_METADATA, ATTR_NAME, ATTR_NAMESPACE, ATTR_SPEC, ATTR_YAML,
    SCOPE_NAMESPACED,
};
use crate::errors::ManifestError;
use crate::validators::Validator;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceDefinition, JSONSchemaProps, JSONSchemaPropsOrArray, JSONSchemaPropsOrBool,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Attributes of a block, keyed by Terraform attribute name.
pub type Attributes = BTreeMap<String, Attribute>;

/// Value type of an attribute.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// UTF-8 string
    String,
    /// Boolean
    Bool,
    /// 64-bit integer
    Int64,
    /// 64-bit float
    Float64,
    /// List of primitive elements
    List(Box<AttributeType>),
    /// Map from string to primitive elements
    Map(Box<AttributeType>),
    /// A single nested block
    SingleNested(Attributes),
    /// A list of nested blocks
    ListNested(Attributes),
}

impl AttributeType {
    /// Human readable type name, e.g. `List of String`.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::String => "String".to_string(),
            Self::Bool => "Boolean".to_string(),
            Self::Int64 => "Number".to_string(),
            Self::Float64 => "Number".to_string(),
            Self::List(element) => format!("List of {}", element.type_name()),
            Self::Map(element) => format!("Map of {}", element.type_name()),
            Self::SingleNested(_) => "Attributes".to_string(),
            Self::ListNested(_) => "Attributes List".to_string(),
        }
    }
}

/// A single schema attribute.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Attribute {
    /// Value type
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    /// Description shown in documentation
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Must be set in configuration
    pub required: bool,
    /// May be set in configuration
    pub optional: bool,
    /// Set by the provider
    pub computed: bool,
    /// camelCase name of the manifest field this attribute maps to.
    /// `None` for attributes that never appear in the manifest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_name: Option<String>,
    /// Validators run against configured values
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl Attribute {
    fn new(attribute_type: AttributeType, required: bool, optional: bool, computed: bool) -> Self {
        Self {
            attribute_type,
            description: String::new(),
            required,
            optional,
            computed,
            manifest_name: None,
            validators: Vec::new(),
        }
    }

    /// A required attribute.
    #[must_use]
    pub fn required(attribute_type: AttributeType) -> Self {
        Self::new(attribute_type, true, false, false)
    }

    /// An optional attribute.
    #[must_use]
    pub fn optional(attribute_type: AttributeType) -> Self {
        Self::new(attribute_type, false, true, false)
    }

    /// A computed-only attribute.
    #[must_use]
    pub fn computed(attribute_type: AttributeType) -> Self {
        Self::new(attribute_type, false, false, true)
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the manifest field name.
    #[must_use]
    pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = Some(name.into());
        self
    }

    /// Add a validator.
    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Nested attributes for block types.
    #[must_use]
    pub fn nested_attributes(&self) -> Option<&Attributes> {
        match &self.attribute_type {
            AttributeType::SingleNested(attrs) | AttributeType::ListNested(attrs) => Some(attrs),
            _ => None,
        }
    }
}

/// Schema of one data source.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Schema {
    /// Description shown in documentation
    pub description: String,
    /// Top-level attributes
    pub attributes: Attributes,
}

impl Schema {
    /// Look up an attribute by dotted path, e.g. `spec.connection.postgres`.
    #[must_use]
    pub fn attribute(&self, path: &str) -> Option<&Attribute> {
        let mut parts = path.split('.');
        let mut current = self.attributes.get(parts.next()?)?;
        for part in parts {
            current = current.nested_attributes()?.get(part)?;
        }
        Some(current)
    }
}

/// Convert a camelCase manifest property name into a Terraform attribute name.
///
/// Acronyms are kept together: `disableTLS` becomes `disable_tls` and
/// `generatedDDLStatement` becomes `generated_ddl_statement`.
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next_is_lower,
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '-' || c == '.' {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    out
}

/// Build the attribute for one OpenAPI property.
#[must_use]
pub fn attribute_from_json_schema(props: &JSONSchemaProps, required: bool) -> Attribute {
    let attribute_type = attribute_type_from_json_schema(props);
    let attribute = if required {
        Attribute::required(attribute_type)
    } else {
        Attribute::optional(attribute_type)
    };
    match &props.description {
        Some(description) => attribute.with_description(description.clone()),
        None => attribute,
    }
}

fn has_properties(props: &JSONSchemaProps) -> bool {
    props.properties.as_ref().is_some_and(|p| !p.is_empty())
}

fn attribute_type_from_json_schema(props: &JSONSchemaProps) -> AttributeType {
    match props.type_.as_deref() {
        Some("string") => AttributeType::String,
        Some("boolean") => AttributeType::Bool,
        Some("integer") => AttributeType::Int64,
        Some("number") => AttributeType::Float64,
        Some("array") => {
            let item = match &props.items {
                Some(JSONSchemaPropsOrArray::Schema(item)) => Some(item.as_ref()),
                Some(JSONSchemaPropsOrArray::Schemas(items)) => items.first(),
                None => None,
            };
            match item {
                Some(item) if has_properties(item) => {
                    AttributeType::ListNested(nested_attributes(item))
                }
                Some(item) => AttributeType::List(Box::new(attribute_type_from_json_schema(item))),
                None => AttributeType::List(Box::new(AttributeType::String)),
            }
        }
        _ if has_properties(props) => AttributeType::SingleNested(nested_attributes(props)),
        Some("object") => match &props.additional_properties {
            Some(JSONSchemaPropsOrBool::Schema(value)) => {
                AttributeType::Map(Box::new(attribute_type_from_json_schema(value)))
            }
            _ => AttributeType::Map(Box::new(AttributeType::String)),
        },
        // int-or-string and preserve-unknown-fields values are passed through as strings
        _ => AttributeType::String,
    }
}

/// Build the attributes of an object schema's properties.
#[must_use]
pub fn nested_attributes(props: &JSONSchemaProps) -> Attributes {
    let required = props.required.as_deref().unwrap_or_default();
    props
        .properties
        .iter()
        .flatten()
        .map(|(name, property)| {
            let is_required = required.contains(name);
            let attribute =
                attribute_from_json_schema(property, is_required).with_manifest_name(name.clone());
            (to_snake_case(name), attribute)
        })
        .collect()
}

/// The fixed `metadata` block.
///
/// Cluster-scoped kinds get no `namespace` attribute.
#[must_use]
pub fn metadata_attribute(namespaced: bool) -> Attribute {
    let mut attributes = Attributes::new();
    attributes.insert(
        ATTR_NAME.to_string(),
        Attribute::required(AttributeType::String)
            .with_description("Unique identifier for this object within its namespace.")
            .with_manifest_name(ATTR_NAME)
            .with_validator(Validator::LengthAtLeast(1))
            .with_validator(Validator::Name),
    );
    if namespaced {
        attributes.insert(
            ATTR_NAMESPACE.to_string(),
            Attribute::required(AttributeType::String)
                .with_description("Namespace the object lives in.")
                .with_manifest_name(ATTR_NAMESPACE)
                .with_validator(Validator::LengthAtLeast(1))
                .with_validator(Validator::Namespace),
        );
    }
    attributes.insert(
        ATTR_LABELS.to_string(),
        Attribute::optional(AttributeType::Map(Box::new(AttributeType::String)))
            .with_description("Map of string keys and values used to organize and select objects.")
            .with_manifest_name(ATTR_LABELS)
            .with_validator(Validator::Labels),
    );
    attributes.insert(
        ATTR_ANNOTATIONS.to_string(),
        Attribute::optional(AttributeType::Map(Box::new(AttributeType::String)))
            .with_description("Unstructured key value map stored with the object.")
            .with_manifest_name(ATTR_ANNOTATIONS)
            .with_validator(Validator::Annotations),
    );

    Attribute::required(AttributeType::SingleNested(attributes))
        .with_description("Data that helps uniquely identify the object.")
        .with_manifest_name(ATTR_METADATA)
}

/// Build the data source schema for one served version of a CRD.
///
/// # Errors
///
/// Returns an error if the CRD has no OpenAPI schema for `version`, or the
/// schema has no `spec` property.
pub fn manifest_schema(
    crd: &CustomResourceDefinition,
    version: &str,
) -> Result<Schema, ManifestError> {
    let kind = crd.spec.names.kind.clone();
    let root = crd
        .spec
        .versions
        .iter()
        .find(|v| v.name == version)
        .and_then(|v| v.schema.as_ref())
        .and_then(|s| s.open_api_v3_schema.as_ref())
        .ok_or_else(|| ManifestError::MissingSchema {
            kind: kind.clone(),
            version: version.to_string(),
        })?;

    let spec = root
        .properties
        .as_ref()
        .and_then(|p| p.get(ATTR_SPEC))
        .ok_or_else(|| ManifestError::MissingSpecSchema { kind: kind.clone() })?;

    let namespaced = crd.spec.scope == SCOPE_NAMESPACED;
    debug!(
        "Building schema for {}/{} {} (namespaced: {})",
        crd.spec.group, version, kind, namespaced
    );

    let mut attributes = Attributes::new();
    attributes.insert(
        ATTR_YAML.to_string(),
        Attribute::computed(AttributeType::String)
            .with_description("The generated manifest in YAML format."),
    );
    attributes.insert(ATTR_METADATA.to_string(), metadata_attribute(namespaced));
    attributes.insert(
        ATTR_SPEC.to_string(),
        attribute_from_json_schema(spec, false).with_manifest_name(ATTR_SPEC),
    );

    let description = root
        .description
        .clone()
        .unwrap_or_else(|| format!("{kind} manifest"));

    Ok(Schema {
        description: format!(
            "Creates a YAML manifest of {kind} ({}/{version}). {description}",
            crd.spec.group
        ),
        attributes,
    })
}
