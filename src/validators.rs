// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Kubernetes metadata validators.
//!
//! These mirror the apimachinery rules Kubernetes applies to object metadata:
//!
//! - Object names are DNS-1123 subdomains
//! - Namespaces are DNS-1123 labels
//! - Label and annotation keys are qualified names (`[prefix/]name`)
//! - Label values are short, restricted strings
//! - Annotations are limited in total size
//!
//! Each rule is exposed as a plain function returning [`ValidationError`], and as a
//! [`Validator`] variant that schema attributes carry and the configuration decoder
//! runs against user input.

use crate::constants::{
    DNS1123_LABEL_MAX_LENGTH, DNS1123_SUBDOMAIN_MAX_LENGTH, LABEL_VALUE_MAX_LENGTH,
    QUALIFIED_NAME_MAX_LENGTH, TOTAL_ANNOTATION_SIZE_LIMIT_BYTES,
};
use crate::errors::ValidationError;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;

static DNS1123_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("valid DNS-1123 label regex")
});

static DNS1123_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("valid DNS-1123 subdomain regex")
});

static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").expect("valid qualified name regex")
});

/// Validate a DNS-1123 subdomain, the format of most Kubernetes object names.
///
/// # Errors
///
/// Returns an error if the value is longer than 253 characters or contains
/// characters outside `[a-z0-9.-]`.
pub fn validate_dns1123_subdomain(value: &str) -> Result<(), ValidationError> {
    if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        return Err(ValidationError::TooLong {
            max: DNS1123_SUBDOMAIN_MAX_LENGTH,
            actual: value.len(),
        });
    }
    if !DNS1123_SUBDOMAIN.is_match(value) {
        return Err(ValidationError::InvalidSubdomain {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validate a DNS-1123 label, the format of namespace names.
///
/// # Errors
///
/// Returns an error if the value is longer than 63 characters or contains
/// characters outside `[a-z0-9-]`.
pub fn validate_dns1123_label(value: &str) -> Result<(), ValidationError> {
    if value.len() > DNS1123_LABEL_MAX_LENGTH {
        return Err(ValidationError::TooLong {
            max: DNS1123_LABEL_MAX_LENGTH,
            actual: value.len(),
        });
    }
    if !DNS1123_LABEL.is_match(value) {
        return Err(ValidationError::InvalidLabel {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validate a qualified name such as `app.kubernetes.io/name` or `tier`.
///
/// # Errors
///
/// Returns an error if the prefix is not a DNS-1123 subdomain, or the name part
/// is empty, too long, or malformed.
pub fn validate_qualified_name(key: &str) -> Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidQualifiedName {
        key: key.to_string(),
        reason,
    };

    let parts: Vec<&str> = key.split('/').collect();
    let name = match parts.as_slice() {
        [name] => *name,
        [prefix, name] => {
            if prefix.is_empty() {
                return Err(invalid("prefix part must be non-empty".to_string()));
            }
            validate_dns1123_subdomain(prefix)
                .map_err(|e| invalid(format!("prefix part {e}")))?;
            *name
        }
        _ => {
            return Err(invalid(
                "a qualified name must consist of an optional DNS subdomain prefix and a name, separated by '/'".to_string(),
            ))
        }
    };

    if name.is_empty() {
        return Err(invalid("name part must be non-empty".to_string()));
    }
    if name.len() > QUALIFIED_NAME_MAX_LENGTH {
        return Err(invalid(format!(
            "name part must be no more than {QUALIFIED_NAME_MAX_LENGTH} characters"
        )));
    }
    if !QUALIFIED_NAME.is_match(name) {
        return Err(invalid(
            "name part must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character".to_string(),
        ));
    }
    Ok(())
}

/// Validate a single label value.
///
/// # Errors
///
/// Returns an error if the value is longer than 63 characters or malformed.
pub fn validate_label_value(key: &str, value: &str) -> Result<(), ValidationError> {
    if value.len() > LABEL_VALUE_MAX_LENGTH {
        return Err(ValidationError::TooLong {
            max: LABEL_VALUE_MAX_LENGTH,
            actual: value.len(),
        });
    }
    if !value.is_empty() && !QUALIFIED_NAME.is_match(value) {
        return Err(ValidationError::InvalidLabelValue {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validate a set of labels.
///
/// # Errors
///
/// Returns the first invalid key or value.
pub fn validate_labels<'a, I>(labels: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    for (key, value) in labels {
        validate_qualified_name(key)?;
        validate_label_value(key, value)?;
    }
    Ok(())
}

/// Validate a set of annotations.
///
/// # Errors
///
/// Returns an error for the first invalid key, or if keys and values together
/// exceed 256 KiB.
pub fn validate_annotations<'a, I>(annotations: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut total = 0usize;
    for (key, value) in annotations {
        validate_qualified_name(key)?;
        total += key.len() + value.len();
    }
    if total > TOTAL_ANNOTATION_SIZE_LIMIT_BYTES {
        return Err(ValidationError::AnnotationsTooLarge {
            max: TOTAL_ANNOTATION_SIZE_LIMIT_BYTES,
            actual: total,
        });
    }
    Ok(())
}

/// A validator attached to a schema attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// String must have at least this many characters
    LengthAtLeast(usize),
    /// String must be a valid object name
    Name,
    /// String must be a valid namespace
    Namespace,
    /// Map must be valid labels
    Labels,
    /// Map must be valid annotations
    Annotations,
}

impl Validator {
    /// Short description used in generated documentation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::LengthAtLeast(min) => format!("string length must be at least {min}"),
            Self::Name => "must be a valid Kubernetes object name".to_string(),
            Self::Namespace => "must be a valid Kubernetes namespace".to_string(),
            Self::Labels => "must be valid Kubernetes labels".to_string(),
            Self::Annotations => "must be valid Kubernetes annotations".to_string(),
        }
    }

    /// Run this validator against a configuration value.
    ///
    /// Null values always pass; presence is checked separately. Values of the
    /// wrong JSON type pass too, since the decoder reports type mismatches itself.
    ///
    /// # Errors
    ///
    /// Returns the validation failure for a value that breaks the rule.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match (self, value) {
            (Self::LengthAtLeast(min), Value::String(s)) => {
                let actual = s.chars().count();
                if actual < *min {
                    return Err(ValidationError::TooShort { min: *min, actual });
                }
                Ok(())
            }
            (Self::Name, Value::String(s)) => validate_dns1123_subdomain(s),
            (Self::Namespace, Value::String(s)) => validate_dns1123_label(s),
            (Self::Labels, Value::Object(map)) => {
                validate_labels(string_entries(map))
            }
            (Self::Annotations, Value::Object(map)) => {
                validate_annotations(string_entries(map))
            }
            _ => Ok(()),
        }
    }
}

fn string_entries(
    map: &serde_json::Map<String, Value>,
) -> impl Iterator<Item = (&str, &str)> {
    map.iter()
        .filter_map(|(k, v)| v.as_str().map(|v| (k.as_str(), v)))
}
