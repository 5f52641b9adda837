// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Conversion between Terraform configuration trees and manifest models.
//!
//! Terraform hands a data source its configuration as a tree keyed by
//! snake_case attribute names, with `null` for anything unset. The manifest
//! model is keyed by camelCase field names and omits unset fields. The schema
//! knows both names for every attribute, so it drives the conversion both ways.
//!
//! Decoding also performs the checks Terraform runs before a read: unknown
//! attributes, missing required attributes, computed attributes set by the
//! user, value type mismatches, and attribute validators.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::schema::{Attribute, AttributeType, Attributes, Schema};
use serde_json::{Map, Value};
use tracing::debug;

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn type_mismatch(path: &str, expected: &str, actual: &Value) -> Diagnostic {
    let actual = match actual {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    };
    Diagnostic::error(
        "Incorrect attribute value type",
        format!("Inappropriate value for attribute \"{path}\": {expected} required, got {actual}."),
    )
    .with_attribute(path)
}

/// Decode a configuration tree into a camelCase manifest tree.
///
/// Returns the decoded tree together with every diagnostic found. The tree is
/// only meaningful when the diagnostics contain no errors.
#[must_use]
pub fn decode_config(schema: &Schema, config: &Value) -> (Value, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let decoded = match config {
        Value::Object(_) | Value::Null => {
            let empty = Value::Object(Map::new());
            let config = if config.is_null() { &empty } else { config };
            Value::Object(decode_object(&schema.attributes, config, "", &mut diagnostics))
        }
        other => {
            diagnostics.push(type_mismatch("", "object", other));
            Value::Null
        }
    };
    debug!(
        "Decoded configuration with {} diagnostic(s)",
        diagnostics.len()
    );
    (decoded, diagnostics)
}

fn decode_object(
    attributes: &Attributes,
    config: &Value,
    path: &str,
    diagnostics: &mut Diagnostics,
) -> Map<String, Value> {
    let mut out = Map::new();

    if let Value::Object(fields) = config {
        for name in fields.keys() {
            if !attributes.contains_key(name) {
                let attr_path = child_path(path, name);
                diagnostics.push(
                    Diagnostic::error(
                        "Unsupported argument",
                        format!("An argument named \"{name}\" is not expected here."),
                    )
                    .with_attribute(attr_path),
                );
            }
        }
    }

    for (name, attribute) in attributes {
        let attr_path = child_path(path, name);
        let value = config.get(name).unwrap_or(&Value::Null);
        if let Some(decoded) = decode_attribute(attribute, value, &attr_path, diagnostics) {
            if let Some(manifest_name) = &attribute.manifest_name {
                out.insert(manifest_name.clone(), decoded);
            }
        }
    }
    out
}

fn decode_attribute(
    attribute: &Attribute,
    value: &Value,
    path: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Value> {
    if value.is_null() {
        if attribute.required {
            diagnostics.push(
                Diagnostic::error(
                    "Missing required argument",
                    format!("The argument \"{path}\" is required, but no definition was found."),
                )
                .with_attribute(path),
            );
        }
        return None;
    }

    if attribute.computed && !attribute.optional {
        diagnostics.push(
            Diagnostic::error(
                "Invalid configuration for computed attribute",
                format!("\"{path}\" is computed by the provider and cannot be set in configuration."),
            )
            .with_attribute(path),
        );
        return None;
    }

    let errors_before = diagnostics.errors().count();
    let decoded = decode_value(&attribute.attribute_type, value, path, diagnostics);

    // Validators only make sense on well-typed values
    if diagnostics.errors().count() == errors_before {
        for validator in &attribute.validators {
            if let Err(e) = validator.validate(value) {
                diagnostics.push(
                    Diagnostic::error("Invalid attribute value", format!("Attribute {path} {e}"))
                        .with_attribute(path),
                );
            }
        }
    }
    decoded
}

fn decode_value(
    attribute_type: &AttributeType,
    value: &Value,
    path: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Value> {
    match (attribute_type, value) {
        (AttributeType::String, Value::String(_))
        | (AttributeType::Bool, Value::Bool(_))
        | (AttributeType::Float64, Value::Number(_)) => Some(value.clone()),
        (AttributeType::Int64, Value::Number(n)) if n.is_i64() => Some(value.clone()),
        (AttributeType::List(element), Value::Array(items)) => {
            let decoded = items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| {
                    let item_path = format!("{path}[{i}]");
                    if item.is_null() {
                        diagnostics.push(
                            Diagnostic::error(
                                "Invalid list element",
                                format!("Null elements are not allowed in \"{path}\"."),
                            )
                            .with_attribute(item_path),
                        );
                        return None;
                    }
                    decode_value(element, item, &item_path, diagnostics)
                })
                .collect();
            Some(Value::Array(decoded))
        }
        (AttributeType::Map(element), Value::Object(entries)) => {
            let mut decoded = Map::new();
            for (key, entry) in entries {
                let entry_path = format!("{path}[\"{key}\"]");
                if let Some(v) = decode_value(element, entry, &entry_path, diagnostics) {
                    decoded.insert(key.clone(), v);
                }
            }
            Some(Value::Object(decoded))
        }
        (AttributeType::SingleNested(attributes), Value::Object(_)) => Some(Value::Object(
            decode_object(attributes, value, path, diagnostics),
        )),
        (AttributeType::ListNested(attributes), Value::Array(items)) => {
            let decoded = items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let item_path = format!("{path}[{i}]");
                    if item.is_object() {
                        Value::Object(decode_object(attributes, item, &item_path, diagnostics))
                    } else {
                        diagnostics.push(type_mismatch(&item_path, "object", item));
                        Value::Null
                    }
                })
                .collect();
            Some(Value::Array(decoded))
        }
        (expected, actual) => {
            diagnostics.push(type_mismatch(path, &expected.type_name(), actual));
            None
        }
    }
}

/// Encode a camelCase manifest tree into a Terraform state tree.
///
/// Every attribute in the schema is present in the result; unset attributes are
/// `null`. Attributes without a manifest name (such as `yaml`) are left `null`
/// for the caller to fill in.
#[must_use]
pub fn encode_state(schema: &Schema, manifest: &Value) -> Value {
    Value::Object(encode_object(&schema.attributes, manifest))
}

fn encode_object(attributes: &Attributes, manifest: &Value) -> Map<String, Value> {
    attributes
        .iter()
        .map(|(name, attribute)| {
            let value = attribute
                .manifest_name
                .as_ref()
                .and_then(|m| manifest.get(m))
                .map_or(Value::Null, |v| encode_value(&attribute.attribute_type, v));
            (name.clone(), value)
        })
        .collect()
}

fn encode_value(attribute_type: &AttributeType, value: &Value) -> Value {
    match (attribute_type, value) {
        (AttributeType::SingleNested(attributes), Value::Object(_)) => {
            Value::Object(encode_object(attributes, value))
        }
        (AttributeType::ListNested(attributes), Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|item| Value::Object(encode_object(attributes, item)))
                .collect(),
        ),
        _ => value.clone(),
    }
}
