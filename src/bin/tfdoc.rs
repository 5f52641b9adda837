// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Data Source Markdown Documentation Generator
//!
//! Generates markdown reference documentation from the data source schemas.
//! This ensures the documentation in docs/data-sources.md is always in sync with the code.
//!
//! Usage:
//!   cargo run --bin tfdoc > docs/data-sources.md

use anyhow::Result;
use k8s_manifests::provider::ManifestProvider;
use k8s_manifests::schema::{Attribute, Attributes};

fn main() -> Result<()> {
    let provider = ManifestProvider::new();
    let schemas = provider.schemas()?;

    println!("# Data Sources");
    println!();
    println!("> **Note**: This file is AUTO-GENERATED from `src/crd.rs`");
    println!("> DO NOT EDIT MANUALLY - Run `cargo run --bin tfdoc` to regenerate");
    println!();

    println!("## Table of Contents");
    println!();
    for type_name in schemas.keys() {
        println!("- [{type_name}](#{type_name})");
    }
    println!();

    for (type_name, schema) in &schemas {
        println!("## {type_name}");
        println!();
        println!("{}", schema.description);
        println!();
        println!("| Attribute | Type | Required | Description |");
        println!("| --------- | ---- | -------- | ----------- |");
        print_attributes(&schema.attributes, "");
        println!();
        println!("---");
        println!();
    }

    Ok(())
}

fn print_attributes(attributes: &Attributes, prefix: &str) {
    for (name, attribute) in attributes {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        println!(
            "| `{path}` | {} | {} | {} |",
            attribute.attribute_type.type_name(),
            presence(attribute),
            get_description(attribute)
        );
        if let Some(nested) = attribute.nested_attributes() {
            print_attributes(nested, &path);
        }
    }
}

fn presence(attribute: &Attribute) -> &'static str {
    if attribute.required {
        "Yes"
    } else if attribute.computed {
        "Computed"
    } else {
        "No"
    }
}

fn get_description(attribute: &Attribute) -> String {
    let mut description = attribute.description.replace('|', "\\|").replace('\n', " ");
    for validator in &attribute.validators {
        if !description.is_empty() {
            description.push(' ');
        }
        description.push_str(&format!("({})", validator.description()));
    }
    description
}
