// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Local tooling for the manifest data sources.
//!
//! Renders manifests from configuration files the same way Terraform would,
//! which makes it easy to check a configuration without running a plan.
//!
//! Usage:
//!   k8s-manifests list
//!   k8s-manifests schema k8s_databases_schemahero_io_database_v1alpha4_manifest
//!   k8s-manifests render k8s_databases_schemahero_io_database_v1alpha4_manifest --config db.yaml

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use k8s_manifests::constants::DEFAULT_PROVIDER_TYPE_NAME;
use k8s_manifests::provider::ManifestProvider;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "k8s-manifests",
    version,
    about = "Render Kubernetes custom resources as YAML manifests"
)]
struct Cli {
    /// Provider type name prefixed to every data source type name
    #[arg(long, default_value = DEFAULT_PROVIDER_TYPE_NAME)]
    provider_type_name: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the type names of all data sources
    List,
    /// Print the schema of a data source as JSON
    Schema {
        /// Data source type name
        type_name: String,
    },
    /// Render a manifest from a configuration file
    Render {
        /// Data source type name
        type_name: String,
        /// Configuration file (JSON, or YAML with a .yaml/.yml extension)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let provider = ManifestProvider::with_type_name(&cli.provider_type_name);
    debug!(
        "Provider {} with {} data source(s)",
        provider.type_name(),
        provider.data_source_type_names().len()
    );

    match cli.command {
        Command::List => {
            for type_name in provider.data_source_type_names() {
                println!("{type_name}");
            }
        }
        Command::Schema { type_name } => {
            let schema = provider.schema(&type_name)?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Render { type_name, config } => {
            let yaml = render(&provider, &type_name, &config)?;
            print!("{yaml}");
        }
    }

    Ok(())
}

// Logs go to stderr so rendered YAML on stdout can be piped.
//
// Respects RUST_LOG (default: info) and RUST_LOG_FORMAT (text or json).
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
    }
}

/// Load a configuration tree from a JSON or YAML file.
fn load_config(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let config = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML configuration {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON configuration {}", path.display()))?
    };
    Ok(config)
}

/// Render the manifest for one configuration file.
fn render(provider: &ManifestProvider, type_name: &str, config_path: &Path) -> Result<String> {
    let config = load_config(config_path)?;
    let response = provider.read_data_source(type_name, config);

    for diagnostic in response.diagnostics.iter().filter(|d| !d.is_error()) {
        warn!("{diagnostic}");
    }
    if response.diagnostics.has_error() {
        bail!(
            "Failed to render {type_name}:\n{}",
            response.diagnostics
        );
    }

    let Some(yaml) = response.yaml() else {
        bail!("Data source {type_name} returned no manifest");
    };
    info!("Rendered {} from {}", type_name, config_path.display());
    Ok(yaml.to_string())
}
