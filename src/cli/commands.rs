//! CLI commands and argument parsing

use crate::error::{Error, Result};
use crate::types::LogLevel;
use clap::{Parser, Subcommand};

/// Page through cloud resource listings
#[derive(Parser, Debug)]
#[command(name = "resource-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service definition: a built-in name or a YAML file
    #[arg(short, long, global = true, default_value = "ec2")]
    pub service: String,

    /// Log level (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the collections of the service
    Collections,

    /// Validate the service definition
    Validate,

    /// List the resources of a collection
    List {
        /// Collection name (e.g. key_pairs)
        collection: String,

        /// Request parameter, repeatable
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Requested page size
        #[arg(long)]
        page_size: Option<u32>,

        /// Print one line per page instead of one per resource
        #[arg(long)]
        pages: bool,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,

        /// Write every raw service response to stderr
        #[arg(long)]
        capture: bool,
    },
}

/// Parse a `KEY=VALUE` pair
pub(crate) fn parse_param(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(Error::invalid_value(
            "param",
            format!("expected KEY=VALUE, got '{s}'"),
        )),
    }
}
