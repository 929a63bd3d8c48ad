//! YAML Loader module
//!
//! Parse service definitions from YAML files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `ServiceDefinition` - Declarative description of a service's listings
//! - `CollectionDefinition` - One listing action and how it paginates
//! - YAML parsing with validation

mod parser;
mod types;

pub use parser::{load_service, load_service_from_str};
pub use types::{CollectionDefinition, HttpDefinition, PaginationDefinition, ServiceDefinition};

#[cfg(test)]
mod tests;
