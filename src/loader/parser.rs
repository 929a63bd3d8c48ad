//! YAML parser for service definitions
//!
//! Parses and validates service YAML files.
//! Supports both built-in services (by name) and custom YAML files (by path).

use crate::error::{Error, Result};
use crate::loader::types::{CollectionDefinition, ServiceDefinition};
use crate::services;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use url::Url;

/// Load a service definition from a name or file path
///
/// Built-in service names (e.g. `ec2`) are resolved first; anything else is
/// read from disk.
///
/// # Examples
///
/// ```ignore
/// let ec2 = load_service("ec2")?;
/// let custom = load_service("./my-service.yaml")?;
/// ```
pub fn load_service(path: impl AsRef<Path>) -> Result<ServiceDefinition> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.contains('/')
        && !path_str.contains('\\')
        && !path_str.ends_with(".yaml")
        && !path_str.ends_with(".yml")
    {
        if let Some(yaml) = services::get_builtin(&path_str) {
            return load_service_from_str(yaml);
        }
    }

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config(format!(
                "Service '{}' not found. Built-in services: {}. Or provide a path to a YAML file.",
                path.display(),
                services::list_builtin().join(", ")
            ))
        } else {
            Error::config(format!(
                "Failed to read service file '{}': {e}",
                path.display()
            ))
        }
    })?;
    load_service_from_str(&content)
}

/// Load a service definition from a YAML string
pub fn load_service_from_str(yaml: &str) -> Result<ServiceDefinition> {
    let def: ServiceDefinition = serde_yaml::from_str(yaml)?;

    validate_service(&def)?;
    Ok(def)
}

/// Validate a service definition
fn validate_service(def: &ServiceDefinition) -> Result<()> {
    if def.name.is_empty() {
        return Err(Error::config("Service name cannot be empty"));
    }

    Url::parse(&def.base_url)?;

    if def.collections.is_empty() {
        return Err(Error::config("Service must have at least one collection"));
    }

    let names: HashSet<_> = def.collections.iter().map(|c| &c.name).collect();
    if names.len() != def.collections.len() {
        return Err(Error::config("Duplicate collection names found"));
    }

    let actions: HashSet<_> = def.collections.iter().map(|c| &c.action).collect();
    if actions.len() != def.collections.len() {
        return Err(Error::config("Duplicate collection actions found"));
    }

    for collection in &def.collections {
        validate_collection(collection)?;
    }

    Ok(())
}

/// Validate a collection definition
fn validate_collection(collection: &CollectionDefinition) -> Result<()> {
    if collection.name.is_empty() {
        return Err(Error::config("Collection name cannot be empty"));
    }

    if collection.action.is_empty() {
        return Err(Error::config(format!(
            "Collection '{}' action cannot be empty",
            collection.name
        )));
    }

    if collection.path.is_empty() {
        return Err(Error::config(format!(
            "Collection '{}' path cannot be empty",
            collection.name
        )));
    }

    if let Some(pagination) = &collection.pagination {
        if pagination.token_path.is_empty() || pagination.token_param.is_empty() {
            return Err(Error::config(format!(
                "Collection '{}' pagination needs both token_path and token_param",
                collection.name
            )));
        }
        if pagination
            .page_size_param
            .as_ref()
            .is_some_and(String::is_empty)
        {
            return Err(Error::config(format!(
                "Collection '{}' page_size_param cannot be empty",
                collection.name
            )));
        }
    }

    Ok(())
}
