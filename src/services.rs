//! Built-in service definitions embedded in the binary
//!
//! Lets users pass `--service ec2` instead of a path to a YAML file.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Built-in service YAML definitions
pub static BUILTIN_SERVICES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();
        m.insert("ec2", include_str!("../services/ec2.yaml"));
        m
    });

/// Get a built-in service by name
pub fn get_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_SERVICES.get(name).copied()
}

/// Check if a name refers to a built-in service
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_SERVICES.contains_key(name)
}

/// List all built-in service names, sorted
pub fn list_builtin() -> Vec<&'static str> {
    let mut names: Vec<_> = BUILTIN_SERVICES.keys().copied().collect();
    names.sort_unstable();
    names
}
