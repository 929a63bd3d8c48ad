//! Resource types
//!
//! Records arrive in the service's PascalCase JSON shape and are decoded
//! with serde.

use crate::codec::Codec;
use crate::pagination::ActionParameters;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A kind of resource that can be listed page by page
pub trait ResourceKind: DeserializeOwned + Sized + 'static {
    /// Collection name in the service definition
    const COLLECTION: &'static str;
    /// Listing action the collection is served by
    const LIST_ACTION: &'static str;

    /// Codec turning one raw record into this kind
    fn codec() -> Codec<Self> {
        Codec::deserialize()
    }

    /// Identifier the service uses for this resource
    fn identifier(&self) -> &str;

    /// Parameters for listing every resource of this kind
    fn request() -> ActionParameters {
        ActionParameters::new(Self::LIST_ACTION)
    }
}

// ============================================================================
// Key Pair
// ============================================================================

/// An SSH key pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyPair {
    pub key_name: String,
    #[serde(default)]
    pub key_fingerprint: Option<String>,
    #[serde(default)]
    pub key_pair_id: Option<String>,
}

impl ResourceKind for KeyPair {
    const COLLECTION: &'static str = "key_pairs";
    const LIST_ACTION: &'static str = "DescribeKeyPairs";

    fn identifier(&self) -> &str {
        &self.key_name
    }
}

// ============================================================================
// Instance
// ============================================================================

/// A virtual machine instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Instance {
    pub instance_id: String,
    #[serde(default)]
    pub instance_type: Option<String>,
    #[serde(default)]
    pub state: Option<InstanceState>,
    #[serde(default)]
    pub launch_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Instance {
    /// Value of the tag named `key`
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }
}

impl ResourceKind for Instance {
    const COLLECTION: &'static str = "instances";
    const LIST_ACTION: &'static str = "DescribeInstances";

    fn identifier(&self) -> &str {
        &self.instance_id
    }
}

/// Lifecycle state of an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceState {
    pub code: u16,
    pub name: String,
}

/// A key/value tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

// ============================================================================
// Volume
// ============================================================================

/// A block storage volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Volume {
    pub volume_id: String,
    /// Size in GiB
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub availability_zone: Option<String>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
}

impl ResourceKind for Volume {
    const COLLECTION: &'static str = "volumes";
    const LIST_ACTION: &'static str = "DescribeVolumes";

    fn identifier(&self) -> &str {
        &self.volume_id
    }
}

// ============================================================================
// Security Group
// ============================================================================

/// A virtual firewall scoping traffic to instances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroup {
    pub group_id: String,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub vpc_id: Option<String>,
}

impl ResourceKind for SecurityGroup {
    const COLLECTION: &'static str = "security_groups";
    const LIST_ACTION: &'static str = "DescribeSecurityGroups";

    fn identifier(&self) -> &str {
        &self.group_id
    }
}
