//! EC2 facade

use super::types::{Instance, KeyPair, ResourceKind, SecurityGroup, Volume};
use crate::error::Result;
use crate::listing::{HttpListing, ListingOperation};
use crate::loader::{load_service, ServiceDefinition};
use crate::pagination::{ActionParameters, ResourceCollection};
use std::fmt;
use std::sync::Arc;

/// Entry point to the EC2 resource collections
#[derive(Clone)]
pub struct Ec2 {
    listing: Arc<dyn ListingOperation>,
}

impl Ec2 {
    /// Serve every collection from `listing`
    pub fn new(listing: Arc<dyn ListingOperation>) -> Self {
        Self { listing }
    }

    /// Serve collections over HTTP as described by `def`
    pub fn from_definition(def: &ServiceDefinition) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpListing::from_definition(def)?)))
    }

    /// Serve collections from the built-in `ec2` service definition
    pub fn builtin() -> Result<Self> {
        Self::from_definition(&load_service("ec2")?)
    }

    /// Collection of `K` listed with `params`.
    ///
    /// Start from [`ResourceKind::request`] to add filters or a page size.
    pub fn collection<K: ResourceKind>(&self, params: ActionParameters) -> ResourceCollection<K> {
        ResourceCollection::new(Arc::clone(&self.listing), params, K::codec())
    }

    /// Every key pair
    pub fn key_pairs(&self) -> ResourceCollection<KeyPair> {
        self.collection(KeyPair::request())
    }

    /// Every instance
    pub fn instances(&self) -> ResourceCollection<Instance> {
        self.collection(Instance::request())
    }

    /// Every volume
    pub fn volumes(&self) -> ResourceCollection<Volume> {
        self.collection(Volume::request())
    }

    /// Every security group
    pub fn security_groups(&self) -> ResourceCollection<SecurityGroup> {
        self.collection(SecurityGroup::request())
    }
}

impl fmt::Debug for Ec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ec2").finish_non_exhaustive()
    }
}
