//! Resource kinds
//!
//! Typed handles for EC2-style resources and the [`Ec2`] facade that hands
//! out one [`ResourceCollection`](crate::pagination::ResourceCollection) per
//! kind.
//!
//! # Example
//!
//! ```ignore
//! let ec2 = Ec2::builtin()?;
//! let mut keys = ec2.key_pairs().resources();
//! while let Some(key) = keys.next().await {
//!     println!("{}", key?.key_name);
//! }
//! ```

mod ec2;
mod types;

pub use ec2::Ec2;
pub use types::{Instance, InstanceState, KeyPair, ResourceKind, SecurityGroup, Tag, Volume};

#[cfg(test)]
mod tests;
