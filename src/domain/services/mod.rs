//! Capability traits consumed by the application services.
//!
//! Each trait has one production implementation in
//! [`crate::infrastructure`] and a `mockall` double for unit tests. Services
//! receive them as `Arc<dyn Trait>` so storage, hashing and probing can be
//! swapped without touching orchestration code.

pub mod channel;
pub mod custom_word;
pub mod identifier;
pub mod reachability;

pub use channel::{ChannelClosed, ClientChannel};
pub use custom_word::CustomWordValidator;
pub use identifier::IdentifierService;
pub use reachability::ReachabilityValidator;

#[cfg(test)]
pub use channel::MockClientChannel;
#[cfg(test)]
pub use custom_word::MockCustomWordValidator;
#[cfg(test)]
pub use identifier::MockIdentifierService;
#[cfg(test)]
pub use reachability::MockReachabilityValidator;
