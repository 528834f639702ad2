//! Production validators.
//!
//! - [`AlphanumericWordValidator`] - Custom word lexical rule
//! - [`HttpReachabilityValidator`] - URL syntax check and live HTTP probe

mod custom_word;
mod reachability;

pub use custom_word::AlphanumericWordValidator;
pub use reachability::{HttpReachabilityValidator, ProbeRetryPolicy};
