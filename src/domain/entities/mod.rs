//! Core domain entities.
//!
//! - [`Mapping`] - A short key bound to its target URL and delivery properties
//! - [`NewClick`] - A resolution served to a client, queued for logging
//!
//! Caller-supplied creation inputs live in [`MappingProperties`].

pub mod click;
pub mod mapping;

pub use click::NewClick;
pub use mapping::{Mapping, MappingProperties, RedirectMode};
