//! Helper functions shared across layers.
//!
//! - [`key_digest`] - MurmurHash3 digest used for derived keys
//! - [`url_check`] - Syntactic `http`/`https` URL validation
//! - [`client_ip`] - Client IP extraction from requests

pub mod client_ip;
pub mod key_digest;
pub mod url_check;
