//! Infrastructure layer: concrete implementations of domain contracts.
//!
//! - [`identifier`] - Hash-based key derivation
//! - [`validation`] - Custom word rule and HTTP reachability probing
//! - [`qr`] - PNG rendering of QR codes
//! - [`task_pool`] - Bounded worker pool for probes and notifications
//! - [`persistence`] - PostgreSQL and in-memory repositories

pub mod identifier;
pub mod persistence;
pub mod qr;
pub mod task_pool;
pub mod validation;
