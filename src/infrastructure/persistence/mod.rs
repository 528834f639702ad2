//! Repository implementations.
//!
//! - [`PgMappingRepository`] / [`PgClickRepository`] - PostgreSQL via SQLx
//! - [`InMemoryMappingRepository`] / [`InMemoryClickRepository`] - Process-local
//!   storage used when no database is configured, and by tests

pub mod memory;
pub mod pg_click_repository;
pub mod pg_mapping_repository;

pub use memory::{InMemoryClickRepository, InMemoryMappingRepository};
pub use pg_click_repository::PgClickRepository;
pub use pg_mapping_repository::PgMappingRepository;
