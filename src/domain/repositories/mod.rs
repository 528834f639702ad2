//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! - [`MappingRepository`] - Short key → mapping storage
//! - [`ClickRepository`] - Click logging

pub mod click_repository;
pub mod mapping_repository;

pub use click_repository::ClickRepository;
pub use mapping_repository::MappingRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
