//! Repository trait for mapping storage.

use crate::domain::entities::Mapping;
use crate::error::AppError;
use async_trait::async_trait;

/// Durable key → mapping storage.
///
/// The store is append-only from the engine's point of view: mappings are
/// saved once and read many times, never updated or deleted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - `DashMap`
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Finds a mapping by key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find(&self, key: &str) -> Result<Option<Mapping>, AppError>;

    /// Persists a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the key is already taken. The check
    /// must be atomic with the insert: this is the final arbiter between
    /// concurrent creators of the same key.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn save(&self, mapping: Mapping) -> Result<(), AppError>;

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
