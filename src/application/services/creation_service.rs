//! Mapping creation.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::{Mapping, MappingProperties};
use crate::domain::repositories::MappingRepository;
use crate::domain::services::{CustomWordValidator, IdentifierService, ReachabilityValidator};
use crate::error::AppError;
use crate::infrastructure::task_pool::TaskPool;

/// Creates mappings: resolves key collisions, enforces custom word
/// ownership, validates the target and persists the result.
///
/// Creation is idempotent: asking again for the same `(url, custom_word)`
/// returns the stored mapping unchanged.
pub struct CreationService {
    mappings: Arc<dyn MappingRepository>,
    identifiers: Arc<dyn IdentifierService>,
    custom_words: Arc<dyn CustomWordValidator>,
    reachability: Arc<dyn ReachabilityValidator>,
    task_pool: TaskPool,
    verify_reachability: bool,
}

impl CreationService {
    /// Creates a new creation service. Reachability is verified on every
    /// creation unless disabled with [`Self::with_reachability_check`].
    pub fn new(
        mappings: Arc<dyn MappingRepository>,
        identifiers: Arc<dyn IdentifierService>,
        custom_words: Arc<dyn CustomWordValidator>,
        reachability: Arc<dyn ReachabilityValidator>,
        task_pool: TaskPool,
    ) -> Self {
        Self {
            mappings,
            identifiers,
            custom_words,
            reachability,
            task_pool,
            verify_reachability: true,
        }
    }

    /// Enables or disables the live probe. Syntax is always checked.
    pub fn with_reachability_check(mut self, enabled: bool) -> Self {
        self.verify_reachability = enabled;
        self
    }

    /// Creates (or returns the existing) mapping for `url`.
    ///
    /// An empty `custom_word` means "derive the key from the URL".
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidCustomWord`] - non-empty word failing the lexical
    ///   rule; checked before any store access
    /// - [`AppError::CustomWordInUse`] - the key is bound to another target,
    ///   including when a concurrent creator wins the race
    /// - [`AppError::InvalidUrl`] - not a well-formed `http`/`https` URL
    /// - [`AppError::UrlNotReachable`] - probe failed after its retries
    /// - [`AppError::Unavailable`] - the probe could not be scheduled
    pub async fn create(
        &self,
        url: &str,
        properties: MappingProperties,
        custom_word: &str,
    ) -> Result<Mapping, AppError> {
        if !custom_word.is_empty() && !self.custom_words.is_valid(custom_word) {
            return Err(AppError::InvalidCustomWord {
                word: custom_word.to_string(),
            });
        }

        let key = self.identifiers.derive_key(url, custom_word);

        if let Some(existing) = self.mappings.find(&key).await? {
            return Self::reuse_or_reject(existing, url, &key);
        }

        if !self.reachability.is_syntactically_valid(url) {
            return Err(AppError::InvalidUrl {
                url: url.to_string(),
            });
        }

        if self.verify_reachability && !self.probe(url).await? {
            return Err(AppError::UrlNotReachable {
                url: url.to_string(),
            });
        }

        // The probe can take seconds; look again before writing.
        let key = self.identifiers.derive_key(url, custom_word);
        if let Some(existing) = self.mappings.find(&key).await? {
            return Self::reuse_or_reject(existing, url, &key);
        }

        let mapping = Mapping::new(key.clone(), url.to_string(), properties);

        match self.mappings.save(mapping.clone()).await {
            Ok(()) => {
                metrics::counter!("links_created_total").increment(1);
                info!(key = %key, target = %url, "mapping created");
                Ok(mapping)
            }
            Err(AppError::Conflict { .. }) => {
                debug!(key = %key, "lost creation race");
                match self.mappings.find(&key).await? {
                    Some(existing) => Self::reuse_or_reject(existing, url, &key),
                    None => Err(AppError::CustomWordInUse { word: key }),
                }
            }
            Err(e) => Err(e),
        }
    }

    fn reuse_or_reject(existing: Mapping, url: &str, key: &str) -> Result<Mapping, AppError> {
        if existing.target == url {
            debug!(key = %key, "mapping already exists for target");
            Ok(existing)
        } else {
            Err(AppError::CustomWordInUse {
                word: key.to_string(),
            })
        }
    }

    async fn probe(&self, url: &str) -> Result<bool, AppError> {
        let reachability = self.reachability.clone();
        let target = url.to_string();

        self.task_pool
            .submit(async move { reachability.is_reachable(&target).await })
            .await
            .map_err(|_| AppError::unavailable("Reachability check queue is full"))
    }
}
