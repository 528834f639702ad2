//! Key resolution.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::RedirectMode;
use crate::domain::repositories::MappingRepository;
use crate::domain::services::ReachabilityValidator;
use crate::error::AppError;
use crate::infrastructure::task_pool::TaskPool;

/// Whether the target is probed again on every resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// Trust the stored mapping.
    #[default]
    StoredOnly,
    /// Probe the target before answering; unreachable targets are refused.
    Revalidate,
}

/// What a resolved key leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub target: String,
    pub redirect_mode: RedirectMode,
    pub interstitial: bool,
}

/// Resolves keys to targets for the redirect, interstitial and QR paths.
pub struct ResolutionService {
    mappings: Arc<dyn MappingRepository>,
    reachability: Arc<dyn ReachabilityValidator>,
    task_pool: TaskPool,
    policy: ResolutionPolicy,
}

impl ResolutionService {
    pub fn new(
        mappings: Arc<dyn MappingRepository>,
        reachability: Arc<dyn ReachabilityValidator>,
        task_pool: TaskPool,
        policy: ResolutionPolicy,
    ) -> Self {
        Self {
            mappings,
            reachability,
            task_pool,
            policy,
        }
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Resolves `key` to its target and redirect discipline.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - no mapping for `key`
    /// - [`AppError::RedirectionNotReachable`] - [`ResolutionPolicy::Revalidate`]
    ///   only, the target failed its probe
    /// - [`AppError::Unavailable`] - the probe could not be scheduled
    pub async fn resolve(&self, key: &str) -> Result<Resolution, AppError> {
        let mapping = self
            .mappings
            .find(key)
            .await?
            .ok_or_else(|| AppError::NotFound {
                key: key.to_string(),
            })?;

        if self.policy == ResolutionPolicy::Revalidate {
            let reachability = self.reachability.clone();
            let target = mapping.target.clone();
            let reachable = self
                .task_pool
                .submit(async move { reachability.is_reachable(&target).await })
                .await
                .map_err(|_| AppError::unavailable("Reachability check queue is full"))?;

            if !reachable {
                warn!(key = %key, target = %mapping.target, "stored target no longer reachable");
                return Err(AppError::RedirectionNotReachable {
                    url: mapping.target,
                });
            }
        }

        debug!(key = %key, target = %mapping.target, "key resolved");

        Ok(Resolution {
            target: mapping.target,
            redirect_mode: mapping.redirect_mode,
            interstitial: mapping.interstitial_enabled,
        })
    }

    /// Returns whether QR rendering is enabled for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the key is unknown.
    pub async fn is_qr_enabled(&self, key: &str) -> Result<bool, AppError> {
        self.mappings
            .find(key)
            .await?
            .map(|m| m.qr_enabled)
            .ok_or_else(|| AppError::NotFound {
                key: key.to_string(),
            })
    }
}
