//! Target URL validation contract.

use async_trait::async_trait;

/// Syntactic and live validation of target URLs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReachabilityValidator: Send + Sync {
    /// Returns true for well-formed `http`/`https` URLs.
    fn is_syntactically_valid(&self, url: &str) -> bool;

    /// Probes the URL and returns true only for an exact `200 OK`.
    ///
    /// Redirects are not followed. Transient failures are retried within a
    /// fixed bound before the verdict is returned; this call never hangs
    /// past that bound.
    async fn is_reachable(&self, url: &str) -> bool;
}
