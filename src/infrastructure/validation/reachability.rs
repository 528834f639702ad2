//! HTTP reachability probing with bounded retries.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, redirect};
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, info};

use crate::domain::services::ReachabilityValidator;
use crate::utils::url_check::parse_http_url;

/// Attempts made before a URL is reported unreachable.
pub const DEFAULT_PROBE_ATTEMPTS: usize = 3;

/// Delay between two probe attempts.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(1);

/// Retry bound applied to every probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeRetryPolicy {
    /// Total attempts, including the first one. Never less than 1.
    pub attempts: usize,
    pub interval: Duration,
}

impl Default for ProbeRetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_PROBE_ATTEMPTS,
            interval: DEFAULT_PROBE_INTERVAL,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ProbeFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Production [`ReachabilityValidator`].
///
/// Issues `GET` requests without following redirects and accepts only an
/// exact `200 OK`. Timeouts, connection errors and any other status are
/// retried per [`ProbeRetryPolicy`], then reported as unreachable.
#[derive(Debug, Clone)]
pub struct HttpReachabilityValidator {
    client: Client,
    policy: ProbeRetryPolicy,
}

impl HttpReachabilityValidator {
    /// Builds a validator with a per-attempt `timeout` and the default
    /// retry policy (3 attempts, 1 second apart).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized (TLS backend).
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            policy: ProbeRetryPolicy::default(),
        })
    }

    /// Overrides the retry policy.
    pub fn with_retry_policy(mut self, policy: ProbeRetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn retry_policy(&self) -> ProbeRetryPolicy {
        self.policy
    }

    async fn probe_once(client: Client, url: String) -> Result<(), ProbeFailure> {
        metrics::counter!("reachability_probes_total").increment(1);

        let response = client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(ProbeFailure::Status(status))
        }
    }
}

#[async_trait]
impl ReachabilityValidator for HttpReachabilityValidator {
    fn is_syntactically_valid(&self, url: &str) -> bool {
        parse_http_url(url).is_ok()
    }

    async fn is_reachable(&self, url: &str) -> bool {
        let strategy = FixedInterval::new(self.policy.interval)
            .take(self.policy.attempts.saturating_sub(1));
        let attempt = Arc::new(AtomicUsize::new(0));

        let result = Retry::start(strategy, || {
            let client = self.client.clone();
            let target = url.to_string();
            let attempt = attempt.clone();
            async move {
                let n = attempt.fetch_add(1, Ordering::Relaxed) + 1;
                let outcome = Self::probe_once(client, target.clone()).await;
                if let Err(ref e) = outcome {
                    debug!(url = %target, attempt = n, "probe failed: {}", e);
                }
                outcome
            }
        })
        .await;

        match result {
            Ok(()) => true,
            Err(e) => {
                info!(
                    url = %url,
                    attempts = attempt.load(Ordering::Relaxed),
                    "target unreachable: {}",
                    e
                );
                false
            }
        }
    }
}
