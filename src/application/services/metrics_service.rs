//! Usage counters exposed over the API.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::repositories::{ClickRepository, MappingRepository};
use crate::error::AppError;

/// Point-in-time usage figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageSnapshot {
    pub urls_shortened: i64,
    pub redirections_executed: i64,
}

/// Reads usage figures from the stores. Never writes.
pub struct MetricsService {
    mappings: Arc<dyn MappingRepository>,
    clicks: Arc<dyn ClickRepository>,
}

impl MetricsService {
    pub fn new(mappings: Arc<dyn MappingRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { mappings, clicks }
    }

    /// # Errors
    ///
    /// Propagates storage errors.
    pub async fn snapshot(&self) -> Result<UsageSnapshot, AppError> {
        let (urls_shortened, redirections_executed) =
            tokio::try_join!(self.mappings.count(), self.clicks.count())?;

        Ok(UsageSnapshot {
            urls_shortened,
            redirections_executed,
        })
    }
}
