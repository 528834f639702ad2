//! DTOs for the usage metrics endpoint.

use serde::{Deserialize, Serialize};

use crate::application::services::UsageSnapshot;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsResponse {
    pub urls_shortened: i64,
    pub redirections_executed: i64,
}

impl From<UsageSnapshot> for MetricsResponse {
    fn from(snapshot: UsageSnapshot) -> Self {
        Self {
            urls_shortened: snapshot.urls_shortened,
            redirections_executed: snapshot.redirections_executed,
        }
    }
}
