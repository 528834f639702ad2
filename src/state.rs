//! Shared application state injected into all handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::application::services::{
    CreationService, DelayedNotifier, MetricsService, ResolutionPolicy, ResolutionService,
};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{ClickRepository, MappingRepository};
use crate::domain::services::ReachabilityValidator;
use crate::infrastructure::identifier::HashIdentifierService;
use crate::infrastructure::task_pool::TaskPool;
use crate::infrastructure::validation::AlphanumericWordValidator;

/// Knobs that shape how the services behave.
#[derive(Debug, Clone)]
pub struct StateOptions {
    /// Public prefix of short URLs, without a trailing slash.
    pub base_url: String,
    pub behind_proxy: bool,
    pub verify_reachability_on_create: bool,
    pub resolution_policy: ResolutionPolicy,
    pub notify_delay: Duration,
}

impl Default for StateOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            behind_proxy: false,
            verify_reachability_on_create: true,
            resolution_policy: ResolutionPolicy::StoredOnly,
            notify_delay: crate::application::services::delayed_notifier::DEFAULT_NOTIFY_DELAY,
        }
    }
}

/// Application state shared across handlers. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub creation_service: Arc<CreationService>,
    pub resolution_service: Arc<ResolutionService>,
    pub metrics_service: Arc<MetricsService>,
    pub notifier: DelayedNotifier,
    pub mappings: Arc<dyn MappingRepository>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub task_pool: TaskPool,
    pub base_url: String,
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services over the given stores and probe.
    pub fn new(
        mappings: Arc<dyn MappingRepository>,
        clicks: Arc<dyn ClickRepository>,
        reachability: Arc<dyn ReachabilityValidator>,
        click_sender: mpsc::Sender<ClickEvent>,
        task_pool: TaskPool,
        options: StateOptions,
    ) -> Self {
        let creation_service = CreationService::new(
            mappings.clone(),
            Arc::new(HashIdentifierService),
            Arc::new(AlphanumericWordValidator),
            reachability.clone(),
            task_pool.clone(),
        )
        .with_reachability_check(options.verify_reachability_on_create);

        let resolution_service = ResolutionService::new(
            mappings.clone(),
            reachability,
            task_pool.clone(),
            options.resolution_policy,
        );

        let notifier = DelayedNotifier::new(task_pool.clone()).with_delay(options.notify_delay);

        Self {
            creation_service: Arc::new(creation_service),
            resolution_service: Arc::new(resolution_service),
            metrics_service: Arc::new(MetricsService::new(mappings.clone(), clicks)),
            notifier,
            mappings,
            click_sender,
            task_pool,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            behind_proxy: options.behind_proxy,
        }
    }

    /// Public URL for `key`.
    pub fn short_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}
