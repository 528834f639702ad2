//! Business logic services for the application layer.

pub mod creation_service;
pub mod delayed_notifier;
pub mod metrics_service;
pub mod resolution_service;

pub use creation_service::CreationService;
pub use delayed_notifier::{
    DelayedNotifier, NotificationState, NotificationTicket, PendingNotification,
};
pub use metrics_service::{MetricsService, UsageSnapshot};
pub use resolution_service::{Resolution, ResolutionPolicy, ResolutionService};
