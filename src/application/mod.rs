//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations by coordinating repository calls,
//! validators and the task pool. HTTP handlers only talk to this layer.
//!
//! # Available Services
//!
//! - [`services::CreationService`] - Mapping creation
//! - [`services::ResolutionService`] - Key resolution and QR gating
//! - [`services::DelayedNotifier`] - Interstitial target delivery
//! - [`services::MetricsService`] - Usage counters

pub mod services;
