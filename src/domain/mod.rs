//! Domain layer: entities, storage contracts and capability traits.
//!
//! Nothing here depends on the infrastructure or presentation layers.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Storage trait definitions
//! - [`services`] - Hashing, validation, probing and client channel contracts
//! - [`click_event`] - Click event model
//! - [`click_worker`] - Asynchronous click persistence
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves a key
//! 2. A [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] persists it via
//!    [`repositories::ClickRepository`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
pub mod services;
