//! Browser-facing pages rendered with Askama.
//!
//! # Modules
//!
//! - [`interstitial`] - Waiting page shown for interstitial mappings

pub mod interstitial;
