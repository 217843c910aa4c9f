//! HTTP client for the tutorial analytics endpoints.
//!
//! This crate provides a small typed client for the backend handlers that
//! record the start of an editor or translation tutorial. Calls are plain
//! `async` functions returning [`Result`]; deciding whether to await them or
//! fire and forget is left to the caller.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod models;

pub use client::AnalyticsClient;
pub use client::builder::AnalyticsClientBuilder;
pub use error::{ClientError, Result};
pub use metrics::{BeaconOutcome, ErrorCategory, MetricsCollector};
pub use models::TutorialKind;
