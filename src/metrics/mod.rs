//! Remote Metrics
//!
//! Fetches aggregate metrics from the admin API and reduces them for
//! display.
//!
//! ## Architecture
//!
//! - **MetricsSource**: async seam over the upstream, implemented by
//!   [`MetricsClient`]
//! - **aggregate**: carbon records → [`CarbonSummary`]
//!
//! ## Data Flow
//!
//! 1. A view mounts and asks its source for records
//! 2. Carbon records are aggregated; energy records are shown as they arrive
//! 3. A failure is logged and replaced with the view's static message

mod aggregate;
mod client;
#[cfg(test)]
pub(crate) mod fake;
mod types;

pub use aggregate::{aggregate, CarbonSummary};
pub use client::{MetricsClient, MetricsClientConfig, CARBON_PAYBACK_PATH, RENEWABLE_ENERGY_PATH};
pub use types::{CarbonRecord, EnergyUsageRecord};

use async_trait::async_trait;
use thiserror::Error;

/// Source of upstream metrics
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Per-user carbon payback and emission records
    async fn carbon_payback(&self) -> Result<Vec<CarbonRecord>, MetricsError>;

    /// Total usage per renewable energy source
    async fn renewable_energy(&self) -> Result<Vec<EnergyUsageRecord>, MetricsError>;
}

/// Errors that can occur when fetching metrics
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Metrics service unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}
