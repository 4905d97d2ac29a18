//! # Ecodash
//!
//! Renewable-energy and carbon-footprint dashboard for housing types.
//!
//! ## Features
//!
//! - **Reference tables**: technology cost/efficiency catalog and
//!   per-building-type recommendations, loaded once and shared read-only
//! - **Remote metrics**: carbon payback and energy usage from the admin API
//! - **View models**: comparison grid, carbon cards and usage chart with
//!   explicit selection and navigation state
//! - **Surfaces**: terminal rendering, an interactive shell and a JSON API
//!
//! ## Modules
//!
//! - [`catalog`]: Static reference store
//! - [`metrics`]: Admin API client and carbon aggregation
//! - [`state`]: Selection and navigation state machines
//! - [`views`]: Panel view models with fetch-on-mount
//! - [`dashboard`]: Navigation shell owning the mounted panel
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ecodash::catalog::ReferenceStore;
//! use ecodash::metrics::{MetricsClient, MetricsClientConfig};
//! use ecodash::views::CarbonFootprintView;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ReferenceStore::embedded()?;
//!     let first = &store.ranking("TownHouse").unwrap_or_default()[0];
//!     println!("Top pick for a town house: {}", first.technology_name);
//!
//!     let client = Arc::new(MetricsClient::new(MetricsClientConfig::default())?);
//!     let mut view = CarbonFootprintView::mount(client);
//!     println!("{:?}", view.settled().await);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod metrics;
pub mod render;
pub mod shell;
pub mod state;
pub mod views;

// Re-export top-level types for convenience
pub use catalog::{
    CatalogError, CatalogResult, ElectricityCost, RankingEntry, ReferenceStore, Technology, Tier,
};

pub use metrics::{
    aggregate, CarbonRecord, CarbonSummary, EnergyUsageRecord, MetricsClient,
    MetricsClientConfig, MetricsError, MetricsSource,
};

pub use state::{
    Navigation, RankingFocus, SelectOutcome, Selection, SelectionState, StateError, Tab,
};

pub use views::{
    CarbonFootprintView, Comparison, EnergyUsage, EnergyUsageView, FetchState,
    ResourceEffectView,
};

pub use dashboard::{ActiveView, Dashboard};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, DataConfig, Discovered, LoggingConfig, ServerConfig, UpstreamConfig};
