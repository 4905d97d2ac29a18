//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.

use serde::{Deserialize, Serialize};

use crate::catalog::{RankingEntry, Technology};
use crate::views::{EnergySlice, EnergyUsage};

/// Technology catalog listing
#[derive(Debug, Serialize)]
pub struct TechnologyListResponse {
    pub total: usize,
    pub technologies: Vec<Technology>,
}

/// Query parameters for `GET /api/v1/compare`
#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub left: String,
    pub right: String,
}

/// Building types that have rankings
#[derive(Debug, Serialize)]
pub struct BuildingTypesResponse {
    pub building_types: Vec<String>,
}

/// Ranking entry with its 1-based position
#[derive(Debug, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub entry: RankingEntry,
}

/// Ranking list for one building type
#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub building_type: String,
    pub entries: Vec<RankedEntry>,
}

/// Query parameters for `GET /api/v1/energy-usage`
#[derive(Debug, Default, Deserialize)]
pub struct EnergyUsageParams {
    #[serde(default)]
    pub source: Option<String>,
}

/// Energy usage chart with the optionally selected source
#[derive(Debug, Serialize)]
pub struct EnergyUsageResponse {
    #[serde(flatten)]
    pub usage: EnergyUsage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<EnergySlice>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub technologies: usize,
    pub building_types: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
