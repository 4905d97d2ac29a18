//! Ranking Routes
//!
//! - GET /api/v1/rankings - Building types
//! - GET /api/v1/rankings/:building - Ordered recommendations
//! - GET /api/v1/rankings/:building/:rank - One entry (1-based rank)

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{BuildingTypesResponse, RankedEntry, RankingResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// GET /api/v1/rankings
pub async fn list_building_types(State(state): State<Arc<AppState>>) -> Json<BuildingTypesResponse> {
    Json(BuildingTypesResponse {
        building_types: state.store.building_types().map(String::from).collect(),
    })
}

/// GET /api/v1/rankings/:building
pub async fn get_ranking(
    State(state): State<Arc<AppState>>,
    Path(building): Path<String>,
) -> ApiResult<Json<RankingResponse>> {
    let entries = state.store.require_ranking(&building)?;
    let building_type = state
        .store
        .canonical_building_type(&building)
        .unwrap_or(&building)
        .to_string();

    Ok(Json(RankingResponse {
        building_type,
        entries: entries
            .iter()
            .enumerate()
            .map(|(i, entry)| RankedEntry {
                rank: i + 1,
                entry: entry.clone(),
            })
            .collect(),
    }))
}

/// GET /api/v1/rankings/:building/:rank
pub async fn get_ranking_entry(
    State(state): State<Arc<AppState>>,
    Path((building, rank)): Path<(String, usize)>,
) -> ApiResult<Json<RankedEntry>> {
    if rank == 0 {
        return Err(ApiError::NotFound(format!(
            "No ranking entry #0 for {}",
            building
        )));
    }
    let entry = state.store.ranking_entry(&building, rank - 1)?;
    Ok(Json(RankedEntry {
        rank,
        entry: entry.clone(),
    }))
}
