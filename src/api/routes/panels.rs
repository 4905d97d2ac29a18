//! Panel Routes
//!
//! Remote-backed panels. Each request mounts the view, which performs one
//! upstream fetch; if the client goes away the view is dropped and the
//! fetch is aborted.
//!
//! - GET /api/v1/carbon-summary - Aggregated carbon payback and emission
//! - GET /api/v1/energy-usage?source= - Usage per source

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{EnergyUsageParams, EnergyUsageResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::metrics::CarbonSummary;
use crate::views::{CarbonFootprintView, EnergyUsageView, FetchState};

/// GET /api/v1/carbon-summary
pub async fn carbon_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<CarbonSummary>> {
    let mut view = CarbonFootprintView::mount(Arc::clone(&state.source));
    match view.settled().await {
        FetchState::Loaded(summary) => Ok(Json(summary)),
        FetchState::Failed(msg) => Err(ApiError::Upstream(msg)),
        FetchState::Loading => Err(ApiError::Internal("fetch did not settle".to_string())),
    }
}

/// GET /api/v1/energy-usage
pub async fn energy_usage(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EnergyUsageParams>,
) -> ApiResult<Json<EnergyUsageResponse>> {
    let mut view = EnergyUsageView::mount(Arc::clone(&state.source));
    let usage = match view.settled().await {
        FetchState::Loaded(usage) => usage,
        FetchState::Failed(msg) => return Err(ApiError::Upstream(msg)),
        FetchState::Loading => {
            return Err(ApiError::Internal("fetch did not settle".to_string()))
        }
    };

    let source = params
        .source
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let selected = match source {
        Some(name) => Some(view.select_source(name)?),
        None => None,
    };

    Ok(Json(EnergyUsageResponse { usage, selected }))
}
