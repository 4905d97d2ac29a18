//! Technology Routes
//!
//! - GET /api/v1/technologies - Catalog in grid order
//! - GET /api/v1/technologies/:name - One technology
//! - GET /api/v1/compare?left=&right= - Side-by-side comparison

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CompareParams, TechnologyListResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::catalog::Technology;
use crate::views::{compare, Comparison};

/// GET /api/v1/technologies
pub async fn list_technologies(State(state): State<Arc<AppState>>) -> Json<TechnologyListResponse> {
    let technologies = state.store.technologies().to_vec();
    Json(TechnologyListResponse {
        total: technologies.len(),
        technologies,
    })
}

/// GET /api/v1/technologies/:name
pub async fn get_technology(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Technology>> {
    let tech = state.store.require_technology(&name)?;
    Ok(Json(tech.clone()))
}

/// GET /api/v1/compare
///
/// Compares two distinct technologies.
pub async fn compare_technologies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareParams>,
) -> ApiResult<Json<Comparison>> {
    let left = state.store.require_technology(&params.left)?;
    let right = state.store.require_technology(&params.right)?;
    if left.name == right.name {
        return Err(ApiError::Validation(
            "cannot compare a technology with itself".to_string(),
        ));
    }
    Ok(Json(compare(left, right)))
}
