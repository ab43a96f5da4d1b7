use axum::{extract::State, http::StatusCode, Json};
use contracts::shared::layout::WarehouseLayout;
use contracts::shared::location::{
    enumerate_locations, validate_location, LocationCheck, ValidateLocationRequest,
};
use contracts::shared::stats::WarehouseStats;

use crate::domain::a001_pallet::service;
use crate::state::AppState;

/// GET /api/warehouse/layout
pub async fn layout(State(state): State<AppState>) -> Json<WarehouseLayout> {
    Json(state.layout.as_ref().clone())
}

/// GET /api/warehouse/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<WarehouseStats>, StatusCode> {
    match service::stats(&state).await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            tracing::error!("compute stats: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/warehouse/locations
pub async fn locations(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(enumerate_locations(&state.layout))
}

/// POST /api/warehouse/locations/validate
///
/// Same normalization as registration: trimmed, upper-cased.
pub async fn validate(
    State(state): State<AppState>,
    Json(request): Json<ValidateLocationRequest>,
) -> Json<LocationCheck> {
    let raw = request.location.trim().to_uppercase();
    Json(LocationCheck::from(validate_location(&state.layout, &raw)))
}
