use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use contracts::domain::a002_location_qr::aggregate::{
    GenerateLocationQrRequest, LocationQr, PrintLocationQrRequest,
};
use contracts::shared::reason::Rejection;
use serde::Deserialize;

use crate::domain::a002_location_qr::service::{self, GenerateError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub section: Option<String>,
}

impl ListQuery {
    fn section(&self) -> Option<char> {
        self.section
            .as_deref()
            .and_then(|s| s.trim().chars().next())
            .map(|c| c.to_ascii_uppercase())
    }
}

/// GET /api/a002/location-qr?section=A
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<LocationQr>>, StatusCode> {
    match service::list_location_codes(&state.db, query.section()).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("list location QR codes: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/a002/location-qr/generate
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateLocationQrRequest>,
) -> Response {
    match service::generate_location_codes(&state.db, &state.layout, request.locations.as_deref())
        .await
    {
        Ok(result) => Json(result).into_response(),
        Err(GenerateError::InvalidLocation { location, reason }) => {
            let mut rejection = Rejection::from(reason);
            rejection.message = format!("{} ({})", rejection.message, location);
            (StatusCode::UNPROCESSABLE_ENTITY, Json(rejection)).into_response()
        }
        Err(GenerateError::Store(e)) => {
            tracing::error!("generate location QR codes: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// POST /api/a002/location-qr/print
pub async fn print(
    State(state): State<AppState>,
    Json(request): Json<PrintLocationQrRequest>,
) -> Result<Html<String>, StatusCode> {
    match service::print_location_codes(&state.db, &request).await {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("print location QR codes: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
