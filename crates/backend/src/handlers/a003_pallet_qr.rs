use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use contracts::domain::a003_pallet_qr::aggregate::PalletQr;
use serde::Deserialize;

use crate::domain::a003_pallet_qr::service::{self, DEFAULT_LIST_LIMIT};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u64>,
}

/// GET /api/a003/pallet-qr?limit=10
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PalletQr>>, StatusCode> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    match service::list_pallet_codes(&state.db, limit).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("list pallet QR codes: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/a003/pallet-qr
pub async fn generate(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<PalletQr>), StatusCode> {
    match service::generate_pallet_code(&state.db).await {
        Ok(qr) => Ok((StatusCode::CREATED, Json(qr))),
        Err(e) => {
            tracing::error!("generate pallet QR code: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/a003/pallet-qr/print
pub async fn print(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    match service::print_unused(&state.db).await {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("print pallet QR codes: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
