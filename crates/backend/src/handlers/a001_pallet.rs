use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use contracts::domain::a001_pallet::aggregate::{Pallet, RegisterPalletRequest};
use contracts::shared::events::StoreEvent;
use contracts::shared::reason::{ReasonCode, Rejection};
use futures::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;

use crate::domain::a001_pallet::service::{self, RegisterError};
use crate::state::AppState;

const KEEP_ALIVE: Duration = Duration::from_secs(15);

fn internal_error(context: &str, err: impl std::fmt::Display) -> StatusCode {
    tracing::error!("{}: {}", context, err);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// GET /api/a001/pallet
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Pallet>>, StatusCode> {
    service::list_all(&state)
        .await
        .map(Json)
        .map_err(|e| internal_error("list pallets", e))
}

fn rejected(reason: ReasonCode) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(Rejection::from(reason))).into_response()
}

/// POST /api/a001/pallet
///
/// Every refusal is a 422 with a `Rejection` body, including bodies that
/// are not JSON at all (`MISSING_FIELD`).
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterPalletRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            tracing::warn!(reason = %ReasonCode::MissingField, "registration body unreadable: {}", e);
            return rejected(ReasonCode::MissingField);
        }
    };
    let dto = match request.into_dto() {
        Ok(dto) => dto,
        Err(reason) => {
            tracing::warn!(%reason, "registration rejected");
            return rejected(reason);
        }
    };

    match service::register(&state, dto).await {
        Ok(pallet) => (StatusCode::CREATED, Json(pallet)).into_response(),
        Err(RegisterError::Rejected(reason)) => rejected(reason),
        Err(RegisterError::Store(e)) => internal_error("register pallet", e).into_response(),
    }
}

/// GET /api/a001/pallet/by-scan-code/:code
pub async fn get_by_scan_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Pallet>, StatusCode> {
    match service::find_by_scan_code(&state, &code).await {
        Ok(Some(pallet)) => Ok(Json(pallet)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(internal_error("find pallet", e)),
    }
}

/// DELETE /api/a001/pallet/by-scan-code/:code
pub async fn delete_by_scan_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<(), StatusCode> {
    match service::remove_by_scan_code(&state, &code).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(internal_error("remove pallet", e)),
    }
}

/// GET /api/a001/pallet/events
///
/// Server-sent events, one JSON `StoreEvent` per change. A subscriber that
/// fell behind receives a single `resync` instead of the missed events.
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.pallets.subscribe()).map(|item| {
        let event = match item {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("event subscriber {}, sending resync", e);
                StoreEvent::Resync
            }
        };
        Ok(to_sse(&event))
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE))
}

fn to_sse(event: &StoreEvent) -> Event {
    let data = serde_json::to_string(event).unwrap_or_else(|_| r#"{"kind":"resync"}"#.to_string());
    Event::default().event(event.kind()).data(data)
}
