use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::state::AppState;
use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // WAREHOUSE
        // ========================================
        .route("/api/warehouse/layout", get(handlers::warehouse::layout))
        .route("/api/warehouse/stats", get(handlers::warehouse::stats))
        .route("/api/warehouse/locations", get(handlers::warehouse::locations))
        .route(
            "/api/warehouse/locations/validate",
            post(handlers::warehouse::validate),
        )
        // ========================================
        // a001 PALLET
        // ========================================
        .route(
            "/api/a001/pallet",
            get(handlers::a001_pallet::list_all).post(handlers::a001_pallet::register),
        )
        .route(
            "/api/a001/pallet/by-scan-code/:code",
            get(handlers::a001_pallet::get_by_scan_code)
                .delete(handlers::a001_pallet::delete_by_scan_code),
        )
        .route("/api/a001/pallet/events", get(handlers::a001_pallet::events))
        // ========================================
        // a002 LOCATION QR
        // ========================================
        .route("/api/a002/location-qr", get(handlers::a002_location_qr::list))
        .route(
            "/api/a002/location-qr/generate",
            post(handlers::a002_location_qr::generate),
        )
        .route(
            "/api/a002/location-qr/print",
            post(handlers::a002_location_qr::print),
        )
        // ========================================
        // a003 PALLET QR
        // ========================================
        .route(
            "/api/a003/pallet-qr",
            get(handlers::a003_pallet_qr::list).post(handlers::a003_pallet_qr::generate),
        )
        .route("/api/a003/pallet-qr/print", get(handlers::a003_pallet_qr::print))
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use contracts::domain::a001_pallet::aggregate::Pallet;
    use contracts::domain::a002_location_qr::aggregate::GenerateLocationQrResponse;
    use contracts::domain::a003_pallet_qr::aggregate::PalletQr;
    use contracts::shared::layout::WarehouseLayout;
    use contracts::shared::location::LocationCheck;
    use contracts::shared::reason::{ReasonCode, Rejection};
    use contracts::shared::stats::WarehouseStats;
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    async fn app() -> Router {
        let state = AppState::in_memory(WarehouseLayout::default()).await.unwrap();
        configure_routes(state, "dist")
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json<T: DeserializeOwned>(bytes: &[u8]) -> T {
        serde_json::from_slice(bytes).unwrap()
    }

    fn registration(scan: &str, location: &str) -> serde_json::Value {
        serde_json::json!({
            "scanCode": scan,
            "description": "Cajas de tornillos",
            "quantity": 25,
            "location": location,
        })
    }

    #[tokio::test]
    async fn health() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn register_then_search() {
        let app = app().await;
        let (status, body) =
            send(&app, Method::POST, "/api/a001/pallet", Some(registration("S-100", "a2-3-1"))).await;
        assert_eq!(status, StatusCode::CREATED);
        let pallet: Pallet = json(&body);
        assert_eq!(pallet.location, "A2-3-1");

        let (status, body) = send(&app, Method::GET, "/api/a001/pallet/by-scan-code/S-100", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json::<Pallet>(&body).id, pallet.id);

        let (status, _) = send(&app, Method::GET, "/api/a001/pallet/by-scan-code/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::GET, "/api/a001/pallet", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json::<Vec<Pallet>>(&body).len(), 1);
    }

    #[tokio::test]
    async fn rejections_answer_422_with_reason() {
        let app = app().await;
        send(&app, Method::POST, "/api/a001/pallet", Some(registration("S1", "D1"))).await;

        let (status, body) =
            send(&app, Method::POST, "/api/a001/pallet", Some(registration("S2", "D1"))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json::<Rejection>(&body).reason, ReasonCode::DuplicateLocation);

        let (status, body) =
            send(&app, Method::POST, "/api/a001/pallet", Some(registration("S3", "A2-1-4"))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json::<Rejection>(&body).reason, ReasonCode::InvalidSlot);
    }

    #[tokio::test]
    async fn malformed_registrations_carry_a_reason() {
        let app = app().await;
        let cases = [
            (
                serde_json::json!({
                    "scanCode": "S1", "description": "Cajas", "quantity": 2.5, "location": "D1"
                }),
                ReasonCode::InvalidQuantity,
            ),
            (
                serde_json::json!({
                    "scanCode": "S1", "description": "Cajas", "quantity": "5", "location": "D1"
                }),
                ReasonCode::InvalidQuantity,
            ),
            (
                serde_json::json!({ "description": "Cajas", "quantity": 5, "location": "D1" }),
                ReasonCode::MissingField,
            ),
            (
                serde_json::json!({
                    "scanCode": "S1", "description": "Cajas", "quantity": 0, "location": "D1"
                }),
                ReasonCode::InvalidQuantity,
            ),
        ];
        for (body, expected) in cases {
            let (status, bytes) = send(&app, Method::POST, "/api/a001/pallet", Some(body.clone())).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
            assert_eq!(json::<Rejection>(&bytes).reason, expected, "{body}");
        }

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/a001/pallet")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(json::<Rejection>(&bytes).reason, ReasonCode::MissingField);

        let (_, body) = send(&app, Method::GET, "/api/a001/pallet", None).await;
        assert!(json::<Vec<Pallet>>(&body).is_empty());
    }

    #[tokio::test]
    async fn delete_frees_slot() {
        let app = app().await;
        send(&app, Method::POST, "/api/a001/pallet", Some(registration("S1", "C1-1-4"))).await;

        let (status, _) = send(&app, Method::DELETE, "/api/a001/pallet/by-scan-code/S1", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, "/api/a001/pallet/by-scan-code/S1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) =
            send(&app, Method::POST, "/api/a001/pallet", Some(registration("S2", "C1-1-4"))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn warehouse_endpoints() {
        let app = app().await;
        send(&app, Method::POST, "/api/a001/pallet", Some(registration("S1", "B3-1-5"))).await;

        let (_, body) = send(&app, Method::GET, "/api/warehouse/stats", None).await;
        let stats: WarehouseStats = json(&body);
        assert_eq!(stats.total_pallets, 1);
        assert_eq!(stats.total_quantity, 25);
        assert_eq!(stats.empty_spots, 154);

        let (_, body) = send(&app, Method::GET, "/api/warehouse/locations", None).await;
        assert_eq!(json::<Vec<String>>(&body).len(), 155);

        let (_, body) = send(&app, Method::GET, "/api/warehouse/layout", None).await;
        assert_eq!(json::<WarehouseLayout>(&body), WarehouseLayout::default());

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/warehouse/locations/validate",
            Some(serde_json::json!({ "location": " d28 " })),
        )
        .await;
        let check: LocationCheck = json(&body);
        assert!(check.valid);
        assert_eq!(check.canonical.as_deref(), Some("D28"));

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/warehouse/locations/validate",
            Some(serde_json::json!({ "location": "A4-1-1" })),
        )
        .await;
        assert_eq!(json::<LocationCheck>(&body).reason, Some(ReasonCode::InvalidNiche));
    }

    #[tokio::test]
    async fn qr_endpoints() {
        let app = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/a002/location-qr/generate",
            Some(serde_json::json!({ "locations": ["A1-1-1", "D2"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json::<GenerateLocationQrResponse>(&body),
            GenerateLocationQrResponse { created: 2, existing: 0 }
        );

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/a002/location-qr/generate",
            Some(serde_json::json!({ "locations": ["A1-1-9"] })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json::<Rejection>(&body).reason, ReasonCode::InvalidSlot);

        let (_, body) = send(&app, Method::GET, "/api/a002/location-qr?section=d", None).await;
        let listed: Vec<serde_json::Value> = json(&body);
        assert_eq!(listed.len(), 1);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/a002/location-qr/print",
            Some(serde_json::json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(body).unwrap().matches("<svg").count(), 2);

        let (status, body) = send(&app, Method::POST, "/api/a003/pallet-qr", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let qr: PalletQr = json(&body);
        assert!(qr.payload.starts_with("PALLET:"));

        let (_, body) = send(&app, Method::GET, "/api/a003/pallet-qr?limit=5", None).await;
        assert_eq!(json::<Vec<PalletQr>>(&body).len(), 1);

        let (status, body) = send(&app, Method::GET, "/api/a003/pallet-qr/print", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(body).unwrap().matches("<svg").count(), 1);
    }

    #[tokio::test]
    async fn events_endpoint_is_an_event_stream() {
        let app = app().await;
        let request = Request::builder()
            .uri("/api/a001/pallet/events")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/event-stream"
        );
    }
}
