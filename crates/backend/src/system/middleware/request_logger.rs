use axum::body::to_bytes;
use axum::body::Body;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Middleware для логирования HTTP запросов
///
/// Пишет в tracing: метод, путь, статус, длительность (ms) и размер ответа.
/// Потоковые ответы (SSE) не буферизуются, их размер не известен.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    if is_stream(&response) {
        tracing::info!(
            %method,
            %path,
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "stream opened"
        );
        return response;
    }

    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                %method,
                %path,
                status = parts.status.as_u16(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "response body failed: {}",
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    tracing::info!(
        %method,
        %path,
        status = parts.status.as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        bytes = bytes.len(),
        "request"
    );

    Response::from_parts(parts, Body::from(bytes))
}

fn is_stream(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/event-stream"))
}
