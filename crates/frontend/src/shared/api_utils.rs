//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making requests.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/a001/pallet");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Raw answer of the backend: status plus body text
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, String> {
        serde_json::from_str(&self.body).map_err(|e| format!("{e}"))
    }
}

/// Send a request and read the whole body as text.
///
/// Non-2xx statuses are not errors here: callers decide what 404 or 422 mean.
pub async fn send(method: &str, path: &str, body: Option<String>) -> Result<ApiResponse, String> {
    use wasm_bindgen::JsCast;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(json_data) = &body {
        opts.set_body(&wasm_bindgen::JsValue::from_str(json_data));
    }

    let request =
        Request::new_with_str_and_init(&api_url(path), &opts).map_err(|e| format!("{e:?}"))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| format!("{e:?}"))?;
    }
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| format!("{e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;

    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;

    Ok(ApiResponse {
        status: resp.status(),
        body: text.as_string().unwrap_or_default(),
    })
}

/// GET and decode, any non-2xx status is an error
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let resp = send("GET", path, None).await?;
    if !resp.is_success() {
        return Err(format!("HTTP {}", resp.status));
    }
    resp.json()
}

pub async fn post_json<B: Serialize>(path: &str, body: &B) -> Result<ApiResponse, String> {
    let json_data = serde_json::to_string(body).map_err(|e| format!("{e}"))?;
    send("POST", path, Some(json_data)).await
}
