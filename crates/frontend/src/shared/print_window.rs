//! Открытие HTML-документа для печати в новом окне браузера

use web_sys::{Blob, BlobPropertyBag, Url};

/// Создает Blob с HTML-документом
fn create_html_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/html;charset=utf-8");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Открывает документ в новой вкладке; документ сам вызывает печать при загрузке
pub fn open_for_print(html: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let blob = create_html_blob(html)?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let opened = window
        .open_with_url_and_target(&url, "_blank")
        .map_err(|e| format!("Failed to open window: {:?}", e))?;
    if opened.is_none() {
        Url::revoke_object_url(&url).ok();
        return Err("Popup blocked".to_string());
    }
    Ok(())
}
