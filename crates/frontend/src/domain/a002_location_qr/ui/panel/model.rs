use crate::shared::api_utils::{get_json, post_json};
use contracts::domain::a002_location_qr::aggregate::{
    GenerateLocationQrRequest, GenerateLocationQrResponse, LocationQr, PrintLocationQrRequest,
};
use contracts::shared::reason::Rejection;

#[derive(Debug, Clone)]
pub enum GenerateOutcome {
    Generated(GenerateLocationQrResponse),
    Rejected(Rejection),
}

/// POST /api/a002/location-qr/generate
pub async fn generate(locations: Option<Vec<String>>) -> Result<GenerateOutcome, String> {
    let resp = post_json(
        "/api/a002/location-qr/generate",
        &GenerateLocationQrRequest { locations },
    )
    .await?;
    match resp.status {
        422 => Ok(GenerateOutcome::Rejected(resp.json()?)),
        _ if resp.is_success() => Ok(GenerateOutcome::Generated(resp.json()?)),
        status => Err(format!("HTTP {}", status)),
    }
}

/// GET /api/a002/location-qr?section=A
pub async fn list(section: Option<char>) -> Result<Vec<LocationQr>, String> {
    let path = match section {
        Some(letter) => format!("/api/a002/location-qr?section={}", letter),
        None => "/api/a002/location-qr".to_string(),
    };
    get_json(&path).await
}

/// POST /api/a002/location-qr/print, готовый к печати HTML
pub async fn print(request: &PrintLocationQrRequest) -> Result<String, String> {
    let resp = post_json("/api/a002/location-qr/print", request).await?;
    if !resp.is_success() {
        return Err(format!("HTTP {}", resp.status));
    }
    Ok(resp.body)
}

/// Valor del selector de sección: cadena vacía significa todas
pub fn section_filter(value: &str) -> Option<char> {
    value.trim().chars().next().map(|c| c.to_ascii_uppercase())
}

/// Список ячеек из поля ввода: разделители запятая и пробел, без повторов
pub fn parse_selection(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in text.split(|c: char| c == ',' || c == ';' || c.is_whitespace()) {
        let item = item.trim().to_uppercase();
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_split_normalized_and_deduplicated() {
        assert_eq!(
            parse_selection(" a1-2-3, B3-1-4;c2-1-2\nd15  A1-2-3 "),
            vec!["A1-2-3", "B3-1-4", "C2-1-2", "D15"]
        );
        assert!(parse_selection(" , ; ").is_empty());
    }

    #[test]
    fn empty_select_value_lists_every_section() {
        assert_eq!(section_filter(""), None);
        assert_eq!(section_filter("B"), Some('B'));
        assert_eq!(section_filter(" d"), Some('D'));
    }
}
