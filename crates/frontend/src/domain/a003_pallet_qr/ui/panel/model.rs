use crate::shared::api_utils::{get_json, send};
use contracts::domain::a003_pallet_qr::aggregate::PalletQr;

/// В списке показываются последние коды
pub const LIST_LIMIT: u32 = 10;

/// POST /api/a003/pallet-qr
pub async fn generate() -> Result<PalletQr, String> {
    let resp = send("POST", "/api/a003/pallet-qr", None).await?;
    if !resp.is_success() {
        return Err(format!("HTTP {}", resp.status));
    }
    resp.json()
}

/// GET /api/a003/pallet-qr?limit=10
pub async fn list_recent() -> Result<Vec<PalletQr>, String> {
    get_json(&format!("/api/a003/pallet-qr?limit={}", LIST_LIMIT)).await
}

/// GET /api/a003/pallet-qr/print
pub async fn print_unused() -> Result<String, String> {
    let resp = send("GET", "/api/a003/pallet-qr/print", None).await?;
    if !resp.is_success() {
        return Err(format!("HTTP {}", resp.status));
    }
    Ok(resp.body)
}

/// Texto del estado de un código en la lista
pub fn usage_label(is_used: bool) -> &'static str {
    if is_used {
        "Usado"
    } else {
        "Disponible"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn used_codes_are_labelled() {
        assert_eq!(usage_label(true), "Usado");
        assert_eq!(usage_label(false), "Disponible");
    }
}
