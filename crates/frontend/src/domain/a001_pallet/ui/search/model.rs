use crate::shared::api_utils::send;
use contracts::domain::a001_pallet::aggregate::Pallet;

fn by_scan_code_path(code: &str) -> String {
    format!("/api/a001/pallet/by-scan-code/{}", urlencoding::encode(code.trim()))
}

/// GET /api/a001/pallet/by-scan-code/:code, 404 is `None`
pub async fn find_by_scan_code(code: &str) -> Result<Option<Pallet>, String> {
    let resp = send("GET", &by_scan_code_path(code), None).await?;
    match resp.status {
        404 => Ok(None),
        _ if resp.is_success() => resp.json().map(Some),
        status => Err(format!("HTTP {}", status)),
    }
}

/// DELETE /api/a001/pallet/by-scan-code/:code, false when already gone
pub async fn remove_by_scan_code(code: &str) -> Result<bool, String> {
    let resp = send("DELETE", &by_scan_code_path(code), None).await?;
    match resp.status {
        404 => Ok(false),
        _ if resp.is_success() => Ok(true),
        status => Err(format!("HTTP {}", status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_code_is_path_encoded() {
        assert_eq!(
            by_scan_code_path(" PALLET:1a/2 "),
            "/api/a001/pallet/by-scan-code/PALLET%3A1a%2F2"
        );
    }
}
