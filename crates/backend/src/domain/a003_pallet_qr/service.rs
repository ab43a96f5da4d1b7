use super::repository;
use crate::shared::printable::{render_printable, PrintableCode};
use contracts::domain::a003_pallet_qr::aggregate::PalletQr;
use contracts::shared::qr::{parse_payload, QrPayload};
use sea_orm::DatabaseConnection;

/// Сколько последних кодов показывает интерфейс
pub const DEFAULT_LIST_LIMIT: u64 = 10;

/// Создать новый неиспользованный код палета
pub async fn generate_pallet_code(conn: &DatabaseConnection) -> anyhow::Result<PalletQr> {
    let qr = PalletQr::new_random();
    repository::insert(conn, &qr).await?;
    tracing::info!(payload = %qr.payload, "pallet QR code generated");
    Ok(qr)
}

pub async fn list_pallet_codes(conn: &DatabaseConnection, limit: u64) -> anyhow::Result<Vec<PalletQr>> {
    repository::list_recent(conn, limit).await
}

/// Отметить код как использованный, если это сгенерированный код палета
pub async fn mark_used(conn: &DatabaseConnection, scan_code: &str) -> anyhow::Result<bool> {
    match parse_payload(scan_code) {
        Some(QrPayload::Pallet(_)) => repository::mark_used(conn, scan_code).await,
        _ => Ok(false),
    }
}

/// HTML для печати всех неиспользованных кодов
pub async fn print_unused(conn: &DatabaseConnection) -> anyhow::Result<String> {
    let codes: Vec<PrintableCode> = repository::list_unused(conn)
        .await?
        .iter()
        .map(|qr| PrintableCode::new(&qr.payload))
        .collect();
    render_printable(&codes, "Códigos QR de palets")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_memory;

    #[tokio::test]
    async fn generated_codes_are_listed_newest_first() {
        let conn = connect_memory().await.unwrap();
        let mut generated = Vec::new();
        for _ in 0..12 {
            generated.push(generate_pallet_code(&conn).await.unwrap());
        }

        let listed = list_pallet_codes(&conn, DEFAULT_LIST_LIMIT).await.unwrap();
        assert_eq!(listed.len(), 10);
        assert!(listed
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
        assert!(listed.iter().all(|qr| qr.payload.starts_with("PALLET:")));
    }

    #[tokio::test]
    async fn mark_used_only_touches_known_pallet_codes() {
        let conn = connect_memory().await.unwrap();
        let qr = generate_pallet_code(&conn).await.unwrap();

        assert!(!mark_used(&conn, "LOC:A1-1-1").await.unwrap());
        assert!(!mark_used(&conn, "PALLET:unknown").await.unwrap());
        assert!(mark_used(&conn, &qr.payload).await.unwrap());
        assert!(!mark_used(&conn, &qr.payload).await.unwrap());

        let listed = list_pallet_codes(&conn, 10).await.unwrap();
        assert!(listed[0].is_used);
    }

    #[tokio::test]
    async fn print_skips_used_codes() {
        let conn = connect_memory().await.unwrap();
        let used = generate_pallet_code(&conn).await.unwrap();
        generate_pallet_code(&conn).await.unwrap();
        generate_pallet_code(&conn).await.unwrap();
        mark_used(&conn, &used.payload).await.unwrap();

        let html = print_unused(&conn).await.unwrap();
        assert_eq!(html.matches("<svg").count(), 2);
        assert!(!html.contains(crate::shared::printable::caption(&used.payload)));
    }
}
