use super::repository;
use crate::shared::printable::{render_printable, PrintableCode};
use contracts::domain::a002_location_qr::aggregate::{
    GenerateLocationQrResponse, LocationQr, PrintLocationQrRequest,
};
use contracts::shared::layout::WarehouseLayout;
use contracts::shared::location::{all_locations, validate_location, Location};
use contracts::shared::reason::ReasonCode;
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("location {location:?} rejected: {reason}")]
    InvalidLocation { location: String, reason: ReasonCode },
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Приведение выбора пользователя к каноническим ячейкам, без повторов
fn resolve_selection(
    layout: &WarehouseLayout,
    selection: &[String],
) -> Result<Vec<Location>, GenerateError> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for raw in selection {
        let normalized = raw.trim().to_uppercase();
        let location = validate_location(layout, &normalized).map_err(|reason| {
            GenerateError::InvalidLocation {
                location: raw.clone(),
                reason,
            }
        })?;
        if seen.insert(location) {
            out.push(location);
        }
    }
    Ok(out)
}

/// Создать QR-коды для всех ячеек склада (или только для выбранных),
/// которых ещё нет в реестре. Повторный вызов ничего не создаёт.
pub async fn generate_location_codes(
    conn: &DatabaseConnection,
    layout: &WarehouseLayout,
    selection: Option<&[String]>,
) -> Result<GenerateLocationQrResponse, GenerateError> {
    let wanted = match selection {
        Some(selection) => resolve_selection(layout, selection)?,
        None => all_locations(layout),
    };

    let txn = conn.begin().await.map_err(anyhow::Error::from)?;
    let existing = repository::existing_locations(&txn).await?;
    let fresh: Vec<LocationQr> = wanted
        .iter()
        .filter(|loc| !existing.contains(&loc.to_string()))
        .map(LocationQr::new)
        .collect();
    repository::insert_many(&txn, &fresh).await?;
    txn.commit().await.map_err(anyhow::Error::from)?;

    let response = GenerateLocationQrResponse {
        created: fresh.len(),
        existing: wanted.len() - fresh.len(),
    };
    tracing::info!(
        created = response.created,
        existing = response.existing,
        "location QR codes generated"
    );
    Ok(response)
}

pub async fn list_location_codes(
    conn: &DatabaseConnection,
    section: Option<char>,
) -> anyhow::Result<Vec<LocationQr>> {
    repository::list(conn, section).await
}

/// HTML для печати: явный список ячеек, одна секция или все коды
pub async fn print_location_codes(
    conn: &DatabaseConnection,
    request: &PrintLocationQrRequest,
) -> anyhow::Result<String> {
    let (codes, title) = match (&request.locations, request.section) {
        (Some(locations), _) => {
            let normalized: Vec<String> = locations.iter().map(|l| l.trim().to_uppercase()).collect();
            (
                repository::list_by_locations(conn, &normalized).await?,
                "Códigos QR de ubicaciones seleccionadas".to_string(),
            )
        }
        (None, Some(section)) => (
            repository::list(conn, Some(section)).await?,
            format!("Códigos QR de la sección {}", section),
        ),
        (None, None) => (
            repository::list(conn, None).await?,
            "Códigos QR de ubicaciones".to_string(),
        ),
    };

    let printable: Vec<PrintableCode> = codes
        .iter()
        .map(|qr| PrintableCode::new(&qr.payload))
        .collect();
    render_printable(&printable, &title)
}
