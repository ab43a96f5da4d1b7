use super::store::{InsertOutcome, StoreError};
use crate::domain::a003_pallet_qr;
use crate::state::AppState;
use contracts::domain::a001_pallet::aggregate::{Pallet, RegisterPalletDto};
use contracts::shared::reason::ReasonCode;
use contracts::shared::stats::{compute_stats, WarehouseStats};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("registration rejected: {0}")]
    Rejected(ReasonCode),
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn reject(scan_code: &str, location: &str, reason: ReasonCode) -> RegisterError {
    tracing::warn!(scan_code, location, %reason, "pallet registration rejected");
    RegisterError::Rejected(reason)
}

/// Регистрация палета.
///
/// Нормализация, проверка полей и ячейки, затем атомарная вставка
/// (код, потом ячейка). При любом отказе хранилище не меняется.
pub async fn register(state: &AppState, dto: RegisterPalletDto) -> Result<Pallet, RegisterError> {
    let dto = dto.normalized();
    let location = dto
        .validate(&state.layout)
        .map_err(|reason| reject(&dto.scan_code, &dto.location, reason))?;

    let pallet = dto.into_pallet(&location);
    match state.pallets.insert_if_absent(&pallet).await? {
        InsertOutcome::Inserted => {}
        InsertOutcome::ScanCodeTaken => {
            return Err(reject(&pallet.scan_code, &pallet.location, ReasonCode::DuplicateScanCode))
        }
        InsertOutcome::LocationTaken => {
            return Err(reject(&pallet.scan_code, &pallet.location, ReasonCode::DuplicateLocation))
        }
    }

    tracing::info!(
        scan_code = %pallet.scan_code,
        location = %pallet.location,
        quantity = pallet.quantity,
        "pallet registered"
    );

    // Учёт напечатанных кодов не должен ломать регистрацию
    match a003_pallet_qr::service::mark_used(&state.db, &pallet.scan_code).await {
        Ok(true) => tracing::info!(scan_code = %pallet.scan_code, "pallet QR code marked as used"),
        Ok(false) => {}
        Err(e) => tracing::warn!(scan_code = %pallet.scan_code, "failed to mark pallet QR code: {}", e),
    }

    Ok(pallet)
}

/// Точный поиск по коду (с обрезкой пробелов). Пустой код ничего не находит.
pub async fn find_by_scan_code(state: &AppState, code: &str) -> Result<Option<Pallet>, StoreError> {
    let code = code.trim();
    if code.is_empty() {
        return Ok(None);
    }
    state.pallets.find_by_scan_code(code).await
}

pub async fn list_all(state: &AppState) -> Result<Vec<Pallet>, StoreError> {
    state.pallets.list_all().await
}

pub async fn remove_by_scan_code(state: &AppState, code: &str) -> Result<bool, StoreError> {
    let removed = state.pallets.remove_by_scan_code(code.trim()).await?;
    if removed {
        tracing::info!(scan_code = code.trim(), "pallet removed");
    }
    Ok(removed)
}

pub async fn stats(state: &AppState) -> Result<WarehouseStats, StoreError> {
    let records = state.pallets.list_all().await?;
    let stats = compute_stats(&records, &state.layout);
    if stats.empty_spots < 0 {
        tracing::error!(
            empty_spots = stats.empty_spots,
            "more pallets than locations: data integrity violation"
        );
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::layout::WarehouseLayout;

    async fn state() -> AppState {
        AppState::in_memory(WarehouseLayout::default()).await.unwrap()
    }

    fn dto(scan: &str, loc: &str) -> RegisterPalletDto {
        RegisterPalletDto {
            scan_code: scan.into(),
            description: "Tornillos".into(),
            quantity: 40,
            location: loc.into(),
        }
    }

    fn rejected(result: Result<Pallet, RegisterError>) -> ReasonCode {
        match result {
            Err(RegisterError::Rejected(reason)) => reason,
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn register_stores_canonical_location() {
        let state = state().await;
        let pallet = register(&state, dto(" S1 ", " a2-3-1 ")).await.unwrap();
        assert_eq!(pallet.scan_code, "S1");
        assert_eq!(pallet.location, "A2-3-1");

        let found = find_by_scan_code(&state, "  S1").await.unwrap().unwrap();
        assert_eq!(found.id, pallet.id);
    }

    #[tokio::test]
    async fn duplicates_are_rejected_in_order() {
        let state = state().await;
        register(&state, dto("S1", "A1-1-1")).await.unwrap();

        assert_eq!(rejected(register(&state, dto("S1", "A1-1-2")).await), ReasonCode::DuplicateScanCode);
        assert_eq!(rejected(register(&state, dto("S2", "A1-1-1")).await), ReasonCode::DuplicateLocation);
        assert_eq!(rejected(register(&state, dto("S1", "A1-1-1")).await), ReasonCode::DuplicateScanCode);
        assert_eq!(list_all(&state).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn validation_failures_leave_store_empty() {
        let state = state().await;
        assert_eq!(rejected(register(&state, dto("", "A1-1-1")).await), ReasonCode::MissingField);
        assert_eq!(rejected(register(&state, dto("S1", "A2-1-9")).await), ReasonCode::InvalidSlot);
        assert_eq!(rejected(register(&state, dto("S1", "B3-1-6")).await), ReasonCode::InvalidTraySlot);
        assert_eq!(rejected(register(&state, dto("S1", "D29")).await), ReasonCode::InvalidFloorRange);

        let mut bad_qty = dto("S1", "D1");
        bad_qty.quantity = 0;
        assert_eq!(rejected(register(&state, bad_qty).await), ReasonCode::InvalidQuantity);

        assert!(list_all(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stats_follow_registrations() {
        let state = state().await;
        register(&state, dto("S1", "A1-1-1")).await.unwrap();
        register(&state, dto("S2", "D1")).await.unwrap();

        let stats = stats(&state).await.unwrap();
        assert_eq!(stats.total_pallets, 2);
        assert_eq!(stats.total_quantity, 80);
        assert_eq!(stats.empty_spots, 153);
    }

    #[tokio::test]
    async fn search_misses_are_none() {
        let state = state().await;
        assert!(find_by_scan_code(&state, "missing").await.unwrap().is_none());
        assert!(find_by_scan_code(&state, "   ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_frees_the_location() {
        let state = state().await;
        register(&state, dto("S1", "C3-2-2")).await.unwrap();
        assert!(remove_by_scan_code(&state, "S1").await.unwrap());
        assert!(!remove_by_scan_code(&state, "S1").await.unwrap());
        register(&state, dto("S2", "C3-2-2")).await.unwrap();
    }

    #[tokio::test]
    async fn registering_a_printed_code_marks_it_used() {
        let state = state().await;
        let qr = a003_pallet_qr::service::generate_pallet_code(&state.db).await.unwrap();

        register(&state, dto(&qr.payload, "A3-1-1")).await.unwrap();

        let codes = a003_pallet_qr::service::list_pallet_codes(&state.db, 10).await.unwrap();
        assert!(codes[0].is_used);
    }
}
