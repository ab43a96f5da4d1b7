use async_trait::async_trait;
use contracts::domain::a001_pallet::aggregate::Pallet;
use contracts::shared::events::StoreEvent;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};

/// Ёмкость канала уведомлений об изменениях
pub const EVENT_CAPACITY: usize = 64;

/// Результат атомарной вставки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    ScanCodeTaken,
    LocationTaken,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

/// Хранилище палет: ключ `scan_code`, уникальная `location`.
///
/// `insert_if_absent` проверяет код, затем ячейку, затем вставляет, атомарно.
/// Каждое успешное изменение публикуется подписчикам.
#[async_trait]
pub trait PalletStore: Send + Sync {
    async fn insert_if_absent(&self, pallet: &Pallet) -> Result<InsertOutcome, StoreError>;

    async fn list_all(&self) -> Result<Vec<Pallet>, StoreError>;

    async fn find_by_scan_code(&self, scan_code: &str) -> Result<Option<Pallet>, StoreError>;

    /// Удаляет палет и освобождает ячейку. `false`, если кода нет.
    async fn remove_by_scan_code(&self, scan_code: &str) -> Result<bool, StoreError>;

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}

/// Listing order shared by the implementations: oldest first
pub(crate) fn sort_for_listing(items: &mut [Pallet]) {
    items.sort_by(|a, b| {
        a.metadata
            .created_at
            .cmp(&b.metadata.created_at)
            .then_with(|| a.scan_code.cmp(&b.scan_code))
    });
}

// ============================================================================
// In-memory implementation
// ============================================================================

#[derive(Default)]
struct MemoryState {
    by_scan_code: HashMap<String, Pallet>,
    /// location -> scan_code
    locations: HashMap<String, String>,
}

pub struct InMemoryPalletStore {
    state: Mutex<MemoryState>,
    events: broadcast::Sender<StoreEvent>,
}

impl InMemoryPalletStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Mutex::new(MemoryState::default()),
            events,
        }
    }
}

impl Default for InMemoryPalletStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PalletStore for InMemoryPalletStore {
    async fn insert_if_absent(&self, pallet: &Pallet) -> Result<InsertOutcome, StoreError> {
        let mut state = self.state.lock().await;
        if state.by_scan_code.contains_key(&pallet.scan_code) {
            return Ok(InsertOutcome::ScanCodeTaken);
        }
        if state.locations.contains_key(&pallet.location) {
            return Ok(InsertOutcome::LocationTaken);
        }
        state
            .locations
            .insert(pallet.location.clone(), pallet.scan_code.clone());
        state
            .by_scan_code
            .insert(pallet.scan_code.clone(), pallet.clone());
        drop(state);

        let _ = self.events.send(StoreEvent::Inserted {
            scan_code: pallet.scan_code.clone(),
            location: pallet.location.clone(),
        });
        Ok(InsertOutcome::Inserted)
    }

    async fn list_all(&self) -> Result<Vec<Pallet>, StoreError> {
        let mut items: Vec<Pallet> = self.state.lock().await.by_scan_code.values().cloned().collect();
        sort_for_listing(&mut items);
        Ok(items)
    }

    async fn find_by_scan_code(&self, scan_code: &str) -> Result<Option<Pallet>, StoreError> {
        Ok(self.state.lock().await.by_scan_code.get(scan_code).cloned())
    }

    async fn remove_by_scan_code(&self, scan_code: &str) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        let Some(pallet) = state.by_scan_code.remove(scan_code) else {
            return Ok(false);
        };
        state.locations.remove(&pallet.location);
        drop(state);

        let _ = self.events.send(StoreEvent::Removed {
            scan_code: pallet.scan_code,
            location: pallet.location,
        });
        Ok(true)
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

/// Behaviour every `PalletStore` must show; run against each implementation.
#[cfg(test)]
pub(crate) mod conformance {
    use super::*;

    pub fn pallet(scan: &str, loc: &str) -> Pallet {
        Pallet::new(scan.into(), "Cajas".into(), 12, loc.into())
    }

    pub async fn insert_find_list(store: &dyn PalletStore) {
        assert_eq!(
            store.insert_if_absent(&pallet("S1", "A1-1-1")).await.unwrap(),
            InsertOutcome::Inserted
        );
        assert_eq!(
            store.insert_if_absent(&pallet("S2", "D5")).await.unwrap(),
            InsertOutcome::Inserted
        );

        let found = store.find_by_scan_code("S1").await.unwrap().unwrap();
        assert_eq!(found.location, "A1-1-1");
        assert_eq!(found.quantity, 12);
        assert!(store.find_by_scan_code("nope").await.unwrap().is_none());

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    pub async fn duplicates_leave_store_untouched(store: &dyn PalletStore) {
        store.insert_if_absent(&pallet("S1", "A1-1-1")).await.unwrap();

        assert_eq!(
            store.insert_if_absent(&pallet("S1", "A1-1-2")).await.unwrap(),
            InsertOutcome::ScanCodeTaken
        );
        assert_eq!(
            store.insert_if_absent(&pallet("S2", "A1-1-1")).await.unwrap(),
            InsertOutcome::LocationTaken
        );
        // both taken: scan code wins
        assert_eq!(
            store.insert_if_absent(&pallet("S1", "A1-1-1")).await.unwrap(),
            InsertOutcome::ScanCodeTaken
        );

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].scan_code, "S1");
    }

    pub async fn remove_frees_location(store: &dyn PalletStore) {
        store.insert_if_absent(&pallet("S1", "B3-1-5")).await.unwrap();
        assert!(store.remove_by_scan_code("S1").await.unwrap());
        assert!(!store.remove_by_scan_code("S1").await.unwrap());
        assert_eq!(
            store.insert_if_absent(&pallet("S9", "B3-1-5")).await.unwrap(),
            InsertOutcome::Inserted
        );
    }

    pub async fn events_are_published(store: &dyn PalletStore) {
        let mut rx = store.subscribe();
        store.insert_if_absent(&pallet("S1", "C2-3-1")).await.unwrap();
        store.insert_if_absent(&pallet("S1", "C2-3-2")).await.unwrap();
        store.remove_by_scan_code("S1").await.unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            StoreEvent::Inserted {
                scan_code: "S1".into(),
                location: "C2-3-1".into()
            }
        );
        // the rejected duplicate published nothing
        assert_eq!(
            rx.recv().await.unwrap(),
            StoreEvent::Removed {
                scan_code: "S1".into(),
                location: "C2-3-1".into()
            }
        );
    }

    pub async fn concurrent_inserts_for_one_location(store: std::sync::Arc<dyn PalletStore>) {
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert_if_absent(&pallet(&format!("S{}", i), "A3-4-3"))
                    .await
                    .unwrap()
            }));
        }
        let mut inserted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                InsertOutcome::Inserted => inserted += 1,
                other => assert_eq!(other, InsertOutcome::LocationTaken),
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
