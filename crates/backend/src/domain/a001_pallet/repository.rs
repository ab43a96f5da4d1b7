use async_trait::async_trait;
use contracts::domain::a001_pallet::aggregate::{Pallet, PalletId};
use contracts::domain::common::{AggregateId, EntityMetadata};
use contracts::shared::events::StoreEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set, SqlErr};

use super::store::{sort_for_listing, InsertOutcome, PalletStore, StoreError, EVENT_CAPACITY};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_pallet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub scan_code: String,
    pub description: String,
    pub quantity: i64,
    #[sea_orm(unique)]
    pub location: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Pallet {
    type Error = StoreError;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let id = PalletId::from_string(&m.id).map_err(|reason| StoreError::Corrupt {
            id: m.id.clone(),
            reason,
        })?;
        Ok(Pallet {
            id,
            scan_code: m.scan_code,
            description: m.description,
            quantity: m.quantity,
            location: m.location,
            metadata: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        })
    }
}

/// Хранилище палет в SQLite.
///
/// Уникальность кода и ячейки обеспечивают индексы; при конфликте причина
/// определяется повторным чтением по коду.
pub struct SqlitePalletStore {
    conn: DatabaseConnection,
    events: broadcast::Sender<StoreEvent>,
}

impl SqlitePalletStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { conn, events }
    }
}

#[async_trait]
impl PalletStore for SqlitePalletStore {
    async fn insert_if_absent(&self, pallet: &Pallet) -> Result<InsertOutcome, StoreError> {
        let active = ActiveModel {
            id: Set(pallet.id.as_string()),
            scan_code: Set(pallet.scan_code.clone()),
            description: Set(pallet.description.clone()),
            quantity: Set(pallet.quantity),
            location: Set(pallet.location.clone()),
            created_at: Set(pallet.metadata.created_at),
            updated_at: Set(pallet.metadata.updated_at),
        };

        match Entity::insert(active).exec_without_returning(&self.conn).await {
            Ok(_) => {
                let _ = self.events.send(StoreEvent::Inserted {
                    scan_code: pallet.scan_code.clone(),
                    location: pallet.location.clone(),
                });
                Ok(InsertOutcome::Inserted)
            }
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    if self.find_by_scan_code(&pallet.scan_code).await?.is_some() {
                        Ok(InsertOutcome::ScanCodeTaken)
                    } else {
                        Ok(InsertOutcome::LocationTaken)
                    }
                }
                _ => Err(err.into()),
            },
        }
    }

    async fn list_all(&self) -> Result<Vec<Pallet>, StoreError> {
        let mut items = Entity::find()
            .order_by_asc(Column::CreatedAt)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(Pallet::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        sort_for_listing(&mut items);
        Ok(items)
    }

    async fn find_by_scan_code(&self, scan_code: &str) -> Result<Option<Pallet>, StoreError> {
        Entity::find()
            .filter(Column::ScanCode.eq(scan_code))
            .one(&self.conn)
            .await?
            .map(Pallet::try_from)
            .transpose()
    }

    async fn remove_by_scan_code(&self, scan_code: &str) -> Result<bool, StoreError> {
        let Some(model) = Entity::find()
            .filter(Column::ScanCode.eq(scan_code))
            .one(&self.conn)
            .await?
        else {
            return Ok(false);
        };

        let result = Entity::delete_by_id(model.id.clone())
            .exec(&self.conn)
            .await?;
        if result.rows_affected == 0 {
            return Ok(false);
        }

        let _ = self.events.send(StoreEvent::Removed {
            scan_code: model.scan_code,
            location: model.location,
        });
        Ok(true)
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::super::store::conformance;
    use super::*;
    use crate::shared::data::db::connect_memory;
    use std::sync::Arc;

    async fn store() -> SqlitePalletStore {
        SqlitePalletStore::new(connect_memory().await.unwrap())
    }

    #[tokio::test]
    async fn sqlite_insert_find_list() {
        conformance::insert_find_list(&store().await).await;
    }

    #[tokio::test]
    async fn sqlite_duplicates() {
        conformance::duplicates_leave_store_untouched(&store().await).await;
    }

    #[tokio::test]
    async fn sqlite_remove() {
        conformance::remove_frees_location(&store().await).await;
    }

    #[tokio::test]
    async fn sqlite_events() {
        conformance::events_are_published(&store().await).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn sqlite_concurrent_inserts() {
        let store: Arc<dyn PalletStore> = Arc::new(store().await);
        conformance::concurrent_inserts_for_one_location(store).await;
    }

    #[tokio::test]
    async fn sqlite_round_trips_timestamps() {
        let store = store().await;
        let pallet = conformance::pallet("S1", "D1");
        store.insert_if_absent(&pallet).await.unwrap();
        let found = store.find_by_scan_code("S1").await.unwrap().unwrap();
        assert_eq!(found.id, pallet.id);
        assert_eq!(found.metadata.created_at, pallet.metadata.created_at);
    }
}
