use contracts::shared::layout::WarehouseLayout;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::a001_pallet::repository::SqlitePalletStore;
use crate::domain::a001_pallet::store::{InMemoryPalletStore, PalletStore};
use crate::shared::config::{get_database_path, Config, StoreBackend};
use crate::shared::data::db;

/// Состояние приложения, передаётся обработчикам через `State`
#[derive(Clone)]
pub struct AppState {
    pub layout: Arc<WarehouseLayout>,
    pub pallets: Arc<dyn PalletStore>,
    /// Реестры QR-кодов (a002, a003)
    pub db: DatabaseConnection,
}

impl AppState {
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        match config.database.backend {
            StoreBackend::Sqlite => {
                let conn = db::connect_file(&get_database_path(config)).await?;
                Ok(Self {
                    layout: Arc::new(config.warehouse.clone()),
                    pallets: Arc::new(SqlitePalletStore::new(conn.clone())),
                    db: conn,
                })
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store: data is lost on restart");
                Self::in_memory(config.warehouse.clone()).await
            }
        }
    }

    /// Всё в памяти процесса
    pub async fn in_memory(layout: WarehouseLayout) -> anyhow::Result<Self> {
        Ok(Self {
            layout: Arc::new(layout),
            pallets: Arc::new(InMemoryPalletStore::new()),
            db: db::connect_memory().await?,
        })
    }
}
