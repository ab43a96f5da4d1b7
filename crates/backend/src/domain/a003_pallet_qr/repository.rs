use contracts::domain::a003_pallet_qr::aggregate::{PalletQr, PalletQrId};
use contracts::domain::common::AggregateId;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, QuerySelect, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_pallet_qr")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub payload: String,
    pub is_used: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PalletQr {
    fn from(m: Model) -> Self {
        let id = PalletQrId::from_string(&m.id).unwrap_or_else(|_| PalletQrId::new_v4());
        PalletQr {
            id,
            payload: m.payload,
            is_used: m.is_used,
            created_at: m.created_at,
        }
    }
}

pub async fn insert(conn: &DatabaseConnection, qr: &PalletQr) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(qr.id.as_string()),
        payload: Set(qr.payload.clone()),
        is_used: Set(qr.is_used),
        created_at: Set(qr.created_at),
    };
    Entity::insert(active).exec_without_returning(conn).await?;
    Ok(())
}

/// Последние `limit` кодов, новые первыми
pub async fn list_recent(conn: &DatabaseConnection, limit: u64) -> anyhow::Result<Vec<PalletQr>> {
    Ok(Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Payload)
        .limit(limit)
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

pub async fn list_unused(conn: &DatabaseConnection) -> anyhow::Result<Vec<PalletQr>> {
    Ok(Entity::find()
        .filter(Column::IsUsed.eq(false))
        .order_by_asc(Column::CreatedAt)
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

/// `true`, если код был в реестре и ещё не использовался
pub async fn mark_used(conn: &DatabaseConnection, payload: &str) -> anyhow::Result<bool> {
    let result = Entity::update_many()
        .col_expr(Column::IsUsed, Expr::value(true))
        .filter(Column::Payload.eq(payload))
        .filter(Column::IsUsed.eq(false))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}
