use contracts::domain::a002_location_qr::aggregate::{LocationQr, LocationQrId};
use contracts::domain::common::AggregateId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_location_qr")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub location: String,
    pub payload: String,
    pub section: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LocationQr {
    fn from(m: Model) -> Self {
        let id = LocationQrId::from_string(&m.id).unwrap_or_else(|_| LocationQrId::new_v4());
        LocationQr {
            id,
            section: m.section.chars().next().unwrap_or('?'),
            location: m.location,
            payload: m.payload,
            created_at: m.created_at,
        }
    }
}

impl From<&LocationQr> for ActiveModel {
    fn from(qr: &LocationQr) -> Self {
        ActiveModel {
            id: Set(qr.id.as_string()),
            location: Set(qr.location.clone()),
            payload: Set(qr.payload.clone()),
            section: Set(qr.section.to_string()),
            created_at: Set(qr.created_at),
        }
    }
}

/// Все коды (или одной секции), по возрастанию ячейки
pub async fn list(conn: &DatabaseConnection, section: Option<char>) -> anyhow::Result<Vec<LocationQr>> {
    let mut query = Entity::find().order_by_asc(Column::Location);
    if let Some(section) = section {
        query = query.filter(Column::Section.eq(section.to_string()));
    }
    Ok(query.all(conn).await?.into_iter().map(Into::into).collect())
}

pub async fn list_by_locations(
    conn: &DatabaseConnection,
    locations: &[String],
) -> anyhow::Result<Vec<LocationQr>> {
    if locations.is_empty() {
        return Ok(Vec::new());
    }
    Ok(Entity::find()
        .filter(Column::Location.is_in(locations.iter().cloned()))
        .order_by_asc(Column::Location)
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

pub async fn existing_locations<C: ConnectionTrait>(conn: &C) -> anyhow::Result<HashSet<String>> {
    Ok(Entity::find()
        .all(conn)
        .await?
        .into_iter()
        .map(|m| m.location)
        .collect())
}

pub async fn insert_many<C: ConnectionTrait>(conn: &C, items: &[LocationQr]) -> anyhow::Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    Entity::insert_many(items.iter().map(ActiveModel::from))
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
