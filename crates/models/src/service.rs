use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::address;
use crate::errors::ModelError;

/// Service types that get their own key in reshaped address payloads.
/// Other type strings are stored as-is but never surfaced there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Internet,
    Tv,
    Ip,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [ServiceKind::Internet, ServiceKind::Tv, ServiceKind::Ip];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Internet => "internet",
            ServiceKind::Tv => "tv",
            ServiceKind::Ip => "ip",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub address_id: i32,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub service_type: String,
    pub value: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn kind(&self) -> Option<ServiceKind> {
        ServiceKind::parse(&self.service_type)
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Address,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Address => Entity::belongs_to(address::Entity)
                .from(Column::AddressId)
                .to(address::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewService {
    pub address_id: i32,
    pub service_type: String,
    pub value: String,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewService) -> Result<Model, ModelError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        address_id: Set(new.address_id),
        service_type: Set(new.service_type),
        value: Set(new.value),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_address_and_type<C: ConnectionTrait>(
    db: &C,
    address_id: i32,
    service_type: &str,
) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::AddressId.eq(address_id))
        .filter(Column::ServiceType.eq(service_type))
        .one(db)
        .await?)
}

/// Services of one address in insertion (id) order.
pub async fn list_for_address<C: ConnectionTrait>(db: &C, address_id: i32) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::AddressId.eq(address_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

/// Delete a service; returns true if a row was removed.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
