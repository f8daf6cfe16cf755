use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{service, user};

/// Largest magnitude a balance may take (two decimals, ten digits overall).
pub const MAX_BALANCE: f64 = 100_000_000.0;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub status: String,
    pub tariff: String,
    /// Hundredths of the currency unit.
    pub balance: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn balance_amount(&self) -> f64 {
        cents_to_amount(self.balance)
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Services,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Services => Entity::has_many(service::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Services.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert a decimal amount to stored hundredths, rounding half away from zero.
pub fn amount_to_cents(amount: f64) -> Result<i64, ModelError> {
    if !amount.is_finite() || amount.abs() >= MAX_BALANCE {
        return Err(ModelError::Validation("Invalid balance.".into()));
    }
    Ok((amount * 100.0).round() as i64)
}

pub fn cents_to_amount(cents: i64) -> f64 {
    cents as f64 / 100.0
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub user_id: i32,
    pub address: String,
    pub status: String,
    pub tariff: String,
    pub balance: i64,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewAddress) -> Result<Model, ModelError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        user_id: Set(new.user_id),
        address: Set(new.address),
        status: Set(new.status),
        tariff: Set(new.tariff),
        balance: Set(new.balance),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn list_for_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

/// Delete an address and its services. Run it inside a transaction.
pub async fn delete_with_children<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, ModelError> {
    service::Entity::delete_many()
        .filter(service::Column::AddressId.eq(id))
        .exec(db)
        .await?;
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
