use std::{fmt, str::FromStr};

use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use sea_orm::{QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{address, service};

pub const DEFAULT_LANGUAGE: &str = "uk";

/// UI theme preference. Stored as its lowercase name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    #[sea_orm(string_value = "light")]
    Light,
    #[sea_orm(string_value = "dark")]
    Dark,
    #[sea_orm(string_value = "system")]
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(ModelError::Validation(
                "Invalid theme. Allowed values: light, dark, system.".into(),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub phone: String,
    #[sea_orm(unique)]
    pub email: String,
    pub language: String,
    pub theme: Theme,
    pub device_id: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Addresses,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Addresses => Entity::has_many(address::Entity).into(),
        }
    }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Addresses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a user that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub phone: String,
    pub email: String,
    pub language: String,
    pub theme: Theme,
    pub device_id: Option<String>,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewUser) -> Result<Model, ModelError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        username: Set(new.username),
        password: Set(new.password),
        phone: Set(new.phone),
        email: Set(new.email),
        language: Set(new.language),
        theme: Set(new.theme),
        device_id: Set(new.device_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Username.eq(username)).one(db).await?)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email)).one(db).await?)
}

/// Delete a user together with its addresses and their services.
/// Children go first; run it inside a transaction.
pub async fn delete_with_children<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, ModelError> {
    let address_ids: Vec<i32> = address::Entity::find()
        .select_only()
        .column(address::Column::Id)
        .filter(address::Column::UserId.eq(id))
        .into_tuple()
        .all(db)
        .await?;
    if !address_ids.is_empty() {
        service::Entity::delete_many()
            .filter(service::Column::AddressId.is_in(address_ids))
            .exec(db)
            .await?;
    }
    address::Entity::delete_many()
        .filter(address::Column::UserId.eq(id))
        .exec(db)
        .await?;
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected)
}
