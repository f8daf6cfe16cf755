//! Request bodies and response payloads for the subscriber API.

use serde::{Deserialize, Serialize};

use models::user::Theme;
use models::{address, service, user};

/// A JSON scalar that clients send either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub language: Option<String>,
    pub theme: Option<String>,
    #[serde(rename = "deviceId")]
    pub device_id: Option<String>,
}

/// Partial update: only present fields are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInput {
    pub password: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub language: Option<String>,
    pub theme: Option<String>,
    #[serde(rename = "deviceId")]
    pub device_id: Option<String>,
}

/// Body of address create and update. `user_id` is only read on create.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressInput {
    pub user_id: Option<NumberOrText>,
    pub address: Option<String>,
    pub status: Option<String>,
    pub tariff: Option<String>,
    pub balance: Option<NumberOrText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateServiceInput {
    pub address_id: Option<NumberOrText>,
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub language: String,
    pub theme: Theme,
    #[serde(rename = "deviceId")]
    pub device_id: Option<String>,
}

impl From<&user::Model> for UserView {
    fn from(m: &user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username.clone(),
            email: m.email.clone(),
            phone: m.phone.clone(),
            language: m.language.clone(),
            theme: m.theme,
            device_id: m.device_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCreated {
    pub message: String,
    pub user: UserView,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatedUserView {
    pub id: i32,
    pub email: String,
    pub phone: String,
    pub language: String,
    pub theme: Theme,
    #[serde(rename = "deviceId")]
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserUpdated {
    pub message: String,
    pub user: UpdatedUserView,
}

impl From<&user::Model> for UpdatedUserView {
    fn from(m: &user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email.clone(),
            phone: m.phone.clone(),
            language: m.language.clone(),
            theme: m.theme,
            device_id: m.device_id.clone(),
        }
    }
}

/// Full user record with the address tree below it.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    pub username: String,
    pub password: String,
    pub phone: String,
    pub email: String,
    pub language: String,
    pub theme: Theme,
    #[serde(rename = "deviceId")]
    pub device_id: Option<String>,
    pub addresses: Vec<UserAddress>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserAddress {
    pub id: i32,
    pub address: String,
    pub status: String,
    pub tariff: String,
    pub balance: f64,
    pub services: ServiceMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddressView {
    pub id: i32,
    pub user_id: i32,
    pub address: String,
    pub status: String,
    pub tariff: String,
    pub balance: f64,
}

impl From<&address::Model> for AddressView {
    fn from(m: &address::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            address: m.address.clone(),
            status: m.status.clone(),
            tariff: m.tariff.clone(),
            balance: m.balance_amount(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddressDetail {
    pub id: i32,
    pub user_id: i32,
    pub address: String,
    pub status: String,
    pub tariff: String,
    pub balance: f64,
    pub services: ServiceMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub id: i32,
    pub address_id: i32,
    #[serde(rename = "type")]
    pub service_type: String,
    pub value: String,
}

impl From<&service::Model> for ServiceView {
    fn from(m: &service::Model) -> Self {
        Self {
            id: m.id,
            address_id: m.address_id,
            service_type: m.service_type.clone(),
            value: m.value.clone(),
        }
    }
}

/// Services of one address keyed by recognised type. Unset keys are omitted
/// from the JSON output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServiceMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl ServiceMap {
    /// Later entries win when a type repeats; unknown types are skipped.
    pub fn from_services(services: &[service::Model]) -> Self {
        let mut map = Self::default();
        for s in services {
            let slot = match s.kind() {
                Some(service::ServiceKind::Internet) => &mut map.internet,
                Some(service::ServiceKind::Tv) => &mut map.tv,
                Some(service::ServiceKind::Ip) => &mut map.ip,
                None => continue,
            };
            *slot = Some(s.value.clone());
        }
        map
    }
}
