use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(Serialize, ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDoc {
    pub username: String,
    pub password: String,
    pub phone: String,
    pub email: String,
    /// Defaults to `uk`.
    pub language: Option<String>,
    /// One of `light`, `dark`, `system`; defaults to `light`.
    pub theme: Option<String>,
    pub device_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDoc {
    pub password: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub language: Option<String>,
    pub theme: Option<String>,
    pub device_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub language: String,
    pub theme: String,
    pub device_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct UserCreatedDoc { pub message: String, pub user: UserDoc }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedUserDoc {
    pub id: i32,
    pub email: String,
    pub phone: String,
    pub language: String,
    pub theme: String,
    pub device_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct UserUpdatedDoc { pub message: String, pub user: UpdatedUserDoc }

/// Recognised service types mapped to their values; unset types are omitted.
#[derive(Serialize, ToSchema)]
pub struct ServiceMapDoc {
    pub internet: Option<String>,
    pub tv: Option<String>,
    pub ip: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct UserAddressDoc {
    pub id: i32,
    pub address: String,
    pub status: String,
    pub tariff: String,
    pub balance: f64,
    pub services: ServiceMapDoc,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailDoc {
    pub username: String,
    pub password: String,
    pub phone: String,
    pub email: String,
    pub language: String,
    pub theme: String,
    pub device_id: Option<String>,
    pub addresses: Vec<UserAddressDoc>,
}

/// `user_id` and `balance` accept a number or a numeric string.
#[derive(Serialize, ToSchema)]
pub struct AddressInputDoc {
    pub user_id: Option<i32>,
    pub address: String,
    pub status: String,
    pub tariff: String,
    pub balance: f64,
}

#[derive(Serialize, ToSchema)]
pub struct AddressDoc {
    pub id: i32,
    pub user_id: i32,
    pub address: String,
    pub status: String,
    pub tariff: String,
    pub balance: f64,
}

#[derive(Serialize, ToSchema)]
pub struct AddressDetailDoc {
    pub id: i32,
    pub user_id: i32,
    pub address: String,
    pub status: String,
    pub tariff: String,
    pub balance: f64,
    pub services: ServiceMapDoc,
}

#[derive(Serialize, ToSchema)]
pub struct CreateServiceDoc {
    pub address_id: i32,
    #[serde(rename = "type")]
    pub service_type: String,
    pub value: String,
}

#[derive(Serialize, ToSchema)]
pub struct ServiceDoc {
    pub id: i32,
    pub address_id: i32,
    #[serde(rename = "type")]
    pub service_type: String,
    pub value: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create,
        crate::routes::users::get,
        crate::routes::users::update,
        crate::routes::users::delete,
        crate::routes::addresses::create,
        crate::routes::addresses::get,
        crate::routes::addresses::update,
        crate::routes::addresses::delete,
        crate::routes::services::get,
        crate::routes::services::create,
        crate::routes::services::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            MessageDoc,
            CreateUserDoc,
            UpdateUserDoc,
            UserDoc,
            UserCreatedDoc,
            UpdatedUserDoc,
            UserUpdatedDoc,
            ServiceMapDoc,
            UserAddressDoc,
            UserDetailDoc,
            AddressInputDoc,
            AddressDoc,
            AddressDetailDoc,
            CreateServiceDoc,
            ServiceDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "user"),
        (name = "address"),
        (name = "service")
    )
)]
pub struct ApiDoc;
