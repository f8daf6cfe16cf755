use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use common::types::Message;
use service::domain::{AddressDetail, AddressInput, AddressView};
use service::{address_service, validation};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[utoipa::path(
    post, path = "/address", tag = "address",
    request_body = crate::openapi::AddressInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::AddressDoc),
        (status = 400, description = "Missing field", body = crate::openapi::ErrorDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(State(state): State<ServerState>, body: Result<Json<AddressInput>, JsonRejection>) -> Result<Json<AddressView>, JsonApiError> {
    let Json(input) = body?;
    Ok(Json(address_service::create_address(&state.db, input).await?))
}

#[utoipa::path(
    get, path = "/address/{id}", tag = "address",
    params(("id" = String, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address with services", body = crate::openapi::AddressDetailDoc),
        (status = 400, description = "Empty id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<AddressDetail>, JsonApiError> {
    let id = validation::required_id(&id, validation::ADDRESS)?;
    Ok(Json(address_service::get_address(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/address/{id}", tag = "address",
    params(("id" = String, Path, description = "Address id")),
    request_body = crate::openapi::AddressInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AddressDoc),
        (status = 400, description = "Missing field", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<AddressInput>, JsonRejection>,
) -> Result<Json<AddressView>, JsonApiError> {
    let Json(input) = body?;
    let id = validation::existing_id(&id, validation::ADDRESS)?;
    Ok(Json(address_service::update_address(&state.db, id, input).await?))
}

#[utoipa::path(
    delete, path = "/address/{id}", tag = "address",
    params(("id" = String, Path, description = "Address id")),
    responses(
        (status = 200, description = "Deleted with its services", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, JsonApiError> {
    let id = validation::existing_id(&id, validation::ADDRESS)?;
    Ok(Json(address_service::delete_address(&state.db, id).await?))
}
