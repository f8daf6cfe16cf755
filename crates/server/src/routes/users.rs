use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use common::types::Message;
use service::domain::{CreateUserInput, UpdateUserInput, UserCreated, UserDetail, UserUpdated};
use service::{user_service, validation};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[utoipa::path(
    post, path = "/user", tag = "user",
    request_body = crate::openapi::CreateUserDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserCreatedDoc),
        (status = 400, description = "Missing parameters or invalid theme", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Username or email already exists", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<CreateUserInput>, JsonRejection>,
) -> Result<(StatusCode, Json<UserCreated>), JsonApiError> {
    let Json(input) = body?;
    let created = user_service::create_user(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/user/{id}", tag = "user",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User with addresses and services", body = crate::openapi::UserDetailDoc),
        (status = 400, description = "Empty id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<UserDetail>, JsonApiError> {
    let id = validation::required_id(&id, validation::USER)?;
    Ok(Json(user_service::get_user(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/user/{id}", tag = "user",
    params(("id" = String, Path, description = "User id")),
    request_body = crate::openapi::UpdateUserDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::UserUpdatedDoc),
        (status = 400, description = "Invalid theme", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Email already exists", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserInput>, JsonRejection>,
) -> Result<Json<UserUpdated>, JsonApiError> {
    let Json(input) = body?;
    let id = validation::existing_id(&id, validation::USER)?;
    Ok(Json(user_service::update_user(&state.db, id, input).await?))
}

#[utoipa::path(
    delete, path = "/user/{id}", tag = "user",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted with all addresses and services", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, JsonApiError> {
    let id = validation::existing_id(&id, validation::USER)?;
    Ok(Json(user_service::delete_user(&state.db, id).await?))
}
