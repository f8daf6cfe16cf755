use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use common::types::Message;
use service::domain::{CreateServiceInput, ServiceView};
use service::{service_service, validation};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[utoipa::path(
    get, path = "/service/{id}", tag = "service",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Empty id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<ServiceView>, JsonApiError> {
    let id = validation::required_id(&id, validation::SERVICE)?;
    Ok(Json(service_service::get_service(&state.db, id).await?))
}

#[utoipa::path(
    post, path = "/service", tag = "service",
    request_body = crate::openapi::CreateServiceDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Missing parameters or duplicate type", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Address not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<CreateServiceInput>, JsonRejection>,
) -> Result<Json<ServiceView>, JsonApiError> {
    let Json(input) = body?;
    Ok(Json(service_service::create_service(&state.db, input).await?))
}

#[utoipa::path(
    delete, path = "/service/{id}", tag = "service",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Empty id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, JsonApiError> {
    let id = validation::required_id(&id, validation::SERVICE)?;
    Ok(Json(service_service::delete_service(&state.db, id).await?))
}
