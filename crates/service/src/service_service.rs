//! Services (internet, tv, ip, ...) attached to an address.

use sea_orm::DatabaseConnection;
use tracing::{info, instrument};

use common::types::Message;
use models::errors::ModelError;
use models::{address, service};

use crate::domain::{CreateServiceInput, ServiceView};
use crate::errors::ServiceError;
use crate::validation::{self, ADDRESS, DUPLICATE_SERVICE_TYPE, MISSING_SERVICE_FIELDS, SERVICE};

#[instrument(skip(db))]
pub async fn get_service(db: &DatabaseConnection, id: i32) -> Result<ServiceView, ServiceError> {
    let found = service::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found(SERVICE))?;
    Ok(ServiceView::from(&found))
}

/// Attach a service to an address. One service per type and address.
#[instrument(skip_all, fields(service_type = ?input.service_type))]
pub async fn create_service(db: &DatabaseConnection, input: CreateServiceInput) -> Result<ServiceView, ServiceError> {
    let (Some(raw_address), Some(service_type), Some(value)) = (input.address_id, input.service_type, input.value) else {
        return Err(ServiceError::Validation(MISSING_SERVICE_FIELDS.into()));
    };
    let address_id = validation::reference_id(&raw_address).ok_or_else(|| ServiceError::not_found(ADDRESS))?;
    let owner = address::find_by_id(db, address_id).await?.ok_or_else(|| ServiceError::not_found(ADDRESS))?;

    if service::find_by_address_and_type(db, owner.id, &service_type).await?.is_some() {
        return Err(ServiceError::Validation(DUPLICATE_SERVICE_TYPE.into()));
    }
    let created = insert_service(db, service::NewService { address_id: owner.id, service_type, value }).await?;
    info!(id = created.id, address_id = owner.id, "service created");
    Ok(ServiceView::from(&created))
}

/// The unique `(address_id, type)` index catches an insert that raced past
/// the duplicate check.
async fn insert_service(db: &DatabaseConnection, new: service::NewService) -> Result<service::Model, ServiceError> {
    service::create(db, new).await.map_err(|e| match e {
        ModelError::Conflict(_) => ServiceError::Validation(DUPLICATE_SERVICE_TYPE.into()),
        other => other.into(),
    })
}

#[instrument(skip(db))]
pub async fn delete_service(db: &DatabaseConnection, id: i32) -> Result<Message, ServiceError> {
    if !service::delete(db, id).await? {
        return Err(ServiceError::not_found(SERVICE));
    }
    info!(id, "service deleted");
    Ok(Message::new("Service deleted successfully."))
}
