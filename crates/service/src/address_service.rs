use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use tracing::{info, instrument};

use common::types::Message;
use models::{address, service, user};

use crate::domain::{AddressDetail, AddressInput, AddressView, NumberOrText, ServiceMap};
use crate::errors::ServiceError;
use crate::validation::{self, require, ADDRESS, NO_ADDRESS, NO_BALANCE, NO_STATUS, NO_TARIFF, NO_USER_ID, USER};

/// Validated address columns.
struct AddressFields {
    address: String,
    status: String,
    tariff: String,
    balance: i64,
}

fn required_fields(input: AddressInput) -> Result<AddressFields, ServiceError> {
    let address = require(input.address, NO_ADDRESS)?;
    let status = require(input.status, NO_STATUS)?;
    let tariff = require(input.tariff, NO_TARIFF)?;
    let balance = validation::balance_cents(&require(input.balance, NO_BALANCE)?)?;
    Ok(AddressFields { address, status, tariff, balance })
}

async fn owner(db: &DatabaseConnection, raw: &NumberOrText) -> Result<user::Model, ServiceError> {
    let id = validation::reference_id(raw).ok_or_else(|| ServiceError::not_found(USER))?;
    user::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found(USER))
}

/// Create an address. The owner is checked before the remaining fields.
#[instrument(skip_all)]
pub async fn create_address(db: &DatabaseConnection, mut input: AddressInput) -> Result<AddressView, ServiceError> {
    let raw_user = input.user_id.take().ok_or_else(|| ServiceError::Validation(NO_USER_ID.into()))?;
    let owner = owner(db, &raw_user).await?;
    let fields = required_fields(input)?;

    let created = address::create(
        db,
        address::NewAddress {
            user_id: owner.id,
            address: fields.address,
            status: fields.status,
            tariff: fields.tariff,
            balance: fields.balance,
        },
    )
    .await?;
    info!(id = created.id, user_id = owner.id, "address created");
    Ok(AddressView::from(&created))
}

#[instrument(skip(db))]
pub async fn get_address(db: &DatabaseConnection, id: i32) -> Result<AddressDetail, ServiceError> {
    let found = address::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found(ADDRESS))?;
    let services = service::list_for_address(db, found.id).await?;
    Ok(AddressDetail {
        id: found.id,
        user_id: found.user_id,
        balance: found.balance_amount(),
        address: found.address,
        status: found.status,
        tariff: found.tariff,
        services: ServiceMap::from_services(&services),
    })
}

/// Replace address, status, tariff and balance. All four are required; the
/// owner never changes.
#[instrument(skip(db, input))]
pub async fn update_address(db: &DatabaseConnection, id: i32, input: AddressInput) -> Result<AddressView, ServiceError> {
    let current = address::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found(ADDRESS))?;
    let fields = required_fields(input)?;

    let mut am: address::ActiveModel = current.into();
    am.address = Set(fields.address);
    am.status = Set(fields.status);
    am.tariff = Set(fields.tariff);
    am.balance = Set(fields.balance);
    let updated = am.update(db).await?;
    info!(id = updated.id, "address updated");
    Ok(AddressView::from(&updated))
}

/// Delete an address and its services in one transaction.
#[instrument(skip(db))]
pub async fn delete_address(db: &DatabaseConnection, id: i32) -> Result<Message, ServiceError> {
    let txn = db.begin().await?;
    if address::find_by_id(&txn, id).await?.is_none() {
        return Err(ServiceError::not_found(ADDRESS));
    }
    address::delete_with_children(&txn, id).await?;
    txn.commit().await?;
    info!(id, "address deleted");
    Ok(Message::new("Address deleted successfully."))
}
