//! Request checks shared by the user, address and service operations.

use crate::domain::NumberOrText;
use crate::errors::ServiceError;

pub const USER: &str = "User";
pub const ADDRESS: &str = "Address";
pub const SERVICE: &str = "Service";

pub const MISSING_USER_FIELDS: &str = "Missing required parameters: username, password, phone, email";
pub const MISSING_SERVICE_FIELDS: &str = "Missing required parameters: address_id, type, value";
pub const NO_USER_ID: &str = "No user ID provided.";
pub const NO_ADDRESS: &str = "No address provided.";
pub const NO_STATUS: &str = "No status provided.";
pub const NO_TARIFF: &str = "No tariff provided.";
pub const NO_BALANCE: &str = "No balance provided.";
pub const INVALID_BALANCE: &str = "Invalid balance.";
pub const USERNAME_TAKEN: &str = "Username already exists";
pub const EMAIL_TAKEN: &str = "Email already exists";
pub const DUPLICATE_SERVICE_TYPE: &str = "Service with the same type already exists for this address.";

/// Id from a lookup path. Empty or zero is a client error; anything else that
/// is not an integer cannot name a record.
pub fn required_id(raw: &str, entity: &str) -> Result<i32, ServiceError> {
    let raw = raw.trim();
    if raw.is_empty() || raw.parse::<i64>() == Ok(0) {
        return Err(ServiceError::Validation(format!("{} ID is required and cannot be empty.", entity)));
    }
    existing_id(raw, entity)
}

/// Id from an update/delete path: anything unparsable is simply not found.
pub fn existing_id(raw: &str, entity: &str) -> Result<i32, ServiceError> {
    raw.trim().parse::<i32>().map_err(|_| ServiceError::not_found(entity))
}

pub fn require<T>(value: Option<T>, message: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::Validation(message.to_string()))
}

/// Foreign key given in a request body as a number or a numeric string.
pub fn reference_id(value: &NumberOrText) -> Option<i32> {
    match value {
        NumberOrText::Int(n) => i32::try_from(*n).ok(),
        NumberOrText::Float(f) if f.fract() == 0.0 => i32::try_from(*f as i64).ok(),
        NumberOrText::Float(_) => None,
        NumberOrText::Text(s) => s.trim().parse().ok(),
    }
}

/// Balance as stored hundredths.
pub fn balance_cents(value: &NumberOrText) -> Result<i64, ServiceError> {
    let amount = match value {
        NumberOrText::Int(n) => *n as f64,
        NumberOrText::Float(f) => *f,
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ServiceError::Validation(INVALID_BALANCE.into()))?,
    };
    Ok(models::address::amount_to_cents(amount)?)
}
