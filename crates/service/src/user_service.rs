use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use tracing::{info, instrument};

use common::types::Message;
use models::errors::ModelError;
use models::user::{self, Theme};
use models::{address, service};

use crate::domain::{
    CreateUserInput, ServiceMap, UpdateUserInput, UpdatedUserView, UserAddress, UserCreated, UserDetail, UserUpdated,
    UserView,
};
use crate::errors::ServiceError;
use crate::validation::{EMAIL_TAKEN, MISSING_USER_FIELDS, USER, USERNAME_TAKEN};

fn parse_theme(raw: Option<&str>) -> Result<Option<Theme>, ServiceError> {
    Ok(raw.map(str::parse::<Theme>).transpose()?)
}

/// Create a user. Username and email must both be unused.
#[instrument(skip_all, fields(username = ?input.username))]
pub async fn create_user(db: &DatabaseConnection, input: CreateUserInput) -> Result<UserCreated, ServiceError> {
    let (Some(username), Some(password), Some(phone), Some(email)) =
        (input.username, input.password, input.phone, input.email)
    else {
        return Err(ServiceError::Validation(MISSING_USER_FIELDS.into()));
    };

    if user::find_by_username(db, &username).await?.is_some() {
        return Err(ServiceError::Conflict(USERNAME_TAKEN.into()));
    }
    if user::find_by_email(db, &email).await?.is_some() {
        return Err(ServiceError::Conflict(EMAIL_TAKEN.into()));
    }
    let theme = parse_theme(input.theme.as_deref())?.unwrap_or_default();

    let new = user::NewUser {
        username,
        password,
        phone,
        email,
        language: input.language.unwrap_or_else(|| user::DEFAULT_LANGUAGE.to_string()),
        theme,
        device_id: input.device_id,
    };
    let created = insert_user(db, new).await?;
    info!(id = created.id, "user created");
    Ok(UserCreated { message: "User created successfully".into(), user: UserView::from(&created) })
}

/// Insert a checked user. A unique violation here means a concurrent insert
/// took the username or email after the pre-checks.
async fn insert_user(db: &DatabaseConnection, new: user::NewUser) -> Result<user::Model, ServiceError> {
    let username = new.username.clone();
    match user::create(db, new).await {
        Ok(m) => Ok(m),
        Err(ModelError::Conflict(_)) => {
            let taken = if user::find_by_username(db, &username).await?.is_some() { USERNAME_TAKEN } else { EMAIL_TAKEN };
            Err(ServiceError::Conflict(taken.into()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Load a user with its addresses (by id) and each address' services.
#[instrument(skip(db))]
pub async fn get_user(db: &DatabaseConnection, id: i32) -> Result<UserDetail, ServiceError> {
    let found = user::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found(USER))?;

    let mut addresses = Vec::new();
    for a in address::list_for_user(db, found.id).await? {
        let services = service::list_for_address(db, a.id).await?;
        addresses.push(UserAddress {
            id: a.id,
            balance: a.balance_amount(),
            address: a.address,
            status: a.status,
            tariff: a.tariff,
            services: ServiceMap::from_services(&services),
        });
    }

    Ok(UserDetail {
        username: found.username,
        password: found.password,
        phone: found.phone,
        email: found.email,
        language: found.language,
        theme: found.theme,
        device_id: found.device_id,
        addresses,
    })
}

/// Overwrite the fields present in `input`; the rest stay as stored.
#[instrument(skip(db, input))]
pub async fn update_user(db: &DatabaseConnection, id: i32, input: UpdateUserInput) -> Result<UserUpdated, ServiceError> {
    let current = user::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found(USER))?;

    if let Some(email) = input.email.as_deref() {
        if email != current.email {
            if let Some(other) = user::find_by_email(db, email).await? {
                if other.id != current.id {
                    return Err(ServiceError::Conflict(EMAIL_TAKEN.into()));
                }
            }
        }
    }
    let theme = parse_theme(input.theme.as_deref())?;

    let mut am: user::ActiveModel = current.into();
    if let Some(password) = input.password {
        am.password = Set(password);
    }
    if let Some(phone) = input.phone {
        am.phone = Set(phone);
    }
    if let Some(email) = input.email {
        am.email = Set(email);
    }
    if let Some(language) = input.language {
        am.language = Set(language);
    }
    if let Some(theme) = theme {
        am.theme = Set(theme);
    }
    if let Some(device_id) = input.device_id {
        am.device_id = Set(Some(device_id));
    }

    let updated = am.update(db).await.map_err(|e| match ModelError::from(e) {
        ModelError::Conflict(_) => ServiceError::Conflict(EMAIL_TAKEN.into()),
        other => other.into(),
    })?;
    info!(id = updated.id, "user updated");
    Ok(UserUpdated { message: "User updated successfully".into(), user: UpdatedUserView::from(&updated) })
}

/// Delete a user and everything it owns in one transaction.
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<Message, ServiceError> {
    let txn = db.begin().await?;
    if user::find_by_id(&txn, id).await?.is_none() {
        return Err(ServiceError::not_found(USER));
    }
    user::delete_with_children(&txn, id).await?;
    txn.commit().await?;
    info!(id, "user deleted");
    Ok(Message::new("User deleted successfully."))
}
