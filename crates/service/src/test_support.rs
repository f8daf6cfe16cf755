#![cfg(test)]
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use models::user;
use sea_orm::DatabaseConnection;

/// A fresh, fully migrated in-memory database for one test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::in_memory_sqlite()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_user(db: &DatabaseConnection, username: &str) -> Result<user::Model, anyhow::Error> {
    let created = user::create(
        db,
        user::NewUser {
            username: username.to_string(),
            password: "secret".into(),
            phone: "+380670000000".into(),
            email: format!("{}@example.com", username),
            language: user::DEFAULT_LANGUAGE.into(),
            theme: user::Theme::default(),
            device_id: None,
        },
    )
    .await?;
    Ok(created)
}
