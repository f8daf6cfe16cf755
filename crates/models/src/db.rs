use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Pool settings handed to SeaORM.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout: Duration::from_secs(30),
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(3600)),
            sqlx_logging: false,
        }
    }
}

impl From<&configs::DatabaseConfig> for DatabaseConfig {
    fn from(c: &configs::DatabaseConfig) -> Self {
        Self {
            url: c.url.clone(),
            max_connections: c.max_connections,
            min_connections: c.min_connections,
            connect_timeout: Duration::from_secs(c.connect_timeout_secs),
            acquire_timeout: Duration::from_secs(c.acquire_timeout_secs),
            idle_timeout: Some(Duration::from_secs(c.idle_timeout_secs)),
            max_lifetime: Some(Duration::from_secs(c.max_lifetime_secs)),
            sqlx_logging: c.sqlx_logging,
        }
    }
}

impl DatabaseConfig {
    /// Single-connection in-memory SQLite; every call yields an empty database.
    pub fn in_memory_sqlite() -> Self {
        Self {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout: None,
            max_lifetime: None,
            ..Self::default()
        }
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.acquire_timeout)
            .sqlx_logging(self.sqlx_logging);
        if let Some(idle) = self.idle_timeout {
            opt.idle_timeout(idle);
        }
        if let Some(lifetime) = self.max_lifetime {
            opt.max_lifetime(lifetime);
        }
        opt
    }
}

pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(cfg.connect_options()).await?;
    info!(max_connections = cfg.max_connections, backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_settings_follow_app_config() {
        let app = configs::DatabaseConfig {
            url: "sqlite::memory:".into(),
            max_connections: 5,
            min_connections: 1,
            idle_timeout_secs: 60,
            ..configs::DatabaseConfig::default()
        };
        let cfg = DatabaseConfig::from(&app);
        assert_eq!(cfg.url, "sqlite::memory:");
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.min_connections, 1);
        assert_eq!(cfg.idle_timeout, Some(Duration::from_secs(60)));
        assert_eq!(cfg.connect_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn connects_to_in_memory_sqlite() -> anyhow::Result<()> {
        let db = connect_with_config(&DatabaseConfig::in_memory_sqlite()).await?;
        assert_eq!(db.get_database_backend(), sea_orm::DatabaseBackend::Sqlite);
        Ok(())
    }
}
