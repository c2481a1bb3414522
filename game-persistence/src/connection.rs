use std::env;

use anyhow::{anyhow, Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};
use tracing::info;
use url::Url;

/// Credentials for the MySQL schema holding the game procedures.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub schema: String,
    /// Full connection URL; wins over the individual fields when set.
    pub url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            schema: "locals".to_string(),
            url: None,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: env::var("DB_HOST").unwrap_or(defaults.host),
            port: match env::var("DB_PORT") {
                Ok(port) => port.parse().context("Invalid DB_PORT")?,
                Err(_) => defaults.port,
            },
            user: env::var("DB_USER").unwrap_or(defaults.user),
            password: env::var("DB_PASSWORD").unwrap_or(defaults.password),
            schema: env::var("DB_SCHEMA").unwrap_or(defaults.schema),
            url: env::var("DATABASE_URL").ok(),
        })
    }

    pub fn database_url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        let mut url = Url::parse(&format!("mysql://{}:{}", self.host, self.port))
            .with_context(|| format!("Invalid database host {}", self.host))?;
        url.set_username(&self.user)
            .map_err(|_| anyhow!("Invalid database user {}", self.user))?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password))
                .map_err(|_| anyhow!("Invalid database password"))?;
        }
        url.set_path(&self.schema);

        Ok(url.to_string())
    }
}

pub async fn connect_to_database(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let database_url = config.database_url()?;
    let db = Database::connect(&database_url).await?;
    info!("Connected to database {}:{}/{}", config.host, config.port, config.schema);
    Ok(db)
}

pub async fn connect_and_migrate(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let db = connect_to_database(config).await?;
    Migrator::up(&db, None).await?;
    info!("Database migrations applied");
    Ok(db)
}

pub async fn connect_to_memory_database() -> Result<DatabaseConnection, DbErr> {
    Database::connect("sqlite::memory:").await
}
