use std::env;

use anyhow::{Context, Result};
use game_persistence::connection::DatabaseConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub run_migrations: bool,
    pub database: DatabaseConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT")?,
            run_migrations: env::var("RUN_MIGRATIONS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("Invalid RUN_MIGRATIONS")?,
            database: DatabaseConfig::from_env()?,
        })
    }

    pub fn bind_address(&self) -> Result<std::net::SocketAddr> {
        let ip: std::net::IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid HOST {}", self.host))?;
        Ok((ip, self.port).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 9000,
            run_migrations: false,
            database: DatabaseConfig::default(),
        };
        assert_eq!(config.bind_address().unwrap().to_string(), "0.0.0.0:9000");

        let bad = Config {
            host: "localhost".to_string(),
            ..config
        };
        assert!(bad.bind_address().is_err());
    }
}
