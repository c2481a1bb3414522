pub mod connection;
pub mod error;
pub mod procedure;
pub mod repositories;
pub mod result_set;

pub use error::{ApiError, ErrorKind};

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::connection::{connect_and_migrate, connect_to_database, DatabaseConfig};
use crate::repositories::{GameRepository, UserRepository};

/// Owns the shared connection pool and hands out repositories over it.
pub struct DatabaseManager {
    connection: Arc<DatabaseConnection>,
}

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig, run_migrations: bool) -> anyhow::Result<Self> {
        let connection = if run_migrations {
            connect_and_migrate(config).await?
        } else {
            connect_to_database(config).await?
        };
        Ok(Self::from_connection(Arc::new(connection)))
    }

    pub fn from_connection(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub fn game_repository(&self) -> GameRepository {
        GameRepository::new(Arc::clone(&self.connection))
    }

    pub fn user_repository(&self) -> UserRepository {
        UserRepository::new(Arc::clone(&self.connection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::transaction_log;
    use game_types::{CreateGameRequest, FindLocalsRequest};
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction, Value};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_repositories_share_one_connection() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::MySql)
                .append_query_results([
                    vec![BTreeMap::from([("gameAPI", Value::from("c0ffee"))])],
                    vec![],
                ])
                .into_connection(),
        );
        let database = DatabaseManager::from_connection(Arc::clone(&db));
        let games = database.game_repository();
        let users = database.user_repository();

        games
            .create_game(&CreateGameRequest::new("Shared pool"))
            .await
            .unwrap();
        users
            .find_locals(&FindLocalsRequest::new("c0ffee", "a1", 10.0))
            .await
            .unwrap();

        drop((database, games, users));
        assert_eq!(
            transaction_log(db),
            vec![
                Transaction::from_sql_and_values(
                    DatabaseBackend::MySql,
                    "CALL create_game(?)",
                    ["Shared pool".into()],
                ),
                Transaction::from_sql_and_values(
                    DatabaseBackend::MySql,
                    "CALL find_locals(?, ?, ?)",
                    ["c0ffee".into(), "a1".into(), Value::Double(Some(10.0))],
                ),
            ]
        );
    }
}
