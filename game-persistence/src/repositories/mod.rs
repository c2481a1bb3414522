pub mod game_repository;
pub mod user_repository;

pub use game_repository::GameRepository;
pub use user_repository::UserRepository;

use sea_orm::{DbErr, QueryResult};

/// Read a string column the procedure is contracted to return.
pub(crate) fn required_column(row: &QueryResult, column: &str) -> Result<String, DbErr> {
    row.try_get::<String>("", column).map_err(|err| {
        DbErr::Type(format!("unable to process result set: {column}: {err}"))
    })
}

/// Recorded statements of a mock connection once every repository using it
/// has been dropped.
#[cfg(test)]
pub(crate) fn transaction_log(
    db: std::sync::Arc<sea_orm::DatabaseConnection>,
) -> Vec<sea_orm::Transaction> {
    std::sync::Arc::try_unwrap(db)
        .expect("mock connection is still shared")
        .into_transaction_log()
}
