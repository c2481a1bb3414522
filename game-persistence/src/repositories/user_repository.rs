use game_core::{LocalsQuery, NewUser};
use game_types::{CreateUserRequest, FindLocalsRequest, LocalsResult, UserRecord};
use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use tracing::{debug, error};

use super::required_column;
use crate::error::ApiError;
use crate::procedure::ProcedureCall;
use crate::result_set::{collect_rows, Row};

pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Register a user in a game via `create_user`. `Ok(None)` when the
    /// procedure returns no row.
    pub async fn create_user(
        &self,
        request: &CreateUserRequest,
    ) -> Result<Option<UserRecord>, ApiError> {
        let user = NewUser::try_from(request)?;

        let call = ProcedureCall::new("create_user")
            .arg(user.game_api)
            .arg(user.email)
            .arg(user.latitude)
            .arg(user.longitude);
        debug!(procedure = call.name(), "calling stored procedure");

        let row = self
            .db
            .query_one(call.statement(self.db.get_database_backend()))
            .await
            .inspect_err(|err| error!("create_user failed: {}", err))?;

        match row {
            Some(row) => Ok(Some(UserRecord {
                user_token: required_column(&row, "userToken")?,
            })),
            None => Ok(None),
        }
    }

    /// Users of the same game within `distanceMax` of the token's position,
    /// in the order the procedure returns them.
    pub async fn find_locals(
        &self,
        request: &FindLocalsRequest,
    ) -> Result<Vec<LocalsResult>, ApiError> {
        let rows = self.find_locals_rows(request).await?;

        let locals = rows
            .into_iter()
            .map(|row| {
                serde_json::from_value::<LocalsResult>(row.into()).map_err(|err| {
                    DbErr::Type(format!("unable to process result set: {err}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(locals)
    }

    /// Same as [`find_locals`](Self::find_locals), serialized as a JSON array.
    pub async fn find_locals_json(&self, request: &FindLocalsRequest) -> Result<String, ApiError> {
        let locals = self.find_locals(request).await?;
        serde_json::to_string(&locals)
            .map_err(|err| ApiError::Database(DbErr::Custom(err.to_string())))
    }

    async fn find_locals_rows(&self, request: &FindLocalsRequest) -> Result<Vec<Row>, ApiError> {
        let query = LocalsQuery::try_from(request)?;

        let call = ProcedureCall::new("find_locals")
            .arg(query.game_api)
            .arg(query.token)
            .arg(query.distance_max);
        debug!(procedure = call.name(), "calling stored procedure");

        let statement = call.statement(self.db.get_database_backend());
        let rows = collect_rows(self.db.as_ref(), [statement])
            .await
            .inspect_err(|err| error!("find_locals failed: {}", err))?;

        debug!(locals = rows.len(), "find_locals returned");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::transaction_log;
    use crate::ErrorKind;
    use sea_orm::{DatabaseBackend, MockDatabase, Transaction, Value};
    use std::collections::BTreeMap;

    type MockRow = BTreeMap<&'static str, Value>;

    fn token_row(token: &str) -> MockRow {
        BTreeMap::from([("userToken", Value::from(token))])
    }

    fn setup_repo(results: Vec<Vec<MockRow>>) -> UserRepository {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results(results)
            .into_connection();
        UserRepository::new(Arc::new(db))
    }

    #[tokio::test]
    async fn test_create_user_returns_record() {
        let repo = setup_repo(vec![vec![token_row("a1b2c3")]]);

        let request = CreateUserRequest::new("deadbeef", "a@b.com", "35.11070", "-106.61000");
        let user = repo.create_user(&request).await.unwrap().unwrap();
        assert_eq!(user.user_token, "a1b2c3");

        assert_eq!(
            transaction_log(repo.db),
            vec![Transaction::from_sql_and_values(
                DatabaseBackend::MySql,
                "CALL create_user(?, ?, ?, ?)",
                [
                    "deadbeef".into(),
                    "a@b.com".into(),
                    Value::Double(Some(35.1107)),
                    Value::Double(Some(-106.61)),
                ],
            )]
        );
    }

    #[tokio::test]
    async fn test_create_user_without_row_is_none() {
        let repo = setup_repo(vec![vec![]]);

        let request = CreateUserRequest::new("deadbeef", "a@b.com", "1.5", "2.5");
        assert!(repo.create_user(&request).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_user_rejects_bad_fields_before_database() {
        let repo = setup_repo(vec![]);

        let bad_game = CreateUserRequest::new("game-1", "a@b.com", "1.0", "1.0");
        let err = repo.create_user(&bad_game).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let bad_email = CreateUserRequest::new("abc", "not an email", "1.0", "1.0");
        let err = repo.create_user(&bad_email).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let polar = CreateUserRequest::new("abc", "a@b.com", "-90.00000", "1.0");
        let err = repo.create_user(&polar).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        let off_map = CreateUserRequest::new("abc", "a@b.com", "1.0", "181");
        let err = repo.create_user(&off_map).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        assert!(transaction_log(repo.db).is_empty());
    }

    #[tokio::test]
    async fn test_find_locals_preserves_row_order() {
        let repo = setup_repo(vec![vec![
            token_row("ccc"),
            token_row("aaa"),
            token_row("bbb"),
        ]]);

        let locals = repo
            .find_locals(&FindLocalsRequest::new("deadbeef", "a1b2c3", 2.5))
            .await
            .unwrap();

        let tokens: Vec<_> = locals.iter().map(|l| l.user_token.as_str()).collect();
        assert_eq!(tokens, vec!["ccc", "aaa", "bbb"]);

        assert_eq!(
            transaction_log(repo.db),
            vec![Transaction::from_sql_and_values(
                DatabaseBackend::MySql,
                "CALL find_locals(?, ?, ?)",
                ["deadbeef".into(), "a1b2c3".into(), Value::Double(Some(2.5))],
            )]
        );
    }

    #[tokio::test]
    async fn test_find_locals_token_round_trips_exactly() {
        let token = "00AbCdEf0123456789";
        let repo = setup_repo(vec![vec![token_row(token)]]);

        let locals = repo
            .find_locals(&FindLocalsRequest::new("deadbeef", "a1", 1.0))
            .await
            .unwrap();
        assert_eq!(
            locals,
            vec![LocalsResult {
                user_token: token.to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_find_locals_with_no_neighbours() {
        let repo = setup_repo(vec![vec![]]);

        let locals = repo
            .find_locals(&FindLocalsRequest::new("deadbeef", "a1", 1.0))
            .await
            .unwrap();
        assert!(locals.is_empty());
    }

    #[tokio::test]
    async fn test_find_locals_rejects_bad_identifiers() {
        let repo = setup_repo(vec![]);

        let bad_game = FindLocalsRequest::new("", "a1", 1.0);
        let err = repo.find_locals(&bad_game).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let bad_token = FindLocalsRequest::new("abc", "z".repeat(3), 1.0);
        let err = repo.find_locals(&bad_token).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let bad_distance = FindLocalsRequest::new("abc", "a1", f64::NAN);
        let err = repo.find_locals(&bad_distance).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        assert!(transaction_log(repo.db).is_empty());
    }

    #[tokio::test]
    async fn test_find_locals_json() {
        let repo = setup_repo(vec![vec![token_row("aaa"), token_row("bbb")]]);

        let json = repo
            .find_locals_json(&FindLocalsRequest::new("deadbeef", "a1", 1.0))
            .await
            .unwrap();
        assert_eq!(json, r#"[{"userToken":"aaa"},{"userToken":"bbb"}]"#);
    }

    #[tokio::test]
    async fn test_find_locals_row_without_token_is_database_error() {
        let repo = setup_repo(vec![vec![BTreeMap::from([(
            "distance",
            Value::Double(Some(1.5)),
        )])]]);

        let err = repo
            .find_locals(&FindLocalsRequest::new("deadbeef", "a1", 1.0))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Database);
    }
}
