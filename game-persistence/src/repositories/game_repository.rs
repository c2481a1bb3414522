use game_core::NewGame;
use game_types::{CreateGameRequest, GameRecord};
use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::{debug, error};

use super::required_column;
use crate::error::ApiError;
use crate::procedure::ProcedureCall;

pub struct GameRepository {
    db: Arc<DatabaseConnection>,
}

impl GameRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Validate the description and call `create_game`. `Ok(None)` when the
    /// procedure returns no row.
    pub async fn create_game(
        &self,
        request: &CreateGameRequest,
    ) -> Result<Option<GameRecord>, ApiError> {
        let game = NewGame::try_from(request)?;

        let call = ProcedureCall::new("create_game").arg(game.game_desc);
        debug!(procedure = call.name(), "calling stored procedure");

        let row = self
            .db
            .query_one(call.statement(self.db.get_database_backend()))
            .await
            .inspect_err(|err| error!("create_game failed: {}", err))?;

        // gameAPI is unique, so at most one row comes back
        match row {
            Some(row) => Ok(Some(GameRecord {
                game_api: required_column(&row, "gameAPI")?,
            })),
            None => Ok(None),
        }
    }
}
