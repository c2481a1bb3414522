use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Game handle returned by `create_game`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameRecord {
    #[serde(rename = "gameAPI")]
    pub game_api: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateGameRequest {
    #[serde(rename = "gameDesc", default)]
    pub game_desc: Option<String>,
}

impl CreateGameRequest {
    pub fn new(game_desc: impl Into<String>) -> Self {
        Self {
            game_desc: Some(game_desc.into()),
        }
    }
}
