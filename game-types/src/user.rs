use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// User handle returned by `create_user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserRecord {
    #[serde(rename = "userToken")]
    pub user_token: String,
}

/// One nearby user produced by `find_locals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LocalsResult {
    #[serde(rename = "userToken")]
    pub user_token: String,
}

/// A coordinate as it arrives on the wire: `"35.11070"` or `35.1107`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum DecimalInput {
    Text(String),
    Number(f64),
}

impl DecimalInput {
    pub fn as_text(&self) -> String {
        match self {
            DecimalInput::Text(text) => text.clone(),
            DecimalInput::Number(number) => number.to_string(),
        }
    }
}

impl From<&str> for DecimalInput {
    fn from(text: &str) -> Self {
        DecimalInput::Text(text.to_string())
    }
}

impl From<f64> for DecimalInput {
    fn from(number: f64) -> Self {
        DecimalInput::Number(number)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateUserRequest {
    #[serde(rename = "gameAPI", default)]
    pub game_api: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub latitude: Option<DecimalInput>,
    #[serde(default)]
    pub longitude: Option<DecimalInput>,
}

impl CreateUserRequest {
    pub fn new(
        game_api: impl Into<String>,
        email: impl Into<String>,
        latitude: impl Into<DecimalInput>,
        longitude: impl Into<DecimalInput>,
    ) -> Self {
        Self {
            game_api: Some(game_api.into()),
            email: Some(email.into()),
            latitude: Some(latitude.into()),
            longitude: Some(longitude.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FindLocalsRequest {
    #[serde(rename = "gameAPI", default)]
    pub game_api: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "distanceMax", default)]
    pub distance_max: Option<f64>,
}

impl FindLocalsRequest {
    pub fn new(game_api: impl Into<String>, token: impl Into<String>, distance_max: f64) -> Self {
        Self {
            game_api: Some(game_api.into()),
            token: Some(token.into()),
            distance_max: Some(distance_max),
        }
    }
}
