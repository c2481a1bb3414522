use game_types::{CreateGameRequest, CreateUserRequest, FieldError, FindLocalsRequest};
use tracing::debug;

use crate::validation;

/// Normalized arguments for `create_game`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub game_desc: String,
}

/// Normalized arguments for `create_user`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub game_api: String,
    pub email: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Normalized arguments for `find_locals`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalsQuery {
    pub game_api: String,
    pub token: String,
    pub distance_max: f64,
}

fn log_rejection(operation: &str, err: &FieldError) {
    debug!(operation, field = err.field(), "rejected request: {}", err);
}

impl TryFrom<&CreateGameRequest> for NewGame {
    type Error = FieldError;

    fn try_from(request: &CreateGameRequest) -> Result<Self, Self::Error> {
        validation::game_description(request.game_desc.as_deref())
            .map(|game_desc| NewGame { game_desc })
            .inspect_err(|err| log_rejection("create_game", err))
    }
}

impl TryFrom<&CreateUserRequest> for NewUser {
    type Error = FieldError;

    fn try_from(request: &CreateUserRequest) -> Result<Self, Self::Error> {
        validate_new_user(request).inspect_err(|err| log_rejection("create_user", err))
    }
}

impl TryFrom<&FindLocalsRequest> for LocalsQuery {
    type Error = FieldError;

    fn try_from(request: &FindLocalsRequest) -> Result<Self, Self::Error> {
        validate_locals_query(request).inspect_err(|err| log_rejection("find_locals", err))
    }
}

// Fields are checked in declaration order; the first failure wins.
fn validate_new_user(request: &CreateUserRequest) -> Result<NewUser, FieldError> {
    Ok(NewUser {
        game_api: validation::hex_identifier("gameAPI", request.game_api.as_deref())?,
        email: validation::email(request.email.as_deref())?,
        latitude: validation::latitude(request.latitude.as_ref())?,
        longitude: validation::longitude(request.longitude.as_ref())?,
    })
}

fn validate_locals_query(request: &FindLocalsRequest) -> Result<LocalsQuery, FieldError> {
    Ok(LocalsQuery {
        game_api: validation::hex_identifier("gameAPI", request.game_api.as_deref())?,
        token: validation::hex_identifier("token", request.token.as_deref())?,
        distance_max: validation::distance_max(request.distance_max)?,
    })
}
