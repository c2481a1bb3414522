use std::sync::Arc;
use warp::Filter;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use game_persistence::ApiError;
use game_persistence::repositories::{GameRepository, UserRepository};
use game_types::{CreateGameRequest, CreateUserRequest, FindLocalsRequest};

pub mod config;

const MAX_BODY_BYTES: u64 = 16 * 1024;

pub fn create_routes(
    game_repository: Arc<GameRepository>,
    user_repository: Arc<UserRepository>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let game_repository_filter = warp::any().map({
        let game_repository = game_repository.clone();
        move || game_repository.clone()
    });

    let user_repository_filter = warp::any().map({
        let user_repository = user_repository.clone();
        move || user_repository.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let create_game = warp::path("games")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<CreateGameRequest>())
        .and(game_repository_filter.clone())
        .and_then(handle_create_game_request);

    let create_user = warp::path("users")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<CreateUserRequest>())
        .and(user_repository_filter.clone())
        .and_then(handle_create_user_request);

    let find_locals = warp::path("locals")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json::<FindLocalsRequest>())
        .and(user_repository_filter.clone())
        .and_then(handle_find_locals_request);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(create_game)
        .or(create_user)
        .or(find_locals)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::log("locals_api"))
}

fn error_reply(message: &str, status: StatusCode) -> WithStatus<Json> {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": message })),
        status,
    )
}

/// Validation failures are the caller's fault and are echoed back; database
/// failures are logged and hidden behind a generic message.
fn api_error_reply(action: &str, err: ApiError) -> WithStatus<Json> {
    match err {
        ApiError::Validation(field_error) => {
            error_reply(&field_error.to_string(), StatusCode::BAD_REQUEST)
        }
        ApiError::Database(db_err) => {
            tracing::error!("Failed to {}: {}", action, db_err);
            error_reply(&format!("Failed to {action}"), StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Body problems get the same `{"error": ...}` shape as validation failures.
/// Anything else falls through to warp's default handling.
async fn handle_rejection(rejection: warp::Rejection) -> Result<WithStatus<Json>, warp::Rejection> {
    if let Some(err) = rejection.find::<warp::body::BodyDeserializeError>() {
        return Ok(error_reply(
            &format!("Invalid request body: {err}"),
            StatusCode::BAD_REQUEST,
        ));
    }
    if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        return Ok(error_reply(
            "Request body is too large",
            StatusCode::PAYLOAD_TOO_LARGE,
        ));
    }
    Err(rejection)
}

async fn handle_create_game_request(
    request: CreateGameRequest,
    game_repository: Arc<GameRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match game_repository.create_game(&request).await {
        Ok(Some(game)) => Ok(warp::reply::with_status(
            warp::reply::json(&game),
            StatusCode::CREATED,
        )),
        Ok(None) => Ok(error_reply("Game was not created", StatusCode::NOT_FOUND)),
        Err(err) => Ok(api_error_reply("create game", err)),
    }
}

async fn handle_create_user_request(
    request: CreateUserRequest,
    user_repository: Arc<UserRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match user_repository.create_user(&request).await {
        Ok(Some(user)) => Ok(warp::reply::with_status(
            warp::reply::json(&user),
            StatusCode::CREATED,
        )),
        // create_user yields nothing for an unknown game
        Ok(None) => Ok(error_reply("Game not found", StatusCode::NOT_FOUND)),
        Err(err) => Ok(api_error_reply("create user", err)),
    }
}

async fn handle_find_locals_request(
    request: FindLocalsRequest,
    user_repository: Arc<UserRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match user_repository.find_locals(&request).await {
        Ok(locals) => Ok(warp::reply::with_status(
            warp::reply::json(&locals),
            StatusCode::OK,
        )),
        Err(err) => Ok(api_error_reply("find locals", err)),
    }
}
