use sea_orm::{ConnectionTrait, DbBackend};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const CREATE_GAME: &str = r#"
CREATE PROCEDURE create_game(IN gameDesc VARCHAR(256))
BEGIN
    DECLARE newGameApi CHAR(64);
    SET newGameApi = SHA2(CONCAT(UUID(), RAND(), gameDesc), 256);
    INSERT INTO games (game_api, description) VALUES (newGameApi, gameDesc);
    SELECT newGameApi AS gameAPI;
END
"#;

// No row comes back when the game does not exist.
const CREATE_USER: &str = r#"
CREATE PROCEDURE create_user(
    IN gameApi CHAR(64),
    IN userEmail VARCHAR(254),
    IN userLatitude DECIMAL(8,5),
    IN userLongitude DECIMAL(8,5)
)
BEGIN
    DECLARE newUserToken CHAR(64);
    IF EXISTS (SELECT 1 FROM games WHERE game_api = gameApi) THEN
        SET newUserToken = SHA2(CONCAT(UUID(), RAND(), userEmail), 256);
        INSERT INTO users (user_token, game_api, email, latitude, longitude)
            VALUES (newUserToken, gameApi, userEmail, userLatitude, userLongitude);
        SELECT newUserToken AS userToken;
    END IF;
END
"#;

// distanceMax is in metres, nearest users first.
const FIND_LOCALS: &str = r#"
CREATE PROCEDURE find_locals(IN gameApi CHAR(64), IN token CHAR(64), IN distanceMax DOUBLE)
BEGIN
    SELECT other.user_token AS userToken
    FROM users AS origin
    JOIN users AS other
        ON other.game_api = origin.game_api
        AND other.user_token <> origin.user_token
    WHERE origin.game_api = gameApi
        AND origin.user_token = token
        AND ST_Distance_Sphere(
            POINT(origin.longitude, origin.latitude),
            POINT(other.longitude, other.latitude)
        ) <= distanceMax
    ORDER BY ST_Distance_Sphere(
        POINT(origin.longitude, origin.latitude),
        POINT(other.longitude, other.latitude)
    );
END
"#;

const PROCEDURES: [(&str, &str); 3] = [
    ("create_game", CREATE_GAME),
    ("create_user", CREATE_USER),
    ("find_locals", FIND_LOCALS),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Stored procedures only exist on MySQL
        if manager.get_database_backend() != DbBackend::MySql {
            return Ok(());
        }

        let db = manager.get_connection();
        for (name, body) in PROCEDURES {
            db.execute_unprepared(&format!("DROP PROCEDURE IF EXISTS {name}"))
                .await?;
            db.execute_unprepared(body).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::MySql {
            return Ok(());
        }

        let db = manager.get_connection();
        for (name, _) in PROCEDURES {
            db.execute_unprepared(&format!("DROP PROCEDURE IF EXISTS {name}"))
                .await?;
        }

        Ok(())
    }
}
