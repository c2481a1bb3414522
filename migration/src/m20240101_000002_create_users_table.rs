use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_games_table::Games;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::UserToken)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::GameApi).string_len(64).not_null())
                    .col(ColumnDef::new(Users::Email).string_len(254).not_null())
                    // DECIMAL(8,5) matches the precision accepted from callers
                    .col(ColumnDef::new(Users::Latitude).decimal_len(8, 5).not_null())
                    .col(ColumnDef::new(Users::Longitude).decimal_len(8, 5).not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_game_api")
                            .from(Users::Table, Users::GameApi)
                            .to(Games::Table, Games::GameApi)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // find_locals scans one game's users at a time
        manager
            .create_index(
                Index::create()
                    .name("idx_users_game_api")
                    .table(Users::Table)
                    .col(Users::GameApi)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserToken,
    GameApi,
    Email,
    Latitude,
    Longitude,
    CreatedAt,
}
