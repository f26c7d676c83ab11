//! Create pull_requests table.

use sea_orm_migration::prelude::*;

use super::m20251020_000001_create_teams::Team;
use super::m20251020_000002_create_users::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PullRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PullRequest::PullRequestId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PullRequest::PullRequestName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PullRequest::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(PullRequest::TeamName).string().not_null())
                    .col(
                        ColumnDef::new(PullRequest::Status)
                            .string_len(16)
                            .not_null()
                            .default("OPEN"),
                    )
                    .col(
                        ColumnDef::new(PullRequest::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(PullRequest::MergedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pull_requests_author_id")
                            .from(PullRequest::Table, PullRequest::AuthorId)
                            .to(User::Table, User::UserId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pull_requests_team_name")
                            .from(PullRequest::Table, PullRequest::TeamName)
                            .to(Team::Table, Team::TeamName)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pull_requests_team_name")
                    .table(PullRequest::Table)
                    .col(PullRequest::TeamName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pull_requests_author_id")
                    .table(PullRequest::Table)
                    .col(PullRequest::AuthorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PullRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PullRequest {
    #[sea_orm(iden = "pull_requests")]
    Table,
    PullRequestId,
    PullRequestName,
    AuthorId,
    TeamName,
    Status,
    CreatedAt,
    MergedAt,
}
