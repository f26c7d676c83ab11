//! Create pr_reviewers table.
//!
//! One row per (pull request, reviewer). Rows go away with their pull request;
//! a user who still reviews something cannot be deleted.

use sea_orm_migration::prelude::*;

use super::m20251020_000002_create_users::User;
use super::m20251020_000003_create_pull_requests::PullRequest;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PrReviewer::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PrReviewer::PullRequestId).uuid().not_null())
                    .col(ColumnDef::new(PrReviewer::ReviewerId).uuid().not_null())
                    .col(
                        ColumnDef::new(PrReviewer::AssignedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(PrReviewer::PullRequestId)
                            .col(PrReviewer::ReviewerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pr_reviewers_pull_request_id")
                            .from(PrReviewer::Table, PrReviewer::PullRequestId)
                            .to(PullRequest::Table, PullRequest::PullRequestId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pr_reviewers_reviewer_id")
                            .from(PrReviewer::Table, PrReviewer::ReviewerId)
                            .to(User::Table, User::UserId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_pr_reviewers_reviewer_id")
                    .table(PrReviewer::Table)
                    .col(PrReviewer::ReviewerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PrReviewer::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PrReviewer {
    #[sea_orm(iden = "pr_reviewers")]
    Table,
    PullRequestId,
    ReviewerId,
    AssignedAt,
}
