//! Database operations for pull requests.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::pull_request;
use crate::error::{AppError, AppResult};
use crate::models::{PrStatus, PullRequest};

/// Insert a new open pull request.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    name: &str,
    author_id: Uuid,
    team_name: &str,
) -> AppResult<PullRequest> {
    let model = pull_request::ActiveModel {
        pull_request_id: Set(Uuid::now_v7()),
        pull_request_name: Set(name.to_string()),
        author_id: Set(author_id),
        team_name: Set(team_name.to_string()),
        status: Set(PrStatus::Open.as_str().to_string()),
        created_at: Set(Utc::now()),
        merged_at: Set(None),
    };

    let inserted = model.insert(db).await?;
    model_to_pull_request(inserted)
}

/// Find a pull request by ID.
///
/// With `for_update` the row is locked until the surrounding transaction ends
/// (`SELECT ... FOR UPDATE`; a no-op on SQLite, which locks the whole database).
pub async fn find_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    for_update: bool,
) -> AppResult<Option<PullRequest>> {
    let mut query = pull_request::Entity::find_by_id(id);
    if for_update {
        query = query.lock_exclusive();
    }

    query.one(db).await?.map(model_to_pull_request).transpose()
}

/// List pull requests by id, oldest first.
pub async fn list_by_ids<C: ConnectionTrait>(db: &C, ids: &[Uuid]) -> AppResult<Vec<PullRequest>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    pull_request::Entity::find()
        .filter(pull_request::Column::PullRequestId.is_in(ids.iter().copied()))
        .order_by_asc(pull_request::Column::CreatedAt)
        .order_by_asc(pull_request::Column::PullRequestId)
        .all(db)
        .await?
        .into_iter()
        .map(model_to_pull_request)
        .collect()
}

/// Count pull requests authored by a user.
pub async fn count_by_author<C: ConnectionTrait>(db: &C, author_id: Uuid) -> AppResult<u64> {
    let count = pull_request::Entity::find()
        .filter(pull_request::Column::AuthorId.eq(author_id))
        .count(db)
        .await?;

    Ok(count)
}

/// Flip a pull request to MERGED. Returns false when no such pull request exists.
pub async fn set_merged<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    merged_at: DateTime<Utc>,
) -> AppResult<bool> {
    let result = pull_request::Entity::update_many()
        .col_expr(
            pull_request::Column::Status,
            Expr::value(PrStatus::Merged.as_str()),
        )
        .col_expr(pull_request::Column::MergedAt, Expr::value(merged_at))
        .filter(pull_request::Column::PullRequestId.eq(id))
        .filter(pull_request::Column::Status.eq(PrStatus::Open.as_str()))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

fn model_to_pull_request(m: pull_request::Model) -> AppResult<PullRequest> {
    let status = PrStatus::parse(&m.status).ok_or_else(|| {
        AppError::Database(format!(
            "Pull request {} has unknown status '{}'",
            m.pull_request_id, m.status
        ))
    })?;

    Ok(PullRequest {
        pull_request_id: m.pull_request_id,
        pull_request_name: m.pull_request_name,
        author_id: m.author_id,
        team_name: m.team_name,
        status,
        created_at: m.created_at,
        merged_at: m.merged_at,
    })
}
