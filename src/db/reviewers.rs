//! Database operations for reviewer assignments.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::pr_reviewer;
use crate::error::AppResult;

/// Link a reviewer to a pull request.
pub async fn add<C: ConnectionTrait>(db: &C, pull_request_id: Uuid, reviewer_id: Uuid) -> AppResult<()> {
    let model = pr_reviewer::ActiveModel {
        pull_request_id: Set(pull_request_id),
        reviewer_id: Set(reviewer_id),
        assigned_at: Set(Utc::now()),
    };

    pr_reviewer::Entity::insert(model).exec(db).await?;

    Ok(())
}

/// Unlink a reviewer. Returns false when the link did not exist.
pub async fn remove<C: ConnectionTrait>(
    db: &C,
    pull_request_id: Uuid,
    reviewer_id: Uuid,
) -> AppResult<bool> {
    let result = pr_reviewer::Entity::delete_by_id((pull_request_id, reviewer_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Reviewer ids of a pull request in assignment order.
pub async fn list_reviewer_ids<C: ConnectionTrait>(
    db: &C,
    pull_request_id: Uuid,
) -> AppResult<Vec<Uuid>> {
    let rows = pr_reviewer::Entity::find()
        .filter(pr_reviewer::Column::PullRequestId.eq(pull_request_id))
        .order_by_asc(pr_reviewer::Column::AssignedAt)
        .order_by_asc(pr_reviewer::Column::ReviewerId)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|r| r.reviewer_id).collect())
}

/// Ids of the pull requests a user currently reviews.
pub async fn list_pull_request_ids<C: ConnectionTrait>(
    db: &C,
    reviewer_id: Uuid,
) -> AppResult<Vec<Uuid>> {
    let rows = pr_reviewer::Entity::find()
        .filter(pr_reviewer::Column::ReviewerId.eq(reviewer_id))
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|r| r.pull_request_id).collect())
}

/// Count the assignments a user holds.
pub async fn count_for_reviewer<C: ConnectionTrait>(db: &C, reviewer_id: Uuid) -> AppResult<u64> {
    let count = pr_reviewer::Entity::find()
        .filter(pr_reviewer::Column::ReviewerId.eq(reviewer_id))
        .count(db)
        .await?;

    Ok(count)
}
