//! Pull-request workflow: open with auto-assigned reviewers, reassign, merge.
//!
//! Multi-step writes run inside one transaction in [`WriteMode::Transactional`]
//! and step by step on the pool in [`WriteMode::BestEffort`]. The steps
//! themselves are shared: each `*_in` helper is generic over the connection.

use chrono::Utc;
use sea_orm::ConnectionTrait;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::selection::{REVIEWERS_PER_PULL_REQUEST, select_reviewers};
use crate::config::WriteMode;
use crate::db::{self, Deadline, Store};
use crate::error::{AppError, AppResult};
use crate::models::{PullRequest, PullRequestWithReviewers, User};

#[derive(Clone)]
pub struct PullRequestService {
    store: Store,
}

impl PullRequestService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Open a pull request and assign up to two active teammates of the author.
    ///
    /// Returns only the reviewers that were actually stored, in selection order.
    #[instrument(name = "pull_requests.create", skip(self, deadline))]
    pub async fn create(
        &self,
        deadline: Deadline,
        name: &str,
        author_id: &str,
    ) -> AppResult<PullRequestWithReviewers> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "pull_request_name is required".to_string(),
            ));
        }

        let conn = self.store.connection();
        let author_uuid = db::parse_id(author_id).ok_or_else(|| user_not_found(author_id))?;
        let author = self
            .store
            .call(deadline, db::users::find_by_id(conn, author_uuid))
            .await?
            .ok_or_else(|| user_not_found(author_id))?;
        let Some(team_name) = author.team_name.clone() else {
            return Err(AppError::InvalidInput("author has no team".to_string()));
        };

        let members = self
            .store
            .call(deadline, db::users::list_by_team(conn, &team_name))
            .await?;
        let selected = select_reviewers(&members, &[author.user_id], REVIEWERS_PER_PULL_REQUEST);

        let created = match self.store.write_mode() {
            WriteMode::Transactional => {
                let txn = self.store.begin(deadline).await?;
                let created = self
                    .create_in(&txn, deadline, name, &author, &team_name, selected, false)
                    .await?;
                self.store.commit(deadline, txn).await?;
                created
            }
            WriteMode::BestEffort => {
                self.create_in(conn, deadline, name, &author, &team_name, selected, true)
                    .await?
            }
        };

        info!(
            pull_request_id = %created.pr.pull_request_id,
            team = %team_name,
            reviewers = created.reviewers.len(),
            "Pull request created"
        );
        Ok(created)
    }

    #[allow(clippy::too_many_arguments)]
    async fn create_in<C: ConnectionTrait>(
        &self,
        db: &C,
        deadline: Deadline,
        name: &str,
        author: &User,
        team_name: &str,
        selected: Vec<User>,
        best_effort: bool,
    ) -> AppResult<PullRequestWithReviewers> {
        let pr = self
            .store
            .call(
                deadline,
                db::pull_requests::insert(db, name, author.user_id, team_name),
            )
            .await?;

        let mut reviewers = Vec::with_capacity(selected.len());
        for reviewer in selected {
            let added = self
                .store
                .call(
                    deadline,
                    db::reviewers::add(db, pr.pull_request_id, reviewer.user_id),
                )
                .await;
            match added {
                Ok(()) => reviewers.push(reviewer),
                Err(e) if best_effort => {
                    warn!(
                        pull_request_id = %pr.pull_request_id,
                        reviewer_id = %reviewer.user_id,
                        error = %e,
                        "Failed to assign reviewer, continuing"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(PullRequestWithReviewers { pr, reviewers })
    }

    /// Fetch a pull request with its reviewers in assignment order.
    pub async fn get(&self, deadline: Deadline, id: &str) -> AppResult<PullRequestWithReviewers> {
        let uuid = db::parse_id(id).ok_or_else(|| pull_request_not_found(id))?;
        let conn = self.store.connection();

        let pr = self
            .store
            .call(deadline, db::pull_requests::find_by_id(conn, uuid, false))
            .await?
            .ok_or_else(|| pull_request_not_found(id))?;
        let reviewers = self.reviewers_of(conn, deadline, uuid).await?;

        Ok(PullRequestWithReviewers { pr, reviewers })
    }

    /// Mark a pull request merged. Merging twice returns the stored state unchanged.
    #[instrument(name = "pull_requests.merge", skip(self, deadline))]
    pub async fn merge(&self, deadline: Deadline, id: &str) -> AppResult<PullRequest> {
        let uuid = db::parse_id(id).ok_or_else(|| pull_request_not_found(id))?;

        match self.store.write_mode() {
            WriteMode::Transactional => {
                let txn = self.store.begin(deadline).await?;
                let pr = self.merge_in(&txn, deadline, uuid, id, true).await?;
                self.store.commit(deadline, txn).await?;
                Ok(pr)
            }
            WriteMode::BestEffort => {
                self.merge_in(self.store.connection(), deadline, uuid, id, false)
                    .await
            }
        }
    }

    async fn merge_in<C: ConnectionTrait>(
        &self,
        db: &C,
        deadline: Deadline,
        uuid: Uuid,
        id: &str,
        lock: bool,
    ) -> AppResult<PullRequest> {
        let pr = self
            .store
            .call(deadline, db::pull_requests::find_by_id(db, uuid, lock))
            .await?
            .ok_or_else(|| pull_request_not_found(id))?;
        if pr.is_merged() {
            return Ok(pr);
        }

        let flipped = self
            .store
            .call(
                deadline,
                db::pull_requests::set_merged(db, uuid, Utc::now()),
            )
            .await?;
        if flipped {
            info!(pull_request_id = %uuid, "Pull request merged");
        }

        self.store
            .call(deadline, db::pull_requests::find_by_id(db, uuid, false))
            .await?
            .ok_or_else(|| pull_request_not_found(id))
    }

    /// Replace one reviewer with the first free active teammate.
    ///
    /// The author, the outgoing reviewer and everyone already assigned are not
    /// candidates.
    #[instrument(name = "pull_requests.reassign", skip(self, deadline))]
    pub async fn reassign(
        &self,
        deadline: Deadline,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> AppResult<User> {
        let uuid = db::parse_id(pull_request_id)
            .ok_or_else(|| pull_request_not_found(pull_request_id))?;

        let replacement = match self.store.write_mode() {
            WriteMode::Transactional => {
                let txn = self.store.begin(deadline).await?;
                let user = self
                    .reassign_in(&txn, deadline, uuid, pull_request_id, old_reviewer_id, true)
                    .await?;
                self.store.commit(deadline, txn).await?;
                user
            }
            WriteMode::BestEffort => {
                self.reassign_in(
                    self.store.connection(),
                    deadline,
                    uuid,
                    pull_request_id,
                    old_reviewer_id,
                    false,
                )
                .await?
            }
        };

        info!(
            pull_request_id = %uuid,
            old_reviewer_id = %old_reviewer_id,
            new_reviewer_id = %replacement.user_id,
            "Reviewer reassigned"
        );
        Ok(replacement)
    }

    async fn reassign_in<C: ConnectionTrait>(
        &self,
        db: &C,
        deadline: Deadline,
        uuid: Uuid,
        pull_request_id: &str,
        old_reviewer_id: &str,
        lock: bool,
    ) -> AppResult<User> {
        let pr = self
            .store
            .call(deadline, db::pull_requests::find_by_id(db, uuid, lock))
            .await?
            .ok_or_else(|| pull_request_not_found(pull_request_id))?;
        if pr.is_merged() {
            return Err(AppError::CannotModifyMerged(pull_request_id.to_string()));
        }

        let not_assigned = || AppError::ReviewerNotAssigned {
            pull_request_id: pull_request_id.to_string(),
            reviewer_id: old_reviewer_id.to_string(),
        };

        let current = self
            .store
            .call(deadline, db::reviewers::list_reviewer_ids(db, uuid))
            .await?;
        let old_id = db::parse_id(old_reviewer_id)
            .filter(|id| current.contains(id))
            .ok_or_else(not_assigned)?;

        let members = self
            .store
            .call(deadline, db::users::list_by_team(db, &pr.team_name))
            .await?;
        let mut excluded = current;
        excluded.push(pr.author_id);

        let Some(replacement) = select_reviewers(&members, &excluded, 1).into_iter().next()
        else {
            return Err(AppError::NoAvailableReviewers(pull_request_id.to_string()));
        };

        let removed = self
            .store
            .call(deadline, db::reviewers::remove(db, uuid, old_id))
            .await?;
        if !removed {
            return Err(not_assigned());
        }

        if let Err(e) = self
            .store
            .call(
                deadline,
                db::reviewers::add(db, uuid, replacement.user_id),
            )
            .await
        {
            if !lock {
                warn!(
                    pull_request_id = %uuid,
                    old_reviewer_id = %old_id,
                    error = %e,
                    "Old reviewer removed but replacement not stored"
                );
            }
            return Err(e);
        }

        Ok(replacement)
    }

    /// Pull requests a user currently reviews, oldest first, any status.
    pub async fn list_by_reviewer(
        &self,
        deadline: Deadline,
        reviewer_id: &str,
    ) -> AppResult<Vec<PullRequest>> {
        let uuid = db::parse_id(reviewer_id).ok_or_else(|| user_not_found(reviewer_id))?;
        let conn = self.store.connection();

        self.store
            .call(deadline, db::users::find_by_id(conn, uuid))
            .await?
            .ok_or_else(|| user_not_found(reviewer_id))?;

        let ids = self
            .store
            .call(deadline, db::reviewers::list_pull_request_ids(conn, uuid))
            .await?;
        self.store
            .call(deadline, db::pull_requests::list_by_ids(conn, &ids))
            .await
    }

    async fn reviewers_of<C: ConnectionTrait>(
        &self,
        db: &C,
        deadline: Deadline,
        pull_request_id: Uuid,
    ) -> AppResult<Vec<User>> {
        let ids = self
            .store
            .call(deadline, db::reviewers::list_reviewer_ids(db, pull_request_id))
            .await?;
        self.store
            .call(deadline, db::users::find_many(db, &ids))
            .await
    }
}

fn user_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("User {}", id))
}

fn pull_request_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Pull request {}", id))
}
