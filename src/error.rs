//! Domain error types for the reviewer service.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! Every failure a workflow can report is a distinct variant; callers match on the
//! variant, never on the message text.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Uniqueness violation
    #[error("{0} already exists")]
    AlreadyExists(String),

    /// A team name given as input does not resolve to a team
    #[error("Team '{0}' not found")]
    TeamNotFound(String),

    /// Team deletion blocked by users or pull requests referencing it
    #[error("Team '{0}' still has members or pull requests")]
    HasMembers(String),

    /// User deletion blocked by pull requests referencing it
    #[error("User {0} still authors or reviews pull requests")]
    InUse(String),

    /// Reviewer sets are frozen once a pull request is merged
    #[error("Pull request {0} is merged and cannot be modified")]
    CannotModifyMerged(String),

    /// The reviewer to replace is not assigned to the pull request
    #[error("User {reviewer_id} is not a reviewer of pull request {pull_request_id}")]
    ReviewerNotAssigned {
        pull_request_id: String,
        reviewer_id: String,
    },

    /// A reassignment named a pull request that does not exist
    #[error("{0} not found")]
    StaleReference(String),

    /// No active, unassigned teammate can take over the review
    #[error("No available reviewers for pull request {0}")]
    NoAvailableReviewers(String),

    /// A persistence call exceeded its time budget
    #[error("Timed out waiting for the database")]
    Timeout,
}

impl AppError {
    /// Stable machine-readable code used in error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::TeamNotFound(_) => "TEAM_NOT_FOUND",
            AppError::HasMembers(_) => "TEAM_HAS_MEMBERS",
            AppError::InUse(_) => "USER_IN_USE",
            AppError::CannotModifyMerged(_) => "PR_MERGED",
            AppError::ReviewerNotAssigned { .. } => "NOT_ASSIGNED",
            AppError::NoAvailableReviewers(_) => "NO_CANDIDATE",
            AppError::StaleReference(_) => "NOT_FOUND",
            AppError::Timeout => "TIMEOUT",
        }
    }

    /// Reclassify a missing entity that was named in a request body.
    ///
    /// A path that points nowhere is a 404; an id inside a JSON body that points
    /// nowhere is a malformed request.
    pub fn for_body_reference(self) -> Self {
        match self {
            AppError::NotFound(what) => AppError::InvalidInput(format!("{} not found", what)),
            other => other,
        }
    }

    /// Reclassify a missing entity named in a reassignment body.
    ///
    /// Every reassignment failure is a conflict with the current state.
    pub fn for_reassignment(self) -> Self {
        match self {
            AppError::NotFound(what) => AppError::StaleReference(what),
            other => other,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) | AppError::TeamNotFound(_) => StatusCode::BAD_REQUEST,
            AppError::AlreadyExists(_)
            | AppError::HasMembers(_)
            | AppError::InUse(_)
            | AppError::CannotModifyMerged(_)
            | AppError::ReviewerNotAssigned { .. }
            | AppError::NoAvailableReviewers(_)
            | AppError::StaleReference(_) => StatusCode::CONFLICT,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                "An internal database error occurred".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.code().to_string(),
            message,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}
