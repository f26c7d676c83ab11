//! Pull request models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::User;

/// Pull request lifecycle. `Open` moves to `Merged` and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrStatus {
    Open,
    Merged,
}

impl PrStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(Self::Open),
            "MERGED" => Some(Self::Merged),
            _ => None,
        }
    }
}

impl std::fmt::Display for PrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pull request stored in database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PullRequest {
    pub pull_request_id: Uuid,
    pub pull_request_name: String,
    pub author_id: Uuid,
    /// Author's team at creation time; not recomputed afterwards.
    pub team_name: String,
    pub status: PrStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.status == PrStatus::Merged
    }
}

/// A pull request together with its current reviewers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PullRequestWithReviewers {
    pub pr: PullRequest,
    pub reviewers: Vec<User>,
}

/// Request body for opening a pull request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePullRequestRequest {
    pub pull_request_name: String,
    pub author_id: String,
}

/// Request body for swapping one reviewer for another teammate.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReassignReviewerRequest {
    pub pull_request_id: String,
    pub old_reviewer_id: String,
}

/// Request body for merging a pull request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}
