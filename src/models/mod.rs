//! Domain models for the reviewer service.

pub mod pull_request;
pub mod team;
pub mod user;

// Re-export commonly used types
pub use pull_request::{
    CreatePullRequestRequest, MergePullRequestRequest, PrStatus, PullRequest,
    PullRequestWithReviewers, ReassignReviewerRequest,
};
pub use team::{AttachMemberRequest, CreateTeamRequest, Team};
pub use user::{CreateUserRequest, UpdateUserRequest, User};
