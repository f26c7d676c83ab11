//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PR Reviewer Assignment Service",
        version = "0.1.0",
        description = "Teams, users and pull requests with automatic reviewer assignment from the author's team"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // User endpoints
        api::users::create_user,
        api::users::list_users,
        api::users::get_user,
        api::users::update_user,
        api::users::delete_user,
        api::users::list_reviews,
        // Team endpoints
        api::teams::create_team,
        api::teams::list_teams,
        api::teams::get_team,
        api::teams::delete_team,
        api::teams::attach_member,
        // Pull request endpoints
        api::pull_requests::create_pull_request,
        api::pull_requests::get_pull_request,
        api::pull_requests::reassign_reviewer,
        api::pull_requests::merge_pull_request,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Users
            models::User,
            models::CreateUserRequest,
            models::UpdateUserRequest,
            // Teams
            models::Team,
            models::CreateTeamRequest,
            models::AttachMemberRequest,
            // Pull requests
            models::PrStatus,
            models::PullRequest,
            models::PullRequestWithReviewers,
            models::CreatePullRequestRequest,
            models::ReassignReviewerRequest,
            models::MergePullRequestRequest,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Users", description = "User management and review lists"),
        (name = "Teams", description = "Team management and membership"),
        (name = "Pull Requests", description = "Pull request lifecycle and reviewer assignment")
    )
)]
pub struct ApiDoc;
