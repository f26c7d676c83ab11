//! Pull request API handlers.
//!
//! Ids that arrive in a request body and point nowhere are reported as 400,
//! ids in the path as 404. Reassignment reports every failure as 409.

use actix_web::{HttpResponse, web};

use crate::error::{AppError, AppResult, ErrorResponse};
use crate::models::{
    CreatePullRequestRequest, MergePullRequestRequest, PullRequest, PullRequestWithReviewers,
    ReassignReviewerRequest, User,
};
use crate::services::Services;

/// Open a pull request and auto-assign reviewers from the author's team.
#[utoipa::path(
    post,
    path = "/pullRequest/create",
    tag = "Pull Requests",
    request_body = CreatePullRequestRequest,
    responses(
        (status = 200, description = "Pull request created", body = PullRequestWithReviewers),
        (status = 400, description = "Empty name, unknown author or author without team", body = ErrorResponse),
    )
)]
pub async fn create_pull_request(
    services: web::Data<Services>,
    body: web::Json<CreatePullRequestRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let created = services
        .pull_requests
        .create(services.deadline(), &req.pull_request_name, &req.author_id)
        .await
        .map_err(AppError::for_body_reference)?;

    Ok(HttpResponse::Ok().json(created))
}

#[utoipa::path(
    get,
    path = "/pullRequest/{pull_request_id}",
    tag = "Pull Requests",
    params(
        ("pull_request_id" = String, Path, description = "Pull request UUID")
    ),
    responses(
        (status = 200, description = "Pull request with current reviewers", body = PullRequestWithReviewers),
        (status = 404, description = "Pull request not found", body = ErrorResponse),
    )
)]
pub async fn get_pull_request(
    services: web::Data<Services>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let pr = services
        .pull_requests
        .get(services.deadline(), &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(pr))
}

/// Swap one reviewer for the next free active teammate.
#[utoipa::path(
    post,
    path = "/pullRequest/reassign",
    tag = "Pull Requests",
    request_body = ReassignReviewerRequest,
    responses(
        (status = 200, description = "The newly assigned reviewer", body = User),
        (status = 409, description = "Unknown or merged pull request, reviewer not assigned, or no candidate", body = ErrorResponse),
    )
)]
pub async fn reassign_reviewer(
    services: web::Data<Services>,
    body: web::Json<ReassignReviewerRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let reviewer = services
        .pull_requests
        .reassign(services.deadline(), &req.pull_request_id, &req.old_reviewer_id)
        .await
        .map_err(AppError::for_reassignment)?;

    Ok(HttpResponse::Ok().json(reviewer))
}

/// Merge a pull request. Merging an already merged pull request is a no-op.
#[utoipa::path(
    post,
    path = "/pullRequest/merge",
    tag = "Pull Requests",
    request_body = MergePullRequestRequest,
    responses(
        (status = 200, description = "Merged pull request", body = PullRequest),
        (status = 400, description = "Unknown pull request", body = ErrorResponse),
    )
)]
pub async fn merge_pull_request(
    services: web::Data<Services>,
    body: web::Json<MergePullRequestRequest>,
) -> AppResult<HttpResponse> {
    let pr = services
        .pull_requests
        .merge(services.deadline(), &body.pull_request_id)
        .await
        .map_err(AppError::for_body_reference)?;

    Ok(HttpResponse::Ok().json(pr))
}

/// Configure pull request routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/pullRequest/create").route(web::post().to(create_pull_request)),
    )
    .service(web::resource("/pullRequest/reassign").route(web::post().to(reassign_reviewer)))
    .service(web::resource("/pullRequest/merge").route(web::post().to(merge_pull_request)))
    .service(
        web::resource("/pullRequest/{pull_request_id}").route(web::get().to(get_pull_request)),
    );
}
