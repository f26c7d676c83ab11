//! User API handlers.

use actix_web::{HttpResponse, web};

use crate::error::{AppResult, ErrorResponse};
use crate::models::{CreateUserRequest, PullRequest, UpdateUserRequest, User};
use crate::services::Services;

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Empty username or unknown team", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
    )
)]
pub async fn create_user(
    services: web::Data<Services>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = services
        .users
        .create_user(
            services.deadline(),
            &req.username,
            req.display_name.as_deref(),
            req.team_name.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(user))
}

/// List all users in storage order.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
    )
)]
pub async fn list_users(services: web::Data<Services>) -> AppResult<HttpResponse> {
    let users = services.users.list_users(services.deadline()).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    params(
        ("user_id" = String, Path, description = "User UUID")
    ),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn get_user(
    services: web::Data<Services>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = services
        .users
        .get_user(services.deadline(), &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Update a user. Fields left out of the body are unchanged.
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    tag = "Users",
    params(
        ("user_id" = String, Path, description = "User UUID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Unknown team", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn update_user(
    services: web::Data<Services>,
    path: web::Path<String>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    services
        .users
        .update_user(services.deadline(), &path.into_inner(), &body)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a user that has no pull request history.
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "Users",
    params(
        ("user_id" = String, Path, description = "User UUID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "User authors or reviews pull requests", body = ErrorResponse),
    )
)]
pub async fn delete_user(
    services: web::Data<Services>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    services
        .users
        .delete_user(services.deadline(), &path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Pull requests the user currently reviews.
#[utoipa::path(
    get,
    path = "/users/{user_id}/reviews",
    tag = "Users",
    params(
        ("user_id" = String, Path, description = "User UUID")
    ),
    responses(
        (status = 200, description = "Pull requests under review by the user", body = Vec<PullRequest>),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn list_reviews(
    services: web::Data<Services>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let prs = services
        .pull_requests
        .list_by_reviewer(services.deadline(), &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(prs))
}

/// Configure user routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::get().to(list_users))
            .route(web::post().to(create_user)),
    )
    .service(
        web::resource("/users/{user_id}")
            .route(web::get().to(get_user))
            .route(web::put().to(update_user))
            .route(web::delete().to(delete_user)),
    )
    .service(web::resource("/users/{user_id}/reviews").route(web::get().to(list_reviews)));
}
