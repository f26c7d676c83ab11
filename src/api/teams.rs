//! Team API handlers.

use actix_web::{HttpResponse, web};

use crate::error::{AppError, AppResult, ErrorResponse};
use crate::models::{AttachMemberRequest, CreateTeamRequest, Team, User};
use crate::services::Services;

/// Create a team.
#[utoipa::path(
    post,
    path = "/teams",
    tag = "Teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Empty team name", body = ErrorResponse),
        (status = 409, description = "Team already exists", body = ErrorResponse),
    )
)]
pub async fn create_team(
    services: web::Data<Services>,
    body: web::Json<CreateTeamRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let team = services
        .teams
        .create_team(services.deadline(), &req.team_name, req.description.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(team))
}

/// List teams ordered by name.
#[utoipa::path(
    get,
    path = "/teams",
    tag = "Teams",
    responses(
        (status = 200, description = "All teams", body = Vec<Team>),
    )
)]
pub async fn list_teams(services: web::Data<Services>) -> AppResult<HttpResponse> {
    let teams = services.teams.list_teams(services.deadline()).await?;
    Ok(HttpResponse::Ok().json(teams))
}

#[utoipa::path(
    get,
    path = "/teams/{team_name}",
    tag = "Teams",
    params(
        ("team_name" = String, Path, description = "Team name")
    ),
    responses(
        (status = 200, description = "Team", body = Team),
        (status = 404, description = "Team not found", body = ErrorResponse),
    )
)]
pub async fn get_team(
    services: web::Data<Services>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let team = services
        .teams
        .get_team(services.deadline(), &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(team))
}

/// Delete a team. Refused while users or pull requests reference it.
#[utoipa::path(
    delete,
    path = "/teams/{team_name}",
    tag = "Teams",
    params(
        ("team_name" = String, Path, description = "Team name")
    ),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 404, description = "Team not found", body = ErrorResponse),
        (status = 409, description = "Team still has members or pull requests", body = ErrorResponse),
    )
)]
pub async fn delete_team(
    services: web::Data<Services>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    services
        .teams
        .delete_team(services.deadline(), &path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Add a new or existing user to a team.
#[utoipa::path(
    post,
    path = "/teams/{team_name}/members",
    tag = "Teams",
    params(
        ("team_name" = String, Path, description = "Team name")
    ),
    request_body = AttachMemberRequest,
    responses(
        (status = 200, description = "Member attached", body = User),
        (status = 400, description = "Unknown team, unknown user or empty username", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
    )
)]
pub async fn attach_member(
    services: web::Data<Services>,
    path: web::Path<String>,
    body: web::Json<AttachMemberRequest>,
) -> AppResult<HttpResponse> {
    let team_name = path.into_inner();
    let req = body.into_inner();
    let user = services
        .teams
        .attach_member(
            services.deadline(),
            &team_name,
            req.user_id.as_deref(),
            &req.username,
            req.is_active,
        )
        .await
        .map_err(AppError::for_body_reference)?;

    Ok(HttpResponse::Ok().json(user))
}

/// Configure team routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/teams")
            .route(web::get().to(list_teams))
            .route(web::post().to(create_team)),
    )
    .service(
        web::resource("/teams/{team_name}")
            .route(web::get().to(get_team))
            .route(web::delete().to(delete_team)),
    )
    .service(web::resource("/teams/{team_name}/members").route(web::post().to(attach_member)));
}
