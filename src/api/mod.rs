//! API endpoint modules.

pub mod health;
pub mod openapi;
pub mod pull_requests;
pub mod teams;
pub mod users;

use actix_web::{HttpResponse, error::InternalError, web};

use crate::error::{AppError, ErrorResponse};

pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use pull_requests::configure_routes as configure_pull_request_routes;
pub use teams::configure_routes as configure_team_routes;
pub use users::configure_routes as configure_user_routes;

/// Register every route of the service.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_user_routes)
        .configure(configure_team_routes)
        .configure(configure_pull_request_routes);
}

/// JSON extractor settings: malformed bodies answer with the usual error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let app_err = AppError::InvalidInput(err.to_string());
        let response = HttpResponse::BadRequest().json(ErrorResponse {
            error: app_err.code().to_string(),
            message: app_err.to_string(),
        });
        InternalError::from_response(err, response).into()
    })
}
