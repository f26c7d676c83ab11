//! Team models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Team stored in database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Team {
    pub team_name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a team.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTeamRequest {
    pub team_name: String,
    pub description: Option<String>,
}

/// Request body for attaching a member to a team.
///
/// Without `user_id` a new user named `username` is created in the team.
/// With `user_id` the existing user is moved into the team, renamed and
/// (de)activated.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachMemberRequest {
    pub user_id: Option<String>,
    pub username: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
