//! User models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User stored in database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub is_active: bool,
    pub team_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a user.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: Option<String>,
    pub team_name: Option<String>,
}

/// Partial update: every field left out keeps its stored value.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub display_name: Option<String>,
    pub is_active: Option<bool>,
    pub team_name: Option<String>,
}
