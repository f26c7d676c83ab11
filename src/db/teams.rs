//! Database operations for teams.

use chrono::Utc;
use sea_orm::*;

use super::{is_foreign_key_violation, is_unique_violation};
use crate::entity::{pull_request, team, user};
use crate::error::{AppError, AppResult};
use crate::models::Team;

/// Insert a new team.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    team_name: &str,
    description: Option<&str>,
) -> AppResult<Team> {
    let model = team::ActiveModel {
        team_name: Set(team_name.to_string()),
        description: Set(description.map(|s| s.to_string())),
        created_at: Set(Utc::now()),
    };

    let inserted = model.insert(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::AlreadyExists(format!("Team '{}'", team_name))
        } else {
            e.into()
        }
    })?;

    Ok(model_to_team(inserted))
}

/// Find a team by name.
pub async fn find_by_name<C: ConnectionTrait>(db: &C, team_name: &str) -> AppResult<Option<Team>> {
    let result = team::Entity::find_by_id(team_name.to_string()).one(db).await?;
    Ok(result.map(model_to_team))
}

/// List all teams ordered by name.
pub async fn list<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Team>> {
    let results = team::Entity::find()
        .order_by_asc(team::Column::TeamName)
        .all(db)
        .await?;

    Ok(results.into_iter().map(model_to_team).collect())
}

/// Count users and pull requests that point at a team.
pub async fn count_references<C: ConnectionTrait>(db: &C, team_name: &str) -> AppResult<u64> {
    let users = user::Entity::find()
        .filter(user::Column::TeamName.eq(team_name))
        .count(db)
        .await?;
    let pull_requests = pull_request::Entity::find()
        .filter(pull_request::Column::TeamName.eq(team_name))
        .count(db)
        .await?;

    Ok(users + pull_requests)
}

/// Delete a team. Returns false when no such team exists.
pub async fn delete<C: ConnectionTrait>(db: &C, team_name: &str) -> AppResult<bool> {
    let result = team::Entity::delete_by_id(team_name.to_string())
        .exec(db)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::HasMembers(team_name.to_string())
            } else {
                e.into()
            }
        })?;

    Ok(result.rows_affected > 0)
}

fn model_to_team(m: team::Model) -> Team {
    Team {
        team_name: m.team_name,
        description: m.description,
        created_at: m.created_at,
    }
}
