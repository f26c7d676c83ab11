//! Database operations for users.
//!
//! User ids are UUIDv7; ordering by id reproduces insertion order, which is the
//! order reviewer selection walks team members in.

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use super::{is_foreign_key_violation, is_unique_violation};
use crate::entity::user;
use crate::error::{AppError, AppResult};
use crate::models::User;

/// Insert a new user.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    username: &str,
    display_name: &str,
    is_active: bool,
    team_name: Option<&str>,
) -> AppResult<User> {
    let model = user::ActiveModel {
        user_id: Set(Uuid::now_v7()),
        username: Set(username.to_string()),
        display_name: Set(display_name.to_string()),
        is_active: Set(is_active),
        team_name: Set(team_name.map(|s| s.to_string())),
        created_at: Set(Utc::now()),
    };

    let inserted = model.insert(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::AlreadyExists(format!("User '{}'", username))
        } else if is_foreign_key_violation(&e) {
            AppError::TeamNotFound(team_name.unwrap_or_default().to_string())
        } else {
            e.into()
        }
    })?;

    Ok(model_to_user(inserted))
}

/// Find a user by ID.
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<User>> {
    let result = user::Entity::find_by_id(id).one(db).await?;
    Ok(result.map(model_to_user))
}

/// Find a user by username.
pub async fn find_by_username<C: ConnectionTrait>(
    db: &C,
    username: &str,
) -> AppResult<Option<User>> {
    let result = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;

    Ok(result.map(model_to_user))
}

/// List all users in storage order.
pub async fn list<C: ConnectionTrait>(db: &C) -> AppResult<Vec<User>> {
    let results = user::Entity::find()
        .order_by_asc(user::Column::UserId)
        .all(db)
        .await?;

    Ok(results.into_iter().map(model_to_user).collect())
}

/// List the members of a team in storage order.
pub async fn list_by_team<C: ConnectionTrait>(db: &C, team_name: &str) -> AppResult<Vec<User>> {
    let results = user::Entity::find()
        .filter(user::Column::TeamName.eq(team_name))
        .order_by_asc(user::Column::UserId)
        .all(db)
        .await?;

    Ok(results.into_iter().map(model_to_user).collect())
}

/// Load users by id, returned in the order of `ids`. Unknown ids are skipped.
pub async fn find_many<C: ConnectionTrait>(db: &C, ids: &[Uuid]) -> AppResult<Vec<User>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut found: Vec<User> = user::Entity::find()
        .filter(user::Column::UserId.is_in(ids.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(model_to_user)
        .collect();

    found.sort_by_key(|u| ids.iter().position(|id| *id == u.user_id));
    Ok(found)
}

/// Update a user. Fields passed as `None` keep their stored value.
///
/// Returns the updated user, or `None` when the id does not exist.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    display_name: Option<&str>,
    is_active: Option<bool>,
    team_name: Option<&str>,
) -> AppResult<Option<User>> {
    let Some(m) = user::Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    if display_name.is_none() && is_active.is_none() && team_name.is_none() {
        return Ok(Some(model_to_user(m)));
    }

    let mut active: user::ActiveModel = m.into();
    if let Some(d) = display_name {
        active.display_name = Set(d.to_string());
    }
    if let Some(a) = is_active {
        active.is_active = Set(a);
    }
    if let Some(t) = team_name {
        active.team_name = Set(Some(t.to_string()));
    }

    let updated = active.update(db).await.map_err(|e| {
        if is_foreign_key_violation(&e) {
            AppError::TeamNotFound(team_name.unwrap_or_default().to_string())
        } else {
            e.into()
        }
    })?;

    Ok(Some(model_to_user(updated)))
}

/// Delete a user. Returns false when no such user exists.
pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<bool> {
    let result = user::Entity::delete_by_id(id).exec(db).await.map_err(|e| {
        if is_foreign_key_violation(&e) {
            AppError::InUse(id.to_string())
        } else {
            e.into()
        }
    })?;

    Ok(result.rows_affected > 0)
}

fn model_to_user(m: user::Model) -> User {
    User {
        user_id: m.user_id,
        username: m.username,
        display_name: m.display_name,
        is_active: m.is_active,
        team_name: m.team_name,
        created_at: m.created_at,
    }
}
