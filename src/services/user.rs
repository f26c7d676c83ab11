//! User workflow: CRUD and team membership.

use tracing::{info, instrument};

use crate::db::{self, Deadline, Store};
use crate::error::{AppError, AppResult};
use crate::models::{UpdateUserRequest, User};

#[derive(Clone)]
pub struct UserService {
    store: Store,
}

impl UserService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create an active user, optionally inside a team.
    ///
    /// The display name falls back to the username.
    #[instrument(name = "users.create_user", skip(self, deadline, display_name))]
    pub async fn create_user(
        &self,
        deadline: Deadline,
        username: &str,
        display_name: Option<&str>,
        team_name: Option<&str>,
    ) -> AppResult<User> {
        self.create(deadline, username, display_name, team_name, true)
            .await
    }

    /// Single-insert create used by both the user routes and team attachment.
    pub(super) async fn create(
        &self,
        deadline: Deadline,
        username: &str,
        display_name: Option<&str>,
        team_name: Option<&str>,
        is_active: bool,
    ) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::InvalidInput("username is required".to_string()));
        }
        let team_name = team_name.map(str::trim);
        let conn = self.store.connection();

        if let Some(team) = team_name {
            self.require_team(deadline, team).await?;
        }

        if self
            .store
            .call(deadline, db::users::find_by_username(conn, username))
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!("User '{}'", username)));
        }

        let display_name = display_name
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(username);
        let user = self
            .store
            .call(
                deadline,
                db::users::insert(conn, username, display_name, is_active, team_name),
            )
            .await?;

        info!(user_id = %user.user_id, is_active, "User created");
        Ok(user)
    }

    pub async fn get_user(&self, deadline: Deadline, id: &str) -> AppResult<User> {
        let uuid = db::parse_id(id).ok_or_else(|| user_not_found(id))?;
        self.store
            .call(deadline, db::users::find_by_id(self.store.connection(), uuid))
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    pub async fn list_users(&self, deadline: Deadline) -> AppResult<Vec<User>> {
        self.store
            .call(deadline, db::users::list(self.store.connection()))
            .await
    }

    /// Partial update. Omitted fields keep their stored value.
    ///
    /// A display name that is blank after trimming is rejected.
    #[instrument(name = "users.update_user", skip(self, deadline, changes))]
    pub async fn update_user(
        &self,
        deadline: Deadline,
        id: &str,
        changes: &UpdateUserRequest,
    ) -> AppResult<User> {
        let uuid = db::parse_id(id).ok_or_else(|| user_not_found(id))?;

        let display_name = changes.display_name.as_deref().map(str::trim);
        if display_name.is_some_and(str::is_empty) {
            return Err(AppError::InvalidInput(
                "display_name must not be empty".to_string(),
            ));
        }
        let team_name = changes.team_name.as_deref().map(str::trim);
        if let Some(team) = team_name {
            self.require_team(deadline, team).await?;
        }

        let updated = self
            .store
            .call(
                deadline,
                db::users::update(
                    self.store.connection(),
                    uuid,
                    display_name,
                    changes.is_active,
                    team_name,
                ),
            )
            .await?
            .ok_or_else(|| user_not_found(id))?;

        info!(user_id = %updated.user_id, is_active = updated.is_active, "User updated");
        Ok(updated)
    }

    /// Remove a user that neither authors nor reviews any pull request.
    ///
    /// Users with history are deactivated instead; deleting them is refused.
    #[instrument(name = "users.delete_user", skip(self, deadline))]
    pub async fn delete_user(&self, deadline: Deadline, id: &str) -> AppResult<()> {
        let user = self.get_user(deadline, id).await?;
        let conn = self.store.connection();

        let authored = self
            .store
            .call(deadline, db::pull_requests::count_by_author(conn, user.user_id))
            .await?;
        let reviewing = self
            .store
            .call(deadline, db::reviewers::count_for_reviewer(conn, user.user_id))
            .await?;
        if authored + reviewing > 0 {
            return Err(AppError::InUse(user.user_id.to_string()));
        }

        let deleted = self
            .store
            .call(deadline, db::users::delete(conn, user.user_id))
            .await?;
        if !deleted {
            return Err(user_not_found(id));
        }

        info!(user_id = %user.user_id, "User deleted");
        Ok(())
    }

    async fn require_team(&self, deadline: Deadline, team_name: &str) -> AppResult<()> {
        self.store
            .call(
                deadline,
                db::teams::find_by_name(self.store.connection(), team_name),
            )
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::TeamNotFound(team_name.to_string()))
    }
}

fn user_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("User {}", id))
}
