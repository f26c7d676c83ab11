//! Team workflow: CRUD, delete guard, and member attachment.
//!
//! Team names are trimmed on the way in, for lookups as well as creation.

use tracing::{info, instrument};

use super::UserService;
use crate::db::{self, Deadline, Store};
use crate::error::{AppError, AppResult};
use crate::models::{Team, UpdateUserRequest, User};

#[derive(Clone)]
pub struct TeamService {
    store: Store,
    users: UserService,
}

impl TeamService {
    pub fn new(store: Store, users: UserService) -> Self {
        Self { store, users }
    }

    #[instrument(name = "teams.create_team", skip(self, deadline, description))]
    pub async fn create_team(
        &self,
        deadline: Deadline,
        team_name: &str,
        description: Option<&str>,
    ) -> AppResult<Team> {
        let team_name = team_name.trim();
        if team_name.is_empty() {
            return Err(AppError::InvalidInput("team_name is required".to_string()));
        }
        let conn = self.store.connection();

        if self
            .store
            .call(deadline, db::teams::find_by_name(conn, team_name))
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!("Team '{}'", team_name)));
        }

        let team = self
            .store
            .call(deadline, db::teams::insert(conn, team_name, description))
            .await?;

        info!(team = %team.team_name, "Team created");
        Ok(team)
    }

    pub async fn get_team(&self, deadline: Deadline, team_name: &str) -> AppResult<Team> {
        let team_name = team_name.trim();
        self.store
            .call(
                deadline,
                db::teams::find_by_name(self.store.connection(), team_name),
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team '{}'", team_name)))
    }

    /// All teams ordered by name.
    pub async fn list_teams(&self, deadline: Deadline) -> AppResult<Vec<Team>> {
        self.store
            .call(deadline, db::teams::list(self.store.connection()))
            .await
    }

    /// Delete a team nobody references.
    ///
    /// The reference check and the delete share one transaction; a foreign-key
    /// violation from a concurrent insert still surfaces as `HasMembers`.
    #[instrument(name = "teams.delete_team", skip(self, deadline))]
    pub async fn delete_team(&self, deadline: Deadline, team_name: &str) -> AppResult<()> {
        let team_name = team_name.trim();
        let txn = self.store.begin(deadline).await?;

        if self
            .store
            .call(deadline, db::teams::find_by_name(&txn, team_name))
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!("Team '{}'", team_name)));
        }

        let references = self
            .store
            .call(deadline, db::teams::count_references(&txn, team_name))
            .await?;
        if references > 0 {
            info!(team = %team_name, references, "Team still referenced");
            return Err(AppError::HasMembers(team_name.to_string()));
        }

        self.store
            .call(deadline, db::teams::delete(&txn, team_name))
            .await?;
        self.store.commit(deadline, txn).await?;

        info!(team = %team_name, "Team deleted");
        Ok(())
    }

    /// Put a user into a team.
    ///
    /// Without `user_id` a new user called `username` is created in the team.
    /// With `user_id` that user is renamed to `username`, (de)activated and
    /// moved into the team.
    #[instrument(name = "teams.attach_member", skip(self, deadline))]
    pub async fn attach_member(
        &self,
        deadline: Deadline,
        team_name: &str,
        user_id: Option<&str>,
        username: &str,
        is_active: bool,
    ) -> AppResult<User> {
        let team_name = team_name.trim();
        if self
            .store
            .call(
                deadline,
                db::teams::find_by_name(self.store.connection(), team_name),
            )
            .await?
            .is_none()
        {
            return Err(AppError::TeamNotFound(team_name.to_string()));
        }

        match user_id {
            None => {
                self.users
                    .create(deadline, username, Some(username), Some(team_name), is_active)
                    .await
            }
            Some(id) => {
                let username = username.trim();
                if username.is_empty() {
                    return Err(AppError::InvalidInput("username is required".to_string()));
                }
                let changes = UpdateUserRequest {
                    display_name: Some(username.to_string()),
                    is_active: Some(is_active),
                    team_name: Some(team_name.to_string()),
                };
                self.users.update_user(deadline, id, &changes).await
            }
        }
    }
}
