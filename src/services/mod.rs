//! Business logic services.

pub mod pull_request;
pub mod selection;
pub mod team;
pub mod user;

use std::time::Duration;

pub use pull_request::PullRequestService;
pub use selection::{REVIEWERS_PER_PULL_REQUEST, select_reviewers};
pub use team::TeamService;
pub use user::UserService;

use crate::config::Config;
use crate::db::{DbPool, Deadline, Store};

/// The workflows, wired to one shared store.
///
/// Registered once as application data; handlers take a [`Deadline`] from
/// [`Services::deadline`] and pass it into every workflow call.
#[derive(Clone)]
pub struct Services {
    pub teams: TeamService,
    pub users: UserService,
    pub pull_requests: PullRequestService,
    request_timeout: Duration,
}

impl Services {
    pub fn new(pool: DbPool, config: &Config) -> Self {
        let store = Store::new(
            pool,
            config.database.query_timeout,
            config.write_mode,
        );
        let users = UserService::new(store.clone());

        Self {
            teams: TeamService::new(store.clone(), users.clone()),
            users,
            pull_requests: PullRequestService::new(store),
            request_timeout: config.request_timeout,
        }
    }

    /// Deadline for a workflow call starting now.
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.request_timeout)
    }
}
