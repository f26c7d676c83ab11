//! SeaORM entity definitions.

pub mod pr_reviewer;
pub mod pull_request;
pub mod team;
pub mod user;
