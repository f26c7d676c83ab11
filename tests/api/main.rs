//! Workflow and HTTP test suite.
//!
//! Runs against in-memory SQLite with migrations applied per test, so no
//! external database is needed.
//!
//! Run with: cargo test --test api


mod test_http;
mod test_teams;
mod test_users;
