//! Reviewer selection policy.
//!
//! Walks team members in storage order and takes the first active ones that
//! are not excluded. Deterministic and order-dependent: no randomness, no load
//! awareness. Swapping in round-robin or load-aware selection only touches this
//! function.

use uuid::Uuid;

use crate::models::User;

/// Reviewers auto-assigned to a new pull request.
pub const REVIEWERS_PER_PULL_REQUEST: usize = 2;

/// Pick up to `count` reviewers from `members`.
///
/// Inactive members and members whose id is in `excluded` are skipped. Fewer
/// than `count` results is not an error.
pub fn select_reviewers(members: &[User], excluded: &[Uuid], count: usize) -> Vec<User> {
    members
        .iter()
        .filter(|u| u.is_active && !excluded.contains(&u.user_id))
        .take(count)
        .cloned()
        .collect()
}
