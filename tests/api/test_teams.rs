//! Team workflow tests.

use pr_reviewer_lib::error::AppError;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_list_teams_ordered_by_name() {
    let (_pool, services) = setup().await;
    let d = services.deadline();

    for name in ["payments", "core", "mobile"] {
        services.teams.create_team(d, name, None).await.unwrap();
    }

    let teams = services.teams.list_teams(d).await.unwrap();
    let names: Vec<&str> = teams.iter().map(|t| t.team_name.as_str()).collect();
    assert_eq!(names, vec!["core", "mobile", "payments"]);
}

#[actix_rt::test]
async fn test_create_team_validation() {
    let (_pool, services) = setup().await;
    let d = services.deadline();

    let team = services
        .teams
        .create_team(d, "core", Some("Core platform"))
        .await
        .unwrap();
    assert_eq!(team.description.as_deref(), Some("Core platform"));

    let dup = services.teams.create_team(d, "core", None).await;
    assert!(matches!(dup, Err(AppError::AlreadyExists(_))));

    let empty = services.teams.create_team(d, "   ", None).await;
    assert!(matches!(empty, Err(AppError::InvalidInput(_))));
}

#[actix_rt::test]
async fn test_delete_unreferenced_team_then_get_is_not_found() {
    let (_pool, services) = setup().await;
    let d = services.deadline();

    services.teams.create_team(d, "empty", None).await.unwrap();
    services.teams.delete_team(d, "empty").await.unwrap();

    let got = services.teams.get_team(d, "empty").await;
    assert!(matches!(got, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn test_delete_team_with_members_is_refused() {
    let (_pool, services) = setup().await;
    let d = services.deadline();
    seed_team(&services, "core", &[("a", true)]).await;

    let result = services.teams.delete_team(d, "core").await;
    assert!(matches!(result, Err(AppError::HasMembers(_))));

    let team = services.teams.get_team(d, "core").await.unwrap();
    assert_eq!(team.team_name, "core");
}

#[actix_rt::test]
async fn test_delete_team_referenced_only_by_pull_request_is_refused() {
    let (_pool, services) = setup().await;
    let d = services.deadline();
    let users = seed_team(&services, "core", &[("a", true)]).await;
    services.teams.create_team(d, "other", None).await.unwrap();

    services
        .pull_requests
        .create(d, "feat", &users[0].user_id.to_string())
        .await
        .unwrap();

    // Move the only member away; the pull request still points at "core".
    services
        .teams
        .attach_member(d, "other", Some(&users[0].user_id.to_string()), "a", true)
        .await
        .unwrap();

    let result = services.teams.delete_team(d, "core").await;
    assert!(matches!(result, Err(AppError::HasMembers(_))));
}

#[actix_rt::test]
async fn test_delete_missing_team() {
    let (_pool, services) = setup().await;

    let result = services
        .teams
        .delete_team(services.deadline(), "ghost")
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn test_attach_member_creates_user() {
    let (_pool, services) = setup().await;
    let d = services.deadline();
    services.teams.create_team(d, "core", None).await.unwrap();

    let user = services
        .teams
        .attach_member(d, "core", None, "alice", true)
        .await
        .unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.display_name, "alice");
    assert_eq!(user.team_name.as_deref(), Some("core"));
    assert!(user.is_active);

    let inactive = services
        .teams
        .attach_member(d, "core", None, "bob", false)
        .await
        .unwrap();
    assert!(!inactive.is_active);

    let stored = services
        .users
        .get_user(d, &inactive.user_id.to_string())
        .await
        .unwrap();
    assert!(!stored.is_active);
}

#[actix_rt::test]
async fn test_attach_inactive_member_with_taken_username_creates_nothing() {
    let (_pool, services) = setup().await;
    let d = services.deadline();
    seed_team(&services, "core", &[("alice", true)]).await;

    let dup = services
        .teams
        .attach_member(d, "core", None, "alice", false)
        .await;
    assert!(matches!(dup, Err(AppError::AlreadyExists(_))));

    let users = services.users.list_users(d).await.unwrap();
    assert_eq!(usernames(&users), vec!["alice"]);
    assert!(users[0].is_active);
}

#[actix_rt::test]
async fn test_team_names_are_trimmed_for_lookup() {
    let (_pool, services) = setup().await;
    let d = services.deadline();

    let team = services.teams.create_team(d, " core ", None).await.unwrap();
    assert_eq!(team.team_name, "core");

    assert_eq!(services.teams.get_team(d, "core").await.unwrap().team_name, "core");
    assert_eq!(services.teams.get_team(d, " core ").await.unwrap().team_name, "core");

    let member = services
        .teams
        .attach_member(d, "  core", None, "alice", true)
        .await
        .unwrap();
    assert_eq!(member.team_name.as_deref(), Some("core"));

    let user = services
        .users
        .create_user(d, "bob", None, Some("core "))
        .await
        .unwrap();
    assert_eq!(user.team_name.as_deref(), Some("core"));

    services.teams.create_team(d, " empty", None).await.unwrap();
    services.teams.delete_team(d, "empty ").await.unwrap();
    let gone = services.teams.get_team(d, "empty").await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn test_attach_member_moves_existing_user() {
    let (_pool, services) = setup().await;
    let d = services.deadline();
    services.teams.create_team(d, "core", None).await.unwrap();
    let user = services
        .users
        .create_user(d, "carol", Some("Carol"), None)
        .await
        .unwrap();

    let moved = services
        .teams
        .attach_member(d, "core", Some(&user.user_id.to_string()), "Caroline", false)
        .await
        .unwrap();
    assert_eq!(moved.user_id, user.user_id);
    assert_eq!(moved.username, "carol");
    assert_eq!(moved.display_name, "Caroline");
    assert_eq!(moved.team_name.as_deref(), Some("core"));
    assert!(!moved.is_active);
}

#[actix_rt::test]
async fn test_attach_member_errors() {
    let (_pool, services) = setup().await;
    let d = services.deadline();

    let no_team = services
        .teams
        .attach_member(d, "ghost", None, "dave", true)
        .await;
    assert!(matches!(no_team, Err(AppError::TeamNotFound(_))));

    services.teams.create_team(d, "core", None).await.unwrap();
    let missing_user = services
        .teams
        .attach_member(d, "core", Some(&uuid::Uuid::now_v7().to_string()), "dave", true)
        .await;
    assert!(matches!(missing_user, Err(AppError::NotFound(_))));
}
