//! User workflow tests.

use pr_reviewer_lib::error::AppError;
use pr_reviewer_lib::models::UpdateUserRequest;
use uuid::Uuid;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_user_defaults() {
    let (_pool, services) = setup().await;

    let user = services
        .users
        .create_user(services.deadline(), "  alice ", None, None)
        .await
        .unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.display_name, "alice");
    assert!(user.is_active);
    assert_eq!(user.team_name, None);

    let fetched = services
        .users
        .get_user(services.deadline(), &user.user_id.to_string())
        .await
        .unwrap();
    assert_eq!(fetched, user);
}

#[actix_rt::test]
async fn test_create_user_errors() {
    let (_pool, services) = setup().await;
    let d = services.deadline();

    let empty = services.users.create_user(d, "", None, None).await;
    assert!(matches!(empty, Err(AppError::InvalidInput(_))));

    let no_team = services
        .users
        .create_user(d, "bob", None, Some("ghost"))
        .await;
    assert!(matches!(no_team, Err(AppError::TeamNotFound(_))));

    services.users.create_user(d, "bob", None, None).await.unwrap();
    let dup = services.users.create_user(d, "bob", None, None).await;
    assert!(matches!(dup, Err(AppError::AlreadyExists(_))));
}

#[actix_rt::test]
async fn test_list_users_in_creation_order() {
    let (_pool, services) = setup().await;
    let d = services.deadline();

    for name in ["zed", "amy", "kim"] {
        services.users.create_user(d, name, None, None).await.unwrap();
    }

    let users = services.users.list_users(d).await.unwrap();
    assert_eq!(usernames(&users), vec!["zed", "amy", "kim"]);
}

#[actix_rt::test]
async fn test_update_display_name_only_leaves_other_fields() {
    let (_pool, services) = setup().await;
    let d = services.deadline();
    let users = seed_team(&services, "core", &[("a", true)]).await;
    let id = users[0].user_id.to_string();

    let changes = UpdateUserRequest {
        display_name: Some("Alice A.".to_string()),
        ..Default::default()
    };
    let updated = services.users.update_user(d, &id, &changes).await.unwrap();

    assert_eq!(updated.display_name, "Alice A.");
    assert_eq!(updated.username, users[0].username);
    assert_eq!(updated.is_active, users[0].is_active);
    assert_eq!(updated.team_name, users[0].team_name);
    assert_eq!(updated.created_at, users[0].created_at);
}

#[actix_rt::test]
async fn test_update_display_name_is_trimmed_and_must_not_be_blank() {
    let (_pool, services) = setup().await;
    let d = services.deadline();
    let user = services.users.create_user(d, "a", Some("Alice"), None).await.unwrap();
    let id = user.user_id.to_string();

    let changes = UpdateUserRequest {
        display_name: Some("  Alice B. ".to_string()),
        ..Default::default()
    };
    let updated = services.users.update_user(d, &id, &changes).await.unwrap();
    assert_eq!(updated.display_name, "Alice B.");

    for blank in ["", "   "] {
        let changes = UpdateUserRequest {
            display_name: Some(blank.to_string()),
            is_active: Some(false),
            ..Default::default()
        };
        let result = services.users.update_user(d, &id, &changes).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    let stored = services.users.get_user(d, &id).await.unwrap();
    assert_eq!(stored.display_name, "Alice B.");
    assert!(stored.is_active);
}

#[actix_rt::test]
async fn test_update_user_errors() {
    let (_pool, services) = setup().await;
    let d = services.deadline();
    let user = services.users.create_user(d, "a", None, None).await.unwrap();

    let missing = services
        .users
        .update_user(d, &Uuid::now_v7().to_string(), &UpdateUserRequest::default())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let garbage = services
        .users
        .update_user(d, "not-a-uuid", &UpdateUserRequest::default())
        .await;
    assert!(matches!(garbage, Err(AppError::NotFound(_))));

    let changes = UpdateUserRequest {
        team_name: Some("ghost".to_string()),
        ..Default::default()
    };
    let no_team = services
        .users
        .update_user(d, &user.user_id.to_string(), &changes)
        .await;
    assert!(matches!(no_team, Err(AppError::TeamNotFound(_))));
}

#[actix_rt::test]
async fn test_delete_user_without_history() {
    let (_pool, services) = setup().await;
    let d = services.deadline();
    let user = services.users.create_user(d, "a", None, None).await.unwrap();
    let id = user.user_id.to_string();

    services.users.delete_user(d, &id).await.unwrap();

    let got = services.users.get_user(d, &id).await;
    assert!(matches!(got, Err(AppError::NotFound(_))));

    let again = services.users.delete_user(d, &id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn test_delete_user_with_pull_requests_is_refused() {
    let (_pool, services) = setup().await;
    let d = services.deadline();
    let users = seed_team(&services, "core", &[("a", true), ("b", true)]).await;

    services
        .pull_requests
        .create(d, "feat", &users[0].user_id.to_string())
        .await
        .unwrap();

    let author = services
        .users
        .delete_user(d, &users[0].user_id.to_string())
        .await;
    assert!(matches!(author, Err(AppError::InUse(_))));

    let reviewer = services
        .users
        .delete_user(d, &users[1].user_id.to_string())
        .await;
    assert!(matches!(reviewer, Err(AppError::InUse(_))));
}
