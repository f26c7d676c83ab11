//! HTTP surface: routes, status codes and error bodies.

use actix_web::test;
use serde_json::json;
use uuid::Uuid;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_health_and_ready() {
    let (pool, services) = setup().await;
    let app = create_test_app(&pool, &services).await;

    let (status, body) = send(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, test::TestRequest::get().uri("/ready").to_request()).await;
    assert_eq!(status, 200);
    assert_eq!(body["database"], "connected");
}

#[actix_rt::test]
async fn test_request_id_is_echoed_or_generated() {
    let (pool, services) = setup().await;
    let app = create_test_app(&pool, &services).await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("x-request-id", "abc-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "abc-123");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(Uuid::parse_str(generated).is_ok());
}

#[actix_rt::test]
async fn test_team_routes() {
    let (pool, services) = setup().await;
    let app = create_test_app(&pool, &services).await;

    let req = test::TestRequest::post()
        .uri("/teams")
        .set_json(json!({ "team_name": "core", "description": "Core" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 201);
    assert_eq!(body["team_name"], "core");

    let req = test::TestRequest::post()
        .uri("/teams")
        .set_json(json!({ "team_name": "core" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "ALREADY_EXISTS");

    let req = test::TestRequest::post()
        .uri("/teams/core/members")
        .set_json(json!({ "username": "alice" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["team_name"], "core");
    assert_eq!(body["is_active"], true);

    let req = test::TestRequest::post()
        .uri("/teams/core/members")
        .set_json(json!({ "user_id": Uuid::now_v7(), "username": "ghost" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");

    let req = test::TestRequest::get().uri("/teams/%20core%20").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["team_name"], "core");

    let req = test::TestRequest::post()
        .uri("/teams/ghost/members")
        .set_json(json!({ "username": "bob" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "TEAM_NOT_FOUND");

    let req = test::TestRequest::delete().uri("/teams/core").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "TEAM_HAS_MEMBERS");

    let (status, body) = send(&app, test::TestRequest::get().uri("/teams").to_request()).await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let req = test::TestRequest::get().uri("/teams/ghost").to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_user_routes() {
    let (pool, services) = setup().await;
    let app = create_test_app(&pool, &services).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "username": "alice", "display_name": "Alice" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 201);
    let id = body["user_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", id))
        .set_json(json!({ "is_active": false }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 204);
    assert!(body.is_null());

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", id))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["display_name"], "Alice");
    assert_eq!(body["is_active"], false);

    let req = test::TestRequest::put()
        .uri(&format!("/users/{}", id))
        .set_json(json!({ "team_name": "ghost" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 400);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}/reviews", id))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, test::TestRequest::get().uri("/users").to_request()).await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", id))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 204);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", id))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 404);

    let req = test::TestRequest::delete()
        .uri(&format!("/users/{}", Uuid::now_v7()))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_pull_request_routes() {
    let (pool, services) = setup().await;
    let team = seed_team(
        &services,
        "core",
        &[("a", true), ("b", true), ("c", true), ("d", false), ("e", true)],
    )
    .await;
    let app = create_test_app(&pool, &services).await;

    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(json!({ "pull_request_name": "feat", "author_id": team[0].user_id }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["pr"]["status"], "OPEN");
    assert!(body["pr"].get("merged_at").is_none());
    let reviewers: Vec<&str> = body["reviewers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["username"].as_str().unwrap())
        .collect();
    assert_eq!(reviewers, vec!["b", "c"]);
    let pr_id = body["pr"]["pull_request_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/pullRequest/{}", pr_id))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["reviewers"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(json!({ "pull_request_id": pr_id, "old_reviewer_id": team[1].user_id }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["username"], "e");

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(json!({ "pull_request_id": pr_id, "old_reviewer_id": team[1].user_id }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "NOT_ASSIGNED");

    let req = test::TestRequest::post()
        .uri("/pullRequest/merge")
        .set_json(json!({ "pull_request_id": pr_id }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "MERGED");
    assert!(body.get("merged_at").is_some());

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(json!({ "pull_request_id": pr_id, "old_reviewer_id": team[2].user_id }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "PR_MERGED");

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}/reviews", team[2].user_id))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body[0]["pull_request_id"], pr_id.as_str());
}

#[actix_rt::test]
async fn test_unknown_ids_in_body_statuses() {
    let (pool, services) = setup().await;
    let app = create_test_app(&pool, &services).await;
    let ghost = Uuid::now_v7();

    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(json!({ "pull_request_name": "feat", "author_id": ghost }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");

    let req = test::TestRequest::post()
        .uri("/pullRequest/merge")
        .set_json(json!({ "pull_request_id": ghost }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 400);

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(json!({ "pull_request_id": ghost, "old_reviewer_id": ghost }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "NOT_FOUND");

    let req = test::TestRequest::post()
        .uri("/pullRequest/reassign")
        .set_json(json!({ "pull_request_id": "not-a-uuid", "old_reviewer_id": ghost }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 409);

    let req = test::TestRequest::get()
        .uri(&format!("/pullRequest/{}", ghost))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_malformed_body_is_bad_request() {
    let (pool, services) = setup().await;
    let app = create_test_app(&pool, &services).await;

    let req = test::TestRequest::post()
        .uri("/teams")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");

    let req = test::TestRequest::post()
        .uri("/pullRequest/create")
        .set_json(json!({ "pull_request_name": "feat" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}
