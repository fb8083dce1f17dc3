use std::collections::HashSet;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use rolodex_server::auth::jwt;

#[path = "support/mod.rs"]
mod support;

use support::{build_test_server, test_config};

async fn seed(server: &TestServer) {
    server.get("/api/users").await.assert_status_ok();
}

fn page_ids(body: &Value) -> HashSet<String> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|user| user["id"].as_str().expect("string id").to_string())
        .collect()
}

#[tokio::test]
async fn login_issues_a_decodable_token_for_the_demo_pair() {
    let server = build_test_server();

    let response = server
        .post("/api/login")
        .json(&json!({
            "email": "eve.holt@reqres.in",
            "password": "cityslicka"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let token = body["token"].as_str().expect("token field");
    let claims = jwt::decode_token(token, &test_config().auth.token_secret)
        .expect("token decodes with the configured secret");
    assert_eq!(claims.sub, "eve.holt@reqres.in");
}

#[tokio::test]
async fn login_rejects_any_other_credentials() {
    let server = build_test_server();

    let response = server
        .post("/api/login")
        .json(&json!({
            "email": "eve.holt@reqres.in",
            "password": "wrong"
        }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn first_list_seeds_and_paginates_without_overlap() {
    let server = build_test_server();

    let first = server.get("/api/users").await;
    first.assert_status_ok();
    let first_body: Value = first.json();
    assert_eq!(first_body["data"].as_array().expect("data").len(), 6);
    assert_eq!(first_body["page"], 1);
    assert_eq!(first_body["per_page"], 6);
    assert_eq!(first_body["total"], 12);
    assert_eq!(first_body["total_pages"], 2);

    let second = server.get("/api/users").add_query_param("page", "2").await;
    second.assert_status_ok();
    let second_body: Value = second.json();
    assert_eq!(second_body["data"].as_array().expect("data").len(), 6);

    let overlap: Vec<_> = page_ids(&first_body)
        .intersection(&page_ids(&second_body))
        .cloned()
        .collect();
    assert!(overlap.is_empty(), "pages overlap on ids {overlap:?}");
}

#[tokio::test]
async fn list_defaults_unparseable_paging_params() {
    let server = build_test_server();

    let response = server
        .get("/api/users")
        .add_query_param("page", "abc")
        .add_query_param("per_page", "-1")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 6);
}

#[tokio::test]
async fn seeding_is_idempotent_across_requests() {
    let server = build_test_server();

    seed(&server).await;
    seed(&server).await;

    let body: Value = server.get("/api/users").await.json();
    assert_eq!(body["total"], 12);
}

#[tokio::test]
async fn get_returns_a_normalized_record_by_legacy_id() {
    let server = build_test_server();
    seed(&server).await;

    let response = server.get("/api/users/3").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["id"], "3");
    assert_eq!(body["data"]["email"], "user3@reqres.in");
    // Record 3 has no stored avatar; the synthesized one must be present.
    assert_eq!(
        body["data"]["avatar"],
        "https://ui-avatars.com/api/?name=First3+Last3&background=random"
    );
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn get_is_404_for_absent_or_unaddressable_ids() {
    let server = build_test_server();
    seed(&server).await;

    server
        .get("/api/users/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/users/not-an-id")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_merges_only_the_mutable_fields() {
    let server = build_test_server();
    seed(&server).await;

    let response = server
        .put("/api/users/4")
        .json(&json!({
            "first_name": "Rachel",
            "avatar": "https://evil.example/override.png",
            "id": 99
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["first_name"], "Rachel");
    assert_eq!(body["last_name"], "Last4");
    assert_eq!(body["email"], "user4@reqres.in");
    // The avatar and id submitted in the body must not stick.
    assert_eq!(body["id"], "4");
    assert_eq!(body["avatar"], "https://reqres.in/img/faces/4-image.jpg");

    let reread: Value = server.get("/api/users/4").await.json();
    assert_eq!(reread["data"]["first_name"], "Rachel");
    assert_eq!(reread["data"]["last_name"], "Last4");
}

#[tokio::test]
async fn update_is_404_for_a_missing_record() {
    let server = build_test_server();
    seed(&server).await;

    let response = server
        .put("/api/users/999")
        .json(&json!({ "first_name": "Nobody" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_succeeds_once_then_reports_404() {
    let server = build_test_server();
    seed(&server).await;

    let first = server.delete("/api/users/5").await;
    first.assert_status_ok();
    let body: Value = first.json();
    assert_eq!(body["success"], true);

    server
        .delete("/api/users/5")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/users/5")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let listing: Value = server.get("/api/users").await.json();
    assert_eq!(listing["total"], 11);
}
