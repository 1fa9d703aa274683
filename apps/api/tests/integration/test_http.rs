use super::helpers::{
    JWT_SECRET, SpyFilter, admin_token, expect_status, json_request, read_json, send, spawn_app,
    spawn_app_with, spawn_app_with_throttle, test_config,
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use blog_moderation::{
    domain::comment::repository::CommentRepository,
    infrastructure::security::rate_limiter::CommentThrottle,
    presentation::http::middleware::user::UserClaims,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use uuid::Uuid;

fn comments_uri(post_id: Uuid) -> String {
    format!("/api/v1/posts/{}/comments", post_id)
}

fn reader_token(role: Option<&str>) -> String {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize;
    match role {
        None => encode(
            &Header::default(),
            &UserClaims {
                sub: Uuid::now_v7().to_string(),
                email: "member@example.com".to_string(),
                exp,
            },
            &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
        ),
        Some(role) => encode(
            &Header::default(),
            &json!({ "sub": "member@example.com", "role": role, "exp": exp }),
            &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
        ),
    }
    .expect("failed to sign reader token")
}

fn comment_body(content: &str) -> Value {
    json!({
        "author": "Reader",
        "email": "reader@example.com",
        "website": "",
        "content": content
    })
}

#[tokio::test]
async fn anonymous_comment_is_held_for_moderation() {
    let app = spawn_app().await;
    let post_id = Uuid::now_v7();

    let req = json_request("POST", &comments_uri(post_id), None, &comment_body("Nice post"));
    let res = expect_status(send(&app.app, req).await, StatusCode::ACCEPTED).await;
    let body: Value = read_json(res).await;

    assert_eq!(body["status"], "pending");
    assert!(body["comment"].is_null());
    assert_eq!(app.comments.len().await, 1);

    let list = Request::builder()
        .uri(comments_uri(post_id))
        .body(Body::empty())
        .expect("failed to build list request");
    let res = expect_status(send(&app.app, list).await, StatusCode::OK).await;
    let listed: Vec<Value> = read_json(res).await;
    assert!(listed.is_empty());
}

#[tokio::test]
async fn signed_in_reader_is_published_immediately() {
    let app = spawn_app().await;
    let post_id = Uuid::now_v7();
    let token = reader_token(None);

    let req = json_request(
        "POST",
        &comments_uri(post_id),
        Some(&token),
        &comment_body("Great write-up"),
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::CREATED).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["status"], "approved");
    assert_eq!(body["comment"]["content"], "Great write-up");
    assert!(body["comment"].get("email").is_none());

    let list = Request::builder()
        .uri(format!("{}?limit=10", comments_uri(post_id)))
        .body(Body::empty())
        .expect("failed to build list request");
    let res = expect_status(send(&app.app, list).await, StatusCode::OK).await;
    let listed: Vec<Value> = read_json(res).await;
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn invalid_submission_is_unprocessable() {
    let app = spawn_app().await;

    let req = json_request(
        "POST",
        &comments_uri(Uuid::now_v7()),
        None,
        &json!({ "author": "Reader", "email": "not-an-email", "content": "hi" }),
    );
    expect_status(send(&app.app, req).await, StatusCode::UNPROCESSABLE_ENTITY).await;
    assert!(app.comments.is_empty().await);
}

#[tokio::test]
async fn spam_caught_by_custom_filter_reads_as_pending() {
    let spy = SpyFilter::spam("Akismet");
    let app = spawn_app_with(test_config(), &[spy.clone()]).await;

    let req = json_request(
        "POST",
        &comments_uri(Uuid::now_v7()),
        None,
        &comment_body("cheap watches"),
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::ACCEPTED).await;
    let body: Value = read_json(res).await;

    assert_eq!(body["status"], "pending");
    assert_eq!(spy.checks(), 1);
    assert_eq!(app.comments.len().await, 1);
}

#[tokio::test]
async fn admin_routes_require_an_admin_token() {
    let app = spawn_app().await;

    let anonymous = Request::builder()
        .uri("/api/v1/admin/filters")
        .body(Body::empty())
        .expect("failed to build request");
    expect_status(send(&app.app, anonymous).await, StatusCode::UNAUTHORIZED).await;

    let reader = Request::builder()
        .uri("/api/v1/admin/filters")
        .header(header::AUTHORIZATION, format!("Bearer {}", reader_token(None)))
        .body(Body::empty())
        .expect("failed to build request");
    expect_status(send(&app.app, reader).await, StatusCode::UNAUTHORIZED).await;

    let wrong_role = Request::builder()
        .uri("/api/v1/admin/filters")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", reader_token(Some("reader"))),
        )
        .body(Body::empty())
        .expect("failed to build request");
    let res = expect_status(send(&app.app, wrong_role).await, StatusCode::FORBIDDEN).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "Access denied");

    let missing = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/filters/ip")
        .body(Body::empty())
        .expect("failed to build request");
    let res = expect_status(send(&app.app, missing).await, StatusCode::UNAUTHORIZED).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let app = spawn_app().await;

    let req = json_request(
        "POST",
        "/api/v1/admin/login",
        None,
        &json!({ "email": "admin@example.com", "password": "guess" }),
    );
    expect_status(send(&app.app, req).await, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn delete_rule_added_by_admin_discards_matching_comments() {
    let app = spawn_app().await;
    let token = admin_token(&app.app).await;

    let add = json_request(
        "POST",
        "/api/v1/admin/filters",
        Some(&token),
        &json!({
            "action": "Delete",
            "subject": "Comment",
            "operator": "Contains",
            "filter": "Casino"
        }),
    );
    let res = expect_status(send(&app.app, add).await, StatusCode::CREATED).await;
    let rule: Value = read_json(res).await;
    assert_eq!(rule["subject"], "Comment");

    let submit = json_request(
        "POST",
        &comments_uri(Uuid::now_v7()),
        None,
        &comment_body("best online casino bonus"),
    );
    let res = expect_status(send(&app.app, submit).await, StatusCode::ACCEPTED).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["status"], "pending");
    assert!(app.comments.is_empty().await);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!(
            "/api/v1/admin/filters/{}",
            rule["id"].as_str().expect("missing rule id")
        ))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .expect("failed to build request");
    expect_status(send(&app.app, delete).await, StatusCode::NO_CONTENT).await;
    assert!(app.state.moderation.rules().await.is_empty());
}

#[tokio::test]
async fn email_shortcut_ignores_values_without_at_sign() {
    let app = spawn_app().await;
    let token = admin_token(&app.app).await;

    let req = json_request(
        "POST",
        "/api/v1/admin/filters/email",
        Some(&token),
        &json!({ "value": "not-an-email", "is_spam": true }),
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;

    assert_eq!(body["added"], false);
    assert!(app.state.moderation.rules().await.is_empty());
}

#[tokio::test]
async fn admin_can_disable_a_custom_filter() {
    let spy = SpyFilter::spam("Akismet");
    let app = spawn_app_with(test_config(), &[spy.clone()]).await;
    let token = admin_token(&app.app).await;

    let req = json_request(
        "PATCH",
        "/api/v1/admin/custom-filters/Akismet",
        Some(&token),
        &json!({ "enabled": false }),
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let row: Value = read_json(res).await;
    assert_eq!(row["enabled"], false);

    let submit = json_request(
        "POST",
        &comments_uri(Uuid::now_v7()),
        None,
        &comment_body("hello"),
    );
    expect_status(send(&app.app, submit).await, StatusCode::ACCEPTED).await;
    assert_eq!(spy.checks(), 0);
}

#[tokio::test]
async fn report_mistake_on_unknown_comment_is_not_found() {
    let app = spawn_app().await;
    let token = admin_token(&app.app).await;

    let req = json_request(
        "POST",
        &format!("/api/v1/admin/comments/{}/report-mistake", Uuid::now_v7()),
        Some(&token),
        &json!({}),
    );
    expect_status(send(&app.app, req).await, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn health_reports_moderation_tables() {
    let app = spawn_app_with(test_config(), &[SpyFilter::ham("Akismet")]).await;

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("failed to build request");
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["custom_filters"], 1);
    assert_eq!(body["filter_rules"], 0);
}

#[tokio::test]
async fn rejected_submission_does_not_spend_the_throttle_window() {
    let app =
        spawn_app_with_throttle(test_config(), &[], CommentThrottle::in_memory(60)).await;
    let uri = comments_uri(Uuid::now_v7());

    let invalid = json_request(
        "POST",
        &uri,
        None,
        &json!({ "author": "Reader", "email": "reader@", "content": "hi" }),
    );
    expect_status(send(&app.app, invalid).await, StatusCode::UNPROCESSABLE_ENTITY).await;

    let fixed = json_request("POST", &uri, None, &comment_body("hi"));
    expect_status(send(&app.app, fixed).await, StatusCode::ACCEPTED).await;

    let again = json_request("POST", &uri, None, &comment_body("hi again"));
    let res = expect_status(send(&app.app, again).await, StatusCode::TOO_MANY_REQUESTS).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "Please wait before commenting again");
    assert_eq!(app.comments.len().await, 1);
}

#[tokio::test]
async fn approval_never_allow_lists_an_unknown_address() {
    let mut config = test_config();
    config.add_ip_to_allow_list_on_approval = true;
    let app = spawn_app_with(config, &[]).await;
    let token = admin_token(&app.app).await;

    let submit = Request::builder()
        .method("POST")
        .uri(comments_uri(Uuid::now_v7()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(comment_body("no proxy in front of me").to_string()))
        .expect("failed to build request");
    expect_status(send(&app.app, submit).await, StatusCode::ACCEPTED).await;

    let history = app
        .comments
        .find_history("reader@example.com", "")
        .await
        .expect("failed to read history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].ip, "");
    let pending_id = history[0].id;
    let rule_count_before = app.state.moderation.rules().await.len();

    let approve = json_request(
        "POST",
        &format!("/api/v1/admin/comments/{}/approve", pending_id),
        Some(&token),
        &json!({}),
    );
    let res = expect_status(send(&app.app, approve).await, StatusCode::OK).await;
    let approved: Value = read_json(res).await;
    assert_eq!(approved["is_approved"], true);
    assert_eq!(app.state.moderation.rules().await.len(), rule_count_before);
}

#[tokio::test]
async fn ip_shortcut_adds_a_block_rule() {
    let app = spawn_app().await;
    let token = admin_token(&app.app).await;

    let req = json_request(
        "POST",
        "/api/v1/admin/filters/ip",
        Some(&token),
        &json!({ "value": "198.51.100.23", "is_spam": true }),
    );
    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;

    assert_eq!(body["added"], true);
    assert_eq!(body["rule"]["action"], "Block");
    assert_eq!(body["rule"]["subject"], "IP");
}

#[tokio::test]
async fn empty_custom_filter_update_is_a_bad_request() {
    let app = spawn_app_with(test_config(), &[SpyFilter::ham("Akismet")]).await;
    let token = admin_token(&app.app).await;

    let req = json_request(
        "PATCH",
        "/api/v1/admin/custom-filters/Akismet",
        Some(&token),
        &json!({}),
    );
    expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
}
