use api_adapters::ACTOR_HEADER;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use integration_tests::seeded_app;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    actor: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        req = req.header(ACTOR_HEADER, actor);
    }
    let req = match body {
        Some(body) => req
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_is_ok() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn feed_lists_seed_posts_and_filters_by_category() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::GET, "/api/feed", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 7);

    let (_, body) = send(&app, Method::GET, "/api/feed?category=Fashion", None, None).await;
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["id"], "fashion-1");
}

#[tokio::test]
async fn reply_via_api_bumps_the_parent() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/posts",
        Some("4"),
        Some(json!({ "content": "The Alchemist", "parent_id": "2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["placement"]["kind"], "reply");
    assert_eq!(body["post"]["author_id"], "4");

    let (status, body) = send(&app, Method::GET, "/api/posts/2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["stats"]["comments"], 89);
    assert_eq!(body["replies"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn bids_map_to_bad_request_when_too_low() {
    let app = seeded_app();
    let uri = "/api/posts/auction-1/bids";

    let (status, body) = send(&app, Method::POST, uri, Some("1"), Some(json!({ "amount": 5000 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid bid"));

    let (status, body) = send(&app, Method::POST, uri, Some("1"), Some(json!({ "amount": 8000 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["auction"]["current_bid"], 8000.0);
    assert_eq!(body["auction"]["bid_count"], 13);
}

#[tokio::test]
async fn moderation_errors_map_to_forbidden_and_not_found() {
    let app = seeded_app();

    let (status, _) = send(&app, Method::DELETE, "/api/posts/2", Some("4"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::DELETE, "/api/posts/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    // no header acts as the default actor, the admin
    let (status, body) = send(&app, Method::POST, "/api/posts/1/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "inactive");
}

#[tokio::test]
async fn follow_and_ban_toggles() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::POST, "/api/users/2/follow", Some("1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["following"], true);
    assert_eq!(body["target_followers"], 1_801);

    let (_, body) = send(&app, Method::GET, "/api/users/2", Some("1"), None).await;
    assert_eq!(body["followed_by_actor"], true);

    let (status, body) = send(&app, Method::POST, "/api/users/3/ban", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_banned"], false);
}

#[tokio::test]
async fn notifications_read_all() {
    let app = seeded_app();
    let (_, body) = send(&app, Method::GET, "/api/notifications", None, None).await;
    assert_eq!(body["unread"], 2);

    let (status, body) = send(&app, Method::POST, "/api/notifications/read-all", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["marked"], 2);
    assert_eq!(body["unread"], 0);
}

#[tokio::test]
async fn conversations_and_messages() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/conversations",
        Some("4"),
        Some(json!({ "with": "2" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["conversation"]["id"].as_str().unwrap().to_string();

    let uri = format!("/api/conversations/{id}/messages");
    let (status, body) = send(&app, Method::POST, &uri, Some("4"), Some(json!({ "text": "hi" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["text"], "hi");

    let (status, _) = send(&app, Method::POST, &uri, Some("1"), Some(json!({ "text": "hi" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn site_admin_surface() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::POST, "/api/site/flags/allow_messaging", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], false);

    let (status, _) = send(&app, Method::POST, "/api/site/flags/bogus", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/site",
        Some("1"),
        Some(json!({ "site_name": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/site/sections",
        None,
        Some(json!({ "name": "Fashion" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (status, _) = send(&app, Method::DELETE, "/api/site/sections/fashion", None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = send(&app, Method::GET, "/api/site/sections", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn supervisors_roundtrip() {
    let app = seeded_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/supervisors",
        None,
        Some(json!({ "user_id": "4" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/supervisors/4",
        None,
        Some(json!({ "can_toggle_status": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["permissions"]["can_toggle_status"], true);
    assert_eq!(body["permissions"]["can_ban_user"], false);

    let (status, _) = send(&app, Method::DELETE, "/api/supervisors/4", None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, "/api/supervisors/4", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
