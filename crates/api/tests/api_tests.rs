mod common;

use api::app::build_router;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::*;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn register_and_login(app: &axum::Router, username: &str) -> (Uuid, String) {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/register",
            None,
            &json!({
                "username": username,
                "password": "secret123",
                "name": "Test",
                "surname": "Player",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id: Uuid = body_json(response).await["id"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("registered id");

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/login",
            None,
            &json!({ "username": username, "password": "secret123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["token"]
        .as_str()
        .expect("login token")
        .to_string();

    (id, token)
}

#[tokio::test]
async fn register_login_and_record_a_match() {
    let state = setup_test_db().await;
    let app = build_router(state);

    let (winner_id, token) =
        register_and_login(&app, &format!("winner_{}", Uuid::new_v4())).await;
    let (opponent_id, _) =
        register_and_login(&app, &format!("opponent_{}", Uuid::new_v4())).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/matches",
            Some(&token),
            &json!({
                "mode": "singles",
                "player_b": opponent_id,
                "score_a": 11,
                "score_b": 9,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["winner_id"], json!(winner_id));
    assert_eq!(body["player_a"], json!(winner_id));
    assert_eq!(body["is_doubles"], json!(false));
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let state = setup_test_db().await;
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/matches")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_username_answers_conflict() {
    let state = setup_test_db().await;
    let app = build_router(state);

    let username = format!("dup_{}", Uuid::new_v4());
    let payload = json!({
        "username": username,
        "password": "secret123",
        "name": "Dup",
        "surname": "Licate",
    });

    let first = app
        .clone()
        .oneshot(post_json("/api/register", None, &payload))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(post_json("/api/register", None, &payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn rule_rejections_map_to_bad_request() {
    let state = setup_test_db().await;
    let app = build_router(state);

    let (self_id, token) = register_and_login(&app, &format!("rules_{}", Uuid::new_v4())).await;
    let (opponent_id, _) = register_and_login(&app, &format!("opp_{}", Uuid::new_v4())).await;

    // Draw.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/matches",
            Some(&token),
            &json!({
                "mode": "singles",
                "player_b": opponent_id,
                "score_a": 10,
                "score_b": 10,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("draw"));

    // Self-teammate in doubles.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/matches",
            Some(&token),
            &json!({
                "mode": "doubles",
                "teammate_a": self_id,
                "player_b": opponent_id,
                "teammate_b": Uuid::new_v4(),
                "score_a": 11,
                "score_b": 9,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("teammate"));

    // Missing opponent.
    let response = app
        .oneshot(post_json(
            "/api/matches",
            Some(&token),
            &json!({ "mode": "singles", "score_a": 11, "score_b": 9 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_endpoint_reports_zeroes_for_fresh_players() {
    let state = setup_test_db().await;
    let app = build_router(state);

    let (id, token) = register_and_login(&app, &format!("fresh_{}", Uuid::new_v4())).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/users/{id}/stats"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["overall"]["total_matches"], json!(0));
    assert_eq!(body["overall"]["win_rate"], json!(0.0));
    assert_eq!(body["opponents"], json!([]));
    assert_eq!(body["teammates"], json!([]));
}
