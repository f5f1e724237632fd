use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use dhub_database::Database;
use dhub_kernel::domain::config::ApiConfig;
use dhub_kernel::server::state::ApiState;
use serde_json::{Value, json};
use tower::ServiceExt;
use utoipa_axum::router::OpenApiRouter;

async fn test_app() -> Router {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    let slice = dhub_scoreboard::init(&db).expect("scoreboard init");

    let state = ApiState::builder()
        .config(ApiConfig::default())
        .db(db)
        .register_slice(slice)
        .build()
        .expect("api state");

    let (router, _doc) = OpenApiRouter::new()
        .merge(dhub_scoreboard::router())
        .with_state(state)
        .split_for_parts();
    router
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, location, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn patch_json(uri: &str, body: Value) -> Request<Body> {
    Request::patch(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn create_match_returns_location_and_zeroed_scores() {
    let app = test_app().await;

    let (status, location, body) =
        send(&app, post_json("/api/match", json!({ "team1Name": "Reds", "team2Name": "Blues" })))
            .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().expect("id");
    assert_eq!(location.as_deref(), Some(format!("/api/match/{id}").as_str()));
    assert_eq!(body["team1Name"], "Reds");
    assert_eq!(body["team2Name"], "Blues");
    assert_eq!(body["team1Score"], 0);
    assert_eq!(body["team2Score"], 0);
    assert_eq!(body["gameOver"], false);
    assert!(body["winner"].is_null());
}

#[tokio::test]
async fn blank_team_names_fall_back_to_defaults() {
    let app = test_app().await;

    let (status, _, body) = send(&app, post_json("/api/match", json!({}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["team1Name"], "Team1");
    assert_eq!(body["team2Name"], "Team2");
}

#[tokio::test]
async fn created_match_is_retrievable() {
    let app = test_app().await;

    let (_, _, created) =
        send(&app, post_json("/api/match", json!({ "team1Name": "A", "team2Name": "B" }))).await;
    let id = created["id"].as_str().expect("id");

    let request = Request::get(format!("/api/match/{id}")).body(Body::empty()).expect("request");
    let (status, _, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], *id);
    assert_eq!(body["team1Name"], "A");
}

#[tokio::test]
async fn unknown_match_returns_not_found() {
    let app = test_app().await;

    let request = Request::get("/api/match/nope12345678").body(Body::empty()).expect("request");
    let (status, _, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn score_updates_accumulate_and_end_the_match() {
    let app = test_app().await;

    let (_, _, created) = send(&app, post_json("/api/match", json!({}))).await;
    let id = created["id"].as_str().expect("id");
    let uri = format!("/api/match/{id}");

    let (status, _, body) =
        send(&app, patch_json(&uri, json!({ "team1Points": 150, "team2Points": 70 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team1Score"], 150);
    assert_eq!(body["team2Score"], 70);
    assert_eq!(body["gameOver"], false);

    // The winning hand still credits the other team's points.
    let (status, _, body) =
        send(&app, patch_json(&uri, json!({ "team1Points": 50, "team2Points": 20 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team1Score"], 200);
    assert_eq!(body["team2Score"], 90);
    assert_eq!(body["gameOver"], true);
    assert_eq!(body["winner"], 1);

    // No scoring once a team has won.
    let (status, _, _) =
        send(&app, patch_json(&uri, json!({ "team2Points": 10 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_score_updates_are_rejected() {
    let app = test_app().await;

    let (_, _, created) = send(&app, post_json("/api/match", json!({}))).await;
    let id = created["id"].as_str().expect("id");
    let uri = format!("/api/match/{id}");

    let (status, _, _) =
        send(&app, patch_json(&uri, json!({ "team1Points": -5, "team2Points": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) =
        send(&app, patch_json("/api/match/missing99999", json!({ "team1Points": 5 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
