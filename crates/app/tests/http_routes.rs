use std::sync::Arc;

use app::http::{AppState, router};
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use drill_core::{OnComplete, Session};
use serde_json::{Value, json};
use services::{AppServices, QuizSettings};
use storage::repository::{SessionKey, SessionStore, Storage, StorageError};
use tower::ServiceExt;

fn app_with(settings: QuizSettings) -> Router {
    let services = AppServices::in_memory(&settings).unwrap();
    router(AppState::new(services.quiz()))
}

fn app() -> Router {
    app_with(QuizSettings::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn submit(app: &Router, body: Value) -> (StatusCode, Value) {
    send_json(app, post_json("/submit", body)).await
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &'static str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn json_walkthrough_scores_and_finishes() {
    let app = app();

    let (status, view) = send_json(&app, get("/api/view")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view, json!({ "view": "start", "total": 3 }));

    let (status, body) = send_json(&app, post_empty("/begin")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "new_score": 0,
            "new_position": { "state": "at_index", "index": 0 }
        })
    );

    let (_, body) = submit(&app, json!({ "scenario": 101, "points": 10 })).await;
    assert_eq!(body["new_score"], 10);
    assert_eq!(body["new_position"], json!({ "state": "at_index", "index": 1 }));

    let (_, body) = submit(&app, json!({ "scenario": "102", "points": -5 })).await;
    assert_eq!(body["new_score"], 5);

    let (status, body) = submit(&app, json!({ "scenario": 103, "points": 10 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "new_score": 15, "new_position": { "state": "finished" } })
    );

    let (_, view) = send_json(&app, get("/api/view")).await;
    assert_eq!(view, json!({ "view": "finished", "score": 15, "total": 3 }));

    let (status, body) = send_json(&app, post_empty("/reset")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "new_score": 0, "new_position": { "state": "start" } })
    );
}

#[tokio::test]
async fn scenario_view_carries_content() {
    let app = app();
    send(&app, post_empty("/begin")).await;

    let (_, view) = send_json(&app, get("/api/view")).await;
    assert_eq!(view["view"], "scenario");
    assert_eq!(view["index"], 0);
    assert_eq!(view["score"], 0);
    assert_eq!(view["scenario"]["type"], "phishing");
    assert_eq!(view["scenario"]["id"], 101);
}

#[tokio::test]
async fn rejected_submissions_leave_state_alone() {
    let app = app();

    let (status, body) = submit(&app, json!({ "scenario": 101, "points": 10 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "invalid_transition");

    send(&app, post_empty("/begin")).await;

    let (status, body) = submit(&app, json!({ "scenario": 103, "points": 10 })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "stale_submission");

    let (status, body) = submit(&app, json!({ "scenario": 101, "points": 2.5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");

    let (status, body) = submit(&app, json!({ "scenario": 101 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");

    let (status, body) = submit(&app, json!({ "scenario": 101, "points": 5000 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");

    let malformed = Request::post("/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send_json(&app, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");

    let (status, body) = send_json(&app, post_empty("/begin")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_transition");

    let (_, view) = send_json(&app, get("/api/view")).await;
    assert_eq!(view["index"], 0);
    assert_eq!(view["score"], 0);
}

#[tokio::test]
async fn cookie_selects_an_isolated_session() {
    let app = app();
    let with_cookie = |request: Request<Body>, value: &'static str| {
        let (mut parts, body) = request.into_parts();
        parts
            .headers
            .insert(header::COOKIE, value.parse().unwrap());
        Request::from_parts(parts, body)
    };

    send(&app, with_cookie(post_empty("/begin"), "drill_session=alice")).await;
    let (_, body) = send_json(
        &app,
        with_cookie(
            post_json("/submit", json!({ "scenario": 101, "points": 10 })),
            "theme=dark; drill_session=alice",
        ),
    )
    .await;
    assert_eq!(body["new_score"], 10);

    let (_, view) = send_json(&app, with_cookie(get("/api/view"), "drill_session=bob")).await;
    assert_eq!(view["view"], "start");

    let (_, view) = send_json(&app, get("/api/view")).await;
    assert_eq!(view["view"], "start");

    let (_, view) = send_json(&app, with_cookie(get("/api/view"), "drill_session=alice")).await;
    assert_eq!(view["score"], 10);
}

#[tokio::test]
async fn pages_walk_through_the_drill() {
    let app = app();

    let (status, html) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Begin"), "missing begin in {html}");

    let response = app.clone().oneshot(post_empty("/quiz/begin")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains("Action Required: Urgent Payroll Update"), "missing subject in {html}");
    assert!(html.contains("Current Score: 0 points"), "missing score in {html}");

    let (status, html) = send(&app, post_form("/quiz/answer", "scenario=101&action=report")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Correct! Phishing reported."), "missing feedback in {html}");
    assert!(html.contains("Current Score: 10 points"), "missing score in {html}");
    assert!(html.contains("name=\"password\""), "missing password form in {html}");

    let (_, html) = send(&app, post_form("/quiz/answer", "scenario=102&password=short")).await;
    assert!(html.contains("feedback wrong"), "missing wrong feedback in {html}");
    assert!(html.contains("Current Score: 5 points"), "missing score in {html}");

    let (_, html) = send(&app, post_form("/quiz/answer", "scenario=103&option=1")).await;
    assert!(html.contains("Final score: 15 points"), "missing final score in {html}");

    let response = app.clone().oneshot(post_empty("/quiz/reset")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let (_, view) = send_json(&app, get("/api/view")).await;
    assert_eq!(view, json!({ "view": "start", "total": 3 }));
}

#[tokio::test]
async fn stale_form_answer_shows_current_scenario() {
    let app = app();
    send(&app, post_empty("/quiz/begin")).await;
    send(&app, post_form("/quiz/answer", "scenario=101&action=click")).await;

    let (status, html) = send(&app, post_form("/quiz/answer", "scenario=101&action=click")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(html.contains("earlier scenario"), "missing notice in {html}");
    assert!(html.contains("Current Score: -5 points"), "score changed in {html}");

    let (status, html) = send(&app, post_form("/quiz/answer", "scenario=102")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("no answer was submitted"), "missing notice in {html}");

    let (status, html) = send(&app, post_form("/quiz/answer", "scenario=102&option=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("name=\"password\""), "should stay on password in {html}");
}

#[tokio::test]
async fn repeated_begin_click_redirects() {
    let app = app();
    send(&app, post_empty("/quiz/begin")).await;
    let response = app.clone().oneshot(post_empty("/quiz/begin")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn summary_page_resets_when_configured() {
    let app = app_with(QuizSettings {
        reset_after_summary: true,
        ..QuizSettings::default()
    });
    send(&app, post_empty("/begin")).await;
    for (id, points) in [(101, 10), (102, 10), (103, 10)] {
        send(&app, post_json("/submit", json!({ "scenario": id, "points": points }))).await;
    }

    let (_, html) = send(&app, get("/")).await;
    assert!(html.contains("Final score: 30 points"), "missing final score in {html}");

    let (_, view) = send_json(&app, get("/api/view")).await;
    assert_eq!(view, json!({ "view": "start", "total": 3 }));
}

#[tokio::test]
async fn answer_form_summary_is_shown_once_when_reset_configured() {
    let app = app_with(QuizSettings {
        reset_after_summary: true,
        ..QuizSettings::default()
    });
    send(&app, post_empty("/quiz/begin")).await;
    send(&app, post_form("/quiz/answer", "scenario=101&action=report")).await;
    send(&app, post_form("/quiz/answer", "scenario=102&password=short")).await;

    let (status, html) = send(&app, post_form("/quiz/answer", "scenario=103&option=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Final score: 15 points"), "missing final score in {html}");

    let (_, view) = send_json(&app, get("/api/view")).await;
    assert_eq!(view, json!({ "view": "start", "total": 3 }));

    let (_, html) = send(&app, get("/")).await;
    assert!(!html.contains("Final score"), "summary shown twice: {html}");
}

#[tokio::test]
async fn loop_policy_wraps_to_first_scenario() {
    let app = app_with(QuizSettings {
        on_complete: OnComplete::Loop,
        ..QuizSettings::default()
    });
    send(&app, post_empty("/begin")).await;
    for (id, points) in [(101, 10), (102, 10)] {
        send(&app, post_json("/submit", json!({ "scenario": id, "points": points }))).await;
    }
    let (_, body) = submit(&app, json!({ "scenario": 103, "points": -10 })).await;
    assert_eq!(body["new_score"], 10);
    assert_eq!(body["new_position"], json!({ "state": "at_index", "index": 0 }));
}

struct FailingStore;

#[async_trait]
impl SessionStore for FailingStore {
    async fn load(&self, _key: &SessionKey) -> Result<Session, StorageError> {
        Err(StorageError::Connection("store offline".into()))
    }

    async fn save(&self, _key: &SessionKey, _session: Session) -> Result<(), StorageError> {
        Err(StorageError::Connection("store offline".into()))
    }

    async fn remove(&self, _key: &SessionKey) -> Result<(), StorageError> {
        Err(StorageError::Connection("store offline".into()))
    }
}

#[tokio::test]
async fn storage_failures_are_server_errors() {
    let storage = Storage {
        sessions: Arc::new(FailingStore),
    };
    let services = AppServices::with_storage(&QuizSettings::default(), storage).unwrap();
    let app = router(AppState::new(services.quiz()));

    let (status, body) = send_json(&app, get("/api/view")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "storage");

    let (status, _) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
