//! Integration tests for note operations.

use axum::http::StatusCode;
use serde_json::json;

use notehub_entity::note::Note;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_then_get() {
    let app = TestApp::new().await;

    let created = app
        .request(
            "POST",
            "/notes",
            Some(json!({"title": "groceries", "content": "milk"})),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let note: Note = serde_json::from_value(created.body).unwrap();
    assert_eq!(note.title, "groceries");

    let fetched = app.request("GET", &format!("/notes/{}", note.id), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<Note>(fetched.body).unwrap(), note);
}

#[tokio::test]
async fn test_list_notes_in_id_order() {
    let app = TestApp::new().await;
    for title in ["a", "b", "c"] {
        app.request("POST", "/notes", Some(json!({"title": title, "content": ""})))
            .await;
    }

    let response = app.request("GET", "/notes", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let notes: Vec<Note> = serde_json::from_value(response.body).unwrap();
    let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, ["a", "b", "c"]);
    assert!(notes.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let app = TestApp::new().await;
    let created = app
        .request("POST", "/notes", Some(json!({"title": "t", "content": "c"})))
        .await;
    let id = created.body["id"].as_u64().unwrap();

    let updated = app
        .request(
            "PUT",
            &format!("/notes/{id}"),
            Some(json!({"id": 999, "title": "t2", "content": "c2"})),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body, json!({"id": id, "title": "t2", "content": "c2"}));
}

#[tokio::test]
async fn test_update_missing_note_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request("PUT", "/notes/42", Some(json!({"title": "x", "content": "y"})))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("NOT_FOUND"));

    let all = app.request("GET", "/notes", None).await;
    assert_eq!(all.body, json!([]));
}

#[tokio::test]
async fn test_delete_twice() {
    let app = TestApp::new().await;
    let created = app
        .request("POST", "/notes", Some(json!({"title": "t", "content": "c"})))
        .await;
    let path = format!("/notes/{}", created.body["id"]);

    let first = app.request("DELETE", &path, None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, json!({"message": "Note deleted"}));

    assert_eq!(app.request("GET", &path, None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.request("DELETE", &path, None).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/notes/abc", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/notes", Some(json!({"title": 5})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_init_notes_with_count() {
    let app = TestApp::new().await;
    app.request("POST", "/notes", Some(json!({"title": "old", "content": ""})))
        .await;

    let response = app.request("POST", "/init_notes?count=25", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"message": "25 notes initialized"}));

    let notes: Vec<Note> =
        serde_json::from_value(app.request("GET", "/notes", None).await.body).unwrap();
    assert_eq!(notes.len(), 25);
    assert!(notes.iter().all(|n| n.title != "old"));
    assert_eq!(notes[0].title, "Title 1Tit");

    let max_id = notes.iter().map(|n| n.id).max().unwrap();
    let created = app
        .request("POST", "/notes", Some(json!({"title": "new", "content": ""})))
        .await;
    assert!(created.body["id"].as_u64().unwrap() > max_id);
}

#[tokio::test]
async fn test_init_notes_default_count() {
    let app = TestApp::with_config(|config| config.notes.reset_default_count = 12).await;

    let response = app.request("POST", "/init_notes", None).await;
    assert_eq!(response.body, json!({"message": "12 notes initialized"}));
}

#[tokio::test]
async fn test_init_notes_above_max_is_rejected() {
    let app = TestApp::with_config(|config| config.notes.reset_max_count = 100).await;
    app.request("POST", "/notes", Some(json!({"title": "kept", "content": ""})))
        .await;

    let response = app
        .request("POST", "/init_notes?count=18446744073709551615", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));

    let too_many = app.request("POST", "/init_notes?count=101", None).await;
    assert_eq!(too_many.status, StatusCode::BAD_REQUEST);

    let notes = app.request("GET", "/notes", None).await;
    assert_eq!(notes.body.as_array().map(Vec::len), Some(1));
    assert_eq!(notes.body[0]["title"], "kept");

    let health = app.request("GET", "/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
}

#[tokio::test]
async fn test_init_notes_disabled() {
    let app = TestApp::with_config(|config| config.notes.reset_endpoint_enabled = false).await;

    let response = app.request("POST", "/init_notes?count=5", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seed_on_startup() {
    let app = TestApp::with_config(|config| config.notes.seed_on_startup = 3).await;

    let health = app.request("GET", "/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");
    assert_eq!(health.body["notes"], 3);
}
