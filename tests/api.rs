//! HTTP tests for the Noteful API running on the in-memory store.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use noteful::{app, AppState, MemoryStore, NoteInput, NoteStore, Settings};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct Fixture {
    store: Arc<MemoryStore>,
    app: Router,
}

fn fixture_with(settings: Settings) -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), settings);
    Fixture { store, app: app(state) }
}

fn fixture() -> Fixture {
    fixture_with(Settings::default())
}

/// Seeds two folders, two tags and three notes; returns the note ids.
async fn seed(store: &MemoryStore) -> Vec<i32> {
    let work = store.create_folder("Work").await.unwrap();
    store.create_folder("Personal").await.unwrap();
    let foo = store.create_tag("foo").await.unwrap();
    let bar = store.create_tag("bar").await.unwrap();
    let mut ids = Vec::new();
    for (title, folder, tags) in [
        ("5 life lessons learned from cats", Some(work.id), vec![foo.id, bar.id]),
        ("7 things Lady Gaga has in common with cats", None, vec![bar.id]),
        ("Why you should forget everything about cats", None, vec![]),
    ] {
        let input = NoteInput {
            title: Some(title.to_string()),
            content: Some(Some("Lorem ipsum".to_string())),
            folder_id: Some(folder),
            tags: Some(tags),
        };
        ids.push(store.create_note(title, &input).await.unwrap());
    }
    ids
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_string(&v).unwrap())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, location, json)
}

#[tokio::test]
async fn health_and_ready() {
    let f = fixture();
    let (status, _, body) = send(&f.app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let (status, _, body) = send(&f.app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn unknown_path_is_json_404() {
    let f = fixture();
    let (status, _, body) = send(&f.app, Method::GET, "/bad/path", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn list_notes_hydrates_folder_and_tags() {
    let f = fixture();
    let ids = seed(&f.store).await;
    let (status, _, body) = send(&f.app, Method::GET, "/api/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    let notes = body.as_array().unwrap();
    assert_eq!(notes.len(), 3);
    assert_eq!(notes[0]["id"], ids[0]);
    assert_eq!(notes[0]["folder"]["name"], "Work");
    assert_eq!(notes[0]["tags"], json!([{"id": 1, "name": "foo"}, {"id": 2, "name": "bar"}]));
    assert!(notes[1].get("folder").is_none());
    assert_eq!(notes[2]["tags"], json!([]));
}

#[tokio::test]
async fn list_notes_applies_filters() {
    let f = fixture();
    seed(&f.store).await;
    let (_, _, body) = send(&f.app, Method::GET, "/api/notes?searchTerm=gaga", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "7 things Lady Gaga has in common with cats");

    let (_, _, body) = send(&f.app, Method::GET, "/api/notes?searchTerm=isael", None).await;
    assert_eq!(body, json!([]));

    let (_, _, body) = send(&f.app, Method::GET, "/api/notes?folderId=1", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, _, body) = send(&f.app, Method::GET, "/api/notes?tagId=2", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    // The tag filter selects notes but keeps all of their tags.
    assert_eq!(body[0]["tags"].as_array().unwrap().len(), 2);

    let (status, _, _) = send(&f.app, Method::GET, "/api/notes?folderId=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_notes_uses_the_default_limit() {
    let f = fixture_with(Settings {
        notes_limit: 2,
        ..Settings::default()
    });
    seed(&f.store).await;
    let (_, _, body) = send(&f.app, Method::GET, "/api/notes", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_note_by_id() {
    let f = fixture();
    let ids = seed(&f.store).await;
    let (status, _, body) = send(&f.app, Method::GET, &format!("/api/notes/{}", ids[1]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], ids[1]);
    assert_eq!(body["tags"], json!([{"id": 2, "name": "bar"}]));

    let (status, _, _) = send(&f.app, Method::GET, "/api/notes/123214", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&f.app, Method::GET, "/api/notes/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_note_returns_201_with_location() {
    let f = fixture();
    seed(&f.store).await;
    let new_note = json!({
        "title": "The best article about cats ever!",
        "content": "Lorem ipsum dolor sit amet",
        "folderId": 2,
        "tags": [1]
    });
    let (status, location, body) = send(&f.app, Method::POST, "/api/notes", Some(new_note)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    assert_eq!(location.as_deref(), Some(format!("/api/notes/{}", id).as_str()));
    assert_eq!(body["folder"], json!({"id": 2, "name": "Personal"}));
    assert_eq!(body["tags"], json!([{"id": 1, "name": "foo"}]));

    let (_, _, fetched) = send(&f.app, Method::GET, &format!("/api/notes/{}", id), None).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn create_note_without_title_is_rejected() {
    let f = fixture();
    let (status, _, body) = send(&f.app, Method::POST, "/api/notes", Some(json!({"foo": "bar"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing `title` in request body");
    let (_, _, list) = send(&f.app, Method::GET, "/api/notes", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn create_note_with_unknown_folder_is_rejected() {
    let f = fixture();
    let (status, _, body) = send(&f.app, Method::POST, "/api/notes", Some(json!({"title": "t", "folderId": 9}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn update_note() {
    let f = fixture();
    let ids = seed(&f.store).await;
    let uri = format!("/api/notes/{}", ids[0]);
    let update = json!({"title": "What about dogs?!", "content": "woof woof", "tags": [2]});
    let (status, _, body) = send(&f.app, Method::PUT, &uri, Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], ids[0]);
    assert_eq!(body["title"], "What about dogs?!");
    assert_eq!(body["content"], "woof woof");
    assert_eq!(body["folder"]["name"], "Work");
    assert_eq!(body["tags"], json!([{"id": 2, "name": "bar"}]));

    let (_, _, body) = send(&f.app, Method::PUT, &uri, Some(json!({"title": "Dogs", "folderId": null}))).await;
    assert!(body.get("folder").is_none());
    assert_eq!(body["content"], "woof woof");
}

#[tokio::test]
async fn update_note_errors() {
    let f = fixture();
    let ids = seed(&f.store).await;
    let (status, _, _) = send(&f.app, Method::PUT, "/api/notes/321312312", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let uri = format!("/api/notes/{}", ids[0]);
    let (status, _, body) = send(&f.app, Method::PUT, &uri, Some(json!({"foo": "bar"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing `title` in request body");
}

#[tokio::test]
async fn delete_note_is_204_even_when_missing() {
    let f = fixture();
    let ids = seed(&f.store).await;
    let uri = format!("/api/notes/{}", ids[0]);
    let (status, _, _) = send(&f.app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, _) = send(&f.app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&f.app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn folder_crud() {
    let f = fixture();
    let (status, location, body) = send(&f.app, Method::POST, "/api/folders", Some(json!({"name": "Drafts"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    assert_eq!(location, Some(format!("/api/folders/{}", id)));

    let uri = format!("/api/folders/{}", id);
    let (status, _, body) = send(&f.app, Method::PUT, &uri, Some(json!({"name": "Ideas"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "name": "Ideas"}));

    let (status, _, body) = send(&f.app, Method::PUT, &uri, Some(json!({"foo": "bar"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "missing name");

    let (status, _, _) = send(&f.app, Method::PUT, "/api/folders/421412421", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, list) = send(&f.app, Method::GET, "/api/folders", None).await;
    assert_eq!(list, json!([{"id": id, "name": "Ideas"}]));

    let (status, _, _) = send(&f.app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, _) = send(&f.app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_folder_keeps_its_notes() {
    let f = fixture();
    let ids = seed(&f.store).await;
    let (status, _, _) = send(&f.app, Method::DELETE, "/api/folders/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, body) = send(&f.app, Method::GET, &format!("/api/notes/{}", ids[0]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("folder").is_none());
}

#[tokio::test]
async fn tag_crud_and_conflicts() {
    let f = fixture();
    let ids = seed(&f.store).await;
    let (status, _, body) = send(&f.app, Method::POST, "/api/tags", Some(json!({"name": "foo"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "conflict");

    let (status, _, body) = send(&f.app, Method::POST, "/api/tags", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "missing name");

    let (status, _, body) = send(&f.app, Method::PUT, "/api/tags/1", Some(json!({"name": "test21421412"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "test21421412"}));

    let (status, _, _) = send(&f.app, Method::DELETE, "/api/tags/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, _, note) = send(&f.app, Method::GET, &format!("/api/notes/{}", ids[0]), None).await;
    assert_eq!(note["tags"], json!([{"id": 2, "name": "bar"}]));
    let (_, _, tags) = send(&f.app, Method::GET, "/api/tags", None).await;
    assert_eq!(tags, json!([{"id": 2, "name": "bar"}]));
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    let f = fixture();
    let (status, _, body) = send(&f.app, Method::POST, "/api/tags", Some(json!(["foo"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn malformed_json_gets_json_error() {
    let f = fixture();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/folders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = f.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "bad_request");
    assert!(body["message"].as_str().unwrap().starts_with("bad request:"));
}
