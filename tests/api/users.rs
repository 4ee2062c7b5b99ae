use serde_json::{json, Value};

use crate::support::spawn_app;

#[tokio::test]
async fn get_user() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(app.url("/users/abcd1234"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": "abcd1234", "username": "test-user" }));
}

#[tokio::test]
async fn get_user_not_found() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(app.url("/users/bad-id"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn create_then_get_user() {
    let app = spawn_app().await;
    app.ids.push("new-user-id");

    let resp = app
        .client
        .post(app.url("/users"))
        .json(&json!({ "username": "Buster" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": "new-user-id", "username": "Buster" }));

    let resp = app
        .client
        .get(app.url("/users/new-user-id"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "id": "new-user-id", "username": "Buster" }));
}

#[tokio::test]
async fn create_user_rejects_bad_bodies() {
    let app = spawn_app().await;

    let resp = app.client.post(app.url("/users")).send().await.unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid request body" }));

    let resp = app
        .client
        .post(app.url("/users"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid request body" }));
}
