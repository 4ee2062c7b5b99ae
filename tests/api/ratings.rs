use butterfly_api::RatedButterfly;
use serde_json::{json, Value};

use crate::support::{spawn_app, TestApp};

async fn rate(app: &TestApp, butterfly_id: &str, body: Value) -> reqwest::Response {
    app.client
        .post(app.url(&format!("/butterflies/{butterfly_id}/rate")))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn rated(app: &TestApp, user_id: &str) -> Vec<RatedButterfly> {
    let resp = app
        .client
        .get(app.url(&format!("/users/{user_id}/rated-butterflies")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

async fn create(app: &TestApp, id: &str, name: &str) {
    app.ids.push(id);
    let resp = app
        .client
        .post(app.url("/butterflies"))
        .json(&json!({ "commonName": name, "species": "S", "article": "https://x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn rate_returns_only_applied_rating() {
    let app = spawn_app().await;

    rate(&app, "wxyz9876", json!({ "userId": "U2", "rating": 5 })).await;
    let resp = rate(&app, "wxyz9876", json!({ "userId": "U1", "rating": 4 })).await;
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].is_string());
    assert_eq!(body["rating"]["userId"], "U1");
    assert_eq!(body["rating"]["rating"], 4.0);
    assert_eq!(body["rating"].as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn rerate_overwrites_and_listing_is_per_user() {
    let app = spawn_app().await;

    rate(&app, "wxyz9876", json!({ "userId": "U1", "rating": 4 })).await;
    rate(&app, "wxyz9876", json!({ "userId": "U1", "rating": 2 })).await;
    rate(&app, "wxyz9876", json!({ "userId": "U2", "rating": 5 })).await;

    let butterfly: Value = app
        .client
        .get(app.url("/butterflies/wxyz9876"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        butterfly["ratings"],
        json!([
            { "userId": "U1", "rating": 2.0 },
            { "userId": "U2", "rating": 5.0 }
        ])
    );

    let u1 = rated(&app, "U1").await;
    assert_eq!(u1.len(), 1);
    assert_eq!(u1[0].id, "wxyz9876");
    assert_eq!(u1[0].common_name, "test-butterfly");
    assert_eq!(u1[0].rating, 2.0);

    let u2 = rated(&app, "U2").await;
    assert_eq!(u2.len(), 1);
    assert_eq!(u2[0].rating, 5.0);
}

#[tokio::test]
async fn listing_is_sorted_by_rating() {
    let app = spawn_app().await;
    create(&app, "B1", "first").await;
    create(&app, "B2", "second").await;

    rate(&app, "B1", json!({ "userId": "U1", "rating": 3 })).await;
    rate(&app, "B2", json!({ "userId": "U1", "rating": 5 })).await;

    let ids: Vec<String> = rated(&app, "U1").await.into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["B2", "B1"]);
}

#[tokio::test]
async fn listing_keeps_insertion_order_for_ties() {
    let app = spawn_app().await;
    create(&app, "B1", "first").await;
    create(&app, "B2", "second").await;
    create(&app, "B3", "third").await;

    rate(&app, "B3", json!({ "userId": "U1", "rating": 4 })).await;
    rate(&app, "B1", json!({ "userId": "U1", "rating": 4 })).await;
    rate(&app, "wxyz9876", json!({ "userId": "U1", "rating": 1.5 })).await;
    rate(&app, "B2", json!({ "userId": "U1", "rating": 4 })).await;

    let ranked = rated(&app, "U1").await;
    let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["B1", "B2", "B3", "wxyz9876"]);
    assert_eq!(ranked[3].rating, 1.5);
}

#[tokio::test]
async fn listing_for_user_without_ratings_is_empty() {
    let app = spawn_app().await;

    let resp = app
        .client
        .get(app.url("/users/abcd1234/rated-butterflies"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn invalid_ratings_are_rejected_without_mutation() {
    let app = spawn_app().await;
    let before = app.service.store().snapshot().unwrap();

    let bodies = [
        json!({ "userId": "U1", "rating": 5.5 }),
        json!({ "userId": "U1", "rating": -1 }),
        json!({ "userId": "U1", "rating": "4" }),
        json!({ "userId": "U1", "rating": null }),
        json!({ "userId": "U1" }),
        json!({ "rating": 3 }),
        json!({ "userId": 7, "rating": 3 }),
    ];

    for body in bodies {
        let resp = rate(&app, "wxyz9876", body.clone()).await;
        assert_eq!(resp.status(), 400, "body: {body}");
        let resp_body: Value = resp.json().await.unwrap();
        assert_eq!(resp_body, json!({ "error": "Invalid request body" }));
    }

    assert_eq!(app.service.store().snapshot().unwrap(), before);
}

#[tokio::test]
async fn rating_unknown_butterfly_is_not_found() {
    let app = spawn_app().await;

    let resp = rate(&app, "ghost", json!({ "userId": "U1", "rating": 3 })).await;
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Not found" }));

    let resp = app
        .client
        .get(app.url("/butterflies/ghost"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn rating_may_reference_unknown_user() {
    let app = spawn_app().await;

    let resp = rate(&app, "wxyz9876", json!({ "userId": "nobody", "rating": 0 })).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(rated(&app, "nobody").await.len(), 1);
}
