//! Integration tests for the JSON API.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use taplist_integration_tests::{TestApp, assert_pints};

#[tokio::test]
async fn created_beer_is_listed_with_full_keg() {
    let app = TestApp::new().await;
    app.create_beer(&[("name", "Pale Ale"), ("pints_total", "38")])
        .await;

    let response = app.server.get("/api/beers").await;
    response.assert_status_ok();

    let beers: Vec<Value> = response.json();
    assert_eq!(beers.len(), 1);
    assert_eq!(beers[0]["name"], "Pale Ale");
    assert_eq!(beers[0]["pints_remaining"], json!(38.0));
    assert_eq!(beers[0]["is_draft"], json!(false));
    assert_eq!(beers[0]["is_active"], json!(true));
}

#[tokio::test]
async fn listing_orders_by_tap_number() {
    let app = TestApp::new().await;
    app.create_on_tap("Stout", "3", "38").await;
    app.create_on_tap("Lager", "1", "38").await;
    app.create_on_tap("IPA", "2", "38").await;

    let beers: Vec<Value> = app.server.get("/api/beers").await.json();
    let names: Vec<&str> = beers.iter().map(|b| b["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Lager", "IPA", "Stout"]);
}

#[tokio::test]
async fn pour_reduces_remaining_and_bottoms_out_at_zero() {
    let app = TestApp::new().await;
    let beer = app.create_on_tap("Pale Ale", "1", "38").await;
    let path = format!("/api/beers/{}/pour", beer.id);

    let response = app.server.post(&path).json(&json!({"amount": 5})).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], json!(beer.id.as_i64()));
    assert_eq!(body["name"], "Pale Ale");
    assert_eq!(body["pints_remaining"], json!(33.0));
    assert_eq!(body["pints_total"], json!(38.0));

    for _ in 0..3 {
        app.server.post(&path).json(&json!({"amount": 20})).await;
    }
    let body: Value = app.server.post(&path).json(&json!({"amount": 1})).await.json();
    assert_eq!(body["pints_remaining"], json!(0.0));
    assert_pints(app.beer(beer.id).await.pints_remaining, 0.0);
}

#[tokio::test]
async fn pour_without_usable_amount_pours_one_pint() {
    let app = TestApp::new().await;
    let beer = app.create_on_tap("Pale Ale", "1", "38").await;
    let path = format!("/api/beers/{}/pour", beer.id);

    app.server.post(&path).await.assert_status_ok();
    app.server.post(&path).json(&json!({"amount": -4})).await.assert_status_ok();
    app.server.post(&path).json(&json!({"amount": "lots"})).await.assert_status_ok();
    app.server.post(&path).text("{not json").await.assert_status_ok();

    assert_pints(app.beer(beer.id).await.pints_remaining, 34.0);
}

#[tokio::test]
async fn pour_accepts_numeric_strings() {
    let app = TestApp::new().await;
    let beer = app.create_on_tap("Pale Ale", "1", "38").await;

    let body: Value = app
        .server
        .post(&format!("/api/beers/{}/pour", beer.id))
        .json(&json!({"amount": "0.5"}))
        .await
        .json();
    assert_eq!(body["pints_remaining"], json!(37.5));
}

#[tokio::test]
async fn pour_on_missing_beer_is_not_found() {
    let app = TestApp::new().await;

    let response = app.server.post("/api/beers/999/pour").json(&json!({"amount": 1})).await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({"error": "Beer not found"}));

    let response = app.server.post("/api/beers/not-a-number/pour").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reset_pints_restores_full_keg() {
    let app = TestApp::new().await;
    let beer = app.create_on_tap("Pale Ale", "1", "38").await;
    app.server
        .post(&format!("/api/beers/{}/pour", beer.id))
        .json(&json!({"amount": 30}))
        .await;

    let response = app
        .server
        .post(&format!("/api/beers/{}/reset-pints", beer.id))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], json!(beer.id.as_i64()));
    assert_eq!(body["pints_remaining"], json!(38.0));
    assert_eq!(body["tap_number"], json!(1));
}

#[tokio::test]
async fn reset_pints_on_missing_beer_is_not_found() {
    let app = TestApp::new().await;

    let response = app.server.post("/api/beers/42/reset-pints").await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({"error": "Beer not found"}));
}

#[tokio::test]
async fn drafts_are_hidden_until_activated() {
    let app = TestApp::new().await;
    let draft = app
        .create_beer(&[("name", "Saison"), ("is_draft", "on")])
        .await;
    assert!(draft.is_draft);

    let beers: Vec<Value> = app.server.get("/api/beers").await.json();
    assert!(beers.is_empty());

    app.server
        .post(&format!("/admin/beers/{}/activate", draft.id))
        .await;

    let beers: Vec<Value> = app.server.get("/api/beers").await.json();
    assert_eq!(beers.len(), 1);
    assert_eq!(beers[0]["name"], "Saison");
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = TestApp::new().await;

    let response = app.server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("ok");

    app.server.get("/health/ready").await.assert_status_ok();
}
