//! Integration tests for the admin dashboard, beer forms and lifecycle actions.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use taplist_core::BeerStatus;
use taplist_integration_tests::{TestApp, assert_pints, assert_redirect, text_form};

#[tokio::test]
async fn create_applies_form_defaults() {
    let app = TestApp::new().await;
    let beer = app
        .create_beer(&[("name", "  "), ("abv", "strong"), ("pints_total", "-3")])
        .await;

    assert_eq!(beer.name, "Untitled");
    assert_eq!(beer.tap_number, 0);
    assert_pints(beer.abv, 0.0);
    assert_pints(beer.pints_total, 38.0);
    assert_pints(beer.pints_remaining, 38.0);
    assert_eq!(beer.status(), BeerStatus::OnTap);
    assert!(beer.image_path.is_empty());
}

#[tokio::test]
async fn create_records_every_field() {
    let app = TestApp::new().await;
    let beer = app
        .create_beer(&[
            ("tap_number", "4"),
            ("name", "Hazy IPA"),
            ("description", "Juicy"),
            ("abv", "6.8"),
            ("style", "NEIPA"),
            ("brewery", "Hop Shed"),
            ("pints_total", "50"),
            ("is_draft", "1"),
        ])
        .await;

    assert_eq!(beer.tap_number, 4);
    assert_eq!(beer.name, "Hazy IPA");
    assert_eq!(beer.description, "Juicy");
    assert_pints(beer.abv, 6.8);
    assert_eq!(beer.style, "NEIPA");
    assert_eq!(beer.brewery, "Hop Shed");
    assert_pints(beer.pints_total, 50.0);
    assert_eq!(beer.status(), BeerStatus::Draft);
}

#[tokio::test]
async fn changing_keg_size_resets_remaining() {
    let app = TestApp::new().await;
    let beer = app.create_on_tap("Pale Ale", "1", "38").await;
    app.server
        .post(&format!("/api/beers/{}/pour", beer.id))
        .json(&json!({"amount": 28}))
        .await;

    let response = app
        .server
        .post(&format!("/admin/beers/{}", beer.id))
        .multipart(text_form(&[
            ("name", "Pale Ale"),
            ("tap_number", "1"),
            ("pints_total", "50"),
        ]))
        .await;
    assert_redirect(&response, "/admin");

    let beer = app.beer(beer.id).await;
    assert_pints(beer.pints_total, 50.0);
    assert_pints(beer.pints_remaining, 50.0);
}

#[tokio::test]
async fn keeping_keg_size_keeps_remaining() {
    let app = TestApp::new().await;
    let beer = app.create_on_tap("Pale Ale", "1", "38").await;
    app.server
        .post(&format!("/api/beers/{}/pour", beer.id))
        .json(&json!({"amount": 8}))
        .await;

    for total in ["38", "", "bogus"] {
        app.server
            .post(&format!("/admin/beers/{}", beer.id))
            .multipart(text_form(&[
                ("name", "Pale Ale v2"),
                ("tap_number", "2"),
                ("pints_total", total),
            ]))
            .await;

        let updated = app.beer(beer.id).await;
        assert_pints(updated.pints_total, 38.0);
        assert_pints(updated.pints_remaining, 30.0);
        assert_eq!(updated.name, "Pale Ale v2");
        assert_eq!(updated.tap_number, 2);
    }
}

#[tokio::test]
async fn update_takes_draft_flag_from_form() {
    let app = TestApp::new().await;
    let beer = app.create_on_tap("Porter", "5", "38").await;

    app.server
        .post(&format!("/admin/beers/{}", beer.id))
        .multipart(text_form(&[("name", "Porter"), ("is_draft", "on")]))
        .await;
    assert!(app.beer(beer.id).await.is_draft);

    app.server
        .post(&format!("/admin/beers/{}", beer.id))
        .multipart(text_form(&[("name", "Porter")]))
        .await;
    assert!(!app.beer(beer.id).await.is_draft);
}

#[tokio::test]
async fn soft_delete_is_idempotent() {
    let app = TestApp::new().await;
    let beer = app.create_on_tap("Pale Ale", "1", "38").await;
    let path = format!("/admin/beers/{}/delete", beer.id);

    assert_redirect(&app.server.post(&path).await, "/admin");
    assert_redirect(&app.server.post(&path).await, "/admin");

    let archived = app.beer(beer.id).await;
    assert!(!archived.is_active);
    assert_eq!(archived.status(), BeerStatus::Archived);
    assert!(app.beers().list_active().await.unwrap().is_empty());
}

#[tokio::test]
async fn activate_fills_keg_and_to_draft_keeps_pints() {
    let app = TestApp::new().await;
    let beer = app
        .create_beer(&[("name", "Saison"), ("is_draft", "on"), ("pints_total", "20")])
        .await;
    app.server
        .post(&format!("/api/beers/{}/pour", beer.id))
        .json(&json!({"amount": 5}))
        .await;

    let response = app
        .server
        .post(&format!("/admin/beers/{}/activate", beer.id))
        .await;
    assert_redirect(&response, "/admin");
    let active = app.beer(beer.id).await;
    assert!(!active.is_draft);
    assert_pints(active.pints_remaining, 20.0);

    app.server
        .post(&format!("/api/beers/{}/pour", beer.id))
        .json(&json!({"amount": 3}))
        .await;
    let response = app
        .server
        .post(&format!("/admin/beers/{}/to-draft", beer.id))
        .await;
    assert_redirect(&response, "/admin");
    let drafted = app.beer(beer.id).await;
    assert!(drafted.is_draft);
    assert_pints(drafted.pints_remaining, 17.0);
}

#[tokio::test]
async fn archived_beers_cannot_be_revived() {
    let app = TestApp::new().await;
    let beer = app.create_on_tap("Pale Ale", "1", "38").await;
    app.server
        .post(&format!("/admin/beers/{}/delete", beer.id))
        .await;

    for action in ["activate", "to-draft"] {
        let response = app
            .server
            .post(&format!("/admin/beers/{}/{action}", beer.id))
            .await;
        assert_redirect(&response, "/admin");
    }

    assert_eq!(app.beer(beer.id).await.status(), BeerStatus::Archived);
}

#[tokio::test]
async fn actions_on_missing_beer_redirect_to_dashboard() {
    let app = TestApp::new().await;

    for path in [
        "/admin/beers/77/delete",
        "/admin/beers/77/activate",
        "/admin/beers/77/to-draft",
        "/admin/beers/abc/delete",
    ] {
        assert_redirect(&app.server.post(path).await, "/admin");
    }

    let response = app
        .server
        .post("/admin/beers/77")
        .multipart(text_form(&[("name", "Ghost")]))
        .await;
    assert_redirect(&response, "/admin");

    assert_redirect(&app.server.get("/admin/beers/77/edit").await, "/admin");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM beers")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn dashboard_groups_beers() {
    let app = TestApp::new().await;
    app.create_on_tap("Lager", "1", "38").await;
    app.create_beer(&[("name", "Winter Warmer"), ("is_draft", "on")])
        .await;
    let archived = app.create_on_tap("Old Ale", "2", "38").await;
    app.server
        .post(&format!("/admin/beers/{}/delete", archived.id))
        .await;

    let response = app.server.get("/admin").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("On tap (1)"));
    assert!(html.contains("Drafts (1)"));
    assert!(html.contains("All beers (2)"));
    assert!(html.contains("Winter Warmer"));
    assert!(!html.contains("Old Ale"));
}

#[tokio::test]
async fn forms_render() {
    let app = TestApp::new().await;
    let beer = app.create_on_tap("Kölsch", "6", "38").await;

    let response = app.server.get("/admin/beers/new").await;
    response.assert_status_ok();
    assert!(response.text().contains("Add beer"));

    let response = app.server.get(&format!("/admin/beers/{}/edit", beer.id)).await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Save changes"));
    assert!(html.contains("Kölsch"));
}

#[tokio::test]
async fn public_pages_show_only_beers_on_tap() {
    let app = TestApp::new().await;
    app.create_on_tap("Pilsner", "1", "38").await;
    app.create_beer(&[("name", "Secret Sour"), ("is_draft", "on")])
        .await;

    for path in ["/", "/pour"] {
        let response = app.server.get(path).await;
        response.assert_status(StatusCode::OK);
        let html = response.text();
        assert!(html.contains("Pilsner"));
        assert!(!html.contains("Secret Sour"));
        assert!(html.contains("My Tap Room"));
    }
}
