mod common;

use axum::http::StatusCode;
use link_resolver::api::dto::link::CreateLinkResponse;
use link_resolver::domain::entities::RedirectMode;
use link_resolver::domain::repositories::MappingRepository;
use link_resolver::state::StateOptions;
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_derived_key() {
    let ctx = common::create_test_context();
    let server = common::test_server(ctx.state.clone());

    let response = server
        .post("/api/link")
        .json(&json!({ "url": "http://example.com/" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.header("location"),
        "http://short.test/f684a3c4"
    );

    let body: CreateLinkResponse = response.json();
    assert_eq!(body.url, "http://short.test/f684a3c4");
    assert_eq!(body.properties.safe, None);
    assert!(!body.properties.interstitial);
    assert!(body.qr.is_none());

    let stored = ctx.mappings.find("f684a3c4").await.unwrap().unwrap();
    assert_eq!(stored.target, "http://example.com/");
    assert_eq!(stored.origin.as_deref(), Some("127.0.0.1"));
    assert_eq!(ctx.reachability.probes(), 1);
}

#[tokio::test]
async fn test_create_is_idempotent() {
    let ctx = common::create_test_context();
    let server = common::test_server(ctx.state.clone());

    for _ in 0..2 {
        server
            .post("/api/link")
            .json(&json!({ "url": "https://rust-lang.org/", "custom_word": "rust" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    assert_eq!(ctx.mappings.count().await.unwrap(), 1);
    // The second call finds the mapping before probing.
    assert_eq!(ctx.reachability.probes(), 1);
}

#[tokio::test]
async fn test_custom_word_in_use() {
    let ctx = common::create_test_context();
    let server = common::test_server(ctx.state.clone());

    server
        .post("/api/link")
        .json(&json!({ "url": "https://a.example/", "custom_word": "promo" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/link")
        .json(&json!({ "url": "https://b.example/", "custom_word": "promo" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "custom_word_in_use");

    let stored = ctx.mappings.find("promo").await.unwrap().unwrap();
    assert_eq!(stored.target, "https://a.example/");
}

#[tokio::test]
async fn test_invalid_custom_word_skips_probe() {
    let ctx = common::create_test_context();
    let server = common::test_server(ctx.state.clone());

    let response = server
        .post("/api/link")
        .json(&json!({ "url": "https://example.com/", "custom_word": "bad word" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_custom_word");
    assert_eq!(ctx.reachability.probes(), 0);
    assert_eq!(ctx.mappings.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_unsupported_scheme() {
    let ctx = common::create_test_context();
    let server = common::test_server(ctx.state.clone());

    let response = server
        .post("/api/link")
        .json(&json!({ "url": "ftp://example.com/" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_url");
    assert_eq!(ctx.reachability.probes(), 0);
}

#[tokio::test]
async fn test_unreachable_target_not_stored() {
    let ctx = common::create_test_context();
    ctx.reachability.set_reachable(false);
    let server = common::test_server(ctx.state.clone());

    let response = server
        .post("/api/link")
        .json(&json!({ "url": "https://down.example/" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "url_not_reachable");
    assert_eq!(ctx.mappings.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_probe_disabled_by_option() {
    let ctx = common::create_test_context_with(StateOptions {
        verify_reachability_on_create: false,
        ..StateOptions::default()
    });
    ctx.reachability.set_reachable(false);
    let server = common::test_server(ctx.state.clone());

    server
        .post("/api/link")
        .json(&json!({ "url": "https://down.example/" }))
        .await
        .assert_status(StatusCode::CREATED);

    assert_eq!(ctx.reachability.probes(), 0);
}

#[tokio::test]
async fn test_properties_round_trip() {
    let ctx = common::create_test_context();
    let server = common::test_server(ctx.state.clone());

    let response = server
        .post("/api/link")
        .json(&json!({
            "url": "https://example.com/",
            "custom_word": "qrpromo",
            "sponsor": "acme",
            "qr": true,
            "interstitial": true,
            "permanent": true
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: CreateLinkResponse = response.json();
    assert!(body.properties.interstitial);
    assert!(body.properties.qr);
    assert_eq!(
        body.qr.as_deref(),
        Some("http://short.test/api/link/qrpromo/qr")
    );

    let stored = ctx.mappings.find("qrpromo").await.unwrap().unwrap();
    assert_eq!(stored.redirect_mode, RedirectMode::Permanent);
    assert_eq!(stored.sponsor.as_deref(), Some("acme"));
}

#[tokio::test]
async fn test_empty_url_rejected() {
    let ctx = common::create_test_context();
    let server = common::test_server(ctx.state);

    let response = server
        .post("/api/link")
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_forwarded_origin_only_behind_proxy() {
    let ctx = common::create_test_context_with(StateOptions {
        behind_proxy: true,
        ..StateOptions::default()
    });
    let server = common::test_server(ctx.state.clone());

    server
        .post("/api/link")
        .add_header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .json(&json!({ "url": "https://example.com/" }))
        .await
        .assert_status(StatusCode::CREATED);

    let key = link_resolver::utils::key_digest::digest_key("https://example.com/");
    let stored = ctx.mappings.find(&key).await.unwrap().unwrap();
    assert_eq!(stored.origin.as_deref(), Some("203.0.113.7"));
}
