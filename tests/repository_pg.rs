//! PostgreSQL repository tests. Need `DATABASE_URL`; run with
//! `cargo test -- --ignored`.

use link_resolver::domain::entities::{Mapping, MappingProperties, NewClick, RedirectMode};
use link_resolver::domain::repositories::{ClickRepository, MappingRepository};
use link_resolver::error::AppError;
use link_resolver::infrastructure::persistence::{PgClickRepository, PgMappingRepository};
use sqlx::PgPool;
use std::sync::Arc;

fn mapping(key: &str, target: &str) -> Mapping {
    Mapping::new(
        key.to_string(),
        target.to_string(),
        MappingProperties {
            redirect_mode: RedirectMode::Permanent,
            safe: Some(true),
            qr: true,
            interstitial: true,
            sponsor: Some("acme".to_string()),
            origin: Some("127.0.0.1".to_string()),
        },
    )
}

#[sqlx::test]
#[ignore]
async fn test_save_and_find(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    repo.save(mapping("promo", "https://example.com/"))
        .await
        .unwrap();

    let found = repo.find("promo").await.unwrap().unwrap();
    assert_eq!(found.target, "https://example.com/");
    assert_eq!(found.redirect_mode, RedirectMode::Permanent);
    assert_eq!(found.safe, Some(true));
    assert!(found.qr_enabled);
    assert!(found.interstitial_enabled);
    assert_eq!(found.sponsor.as_deref(), Some("acme"));
    assert_eq!(found.origin.as_deref(), Some("127.0.0.1"));
}

#[sqlx::test]
#[ignore]
async fn test_find_missing(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));
    assert!(repo.find("missing").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore]
async fn test_duplicate_key_conflicts(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    repo.save(mapping("promo", "https://a.example/"))
        .await
        .unwrap();
    let err = repo
        .save(mapping("promo", "https://b.example/"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(repo.count().await.unwrap(), 1);
    assert_eq!(
        repo.find("promo").await.unwrap().unwrap().target,
        "https://a.example/"
    );
}

#[sqlx::test]
#[ignore]
async fn test_clicks(pool: PgPool) {
    let pool = Arc::new(pool);
    let mappings = PgMappingRepository::new(pool.clone());
    let clicks = PgClickRepository::new(pool);

    mappings
        .save(mapping("promo", "https://example.com/"))
        .await
        .unwrap();

    for _ in 0..3 {
        clicks
            .save(NewClick {
                key: "promo".to_string(),
                user_agent: Some("TestBot/1.0".to_string()),
                referer: None,
                ip: Some("127.0.0.1".to_string()),
            })
            .await
            .unwrap();
    }

    assert_eq!(clicks.count().await.unwrap(), 3);
}
