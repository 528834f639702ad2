//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Mapping, RedirectMode};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Row shape of the `short_urls` table.
#[derive(Debug, FromRow)]
struct MappingRow {
    key: String,
    target: String,
    redirect_mode: i16,
    safe: Option<bool>,
    qr_enabled: bool,
    interstitial_enabled: bool,
    sponsor: Option<String>,
    origin: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for Mapping {
    fn from(row: MappingRow) -> Self {
        Mapping {
            key: row.key,
            target: row.target,
            redirect_mode: RedirectMode::from_db(row.redirect_mode),
            safe: row.safe,
            qr_enabled: row.qr_enabled,
            interstitial_enabled: row.interstitial_enabled,
            sponsor: row.sponsor,
            origin: row.origin,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for mappings.
///
/// The primary key on `short_urls.key` rejects duplicate inserts; the
/// resulting unique violation surfaces as [`AppError::Conflict`].
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find(&self, key: &str) -> Result<Option<Mapping>, AppError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT key, target, redirect_mode, safe, qr_enabled,
                   interstitial_enabled, sponsor, origin, created_at
            FROM short_urls
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mapping::from))
    }

    async fn save(&self, mapping: Mapping) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO short_urls
                (key, target, redirect_mode, safe, qr_enabled,
                 interstitial_enabled, sponsor, origin, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&mapping.key)
        .bind(&mapping.target)
        .bind(mapping.redirect_mode.as_db())
        .bind(mapping.safe)
        .bind(mapping.qr_enabled)
        .bind(mapping.interstitial_enabled)
        .bind(&mapping.sponsor)
        .bind(&mapping.origin)
        .bind(mapping.created_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
