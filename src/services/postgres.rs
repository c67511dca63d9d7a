use crate::models::Recommendation;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Upsert failed for college {college_id} ({remaining} writes not attempted): {source}")]
    UpsertFailed {
        college_id: String,
        remaining: usize,
        source: sqlx::Error,
    },
}

/// A persisted recommendation row, as read back for dashboard consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecommendation {
    pub user_id: String,
    pub college_id: String,
    pub match_score: i32,
    pub fit_category: String,
    pub reasoning: String,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub ai_insights: serde_json::Value,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// PostgreSQL client for the recommendation store
///
/// Recommendations are uniquely keyed by (user_id, college_id);
/// regeneration overwrites the prior row in place, so no history
/// accumulates.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Persist a ranked batch of recommendations for a user
    ///
    /// Writes are issued one at a time so a failure is attributable to a
    /// single college. The first failure aborts the batch and the error
    /// names the failed college id plus how many writes were not
    /// attempted. Retrying is safe: every write is an idempotent upsert.
    pub async fn save_recommendations(
        &self,
        user_id: &str,
        recommendations: &[Recommendation],
    ) -> Result<(), PostgresError> {
        for (idx, rec) in recommendations.iter().enumerate() {
            if let Err(e) = self.upsert_recommendation(user_id, rec).await {
                let remaining = recommendations.len() - idx - 1;
                return Err(match e {
                    PostgresError::SqlxError(source) => PostgresError::UpsertFailed {
                        college_id: rec.college_id.clone(),
                        remaining,
                        source,
                    },
                    other => other,
                });
            }
        }

        tracing::debug!(
            "Persisted {} recommendations for user {}",
            recommendations.len(),
            user_id
        );

        Ok(())
    }

    /// Upsert one recommendation keyed by (user_id, college_id)
    ///
    /// If the pair exists, every field is overwritten; otherwise a new
    /// row is inserted.
    pub async fn upsert_recommendation(
        &self,
        user_id: &str,
        rec: &Recommendation,
    ) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO recommendations
                (user_id, college_id, match_score, fit_category, reasoning,
                 strengths, concerns, ai_insights, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            ON CONFLICT (user_id, college_id)
            DO UPDATE SET
                match_score = EXCLUDED.match_score,
                fit_category = EXCLUDED.fit_category,
                reasoning = EXCLUDED.reasoning,
                strengths = EXCLUDED.strengths,
                concerns = EXCLUDED.concerns,
                ai_insights = EXCLUDED.ai_insights,
                updated_at = EXCLUDED.updated_at
        "#;

        let ai_insights = serde_json::to_value(&rec.ai_insights)?;

        sqlx::query(query)
            .bind(user_id)
            .bind(&rec.college_id)
            .bind(rec.match_score as i32)
            .bind(rec.fit_category.as_str())
            .bind(&rec.reasoning)
            .bind(&rec.strengths)
            .bind(&rec.concerns)
            .bind(ai_insights)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Read back a user's persisted recommendations, best score first
    pub async fn list_recommendations(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<StoredRecommendation>, PostgresError> {
        let query = r#"
            SELECT user_id, college_id, match_score, fit_category, reasoning,
                   strengths, concerns, ai_insights, updated_at
            FROM recommendations
            WHERE user_id = $1
            ORDER BY match_score DESC, college_id
            LIMIT $2 OFFSET $3
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        let recommendations = rows
            .iter()
            .map(|row| StoredRecommendation {
                user_id: row.get("user_id"),
                college_id: row.get("college_id"),
                match_score: row.get("match_score"),
                fit_category: row.get("fit_category"),
                reasoning: row.get("reasoning"),
                strengths: row.get("strengths"),
                concerns: row.get("concerns"),
                ai_insights: row.get("ai_insights"),
                updated_at: row.get("updated_at"),
            })
            .collect();

        Ok(recommendations)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
