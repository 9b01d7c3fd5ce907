use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use orgdir_application::{ActivityLogRepository, ActivityQuery, NewActivityEntry};
use orgdir_core::{AppError, AppResult};
use orgdir_domain::{ActivityAction, ActivityEntry, ActivityKind};

/// PostgreSQL-backed append-only activity log.
#[derive(Clone)]
pub struct PostgresActivityLogRepository {
    pool: PgPool,
}

impl PostgresActivityLogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActivityRow {
    id: i64,
    kind: String,
    name: String,
    action: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ActivityRow> for ActivityEntry {
    type Error = AppError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            kind: ActivityKind::from_str(row.kind.as_str())?,
            name: row.name,
            action: ActivityAction::from_str(row.action.as_str())?,
            timestamp: row.created_at,
        })
    }
}

#[async_trait]
impl ActivityLogRepository for PostgresActivityLogRepository {
    async fn append(&self, entry: NewActivityEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_log (kind, name, action)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(entry.kind.as_str())
        .bind(entry.name)
        .bind(entry.action.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append activity entry: {error}")))?;

        Ok(())
    }

    async fn list_recent(&self, query: ActivityQuery) -> AppResult<Vec<ActivityEntry>> {
        let limit = i64::try_from(query.limit)
            .map_err(|_| AppError::Validation("limit is out of range".to_owned()))?;
        let offset = i64::try_from(query.offset)
            .map_err(|_| AppError::Validation("offset is out of range".to_owned()))?;

        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, kind, name, action, created_at
            FROM activity_log
            WHERE ($1::TEXT IS NULL OR kind = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            OFFSET $3
            "#,
        )
        .bind(query.kind.map(|kind| kind.as_str()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list activity entries: {error}")))?;

        rows.into_iter().map(ActivityEntry::try_from).collect()
    }
}
