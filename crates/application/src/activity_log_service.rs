//! Append-only activity log.
//!
//! Entries are written after the owning unit of work has committed. A failed
//! append is reported through `tracing` and never fails the mutation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use orgdir_core::{AppError, AppResult};
use orgdir_domain::{ActivityAction, ActivityEntry, ActivityKind};

/// Upper bound for one page of activity entries.
pub const ACTIVITY_PAGE_MAX: usize = 500;

/// Activity entry payload before the repository stamps id and time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivityEntry {
    /// Entity kind.
    pub kind: ActivityKind,
    /// Human-readable subject name.
    pub name: String,
    /// Mutation performed.
    pub action: ActivityAction,
}

/// Query parameters for activity listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityQuery {
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
    /// Optional kind filter.
    pub kind: Option<ActivityKind>,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
            kind: None,
        }
    }
}

/// Repository port for activity log persistence.
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Appends one entry.
    async fn append(&self, entry: NewActivityEntry) -> AppResult<()>;

    /// Lists entries newest first.
    async fn list_recent(&self, query: ActivityQuery) -> AppResult<Vec<ActivityEntry>>;
}

/// Application service for activity recording.
#[derive(Clone)]
pub struct ActivityLogService {
    repository: Arc<dyn ActivityLogRepository>,
}

impl ActivityLogService {
    /// Creates a service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn ActivityLogRepository>) -> Self {
        Self { repository }
    }

    /// Appends an entry, swallowing and logging any failure.
    pub async fn record(
        &self,
        kind: ActivityKind,
        name: impl Into<String>,
        action: ActivityAction,
    ) {
        let entry = NewActivityEntry {
            kind,
            name: name.into(),
            action,
        };

        if let Err(error) = self.repository.append(entry.clone()).await {
            warn!(
                error = %error,
                kind = entry.kind.as_str(),
                action = entry.action.as_str(),
                name = %entry.name,
                "failed to append activity log entry"
            );
        }
    }

    /// Returns the most recent entries.
    pub async fn recent(&self, query: ActivityQuery) -> AppResult<Vec<ActivityEntry>> {
        if query.limit == 0 || query.limit > ACTIVITY_PAGE_MAX {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {ACTIVITY_PAGE_MAX}"
            )));
        }

        self.repository.list_recent(query).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Mutex;

    use orgdir_core::{AppError, AppResult};
    use orgdir_domain::{ActivityAction, ActivityEntry, ActivityKind};

    use super::{ActivityLogRepository, ActivityLogService, ActivityQuery, NewActivityEntry};

    #[derive(Default)]
    struct RecordingRepository {
        entries: Mutex<Vec<NewActivityEntry>>,
    }

    #[async_trait]
    impl ActivityLogRepository for RecordingRepository {
        async fn append(&self, entry: NewActivityEntry) -> AppResult<()> {
            self.entries.lock().await.push(entry);
            Ok(())
        }

        async fn list_recent(&self, query: ActivityQuery) -> AppResult<Vec<ActivityEntry>> {
            let entries = self.entries.lock().await;
            Ok(entries
                .iter()
                .enumerate()
                .rev()
                .skip(query.offset)
                .take(query.limit)
                .map(|(index, entry)| ActivityEntry {
                    id: index as i64 + 1,
                    kind: entry.kind,
                    name: entry.name.clone(),
                    action: entry.action,
                    timestamp: Utc::now(),
                })
                .collect())
        }
    }

    struct FailingRepository;

    #[async_trait]
    impl ActivityLogRepository for FailingRepository {
        async fn append(&self, _entry: NewActivityEntry) -> AppResult<()> {
            Err(AppError::Internal("activity table unavailable".to_owned()))
        }

        async fn list_recent(&self, _query: ActivityQuery) -> AppResult<Vec<ActivityEntry>> {
            Err(AppError::Internal("activity table unavailable".to_owned()))
        }
    }

    #[tokio::test]
    async fn record_appends_entry() {
        let repository = Arc::new(RecordingRepository::default());
        let service = ActivityLogService::new(repository.clone());

        service
            .record(ActivityKind::Organisation, "Acme", ActivityAction::Create)
            .await;

        let entries = repository.entries.lock().await;
        assert_eq!(
            entries.as_slice(),
            &[NewActivityEntry {
                kind: ActivityKind::Organisation,
                name: "Acme".to_owned(),
                action: ActivityAction::Create,
            }]
        );
    }

    #[tokio::test]
    async fn record_swallows_repository_failures() {
        let service = ActivityLogService::new(Arc::new(FailingRepository));
        service
            .record(ActivityKind::Project, "Apollo", ActivityAction::Delete)
            .await;
    }

    #[tokio::test]
    async fn recent_returns_newest_first() {
        let repository = Arc::new(RecordingRepository::default());
        let service = ActivityLogService::new(repository);
        service
            .record(ActivityKind::Employee, "Ada Lovelace", ActivityAction::Create)
            .await;
        service
            .record(ActivityKind::Employee, "Ada Lovelace", ActivityAction::Update)
            .await;

        let entries = service.recent(ActivityQuery::default()).await;
        assert!(entries.is_ok());
        let entries = entries.unwrap_or_default();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, ActivityAction::Update);
    }

    #[tokio::test]
    async fn recent_rejects_out_of_range_limits() {
        let service = ActivityLogService::new(Arc::new(RecordingRepository::default()));
        let result = service
            .recent(ActivityQuery {
                limit: 0,
                ..ActivityQuery::default()
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
