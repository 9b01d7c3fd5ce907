use async_trait::async_trait;
use chrono::Utc;
use orgdir_application::{ActivityLogRepository, ActivityQuery, NewActivityEntry};
use orgdir_core::AppResult;
use orgdir_domain::ActivityEntry;
use tokio::sync::RwLock;

/// In-memory activity log. Entries live until the process exits.
#[derive(Debug, Default)]
pub struct InMemoryActivityLogRepository {
    entries: RwLock<Vec<ActivityEntry>>,
}

impl InMemoryActivityLogRepository {
    /// Creates an empty activity log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityLogRepository for InMemoryActivityLogRepository {
    async fn append(&self, entry: NewActivityEntry) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        let id = entries.last().map_or(1, |last| last.id + 1);

        entries.push(ActivityEntry {
            id,
            kind: entry.kind,
            name: entry.name,
            action: entry.action,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn list_recent(&self, query: ActivityQuery) -> AppResult<Vec<ActivityEntry>> {
        let entries = self.entries.read().await;

        Ok(entries
            .iter()
            .rev()
            .filter(|entry| query.kind.is_none_or(|kind| entry.kind == kind))
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use orgdir_application::{ActivityLogRepository, ActivityQuery, NewActivityEntry};
    use orgdir_core::AppResult;
    use orgdir_domain::{ActivityAction, ActivityKind};

    use super::InMemoryActivityLogRepository;

    async fn append(
        repository: &InMemoryActivityLogRepository,
        kind: ActivityKind,
        name: &str,
    ) -> AppResult<()> {
        repository
            .append(NewActivityEntry {
                kind,
                name: name.to_owned(),
                action: ActivityAction::Create,
            })
            .await
    }

    #[tokio::test]
    async fn list_recent_pages_newest_first() -> AppResult<()> {
        let repository = InMemoryActivityLogRepository::new();
        for name in ["first", "second", "third"] {
            append(&repository, ActivityKind::Organisation, name).await?;
        }

        let page = repository
            .list_recent(ActivityQuery {
                limit: 2,
                offset: 1,
                kind: None,
            })
            .await?;
        let names: Vec<&str> = page.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);
        assert!(page[0].id > page[1].id);
        Ok(())
    }

    #[tokio::test]
    async fn list_recent_filters_by_kind() -> AppResult<()> {
        let repository = InMemoryActivityLogRepository::new();
        append(&repository, ActivityKind::Organisation, "Acme").await?;
        append(&repository, ActivityKind::Employee, "Ada Lovelace").await?;

        let page = repository
            .list_recent(ActivityQuery {
                kind: Some(ActivityKind::Employee),
                ..ActivityQuery::default()
            })
            .await?;
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Ada Lovelace");
        Ok(())
    }
}
