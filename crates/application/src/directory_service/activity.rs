use orgdir_core::AppResult;
use orgdir_domain::ActivityEntry;

use super::DirectoryService;
use crate::activity_log_service::ActivityQuery;

impl DirectoryService {
    /// Returns recent activity, newest first.
    pub async fn recent_activity(&self, query: ActivityQuery) -> AppResult<Vec<ActivityEntry>> {
        self.activity_log.recent(query).await
    }
}
