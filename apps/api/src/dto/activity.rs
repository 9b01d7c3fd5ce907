use orgdir_domain::ActivityEntry;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::timestamp;

/// Query string accepted by the activity feed.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// One activity log entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/activity-entry-response.ts"
)]
pub struct ActivityEntryResponse {
    #[ts(type = "number")]
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub action: String,
    pub timestamp: String,
}

impl From<ActivityEntry> for ActivityEntryResponse {
    fn from(entry: ActivityEntry) -> Self {
        Self {
            id: entry.id,
            kind: entry.kind.as_str().to_owned(),
            name: entry.name,
            action: entry.action.as_str().to_owned(),
            timestamp: timestamp(entry.timestamp),
        }
    }
}
