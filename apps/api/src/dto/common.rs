use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use orgdir_application::DeletionReport;
use orgdir_domain::CALENDAR_DATE_FORMAT;
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Generic message response.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/message-response.ts"
)]
pub struct MessageResponse {
    pub message: String,
}

/// Counts of dependents removed together with a deleted record.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/deletion-response.ts"
)]
pub struct DeletionResponse {
    pub departments: u32,
    pub projects: u32,
    pub users: u32,
    pub assignments: u32,
}

impl From<DeletionReport> for DeletionResponse {
    fn from(report: DeletionReport) -> Self {
        let count = |value: usize| u32::try_from(value).unwrap_or(u32::MAX);
        Self {
            departments: count(report.departments),
            projects: count(report.projects),
            users: count(report.users),
            assignments: count(report.assignments),
        }
    }
}

pub(super) fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(super) fn calendar_date(value: NaiveDate) -> String {
    value.format(CALENDAR_DATE_FORMAT).to_string()
}
