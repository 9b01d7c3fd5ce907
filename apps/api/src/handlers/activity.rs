use std::str::FromStr;

use axum::Json;
use axum::extract::{Query, State};
use orgdir_application::ActivityQuery;
use orgdir_domain::ActivityKind;

use crate::dto::{ActivityEntryResponse, ActivityListQuery};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_activity_handler(
    State(state): State<AppState>,
    Query(query): Query<ActivityListQuery>,
) -> ApiResult<Json<Vec<ActivityEntryResponse>>> {
    let defaults = ActivityQuery::default();
    let kind = query
        .kind
        .as_deref()
        .map(ActivityKind::from_str)
        .transpose()?;

    let entries = state
        .directory_service
        .recent_activity(ActivityQuery {
            limit: query.limit.unwrap_or(defaults.limit),
            offset: query.offset.unwrap_or(defaults.offset),
            kind,
        })
        .await?
        .into_iter()
        .map(ActivityEntryResponse::from)
        .collect();

    Ok(Json(entries))
}
