use axum::Json;
use axum::extract::{Path, State};

use crate::dto::{AssignEmployeeRequest, EmployeeResponse, MessageResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_assignees_handler(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<Vec<EmployeeResponse>>> {
    let assignees = state
        .directory_service
        .list_assignees(project_id)
        .await?
        .into_iter()
        .map(EmployeeResponse::from)
        .collect();

    Ok(Json(assignees))
}

/// Re-assigning an employee already on the project also answers `200`.
pub async fn assign_employee_handler(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(payload): Json<AssignEmployeeRequest>,
) -> ApiResult<Json<EmployeeResponse>> {
    let employee = state
        .directory_service
        .assign_employee(project_id, &payload.eid)
        .await?;

    Ok(Json(EmployeeResponse::from(employee)))
}

pub async fn unassign_employee_handler(
    State(state): State<AppState>,
    Path((project_id, eid)): Path<(i64, String)>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .directory_service
        .unassign_employee(project_id, &eid)
        .await?;

    Ok(Json(MessageResponse {
        message: format!("employee '{eid}' removed from project {project_id}"),
    }))
}
