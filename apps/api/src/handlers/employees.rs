use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::dto::{
    CreateEmployeeRequest, DeletionResponse, EmployeeListQuery, EmployeeResponse,
    UpdateEmployeeRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_employees_handler(
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> ApiResult<Json<Vec<EmployeeResponse>>> {
    let employees = state
        .directory_service
        .list_employees(query.search.as_deref())
        .await?
        .into_iter()
        .map(EmployeeResponse::from)
        .collect();

    Ok(Json(employees))
}

pub async fn create_employee_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    let employee = state
        .directory_service
        .create_employee(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(employee))))
}

pub async fn get_employee_handler(
    State(state): State<AppState>,
    Path(eid): Path<String>,
) -> ApiResult<Json<EmployeeResponse>> {
    let employee = state.directory_service.get_employee(&eid).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

pub async fn update_employee_handler(
    State(state): State<AppState>,
    Path(eid): Path<String>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> ApiResult<Json<EmployeeResponse>> {
    let employee = state
        .directory_service
        .update_employee(&eid, payload.into())
        .await?;

    Ok(Json(EmployeeResponse::from(employee)))
}

pub async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(eid): Path<String>,
) -> ApiResult<Json<DeletionResponse>> {
    let report = state.directory_service.delete_employee(&eid).await?;
    Ok(Json(DeletionResponse::from(report)))
}
