use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::dto::{
    CreateDepartmentRequest, DeletionResponse, DepartmentListQuery, DepartmentResponse,
    UpdateDepartmentRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_departments_handler(
    State(state): State<AppState>,
    Query(query): Query<DepartmentListQuery>,
) -> ApiResult<Json<Vec<DepartmentResponse>>> {
    let departments = state
        .directory_service
        .list_departments(query.oid.as_deref())
        .await?
        .into_iter()
        .map(DepartmentResponse::from)
        .collect();

    Ok(Json(departments))
}

pub async fn create_department_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateDepartmentRequest>,
) -> ApiResult<(StatusCode, Json<DepartmentResponse>)> {
    let department = state
        .directory_service
        .create_department(payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(DepartmentResponse::from(department))))
}

pub async fn get_department_handler(
    State(state): State<AppState>,
    Path(did): Path<String>,
) -> ApiResult<Json<DepartmentResponse>> {
    let department = state.directory_service.get_department(&did).await?;
    Ok(Json(DepartmentResponse::from(department)))
}

pub async fn update_department_handler(
    State(state): State<AppState>,
    Path(did): Path<String>,
    Json(payload): Json<UpdateDepartmentRequest>,
) -> ApiResult<Json<DepartmentResponse>> {
    let department = state
        .directory_service
        .update_department(&did, payload.into())
        .await?;

    Ok(Json(DepartmentResponse::from(department)))
}

pub async fn delete_department_handler(
    State(state): State<AppState>,
    Path(did): Path<String>,
) -> ApiResult<Json<DeletionResponse>> {
    let report = state.directory_service.delete_department(&did).await?;
    Ok(Json(DeletionResponse::from(report)))
}
