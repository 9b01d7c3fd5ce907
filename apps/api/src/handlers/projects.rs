use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::dto::{
    CreateProjectRequest, DeletionResponse, ProjectListQuery, ProjectResponse,
    UpdateProjectRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_projects_handler(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let projects = state
        .directory_service
        .list_projects(query.department_id.as_deref())
        .await?
        .into_iter()
        .map(ProjectResponse::from)
        .collect();

    Ok(Json(projects))
}

pub async fn create_project_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let project = state.directory_service.create_project(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

pub async fn get_project_handler(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state.directory_service.get_project(project_id).await?;
    Ok(Json(ProjectResponse::from(project)))
}

pub async fn update_project_handler(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Json(payload): Json<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state
        .directory_service
        .update_project(project_id, payload.into())
        .await?;

    Ok(Json(ProjectResponse::from(project)))
}

pub async fn delete_project_handler(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> ApiResult<Json<DeletionResponse>> {
    let report = state.directory_service.delete_project(project_id).await?;
    Ok(Json(DeletionResponse::from(report)))
}
