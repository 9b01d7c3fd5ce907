use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::dto::{
    CreateUserRequest, DeletionResponse, UpdateUserRequest, UserListQuery, UserResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .directory_service
        .list_users(query.role.as_deref(), query.did.as_deref())
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.directory_service.create_user(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.directory_service.get_user(user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .directory_service
        .update_user(user_id, payload.into())
        .await?;

    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<DeletionResponse>> {
    let report = state.directory_service.delete_user(user_id).await?;
    Ok(Json(DeletionResponse::from(report)))
}
