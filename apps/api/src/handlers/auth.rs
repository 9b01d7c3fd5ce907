use axum::Json;
use axum::extract::State;

use crate::dto::{LoginRequest, LoginResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let outcome = state
        .directory_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse::from(outcome)))
}
