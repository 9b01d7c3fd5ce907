use orgdir_application::LoginOutcome;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::users::UserResponse;

/// Incoming payload for email/password login.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/login-request.ts"
)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/login-response.ts"
)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            user: UserResponse::from(outcome.user),
            token: outcome.token.into(),
        }
    }
}
