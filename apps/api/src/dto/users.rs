use orgdir_application::{CreateUserInput, UpdateUserInput, UserProfile};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::{calendar_date, timestamp};

/// Incoming payload for user registration.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    pub eid: Option<String>,
    pub fname: String,
    pub lname: Option<String>,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub did: Option<String>,
    pub working_hours: Option<u32>,
    pub join_date: Option<String>,
    pub status: Option<String>,
}

/// Incoming payload for user updates. A present `password` is re-hashed.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-user-request.ts"
)]
pub struct UpdateUserRequest {
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub did: Option<String>,
    pub working_hours: Option<u32>,
    pub join_date: Option<String>,
    pub status: Option<String>,
}

/// Query string accepted by the user listing.
#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
    pub did: Option<String>,
}

/// Public projection of a user account.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub eid: Option<String>,
    pub fname: String,
    pub lname: Option<String>,
    pub email: String,
    pub role: String,
    pub did: Option<String>,
    pub working_hours: u32,
    pub join_date: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CreateUserRequest> for CreateUserInput {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            eid: request.eid,
            fname: request.fname,
            lname: request.lname,
            email: request.email,
            password: request.password,
            role: request.role,
            did: request.did,
            working_hours: request.working_hours,
            join_date: request.join_date,
            status: request.status,
        }
    }
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            fname: request.fname,
            lname: request.lname,
            email: request.email,
            password: request.password,
            role: request.role,
            did: request.did,
            working_hours: request.working_hours,
            join_date: request.join_date,
            status: request.status,
        }
    }
}

impl From<UserProfile> for UserResponse {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id.as_i64(),
            eid: user.eid.map(Into::into),
            fname: user.fname,
            lname: user.lname,
            email: user.email.into(),
            role: user.role.as_str().to_owned(),
            did: user.did.map(Into::into),
            working_hours: user.working_hours,
            join_date: user.join_date.map(calendar_date),
            status: user.status.as_str().to_owned(),
            created_at: timestamp(user.created_at),
            updated_at: timestamp(user.updated_at),
        }
    }
}
