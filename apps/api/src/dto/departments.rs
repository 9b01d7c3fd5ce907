use orgdir_application::{CreateDepartmentInput, UpdateDepartmentInput};
use orgdir_domain::Department;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::timestamp;

/// Incoming payload for department creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-department-request.ts"
)]
pub struct CreateDepartmentRequest {
    pub did: String,
    pub name: String,
    pub oid: String,
    pub manager_id: Option<String>,
}

/// Incoming payload for department updates.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-department-request.ts"
)]
pub struct UpdateDepartmentRequest {
    pub name: Option<String>,
    pub oid: Option<String>,
    pub manager_id: Option<String>,
}

/// Query string accepted by the department listing.
#[derive(Debug, Default, Deserialize)]
pub struct DepartmentListQuery {
    pub oid: Option<String>,
}

/// API representation of a department.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/department-response.ts"
)]
pub struct DepartmentResponse {
    pub did: String,
    pub name: String,
    pub oid: String,
    pub manager_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CreateDepartmentRequest> for CreateDepartmentInput {
    fn from(request: CreateDepartmentRequest) -> Self {
        Self {
            did: request.did,
            name: request.name,
            oid: request.oid,
            manager_id: request.manager_id,
        }
    }
}

impl From<UpdateDepartmentRequest> for UpdateDepartmentInput {
    fn from(request: UpdateDepartmentRequest) -> Self {
        Self {
            name: request.name,
            oid: request.oid,
            manager_id: request.manager_id,
        }
    }
}

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        Self {
            did: department.did.into(),
            name: department.name.into(),
            oid: department.oid.into(),
            manager_id: department.manager_id.map(Into::into),
            created_at: timestamp(department.created_at),
            updated_at: timestamp(department.updated_at),
        }
    }
}
