use orgdir_application::{CreateEmployeeInput, UpdateEmployeeInput};
use orgdir_domain::Employee;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::timestamp;

/// Incoming payload for employee creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-employee-request.ts"
)]
pub struct CreateEmployeeRequest {
    pub eid: String,
    pub fname: String,
    pub lname: String,
    pub email: String,
}

/// Incoming payload for employee updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-employee-request.ts"
)]
pub struct UpdateEmployeeRequest {
    pub fname: Option<String>,
    pub lname: Option<String>,
    pub email: Option<String>,
}

/// Query string accepted by the employee listing.
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeListQuery {
    pub search: Option<String>,
}

/// API representation of an employee.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-response.ts"
)]
pub struct EmployeeResponse {
    pub eid: String,
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CreateEmployeeRequest> for CreateEmployeeInput {
    fn from(request: CreateEmployeeRequest) -> Self {
        Self {
            eid: request.eid,
            fname: request.fname,
            lname: request.lname,
            email: request.email,
        }
    }
}

impl From<UpdateEmployeeRequest> for UpdateEmployeeInput {
    fn from(request: UpdateEmployeeRequest) -> Self {
        Self {
            fname: request.fname,
            lname: request.lname,
            email: request.email,
        }
    }
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            eid: employee.eid.into(),
            fname: employee.fname.into(),
            lname: employee.lname.into(),
            email: employee.email.into(),
            created_at: timestamp(employee.created_at),
            updated_at: timestamp(employee.updated_at),
        }
    }
}
