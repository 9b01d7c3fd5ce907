use orgdir_application::{CreateProjectInput, UpdateProjectInput};
use orgdir_domain::Project;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::{calendar_date, timestamp};

/// Incoming payload for project creation. Dates use `YYYY-MM-DD`.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-project-request.ts"
)]
pub struct CreateProjectRequest {
    pub name: String,
    pub department_id: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
}

/// Incoming payload for project updates.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-project-request.ts"
)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub department_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub budget: Option<f64>,
}

/// Query string accepted by the project listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListQuery {
    pub department_id: Option<String>,
}

/// Incoming payload for assigning an employee to a project.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-employee-request.ts"
)]
pub struct AssignEmployeeRequest {
    pub eid: String,
}

/// API representation of a project.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/project-response.ts"
)]
pub struct ProjectResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub department_id: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CreateProjectRequest> for CreateProjectInput {
    fn from(request: CreateProjectRequest) -> Self {
        Self {
            name: request.name,
            department_id: request.department_id,
            start_date: request.start_date,
            end_date: request.end_date,
            budget: request.budget,
        }
    }
}

impl From<UpdateProjectRequest> for UpdateProjectInput {
    fn from(request: UpdateProjectRequest) -> Self {
        Self {
            name: request.name,
            department_id: request.department_id,
            start_date: request.start_date,
            end_date: request.end_date,
            budget: request.budget,
        }
    }
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.as_i64(),
            name: project.name.into(),
            department_id: project.department_id.into(),
            start_date: calendar_date(project.schedule.start_date()),
            end_date: calendar_date(project.schedule.end_date()),
            budget: project.budget.amount(),
            created_at: timestamp(project.created_at),
            updated_at: timestamp(project.updated_at),
        }
    }
}
