mod activity;
mod auth;
mod common;
mod departments;
mod employees;
mod organisations;
mod projects;
mod users;

pub use activity::{ActivityEntryResponse, ActivityListQuery};
pub use auth::{LoginRequest, LoginResponse};
pub use common::{DeletionResponse, HealthResponse, MessageResponse};
pub use departments::{
    CreateDepartmentRequest, DepartmentListQuery, DepartmentResponse, UpdateDepartmentRequest,
};
pub use employees::{
    CreateEmployeeRequest, EmployeeListQuery, EmployeeResponse, UpdateEmployeeRequest,
};
pub use organisations::{
    CreateOrganisationRequest, OrganisationResponse, UpdateOrganisationRequest,
};
pub use projects::{
    AssignEmployeeRequest, CreateProjectRequest, ProjectListQuery, ProjectResponse,
    UpdateProjectRequest,
};
pub use users::{CreateUserRequest, UpdateUserRequest, UserListQuery, UserResponse};
