use orgdir_core::{AppError, AppResult};
use orgdir_domain::{
    Department, DepartmentKey, Employee, EmployeeKey, Organisation, OrganisationKey, Project,
    ProjectId, User, UserId,
};

use crate::directory_ports::DirectoryReader;

pub(super) async fn organisation(
    reader: &mut dyn DirectoryReader,
    oid: &OrganisationKey,
) -> AppResult<Organisation> {
    reader
        .find_organisation(oid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("organisation '{oid}' not found")))
}

pub(super) async fn department(
    reader: &mut dyn DirectoryReader,
    did: &DepartmentKey,
) -> AppResult<Department> {
    reader
        .find_department(did)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("department '{did}' not found")))
}

pub(super) async fn project(
    reader: &mut dyn DirectoryReader,
    id: ProjectId,
) -> AppResult<Project> {
    reader
        .find_project(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("project '{id}' not found")))
}

pub(super) async fn employee(
    reader: &mut dyn DirectoryReader,
    eid: &EmployeeKey,
) -> AppResult<Employee> {
    reader
        .find_employee(eid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("employee '{eid}' not found")))
}

pub(super) async fn user(
    reader: &mut dyn DirectoryReader,
    id: UserId,
) -> AppResult<User> {
    reader
        .find_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{id}' not found")))
}
