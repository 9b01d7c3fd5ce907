//! Many-to-many pairing of projects and employees.

use orgdir_core::{AppError, AppResult};
use orgdir_domain::{Assignment, Employee, EmployeeKey, Project, ProjectId};

use crate::directory_ports::{DirectoryReader, DirectoryTransaction, RowLock};

/// Outcome of an assign call.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentChange {
    /// Staffed project.
    pub project: Project,
    /// Assigned employee.
    pub employee: Employee,
    /// `false` when the pair was already present.
    pub created: bool,
}

/// Outcome of an unassign call.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRemoval {
    /// Project the employee was removed from.
    pub project: Project,
    /// Removed employee key.
    pub eid: EmployeeKey,
}

/// Owns insert, remove and list over project/employee pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentRegistry;

impl AssignmentRegistry {
    /// Pairs an employee with a project. Re-assigning is a success.
    ///
    /// Both rows stay locked against deletion until the transaction ends.
    pub async fn assign(
        &self,
        transaction: &mut dyn DirectoryTransaction,
        project_id: ProjectId,
        eid: &EmployeeKey,
    ) -> AppResult<AssignmentChange> {
        let project = transaction
            .lock_project(project_id, RowLock::Reference)
            .await?
            .ok_or_else(|| project_not_found(project_id))?;
        let employee = transaction
            .lock_employee(eid, RowLock::Reference)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("employee '{eid}' not found")))?;

        let created = transaction
            .insert_assignment(&Assignment {
                project_id,
                eid: eid.clone(),
            })
            .await?;

        Ok(AssignmentChange {
            project,
            employee,
            created,
        })
    }

    /// Removes a pairing.
    ///
    /// An unknown employee and an employee that is simply not on the project
    /// fail with distinct `NotFound` messages.
    pub async fn unassign(
        &self,
        transaction: &mut dyn DirectoryTransaction,
        project_id: ProjectId,
        eid: &EmployeeKey,
    ) -> AppResult<AssignmentRemoval> {
        let project = find_project(transaction, project_id).await?;
        if transaction.find_employee(eid).await?.is_none() {
            return Err(AppError::NotFound(format!("employee '{eid}' not found")));
        }

        let removed = transaction
            .delete_assignment(&Assignment {
                project_id,
                eid: eid.clone(),
            })
            .await?;
        if !removed {
            return Err(AppError::NotFound(format!(
                "employee '{eid}' is not assigned to project '{project_id}'"
            )));
        }

        Ok(AssignmentRemoval {
            project,
            eid: eid.clone(),
        })
    }

    /// Lists the employees currently paired with a project.
    pub async fn list_assignees(
        &self,
        reader: &mut dyn DirectoryReader,
        project_id: ProjectId,
    ) -> AppResult<Vec<Employee>> {
        find_project(reader, project_id).await?;
        reader.list_assignees(project_id).await
    }
}

async fn find_project(
    reader: &mut dyn DirectoryReader,
    project_id: ProjectId,
) -> AppResult<Project> {
    reader
        .find_project(project_id)
        .await?
        .ok_or_else(|| project_not_found(project_id))
}

fn project_not_found(project_id: ProjectId) -> AppError {
    AppError::NotFound(format!("project '{project_id}' not found"))
}
