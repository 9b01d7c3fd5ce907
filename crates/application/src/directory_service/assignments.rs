use orgdir_core::AppResult;
use orgdir_domain::{ActivityAction, ActivityKind, Employee, EmployeeKey, ProjectId};

use super::DirectoryService;

impl DirectoryService {
    /// Returns the employees staffed on a project, in assignment order.
    pub async fn list_assignees(&self, project_id: i64) -> AppResult<Vec<Employee>> {
        let project_id = ProjectId::new(project_id)?;
        let mut reader = self.read().await?;
        self.registry
            .list_assignees(reader.as_mut(), project_id)
            .await
    }

    /// Assigns an employee to a project. Re-assigning is a no-op and is not logged.
    pub async fn assign_employee(&self, project_id: i64, eid: &str) -> AppResult<Employee> {
        let project_id = ProjectId::new(project_id)?;
        let eid = EmployeeKey::new(eid)?;

        let mut transaction = self.begin().await?;
        let change = self
            .registry
            .assign(transaction.as_mut(), project_id, &eid)
            .await?;
        transaction.commit().await?;

        if change.created {
            self.activity_log
                .record(
                    ActivityKind::Assignment,
                    format!("{}:{}", change.project.name, change.employee.eid),
                    ActivityAction::Create,
                )
                .await;
        }

        Ok(change.employee)
    }

    /// Removes an employee from a project.
    pub async fn unassign_employee(&self, project_id: i64, eid: &str) -> AppResult<()> {
        let project_id = ProjectId::new(project_id)?;
        let eid = EmployeeKey::new(eid)?;

        let mut transaction = self.begin().await?;
        let removal = self
            .registry
            .unassign(transaction.as_mut(), project_id, &eid)
            .await?;
        transaction.commit().await?;

        self.activity_log
            .record(
                ActivityKind::Assignment,
                format!("{}:{}", removal.project.name, removal.eid),
                ActivityAction::Delete,
            )
            .await;

        Ok(())
    }
}
