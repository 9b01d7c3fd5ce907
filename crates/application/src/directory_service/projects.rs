use chrono::Utc;
use tracing::info;

use orgdir_core::{AppResult, NonEmptyString};
use orgdir_domain::{
    ActivityAction, ActivityKind, Budget, DepartmentKey, Project, ProjectId, ProjectSchedule,
    parse_calendar_date,
};

use super::{DirectoryService, lookups};
use crate::directory_ports::{CreateProjectInput, NewProject, ProjectFilter, UpdateProjectInput};
use crate::integrity_guard::DeletionReport;

impl DirectoryService {
    /// Creates a project under an existing department. The store assigns the id.
    pub async fn create_project(&self, input: CreateProjectInput) -> AppResult<Project> {
        let schedule = ProjectSchedule::new(
            parse_calendar_date("startDate", &input.start_date)?,
            parse_calendar_date("endDate", &input.end_date)?,
        )?;
        let new_project = NewProject {
            name: NonEmptyString::for_field("name", input.name)?,
            department_id: DepartmentKey::new(input.department_id)?,
            schedule,
            budget: Budget::new(input.budget)?,
            created_at: Utc::now(),
        };

        let mut transaction = self.begin().await?;
        self.guard
            .require_department(transaction.as_mut(), &new_project.department_id)
            .await?;
        let project = transaction.insert_project(new_project).await?;
        transaction.commit().await?;

        self.activity_log
            .record(
                ActivityKind::Project,
                project.name.as_str(),
                ActivityAction::Create,
            )
            .await;

        Ok(project)
    }

    /// Returns one project.
    pub async fn get_project(&self, id: i64) -> AppResult<Project> {
        let id = ProjectId::new(id)?;
        let mut reader = self.read().await?;
        lookups::project(reader.as_mut(), id).await
    }

    /// Lists projects, optionally only those of one department.
    pub async fn list_projects(&self, department_id: Option<&str>) -> AppResult<Vec<Project>> {
        let filter = ProjectFilter {
            department: department_id.map(DepartmentKey::new).transpose()?,
        };
        let mut reader = self.read().await?;
        reader.list_projects(&filter).await
    }

    /// Applies the supplied fields. The resulting schedule must stay ordered.
    pub async fn update_project(&self, id: i64, input: UpdateProjectInput) -> AppResult<Project> {
        let id = ProjectId::new(id)?;
        let start_date = input
            .start_date
            .as_deref()
            .map(|value| parse_calendar_date("startDate", value))
            .transpose()?;
        let end_date = input
            .end_date
            .as_deref()
            .map(|value| parse_calendar_date("endDate", value))
            .transpose()?;

        let mut transaction = self.begin().await?;
        let mut project = lookups::project(transaction.as_mut(), id).await?;

        if let Some(name) = input.name {
            project.name = NonEmptyString::for_field("name", name)?;
        }
        if let Some(department_id) = input.department_id {
            let department_id = DepartmentKey::new(department_id)?;
            self.guard
                .require_department(transaction.as_mut(), &department_id)
                .await?;
            project.department_id = department_id;
        }
        if let Some(budget) = input.budget {
            project.budget = Budget::new(budget)?;
        }
        project.schedule = project.schedule.with_changes(start_date, end_date)?;
        project.updated_at = Utc::now();

        transaction.update_project(&project).await?;
        transaction.commit().await?;

        self.activity_log
            .record(
                ActivityKind::Project,
                project.name.as_str(),
                ActivityAction::Update,
            )
            .await;

        Ok(project)
    }

    /// Deletes a project together with its assignments.
    pub async fn delete_project(&self, id: i64) -> AppResult<DeletionReport> {
        let id = ProjectId::new(id)?;
        let mut transaction = self.begin().await?;
        let project = lookups::project(transaction.as_mut(), id).await?;
        let report = self.guard.delete_project(transaction.as_mut(), id).await?;
        transaction.commit().await?;

        if !report.is_empty() {
            info!(
                project_id = %id,
                assignments = report.assignments,
                "project delete cascaded"
            );
        }

        self.activity_log
            .record(
                ActivityKind::Project,
                project.name.as_str(),
                ActivityAction::Delete,
            )
            .await;

        Ok(report)
    }
}
