use orgdir_application::{NewProject, ProjectFilter, RowLock};
use orgdir_core::{AppError, AppResult};
use orgdir_domain::{DepartmentKey, Project, ProjectId};

use super::rows::ProjectRow;
use super::{PostgresDirectoryTransaction, foreign_key_violation, lock_clause, require_affected};

impl PostgresDirectoryTransaction {
    pub(super) async fn find_project_impl(&mut self, id: ProjectId) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, department_id, start_date, end_date, budget, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find project: {error}")))?
        .map(Project::try_from)
        .transpose()
    }

    pub(super) async fn lock_project_impl(
        &mut self,
        id: ProjectId,
        lock: RowLock,
    ) -> AppResult<Option<Project>> {
        let query = format!(
            r#"
            SELECT id, name, department_id, start_date, end_date, budget, created_at, updated_at
            FROM projects
            WHERE id = $1
            {}
            "#,
            lock_clause(lock)
        );

        sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id.as_i64())
            .fetch_optional(&mut *self.transaction)
            .await
            .map_err(|error| AppError::Internal(format!("failed to lock project: {error}")))?
            .map(Project::try_from)
            .transpose()
    }

    pub(super) async fn list_projects_impl(
        &mut self,
        filter: &ProjectFilter,
    ) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, department_id, start_date, end_date, budget, created_at, updated_at
            FROM projects
            WHERE ($1::TEXT IS NULL OR department_id = $1)
            ORDER BY id
            "#,
        )
        .bind(filter.department.as_ref().map(|did| did.as_str()))
        .fetch_all(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list projects: {error}")))?
        .into_iter()
        .map(Project::try_from)
        .collect()
    }

    pub(super) async fn insert_project_impl(&mut self, project: NewProject) -> AppResult<Project> {
        sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (
                name,
                department_id,
                start_date,
                end_date,
                budget,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, name, department_id, start_date, end_date, budget, created_at, updated_at
            "#,
        )
        .bind(project.name.as_str())
        .bind(project.department_id.as_str())
        .bind(project.schedule.start_date())
        .bind(project.schedule.end_date())
        .bind(project.budget.amount())
        .bind(project.created_at)
        .fetch_one(&mut *self.transaction)
        .await
        .map_err(|error| {
            if foreign_key_violation(&error) {
                return missing_department(&project.department_id);
            }
            AppError::Internal(format!("failed to insert project: {error}"))
        })
        .and_then(Project::try_from)
    }

    pub(super) async fn update_project_impl(&mut self, project: &Project) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET
                name = $2,
                department_id = $3,
                start_date = $4,
                end_date = $5,
                budget = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(project.id.as_i64())
        .bind(project.name.as_str())
        .bind(project.department_id.as_str())
        .bind(project.schedule.start_date())
        .bind(project.schedule.end_date())
        .bind(project.budget.amount())
        .bind(project.updated_at)
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| {
            if foreign_key_violation(&error) {
                return missing_department(&project.department_id);
            }
            AppError::Internal(format!("failed to update project: {error}"))
        })?;

        require_affected(result.rows_affected(), || {
            format!("project '{}' not found", project.id)
        })
    }

    pub(super) async fn delete_project_impl(&mut self, id: ProjectId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.as_i64())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| {
                if foreign_key_violation(&error) {
                    return AppError::Conflict(format!(
                        "project '{id}' is still referenced by assignments"
                    ));
                }
                AppError::Internal(format!("failed to delete project: {error}"))
            })?;

        require_affected(result.rows_affected(), || format!("project '{id}' not found"))
    }
}

fn missing_department(did: &DepartmentKey) -> AppError {
    AppError::InvalidReference(format!("department '{did}' does not exist"))
}
