use orgdir_core::{AppError, AppResult};
use orgdir_domain::{Assignment, Employee, EmployeeKey, ProjectId};

use super::{PostgresDirectoryTransaction, foreign_key_violation};
use super::rows::EmployeeRow;

impl PostgresDirectoryTransaction {
    pub(super) async fn insert_assignment_impl(
        &mut self,
        assignment: &Assignment,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO project_assignees (project_id, eid)
            VALUES ($1, $2)
            ON CONFLICT (project_id, eid) DO NOTHING
            "#,
        )
        .bind(assignment.project_id.as_i64())
        .bind(assignment.eid.as_str())
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| {
            if foreign_key_violation(&error) {
                return AppError::NotFound(format!(
                    "project '{}' or employee '{}' no longer exists",
                    assignment.project_id, assignment.eid
                ));
            }
            AppError::Internal(format!("failed to insert assignment: {error}"))
        })?;

        Ok(result.rows_affected() > 0)
    }

    pub(super) async fn delete_assignment_impl(
        &mut self,
        assignment: &Assignment,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM project_assignees
            WHERE project_id = $1 AND eid = $2
            "#,
        )
        .bind(assignment.project_id.as_i64())
        .bind(assignment.eid.as_str())
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete assignment: {error}")))?;

        Ok(result.rows_affected() > 0)
    }

    pub(super) async fn list_assignees_impl(
        &mut self,
        project_id: ProjectId,
    ) -> AppResult<Vec<Employee>> {
        sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT e.eid, e.fname, e.lname, e.email, e.created_at, e.updated_at
            FROM project_assignees pa
            INNER JOIN employees e ON e.eid = pa.eid
            WHERE pa.project_id = $1
            ORDER BY pa.assigned_seq
            "#,
        )
        .bind(project_id.as_i64())
        .fetch_all(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list assignees: {error}")))?
        .into_iter()
        .map(Employee::try_from)
        .collect()
    }

    pub(super) async fn list_assignments_for_employee_impl(
        &mut self,
        eid: &EmployeeKey,
    ) -> AppResult<Vec<Assignment>> {
        let project_ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT project_id
            FROM project_assignees
            WHERE eid = $1
            ORDER BY assigned_seq
            "#,
        )
        .bind(eid.as_str())
        .fetch_all(&mut *self.transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list employee assignments: {error}"))
        })?;

        project_ids
            .into_iter()
            .map(|project_id| {
                Ok(Assignment {
                    project_id: ProjectId::new(project_id)?,
                    eid: eid.clone(),
                })
            })
            .collect()
    }

    pub(super) async fn delete_assignments_for_project_impl(
        &mut self,
        project_id: ProjectId,
    ) -> AppResult<usize> {
        let result = sqlx::query("DELETE FROM project_assignees WHERE project_id = $1")
            .bind(project_id.as_i64())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to delete project assignments: {error}"))
            })?;

        deleted_count(result.rows_affected())
    }

    pub(super) async fn delete_assignments_for_employee_impl(
        &mut self,
        eid: &EmployeeKey,
    ) -> AppResult<usize> {
        let result = sqlx::query("DELETE FROM project_assignees WHERE eid = $1")
            .bind(eid.as_str())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to delete employee assignments: {error}"))
            })?;

        deleted_count(result.rows_affected())
    }
}

fn deleted_count(rows_affected: u64) -> AppResult<usize> {
    usize::try_from(rows_affected)
        .map_err(|_| AppError::Internal(format!("deleted row count {rows_affected} overflows")))
}
