use orgdir_application::{DepartmentFilter, RowLock};
use orgdir_core::{AppError, AppResult};
use orgdir_domain::{Department, DepartmentKey};

use super::rows::DepartmentRow;
use super::{
    PostgresDirectoryTransaction, foreign_key_violation, lock_clause, require_affected,
    unique_violation,
};

impl PostgresDirectoryTransaction {
    pub(super) async fn find_department_impl(
        &mut self,
        did: &DepartmentKey,
    ) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT did, name, oid, manager_id, created_at, updated_at
            FROM departments
            WHERE did = $1
            "#,
        )
        .bind(did.as_str())
        .fetch_optional(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find department: {error}")))?
        .map(Department::try_from)
        .transpose()
    }

    pub(super) async fn lock_department_impl(
        &mut self,
        did: &DepartmentKey,
        lock: RowLock,
    ) -> AppResult<Option<Department>> {
        let query = format!(
            r#"
            SELECT did, name, oid, manager_id, created_at, updated_at
            FROM departments
            WHERE did = $1
            {}
            "#,
            lock_clause(lock)
        );

        sqlx::query_as::<_, DepartmentRow>(&query)
            .bind(did.as_str())
            .fetch_optional(&mut *self.transaction)
            .await
            .map_err(|error| AppError::Internal(format!("failed to lock department: {error}")))?
            .map(Department::try_from)
            .transpose()
    }

    pub(super) async fn list_departments_impl(
        &mut self,
        filter: &DepartmentFilter,
    ) -> AppResult<Vec<Department>> {
        sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT did, name, oid, manager_id, created_at, updated_at
            FROM departments
            WHERE ($1::TEXT IS NULL OR oid = $1)
            ORDER BY created_at, did
            "#,
        )
        .bind(filter.organisation.as_ref().map(|oid| oid.as_str()))
        .fetch_all(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list departments: {error}")))?
        .into_iter()
        .map(Department::try_from)
        .collect()
    }

    pub(super) async fn insert_department_impl(
        &mut self,
        department: &Department,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO departments (did, name, oid, manager_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(department.did.as_str())
        .bind(department.name.as_str())
        .bind(department.oid.as_str())
        .bind(department.manager_id.as_ref().map(|manager_id| manager_id.as_str()))
        .bind(department.created_at)
        .bind(department.updated_at)
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| {
            if unique_violation(&error).is_some() {
                return AppError::Conflict(format!(
                    "department '{}' already exists",
                    department.did
                ));
            }
            if foreign_key_violation(&error) {
                return missing_organisation(department);
            }
            AppError::Internal(format!("failed to insert department: {error}"))
        })?;

        Ok(())
    }

    pub(super) async fn update_department_impl(
        &mut self,
        department: &Department,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE departments
            SET name = $2, oid = $3, manager_id = $4, updated_at = $5
            WHERE did = $1
            "#,
        )
        .bind(department.did.as_str())
        .bind(department.name.as_str())
        .bind(department.oid.as_str())
        .bind(department.manager_id.as_ref().map(|manager_id| manager_id.as_str()))
        .bind(department.updated_at)
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| {
            if foreign_key_violation(&error) {
                return missing_organisation(department);
            }
            AppError::Internal(format!("failed to update department: {error}"))
        })?;

        require_affected(result.rows_affected(), || {
            format!("department '{}' not found", department.did)
        })
    }

    pub(super) async fn delete_department_impl(&mut self, did: &DepartmentKey) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM departments WHERE did = $1")
            .bind(did.as_str())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| {
                if foreign_key_violation(&error) {
                    return AppError::Conflict(format!(
                        "department '{did}' is still referenced by projects or users"
                    ));
                }
                AppError::Internal(format!("failed to delete department: {error}"))
            })?;

        require_affected(result.rows_affected(), || {
            format!("department '{did}' not found")
        })
    }
}

fn missing_organisation(department: &Department) -> AppError {
    AppError::InvalidReference(format!("organisation '{}' does not exist", department.oid))
}
