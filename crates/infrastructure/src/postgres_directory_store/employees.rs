use orgdir_application::{EmployeeFilter, RowLock};
use orgdir_core::{AppError, AppResult};
use orgdir_domain::{Employee, EmployeeKey};

use super::rows::EmployeeRow;
use super::{
    PostgresDirectoryTransaction, foreign_key_violation, lock_clause, require_affected,
    unique_violation,
};

impl PostgresDirectoryTransaction {
    pub(super) async fn find_employee_impl(
        &mut self,
        eid: &EmployeeKey,
    ) -> AppResult<Option<Employee>> {
        sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT eid, fname, lname, email, created_at, updated_at
            FROM employees
            WHERE eid = $1
            "#,
        )
        .bind(eid.as_str())
        .fetch_optional(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find employee: {error}")))?
        .map(Employee::try_from)
        .transpose()
    }

    pub(super) async fn lock_employee_impl(
        &mut self,
        eid: &EmployeeKey,
        lock: RowLock,
    ) -> AppResult<Option<Employee>> {
        let query = format!(
            r#"
            SELECT eid, fname, lname, email, created_at, updated_at
            FROM employees
            WHERE eid = $1
            {}
            "#,
            lock_clause(lock)
        );

        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(eid.as_str())
            .fetch_optional(&mut *self.transaction)
            .await
            .map_err(|error| AppError::Internal(format!("failed to lock employee: {error}")))?
            .map(Employee::try_from)
            .transpose()
    }

    pub(super) async fn list_employees_impl(
        &mut self,
        filter: &EmployeeFilter,
    ) -> AppResult<Vec<Employee>> {
        sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT eid, fname, lname, email, created_at, updated_at
            FROM employees
            WHERE $1::TEXT IS NULL
                OR strpos(lower(eid), lower($1)) > 0
                OR strpos(lower(fname), lower($1)) > 0
                OR strpos(lower(lname), lower($1)) > 0
                OR strpos(lower(email), lower($1)) > 0
            ORDER BY created_at, eid
            "#,
        )
        .bind(filter.search.as_deref().map(str::trim))
        .fetch_all(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list employees: {error}")))?
        .into_iter()
        .map(Employee::try_from)
        .collect()
    }

    pub(super) async fn insert_employee_impl(&mut self, employee: &Employee) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO employees (eid, fname, lname, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(employee.eid.as_str())
        .bind(employee.fname.as_str())
        .bind(employee.lname.as_str())
        .bind(employee.email.as_str())
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| employee_conflict_or_internal(error, employee, "insert"))?;

        Ok(())
    }

    pub(super) async fn update_employee_impl(&mut self, employee: &Employee) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET fname = $2, lname = $3, email = $4, updated_at = $5
            WHERE eid = $1
            "#,
        )
        .bind(employee.eid.as_str())
        .bind(employee.fname.as_str())
        .bind(employee.lname.as_str())
        .bind(employee.email.as_str())
        .bind(employee.updated_at)
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| employee_conflict_or_internal(error, employee, "update"))?;

        require_affected(result.rows_affected(), || {
            format!("employee '{}' not found", employee.eid)
        })
    }

    pub(super) async fn delete_employee_impl(&mut self, eid: &EmployeeKey) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE eid = $1")
            .bind(eid.as_str())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| {
                if foreign_key_violation(&error) {
                    return AppError::Conflict(format!(
                        "employee '{eid}' is still referenced by assignments"
                    ));
                }
                AppError::Internal(format!("failed to delete employee: {error}"))
            })?;

        require_affected(result.rows_affected(), || format!("employee '{eid}' not found"))
    }
}

fn employee_conflict_or_internal(
    error: sqlx::Error,
    employee: &Employee,
    action: &str,
) -> AppError {
    match unique_violation(&error) {
        Some("employees_email_key") => AppError::Conflict(format!(
            "employee email '{}' is already in use",
            employee.email
        )),
        Some(_) => AppError::Conflict(format!("employee '{}' already exists", employee.eid)),
        None => AppError::Internal(format!("failed to {action} employee: {error}")),
    }
}
