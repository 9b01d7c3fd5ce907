//! PostgreSQL-backed directory store.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::warn;

use orgdir_application::{
    DepartmentFilter, DirectoryReader, DirectoryStore, DirectoryTransaction, EmployeeFilter,
    NewProject, NewUser, ProjectFilter, RowLock, UserFilter,
};
use orgdir_core::{AppError, AppResult};
use orgdir_domain::{
    Assignment, Department, DepartmentKey, EmailAddress, Employee, EmployeeKey, Organisation,
    OrganisationKey, Project, ProjectId, User, UserId,
};

mod assignments;
mod departments;
mod employees;
mod organisations;
mod projects;
mod rows;
mod users;

#[cfg(test)]
mod tests;

/// PostgreSQL implementation of the directory store port.
#[derive(Clone)]
pub struct PostgresDirectoryStore {
    pool: PgPool,
}

impl PostgresDirectoryStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// One database transaction. Dropping it without commit rolls back.
///
/// Readers use the same type inside a `READ ONLY` transaction.
struct PostgresDirectoryTransaction {
    transaction: Transaction<'static, Postgres>,
}

impl PostgresDirectoryStore {
    async fn begin_transaction(&self) -> AppResult<PostgresDirectoryTransaction> {
        let transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!("failed to begin transaction: {error}"))
        })?;

        Ok(PostgresDirectoryTransaction { transaction })
    }
}

#[async_trait]
impl DirectoryStore for PostgresDirectoryStore {
    async fn read(&self) -> AppResult<Box<dyn DirectoryReader>> {
        let mut reader = self.begin_transaction().await?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *reader.transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to start read-only transaction: {error}"))
            })?;

        Ok(Box::new(reader))
    }

    async fn begin(&self) -> AppResult<Box<dyn DirectoryTransaction>> {
        Ok(Box::new(self.begin_transaction().await?))
    }
}

#[async_trait]
impl DirectoryReader for PostgresDirectoryTransaction {
    async fn find_organisation(
        &mut self,
        oid: &OrganisationKey,
    ) -> AppResult<Option<Organisation>> {
        self.find_organisation_impl(oid).await
    }

    async fn list_organisations(&mut self) -> AppResult<Vec<Organisation>> {
        self.list_organisations_impl().await
    }

    async fn find_department(&mut self, did: &DepartmentKey) -> AppResult<Option<Department>> {
        self.find_department_impl(did).await
    }

    async fn list_departments(&mut self, filter: &DepartmentFilter) -> AppResult<Vec<Department>> {
        self.list_departments_impl(filter).await
    }

    async fn find_project(&mut self, id: ProjectId) -> AppResult<Option<Project>> {
        self.find_project_impl(id).await
    }

    async fn list_projects(&mut self, filter: &ProjectFilter) -> AppResult<Vec<Project>> {
        self.list_projects_impl(filter).await
    }

    async fn find_employee(&mut self, eid: &EmployeeKey) -> AppResult<Option<Employee>> {
        self.find_employee_impl(eid).await
    }

    async fn list_employees(&mut self, filter: &EmployeeFilter) -> AppResult<Vec<Employee>> {
        self.list_employees_impl(filter).await
    }

    async fn find_user(&mut self, id: UserId) -> AppResult<Option<User>> {
        self.find_user_impl(id).await
    }

    async fn find_user_by_email(&mut self, email: &EmailAddress) -> AppResult<Option<User>> {
        self.find_user_by_email_impl(email).await
    }

    async fn list_users(&mut self, filter: &UserFilter) -> AppResult<Vec<User>> {
        self.list_users_impl(filter).await
    }

    async fn list_assignees(&mut self, project_id: ProjectId) -> AppResult<Vec<Employee>> {
        self.list_assignees_impl(project_id).await
    }

    async fn list_assignments_for_employee(
        &mut self,
        eid: &EmployeeKey,
    ) -> AppResult<Vec<Assignment>> {
        self.list_assignments_for_employee_impl(eid).await
    }
}

#[async_trait]
impl DirectoryTransaction for PostgresDirectoryTransaction {
    async fn lock_organisation(
        &mut self,
        oid: &OrganisationKey,
        lock: RowLock,
    ) -> AppResult<Option<Organisation>> {
        self.lock_organisation_impl(oid, lock).await
    }

    async fn insert_organisation(&mut self, organisation: &Organisation) -> AppResult<()> {
        self.insert_organisation_impl(organisation).await
    }

    async fn update_organisation(&mut self, organisation: &Organisation) -> AppResult<()> {
        self.update_organisation_impl(organisation).await
    }

    async fn delete_organisation(&mut self, oid: &OrganisationKey) -> AppResult<()> {
        self.delete_organisation_impl(oid).await
    }

    async fn lock_department(
        &mut self,
        did: &DepartmentKey,
        lock: RowLock,
    ) -> AppResult<Option<Department>> {
        self.lock_department_impl(did, lock).await
    }

    async fn insert_department(&mut self, department: &Department) -> AppResult<()> {
        self.insert_department_impl(department).await
    }

    async fn update_department(&mut self, department: &Department) -> AppResult<()> {
        self.update_department_impl(department).await
    }

    async fn delete_department(&mut self, did: &DepartmentKey) -> AppResult<()> {
        self.delete_department_impl(did).await
    }

    async fn lock_project(&mut self, id: ProjectId, lock: RowLock) -> AppResult<Option<Project>> {
        self.lock_project_impl(id, lock).await
    }

    async fn insert_project(&mut self, project: NewProject) -> AppResult<Project> {
        self.insert_project_impl(project).await
    }

    async fn update_project(&mut self, project: &Project) -> AppResult<()> {
        self.update_project_impl(project).await
    }

    async fn delete_project(&mut self, id: ProjectId) -> AppResult<()> {
        self.delete_project_impl(id).await
    }

    async fn lock_employee(
        &mut self,
        eid: &EmployeeKey,
        lock: RowLock,
    ) -> AppResult<Option<Employee>> {
        self.lock_employee_impl(eid, lock).await
    }

    async fn insert_employee(&mut self, employee: &Employee) -> AppResult<()> {
        self.insert_employee_impl(employee).await
    }

    async fn update_employee(&mut self, employee: &Employee) -> AppResult<()> {
        self.update_employee_impl(employee).await
    }

    async fn delete_employee(&mut self, eid: &EmployeeKey) -> AppResult<()> {
        self.delete_employee_impl(eid).await
    }

    async fn insert_user(&mut self, user: NewUser) -> AppResult<User> {
        self.insert_user_impl(user).await
    }

    async fn update_user(&mut self, user: &User) -> AppResult<()> {
        self.update_user_impl(user).await
    }

    async fn delete_user(&mut self, id: UserId) -> AppResult<()> {
        self.delete_user_impl(id).await
    }

    async fn insert_assignment(&mut self, assignment: &Assignment) -> AppResult<bool> {
        self.insert_assignment_impl(assignment).await
    }

    async fn delete_assignment(&mut self, assignment: &Assignment) -> AppResult<bool> {
        self.delete_assignment_impl(assignment).await
    }

    async fn delete_assignments_for_project(&mut self, project_id: ProjectId) -> AppResult<usize> {
        self.delete_assignments_for_project_impl(project_id).await
    }

    async fn delete_assignments_for_employee(&mut self, eid: &EmployeeKey) -> AppResult<usize> {
        self.delete_assignments_for_employee_impl(eid).await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.transaction.commit().await.map_err(|error| {
            warn!(error = %error, "directory transaction commit failed");
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })
    }
}

fn unique_violation(error: &sqlx::Error) -> Option<&str> {
    if let sqlx::Error::Database(database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return Some(database_error.constraint().unwrap_or_default());
    }

    None
}

fn foreign_key_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(database_error) if database_error.code().as_deref() == Some("23503")
    )
}

/// Row-lock clause appended to a single-row `SELECT`.
///
/// `FOR KEY SHARE` blocks a concurrent delete of the parent but not updates
/// to its non-key columns. `FOR UPDATE` waits for every open reference.
fn lock_clause(lock: RowLock) -> &'static str {
    match lock {
        RowLock::Reference => "FOR KEY SHARE",
        RowLock::Delete => "FOR UPDATE",
    }
}

fn require_affected(rows_affected: u64, missing: impl FnOnce() -> String) -> AppResult<()> {
    if rows_affected == 0 {
        return Err(AppError::NotFound(missing()));
    }

    Ok(())
}
