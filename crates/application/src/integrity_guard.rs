//! Referential integrity over the directory graph.
//!
//! Parent existence is checked before a child is written, and parent deletion
//! walks the configured [`IntegrityPolicy`] table. All work happens inside the
//! caller's transaction, so a rejected cascade leaves nothing behind.

use orgdir_core::{AppError, AppResult};
use orgdir_domain::{
    CascadePolicy, Department, DepartmentKey, EmployeeKey, IntegrityPolicy, Organisation,
    OrganisationKey, ProjectId, Relationship,
};

use crate::directory_ports::{
    DepartmentFilter, DirectoryTransaction, ProjectFilter, RowLock, UserFilter,
};

/// Dependents removed together with a deleted record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionReport {
    /// Departments removed.
    pub departments: usize,
    /// Projects removed.
    pub projects: usize,
    /// User accounts removed.
    pub users: usize,
    /// Project/employee pairings removed.
    pub assignments: usize,
}

impl DeletionReport {
    /// Returns whether nothing besides the target record was removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn absorb(&mut self, other: Self) {
        self.departments += other.departments;
        self.projects += other.projects;
        self.users += other.users;
        self.assignments += other.assignments;
    }
}

/// Enforces parent existence and the cascade policy table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferentialIntegrityGuard {
    policy: IntegrityPolicy,
}

impl ReferentialIntegrityGuard {
    /// Creates a guard with the given policy table.
    #[must_use]
    pub fn new(policy: IntegrityPolicy) -> Self {
        Self { policy }
    }

    /// Returns the active policy table.
    #[must_use]
    pub fn policy(&self) -> IntegrityPolicy {
        self.policy
    }

    /// Resolves the organisation a child record points at and keeps it from
    /// being deleted until the transaction ends.
    pub async fn require_organisation(
        &self,
        transaction: &mut dyn DirectoryTransaction,
        oid: &OrganisationKey,
    ) -> AppResult<Organisation> {
        transaction
            .lock_organisation(oid, RowLock::Reference)
            .await?
            .ok_or_else(|| {
                AppError::InvalidReference(format!("organisation '{oid}' does not exist"))
            })
    }

    /// Resolves the department a child record points at and keeps it from
    /// being deleted until the transaction ends.
    pub async fn require_department(
        &self,
        transaction: &mut dyn DirectoryTransaction,
        did: &DepartmentKey,
    ) -> AppResult<Department> {
        transaction
            .lock_department(did, RowLock::Reference)
            .await?
            .ok_or_else(|| AppError::InvalidReference(format!("department '{did}' does not exist")))
    }

    /// Deletes an organisation and, per policy, its departments.
    pub async fn delete_organisation(
        &self,
        transaction: &mut dyn DirectoryTransaction,
        oid: &OrganisationKey,
    ) -> AppResult<DeletionReport> {
        if transaction
            .lock_organisation(oid, RowLock::Delete)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "organisation '{oid}' not found"
            )));
        }

        let departments = transaction
            .list_departments(&DepartmentFilter {
                organisation: Some(oid.clone()),
            })
            .await?;

        let mut report = DeletionReport::default();
        if !departments.is_empty() {
            self.ensure_cascade_allowed(
                Relationship::OrganisationDepartments,
                &format!("organisation '{oid}'"),
                departments.len(),
            )?;

            for department in departments {
                report.absorb(self.delete_department_rows(transaction, &department.did).await?);
                report.departments += 1;
            }
        }

        transaction.delete_organisation(oid).await?;
        Ok(report)
    }

    /// Deletes a department and, per policy, its projects and users.
    pub async fn delete_department(
        &self,
        transaction: &mut dyn DirectoryTransaction,
        did: &DepartmentKey,
    ) -> AppResult<DeletionReport> {
        if transaction
            .lock_department(did, RowLock::Delete)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!("department '{did}' not found")));
        }

        self.delete_department_rows(transaction, did).await
    }

    /// Deletes a project together with all of its assignments.
    pub async fn delete_project(
        &self,
        transaction: &mut dyn DirectoryTransaction,
        project_id: ProjectId,
    ) -> AppResult<DeletionReport> {
        if transaction
            .lock_project(project_id, RowLock::Delete)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "project '{project_id}' not found"
            )));
        }

        self.delete_project_rows(transaction, project_id).await
    }

    /// Deletes an employee and, per policy, the employee's assignments.
    pub async fn delete_employee(
        &self,
        transaction: &mut dyn DirectoryTransaction,
        eid: &EmployeeKey,
    ) -> AppResult<DeletionReport> {
        if transaction
            .lock_employee(eid, RowLock::Delete)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!("employee '{eid}' not found")));
        }

        let assignments = transaction.list_assignments_for_employee(eid).await?;
        let mut report = DeletionReport::default();
        if !assignments.is_empty() {
            self.ensure_cascade_allowed(
                Relationship::EmployeeAssignments,
                &format!("employee '{eid}'"),
                assignments.len(),
            )?;
            report.assignments = transaction.delete_assignments_for_employee(eid).await?;
        }

        transaction.delete_employee(eid).await?;
        Ok(report)
    }

    async fn delete_department_rows(
        &self,
        transaction: &mut dyn DirectoryTransaction,
        did: &DepartmentKey,
    ) -> AppResult<DeletionReport> {
        transaction.lock_department(did, RowLock::Delete).await?;
        let mut report = DeletionReport::default();
        let parent = format!("department '{did}'");

        let users = transaction
            .list_users(&UserFilter {
                role: None,
                department: Some(did.clone()),
            })
            .await?;
        if !users.is_empty() {
            self.ensure_cascade_allowed(Relationship::DepartmentUsers, &parent, users.len())?;
            for user in users {
                transaction.delete_user(user.id).await?;
                report.users += 1;
            }
        }

        let projects = transaction
            .list_projects(&ProjectFilter {
                department: Some(did.clone()),
            })
            .await?;
        if !projects.is_empty() {
            self.ensure_cascade_allowed(Relationship::DepartmentProjects, &parent, projects.len())?;
            for project in projects {
                report.absorb(self.delete_project_rows(transaction, project.id).await?);
                report.projects += 1;
            }
        }

        transaction.delete_department(did).await?;
        Ok(report)
    }

    async fn delete_project_rows(
        &self,
        transaction: &mut dyn DirectoryTransaction,
        project_id: ProjectId,
    ) -> AppResult<DeletionReport> {
        transaction
            .lock_project(project_id, RowLock::Delete)
            .await?;
        let assignments = transaction
            .delete_assignments_for_project(project_id)
            .await?;
        transaction.delete_project(project_id).await?;

        Ok(DeletionReport {
            assignments,
            ..DeletionReport::default()
        })
    }

    fn ensure_cascade_allowed(
        &self,
        relationship: Relationship,
        parent: &str,
        dependents: usize,
    ) -> AppResult<()> {
        match self.policy.policy_for(relationship) {
            CascadePolicy::Cascade => Ok(()),
            CascadePolicy::Reject => Err(AppError::Conflict(format!(
                "cannot delete {parent}: {dependents} {} still reference it",
                relationship.dependents_label()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DeletionReport;

    #[test]
    fn absorb_sums_every_counter() {
        let mut report = DeletionReport {
            departments: 1,
            ..DeletionReport::default()
        };
        report.absorb(DeletionReport {
            departments: 0,
            projects: 2,
            users: 1,
            assignments: 5,
        });

        assert_eq!(
            report,
            DeletionReport {
                departments: 1,
                projects: 2,
                users: 1,
                assignments: 5,
            }
        );
        assert!(!report.is_empty());
        assert!(DeletionReport::default().is_empty());
    }
}
