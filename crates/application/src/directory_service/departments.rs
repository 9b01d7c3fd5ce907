use chrono::Utc;
use tracing::info;

use orgdir_core::{AppResult, NonEmptyString};
use orgdir_domain::{ActivityAction, ActivityKind, Department, DepartmentKey, OrganisationKey};

use super::{DirectoryService, lookups, optional_text};
use crate::directory_ports::{CreateDepartmentInput, DepartmentFilter, UpdateDepartmentInput};
use crate::integrity_guard::DeletionReport;

impl DirectoryService {
    /// Creates a department under an existing organisation.
    pub async fn create_department(&self, input: CreateDepartmentInput) -> AppResult<Department> {
        let now = Utc::now();
        let department = Department {
            did: DepartmentKey::new(input.did)?,
            name: NonEmptyString::for_field("name", input.name)?,
            oid: OrganisationKey::new(input.oid)?,
            manager_id: optional_text("managerId", input.manager_id)?,
            created_at: now,
            updated_at: now,
        };

        let mut transaction = self.begin().await?;
        self.guard
            .require_organisation(transaction.as_mut(), &department.oid)
            .await?;
        transaction.insert_department(&department).await?;
        transaction.commit().await?;

        self.activity_log
            .record(
                ActivityKind::Department,
                department.name.as_str(),
                ActivityAction::Create,
            )
            .await;

        Ok(department)
    }

    /// Returns one department.
    pub async fn get_department(&self, did: &str) -> AppResult<Department> {
        let did = DepartmentKey::new(did)?;
        let mut reader = self.read().await?;
        lookups::department(reader.as_mut(), &did).await
    }

    /// Lists departments, optionally only those of one organisation.
    pub async fn list_departments(&self, oid: Option<&str>) -> AppResult<Vec<Department>> {
        let filter = DepartmentFilter {
            organisation: oid.map(OrganisationKey::new).transpose()?,
        };
        let mut reader = self.read().await?;
        reader.list_departments(&filter).await
    }

    /// Updates a department. Moving it re-checks the target organisation.
    pub async fn update_department(
        &self,
        did: &str,
        input: UpdateDepartmentInput,
    ) -> AppResult<Department> {
        let did = DepartmentKey::new(did)?;
        let mut transaction = self.begin().await?;
        let mut department = lookups::department(transaction.as_mut(), &did).await?;

        if let Some(name) = input.name {
            department.name = NonEmptyString::for_field("name", name)?;
        }
        if let Some(oid) = input.oid {
            let oid = OrganisationKey::new(oid)?;
            self.guard
                .require_organisation(transaction.as_mut(), &oid)
                .await?;
            department.oid = oid;
        }
        if let Some(manager_id) = optional_text("managerId", input.manager_id)? {
            department.manager_id = Some(manager_id);
        }
        department.updated_at = Utc::now();

        transaction.update_department(&department).await?;
        transaction.commit().await?;

        self.activity_log
            .record(
                ActivityKind::Department,
                department.name.as_str(),
                ActivityAction::Update,
            )
            .await;

        Ok(department)
    }

    /// Deletes a department and, per policy, its projects and users.
    pub async fn delete_department(&self, did: &str) -> AppResult<DeletionReport> {
        let did = DepartmentKey::new(did)?;
        let mut transaction = self.begin().await?;
        let department = lookups::department(transaction.as_mut(), &did).await?;
        let report = self
            .guard
            .delete_department(transaction.as_mut(), &did)
            .await?;
        transaction.commit().await?;

        if !report.is_empty() {
            info!(
                did = %did,
                projects = report.projects,
                users = report.users,
                assignments = report.assignments,
                "department delete cascaded"
            );
        }

        self.activity_log
            .record(
                ActivityKind::Department,
                department.name.as_str(),
                ActivityAction::Delete,
            )
            .await;

        Ok(report)
    }
}
