use chrono::Utc;
use tracing::info;

use orgdir_core::{AppResult, NonEmptyString};
use orgdir_domain::{ActivityAction, ActivityKind, Organisation, OrganisationKey};

use super::{DirectoryService, lookups};
use crate::directory_ports::{CreateOrganisationInput, UpdateOrganisationInput};
use crate::integrity_guard::DeletionReport;

impl DirectoryService {
    /// Creates an organisation. Fails with `Conflict` when the key is taken.
    pub async fn create_organisation(
        &self,
        input: CreateOrganisationInput,
    ) -> AppResult<Organisation> {
        let now = Utc::now();
        let organisation = Organisation {
            oid: OrganisationKey::new(input.oid)?,
            name: NonEmptyString::for_field("name", input.name)?,
            created_at: now,
            updated_at: now,
        };

        let mut transaction = self.begin().await?;
        transaction.insert_organisation(&organisation).await?;
        transaction.commit().await?;

        self.activity_log
            .record(
                ActivityKind::Organisation,
                organisation.name.as_str(),
                ActivityAction::Create,
            )
            .await;

        Ok(organisation)
    }

    /// Returns one organisation.
    pub async fn get_organisation(&self, oid: &str) -> AppResult<Organisation> {
        let oid = OrganisationKey::new(oid)?;
        let mut reader = self.read().await?;
        lookups::organisation(reader.as_mut(), &oid).await
    }

    /// Lists organisations in creation order.
    pub async fn list_organisations(&self) -> AppResult<Vec<Organisation>> {
        let mut reader = self.read().await?;
        reader.list_organisations().await
    }

    /// Renames an organisation. The key itself is immutable.
    pub async fn update_organisation(
        &self,
        oid: &str,
        input: UpdateOrganisationInput,
    ) -> AppResult<Organisation> {
        let oid = OrganisationKey::new(oid)?;
        let mut transaction = self.begin().await?;
        let mut organisation = lookups::organisation(transaction.as_mut(), &oid).await?;

        if let Some(name) = input.name {
            organisation.name = NonEmptyString::for_field("name", name)?;
        }
        organisation.updated_at = Utc::now();

        transaction.update_organisation(&organisation).await?;
        transaction.commit().await?;

        self.activity_log
            .record(
                ActivityKind::Organisation,
                organisation.name.as_str(),
                ActivityAction::Update,
            )
            .await;

        Ok(organisation)
    }

    /// Deletes an organisation and, per policy, everything beneath it.
    pub async fn delete_organisation(&self, oid: &str) -> AppResult<DeletionReport> {
        let oid = OrganisationKey::new(oid)?;
        let mut transaction = self.begin().await?;
        let organisation = lookups::organisation(transaction.as_mut(), &oid).await?;
        let report = self
            .guard
            .delete_organisation(transaction.as_mut(), &oid)
            .await?;
        transaction.commit().await?;

        if !report.is_empty() {
            info!(
                oid = %oid,
                departments = report.departments,
                projects = report.projects,
                users = report.users,
                assignments = report.assignments,
                "organisation delete cascaded"
            );
        }

        self.activity_log
            .record(
                ActivityKind::Organisation,
                organisation.name.as_str(),
                ActivityAction::Delete,
            )
            .await;

        Ok(report)
    }
}
