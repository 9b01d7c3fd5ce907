use orgdir_application::RowLock;
use orgdir_core::{AppError, AppResult};
use orgdir_domain::{Organisation, OrganisationKey};

use super::rows::OrganisationRow;
use super::{
    PostgresDirectoryTransaction, foreign_key_violation, lock_clause, require_affected,
    unique_violation,
};

impl PostgresDirectoryTransaction {
    pub(super) async fn find_organisation_impl(
        &mut self,
        oid: &OrganisationKey,
    ) -> AppResult<Option<Organisation>> {
        sqlx::query_as::<_, OrganisationRow>(
            r#"
            SELECT oid, name, created_at, updated_at
            FROM organisations
            WHERE oid = $1
            "#,
        )
        .bind(oid.as_str())
        .fetch_optional(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find organisation: {error}")))?
        .map(Organisation::try_from)
        .transpose()
    }

    pub(super) async fn lock_organisation_impl(
        &mut self,
        oid: &OrganisationKey,
        lock: RowLock,
    ) -> AppResult<Option<Organisation>> {
        let query = format!(
            "SELECT oid, name, created_at, updated_at FROM organisations WHERE oid = $1 {}",
            lock_clause(lock)
        );

        sqlx::query_as::<_, OrganisationRow>(&query)
            .bind(oid.as_str())
            .fetch_optional(&mut *self.transaction)
            .await
            .map_err(|error| AppError::Internal(format!("failed to lock organisation: {error}")))?
            .map(Organisation::try_from)
            .transpose()
    }

    pub(super) async fn list_organisations_impl(&mut self) -> AppResult<Vec<Organisation>> {
        sqlx::query_as::<_, OrganisationRow>(
            r#"
            SELECT oid, name, created_at, updated_at
            FROM organisations
            ORDER BY created_at, oid
            "#,
        )
        .fetch_all(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list organisations: {error}")))?
        .into_iter()
        .map(Organisation::try_from)
        .collect()
    }

    pub(super) async fn insert_organisation_impl(
        &mut self,
        organisation: &Organisation,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO organisations (oid, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(organisation.oid.as_str())
        .bind(organisation.name.as_str())
        .bind(organisation.created_at)
        .bind(organisation.updated_at)
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| {
            if unique_violation(&error).is_some() {
                return AppError::Conflict(format!(
                    "organisation '{}' already exists",
                    organisation.oid
                ));
            }
            AppError::Internal(format!("failed to insert organisation: {error}"))
        })?;

        Ok(())
    }

    pub(super) async fn update_organisation_impl(
        &mut self,
        organisation: &Organisation,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE organisations
            SET name = $2, updated_at = $3
            WHERE oid = $1
            "#,
        )
        .bind(organisation.oid.as_str())
        .bind(organisation.name.as_str())
        .bind(organisation.updated_at)
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update organisation: {error}")))?;

        require_affected(result.rows_affected(), || {
            format!("organisation '{}' not found", organisation.oid)
        })
    }

    pub(super) async fn delete_organisation_impl(
        &mut self,
        oid: &OrganisationKey,
    ) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM organisations WHERE oid = $1")
            .bind(oid.as_str())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| {
                if foreign_key_violation(&error) {
                    return AppError::Conflict(format!(
                        "organisation '{oid}' is still referenced by departments"
                    ));
                }
                AppError::Internal(format!("failed to delete organisation: {error}"))
            })?;

        require_affected(result.rows_affected(), || {
            format!("organisation '{oid}' not found")
        })
    }
}
