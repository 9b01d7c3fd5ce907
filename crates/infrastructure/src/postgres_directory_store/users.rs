use orgdir_application::{NewUser, UserFilter};
use orgdir_core::{AppError, AppResult};
use orgdir_domain::{DepartmentKey, EmailAddress, EmployeeKey, User, UserId};

use super::rows::{UserRow, working_hours_column};
use super::{
    PostgresDirectoryTransaction, foreign_key_violation, require_affected, unique_violation,
};

const USER_COLUMNS: &str = "id, eid, fname, lname, email, password_hash, role, did, \
     working_hours, join_date, status, created_at, updated_at";

impl PostgresDirectoryTransaction {
    pub(super) async fn find_user_impl(&mut self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.as_i64())
            .fetch_optional(&mut *self.transaction)
            .await
            .map_err(|error| AppError::Internal(format!("failed to find user: {error}")))?
            .map(User::try_from)
            .transpose()
    }

    pub(super) async fn find_user_by_email_impl(
        &mut self,
        email: &EmailAddress,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by email: {error}")))?
        .map(User::try_from)
        .transpose()
    }

    pub(super) async fn list_users_impl(&mut self, filter: &UserFilter) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE ($1::TEXT IS NULL OR role = $1)
                AND ($2::TEXT IS NULL OR did = $2)
            ORDER BY id
            "#
        ))
        .bind(filter.role.map(|role| role.as_str()))
        .bind(filter.department.as_ref().map(|did| did.as_str()))
        .fetch_all(&mut *self.transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list users: {error}")))?
        .into_iter()
        .map(User::try_from)
        .collect()
    }

    pub(super) async fn insert_user_impl(&mut self, user: NewUser) -> AppResult<User> {
        sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (
                eid,
                fname,
                lname,
                email,
                password_hash,
                role,
                did,
                working_hours,
                join_date,
                status,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.eid.as_ref().map(|eid| eid.as_str()))
        .bind(user.fname.as_str())
        .bind(user.lname.as_ref().map(|lname| lname.as_str()))
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.role.as_str())
        .bind(user.did.as_ref().map(|did| did.as_str()))
        .bind(working_hours_column(user.working_hours)?)
        .bind(user.join_date)
        .bind(user.status.as_str())
        .bind(user.created_at)
        .fetch_one(&mut *self.transaction)
        .await
        .map_err(|error| {
            user_write_error(error, &user.email, user.eid.as_ref(), user.did.as_ref(), "insert")
        })
        .and_then(User::try_from)
    }

    pub(super) async fn update_user_impl(&mut self, user: &User) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                fname = $2,
                lname = $3,
                email = $4,
                password_hash = $5,
                role = $6,
                did = $7,
                working_hours = $8,
                join_date = $9,
                status = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_i64())
        .bind(user.fname.as_str())
        .bind(user.lname.as_ref().map(|lname| lname.as_str()))
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.role.as_str())
        .bind(user.did.as_ref().map(|did| did.as_str()))
        .bind(working_hours_column(user.working_hours)?)
        .bind(user.join_date)
        .bind(user.status.as_str())
        .bind(user.updated_at)
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| {
            user_write_error(error, &user.email, user.eid.as_ref(), user.did.as_ref(), "update")
        })?;

        require_affected(result.rows_affected(), || {
            format!("user '{}' not found", user.id)
        })
    }

    pub(super) async fn delete_user_impl(&mut self, id: UserId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i64())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete user: {error}")))?;

        require_affected(result.rows_affected(), || format!("user '{id}' not found"))
    }
}

fn user_write_error(
    error: sqlx::Error,
    email: &EmailAddress,
    eid: Option<&EmployeeKey>,
    did: Option<&DepartmentKey>,
    action: &str,
) -> AppError {
    if let (true, Some(did)) = (foreign_key_violation(&error), did) {
        return AppError::InvalidReference(format!("department '{did}' does not exist"));
    }

    match (unique_violation(&error), eid) {
        (Some("users_eid_key"), Some(eid)) => {
            AppError::Conflict(format!("user employee key '{eid}' is already in use"))
        }
        (Some(_), _) => AppError::Conflict(format!("user email '{email}' is already in use")),
        (None, _) => AppError::Internal(format!("failed to {action} user: {error}")),
    }
}
