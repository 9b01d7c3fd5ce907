use std::str::FromStr;

use chrono::Utc;

use orgdir_core::{AppResult, NonEmptyString};
use orgdir_domain::{
    ActivityAction, ActivityKind, DepartmentKey, EmailAddress, EmployeeKey, UserId, UserRole,
    UserStatus, parse_calendar_date, validate_password, validate_working_hours,
};

use super::{DirectoryService, UserProfile, lookups, optional_text};
use crate::directory_ports::{CreateUserInput, NewUser, UpdateUserInput, UserFilter};
use crate::integrity_guard::DeletionReport;

const DEFAULT_WORKING_HOURS: u32 = 0;

impl DirectoryService {
    /// Registers a user account. The password is hashed before it reaches the store.
    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<UserProfile> {
        validate_password(&input.password)?;

        let new_user = NewUser {
            eid: input.eid.map(EmployeeKey::new).transpose()?,
            fname: NonEmptyString::for_field("fname", input.fname)?,
            lname: optional_text("lname", input.lname)?,
            email: EmailAddress::new(input.email)?,
            password_hash: self.authenticator.hash_password(&input.password)?,
            role: input
                .role
                .as_deref()
                .map(UserRole::from_str)
                .transpose()?
                .unwrap_or_default(),
            did: input.did.map(DepartmentKey::new).transpose()?,
            working_hours: validate_working_hours(
                input.working_hours.unwrap_or(DEFAULT_WORKING_HOURS),
            )?,
            join_date: input
                .join_date
                .as_deref()
                .map(|value| parse_calendar_date("joinDate", value))
                .transpose()?,
            status: input
                .status
                .as_deref()
                .map(UserStatus::from_str)
                .transpose()?
                .unwrap_or_default(),
            created_at: Utc::now(),
        };

        let mut transaction = self.begin().await?;
        if let Some(did) = &new_user.did {
            self.guard
                .require_department(transaction.as_mut(), did)
                .await?;
        }
        let user = transaction.insert_user(new_user).await?;
        transaction.commit().await?;

        self.activity_log
            .record(ActivityKind::User, user.full_name(), ActivityAction::Create)
            .await;

        Ok(UserProfile::from(&user))
    }

    /// Returns one user's public profile.
    pub async fn get_user(&self, id: i64) -> AppResult<UserProfile> {
        let id = UserId::new(id)?;
        let mut reader = self.read().await?;
        let user = lookups::user(reader.as_mut(), id).await?;
        Ok(UserProfile::from(&user))
    }

    /// Lists users, optionally filtered by role and department.
    pub async fn list_users(
        &self,
        role: Option<&str>,
        did: Option<&str>,
    ) -> AppResult<Vec<UserProfile>> {
        let filter = UserFilter {
            role: role.map(UserRole::from_str).transpose()?,
            department: did.map(DepartmentKey::new).transpose()?,
        };
        let mut reader = self.read().await?;
        let users = reader.list_users(&filter).await?;
        Ok(users.iter().map(UserProfile::from).collect())
    }

    /// Applies the supplied fields. A new password is re-hashed.
    pub async fn update_user(&self, id: i64, input: UpdateUserInput) -> AppResult<UserProfile> {
        let id = UserId::new(id)?;
        let password_hash = match input.password.as_deref() {
            Some(password) => {
                validate_password(password)?;
                Some(self.authenticator.hash_password(password)?)
            }
            None => None,
        };

        let mut transaction = self.begin().await?;
        let mut user = lookups::user(transaction.as_mut(), id).await?;

        if let Some(fname) = input.fname {
            user.fname = NonEmptyString::for_field("fname", fname)?;
        }
        if let Some(lname) = optional_text("lname", input.lname)? {
            user.lname = Some(lname);
        }
        if let Some(email) = input.email {
            user.email = EmailAddress::new(email)?;
        }
        if let Some(password_hash) = password_hash {
            user.password_hash = password_hash;
        }
        if let Some(role) = input.role {
            user.role = UserRole::from_str(&role)?;
        }
        if let Some(did) = input.did {
            let did = DepartmentKey::new(did)?;
            self.guard
                .require_department(transaction.as_mut(), &did)
                .await?;
            user.did = Some(did);
        }
        if let Some(working_hours) = input.working_hours {
            user.working_hours = validate_working_hours(working_hours)?;
        }
        if let Some(join_date) = input.join_date {
            user.join_date = Some(parse_calendar_date("joinDate", &join_date)?);
        }
        if let Some(status) = input.status {
            user.status = UserStatus::from_str(&status)?;
        }
        user.updated_at = Utc::now();

        transaction.update_user(&user).await?;
        transaction.commit().await?;

        self.activity_log
            .record(ActivityKind::User, user.full_name(), ActivityAction::Update)
            .await;

        Ok(UserProfile::from(&user))
    }

    /// User accounts have no dependents, so the report is always empty.
    pub async fn delete_user(&self, id: i64) -> AppResult<DeletionReport> {
        let id = UserId::new(id)?;
        let mut transaction = self.begin().await?;
        let user = lookups::user(transaction.as_mut(), id).await?;
        transaction.delete_user(id).await?;
        transaction.commit().await?;

        self.activity_log
            .record(ActivityKind::User, user.full_name(), ActivityAction::Delete)
            .await;

        Ok(DeletionReport::default())
    }
}
