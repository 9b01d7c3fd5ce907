//! Directory use-cases.
//!
//! Every mutating operation runs inside one [`DirectoryTransaction`]. Any error
//! returns early, dropping the transaction and discarding its writes. Activity
//! entries are appended only after a successful commit. Lookups and listings go
//! through a [`DirectoryReader`] over committed state.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use orgdir_core::{AppResult, NonEmptyString};
use orgdir_domain::{
    DepartmentKey, EmailAddress, EmployeeKey, User, UserId, UserRole, UserStatus,
};

use crate::activity_log_service::ActivityLogService;
use crate::assignment_registry::AssignmentRegistry;
use crate::authenticator::{Authenticator, SessionToken};
use crate::directory_ports::{DirectoryReader, DirectoryStore, DirectoryTransaction};
use crate::integrity_guard::ReferentialIntegrityGuard;

mod activity;
mod assignments;
mod departments;
mod employees;
mod login;
mod lookups;
mod organisations;
mod projects;
mod users;

/// Public projection of a user account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Surrogate id.
    pub id: UserId,
    /// Optional employee key.
    pub eid: Option<EmployeeKey>,
    /// First name.
    pub fname: String,
    /// Last name.
    pub lname: Option<String>,
    /// Login email.
    pub email: EmailAddress,
    /// Directory role.
    pub role: UserRole,
    /// Department membership.
    pub did: Option<DepartmentKey>,
    /// Contracted weekly hours.
    pub working_hours: u32,
    /// First day of employment.
    pub join_date: Option<NaiveDate>,
    /// Employment status.
    pub status: UserStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            eid: user.eid.clone(),
            fname: user.fname.to_string(),
            lname: user.lname.as_ref().map(ToString::to_string),
            email: user.email.clone(),
            role: user.role,
            did: user.did.clone(),
            working_hours: user.working_hours,
            join_date: user.join_date,
            status: user.status,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Authenticated account.
    pub user: UserProfile,
    /// Opaque session token.
    pub token: SessionToken,
}

/// Application service orchestrating the entity store, integrity guard,
/// assignment registry and activity log.
#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<dyn DirectoryStore>,
    guard: ReferentialIntegrityGuard,
    registry: AssignmentRegistry,
    activity_log: ActivityLogService,
    authenticator: Authenticator,
}

impl DirectoryService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        store: Arc<dyn DirectoryStore>,
        guard: ReferentialIntegrityGuard,
        activity_log: ActivityLogService,
        authenticator: Authenticator,
    ) -> Self {
        Self {
            store,
            guard,
            registry: AssignmentRegistry,
            activity_log,
            authenticator,
        }
    }

    async fn begin(&self) -> AppResult<Box<dyn DirectoryTransaction>> {
        self.store.begin().await
    }

    async fn read(&self) -> AppResult<Box<dyn DirectoryReader>> {
        self.store.read().await
    }
}

fn optional_text(field: &str, value: Option<String>) -> AppResult<Option<NonEmptyString>> {
    value
        .map(|value| NonEmptyString::for_field(field, value))
        .transpose()
}
