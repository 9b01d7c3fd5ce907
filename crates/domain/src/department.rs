use chrono::{DateTime, Utc};
use orgdir_core::NonEmptyString;

use crate::{DepartmentKey, OrganisationKey};

/// Department owned by exactly one organisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    /// Unique department key.
    pub did: DepartmentKey,
    /// Display name.
    pub name: NonEmptyString,
    /// Owning organisation.
    pub oid: OrganisationKey,
    /// Free-form reference to the department manager.
    pub manager_id: Option<NonEmptyString>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
