use chrono::{DateTime, Utc};
use orgdir_core::NonEmptyString;

use crate::OrganisationKey;

/// Root of the directory hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organisation {
    /// Unique organisation key.
    pub oid: OrganisationKey,
    /// Display name.
    pub name: NonEmptyString,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
