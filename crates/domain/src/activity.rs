use std::str::FromStr;

use chrono::{DateTime, Utc};
use orgdir_core::AppError;
use serde::{Deserialize, Serialize};

/// Entity kind recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Organisation records.
    Organisation,
    /// Department records.
    Department,
    /// Project records.
    Project,
    /// Employee records.
    Employee,
    /// User accounts.
    User,
    /// Project/employee pairings.
    Assignment,
}

impl ActivityKind {
    /// Returns a stable storage value for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organisation => "organisation",
            Self::Department => "department",
            Self::Project => "project",
            Self::Employee => "employee",
            Self::User => "user",
            Self::Assignment => "assignment",
        }
    }
}

impl FromStr for ActivityKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "organisation" => Ok(Self::Organisation),
            "department" => Ok(Self::Department),
            "project" => Ok(Self::Project),
            "employee" => Ok(Self::Employee),
            "user" => Ok(Self::User),
            "assignment" => Ok(Self::Assignment),
            _ => Err(AppError::Validation(format!(
                "unknown activity type '{value}'"
            ))),
        }
    }
}

/// Mutation recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// Record created.
    Create,
    /// Record updated.
    Update,
    /// Record deleted.
    Delete,
}

impl ActivityAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl FromStr for ActivityAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!(
                "unknown activity action '{value}'"
            ))),
        }
    }
}

/// Persisted activity log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    /// Surrogate id, increasing with insertion order.
    pub id: i64,
    /// Entity kind.
    pub kind: ActivityKind,
    /// Human-readable subject name.
    pub name: String,
    /// Mutation performed.
    pub action: ActivityAction,
    /// Time of the append.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{ActivityAction, ActivityKind};

    #[test]
    fn kind_roundtrip_storage_value() {
        let restored = ActivityKind::from_str(ActivityKind::Assignment.as_str());
        assert_eq!(restored.ok(), Some(ActivityKind::Assignment));
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(ActivityAction::from_str("archive").is_err());
    }
}
