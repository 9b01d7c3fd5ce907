//! User accounts: the login-capable personnel record.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use orgdir_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::{DepartmentKey, EmployeeKey};

/// Surrogate identifier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    /// Creates a user id, rejecting zero and negative values.
    pub fn new(value: i64) -> AppResult<Self> {
        if value <= 0 {
            return Err(AppError::Validation(format!(
                "user id must be positive, got {value}"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the raw id.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated, lower-cased email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Directory roles a user may hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full administrative access.
    Admin,
    /// Manages one department.
    DepartmentManager,
    /// Manages projects.
    ProjectManager,
    /// Reads budgets and cost data.
    FinancialAnalyst,
    /// Regular staff member.
    #[default]
    Employee,
}

impl UserRole {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::DepartmentManager => "department_manager",
            Self::ProjectManager => "project_manager",
            Self::FinancialAnalyst => "financial_analyst",
            Self::Employee => "employee",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[UserRole] = &[
            UserRole::Admin,
            UserRole::DepartmentManager,
            UserRole::ProjectManager,
            UserRole::FinancialAnalyst,
            UserRole::Employee,
        ];

        ALL
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "department_manager" => Ok(Self::DepartmentManager),
            "project_manager" => Ok(Self::ProjectManager),
            "financial_analyst" => Ok(Self::FinancialAnalyst),
            "employee" => Ok(Self::Employee),
            _ => Err(AppError::Validation(format!("unknown role '{value}'"))),
        }
    }
}

/// Employment status of a user account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Currently employed and allowed to sign in.
    #[default]
    Active,
    /// Left or suspended.
    Inactive,
}

impl UserStatus {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for UserStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(AppError::Validation(format!("unknown status '{value}'"))),
        }
    }
}

/// Login-capable user account. `password_hash` never leaves the application layer.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Surrogate id assigned by the store.
    pub id: UserId,
    /// Optional employee key, unique when present.
    pub eid: Option<EmployeeKey>,
    /// First name.
    pub fname: NonEmptyString,
    /// Last name.
    pub lname: Option<NonEmptyString>,
    /// Unique login email.
    pub email: EmailAddress,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Directory role.
    pub role: UserRole,
    /// Department the user belongs to.
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

/// Upper bound for contracted weekly hours.
pub const WORKING_HOURS_MAX: u32 = 168;

/// Validates contracted weekly hours.
pub fn validate_working_hours(hours: u32) -> AppResult<u32> {
    if hours > WORKING_HOURS_MAX {
        return Err(AppError::Validation(format!(
            "workingHours must be at most {WORKING_HOURS_MAX}, got {hours}"
        )));
    }

    Ok(hours)
}

impl User {
    /// Returns `fname lname`, or just `fname` when no last name is stored.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.lname {
            Some(lname) => format!("{} {}", self.fname, lname),
            None => self.fname.to_string(),
        }
    }
}
