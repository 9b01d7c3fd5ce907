//! Natural keys for directory entities.
//!
//! Organisation, department and employee keys are business identifiers chosen
//! by callers. They are carried as distinct types so a department key can never
//! be handed to an organisation lookup by accident.

use orgdir_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum length of a natural key.
pub const NATURAL_KEY_MAX_LENGTH: usize = 20;

fn validate_natural_key(label: &str, value: String) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{label} must not be empty")));
    }

    if trimmed.chars().count() > NATURAL_KEY_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "{label} must not exceed {NATURAL_KEY_MAX_LENGTH} characters"
        )));
    }

    if trimmed.contains('/') {
        return Err(AppError::Validation(format!(
            "{label} must not contain '/'"
        )));
    }

    Ok(trimmed.to_owned())
}

macro_rules! natural_key {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a validated key.
            pub fn new(value: impl Into<String>) -> AppResult<Self> {
                validate_natural_key($label, value.into()).map(Self)
            }

            /// Returns the key as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = AppError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str(&self.0)
            }
        }
    };
}

natural_key!(
    /// Organisation key (`oid`).
    OrganisationKey,
    "oid"
);

natural_key!(
    /// Department key (`did`).
    DepartmentKey,
    "did"
);

natural_key!(
    /// Employee key (`eid`).
    EmployeeKey,
    "eid"
);
