use chrono::{DateTime, Utc};
use orgdir_core::NonEmptyString;

use crate::{EmailAddress, EmployeeKey};

/// Minimal personnel record that projects are staffed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Unique employee key.
    pub eid: EmployeeKey,
    /// First name.
    pub fname: NonEmptyString,
    /// Last name.
    pub lname: NonEmptyString,
    /// Unique contact email.
    pub email: EmailAddress,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Returns `fname lname`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fname, self.lname)
    }

    /// Case-insensitive substring match against key, names and email.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            self.eid.as_str(),
            self.fname.as_str(),
            self.lname.as_str(),
            self.email.as_str(),
        ]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use orgdir_core::NonEmptyString;

    use super::Employee;
    use crate::{EmailAddress, EmployeeKey};

    fn employee() -> Employee {
        let now = Utc::now();
        Employee {
            eid: EmployeeKey::new("E100").unwrap_or_else(|_| unreachable!()),
            fname: NonEmptyString::new("Grace").unwrap_or_else(|_| unreachable!()),
            lname: NonEmptyString::new("Hopper").unwrap_or_else(|_| unreachable!()),
            email: EmailAddress::new("grace@navy.mil").unwrap_or_else(|_| unreachable!()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn search_matches_any_field_ignoring_case() {
        let employee = employee();
        assert!(employee.matches_search("hop"));
        assert!(employee.matches_search("e10"));
        assert!(employee.matches_search("NAVY"));
        assert!(!employee.matches_search("lovelace"));
    }

    #[test]
    fn blank_search_matches_everything() {
        assert!(employee().matches_search("  "));
    }
}
