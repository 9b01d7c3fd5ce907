//! Projects and their scheduling and budget value objects.

use chrono::{DateTime, NaiveDate, Utc};
use orgdir_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::DepartmentKey;

/// Wire format for calendar dates.
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), CALENDAR_DATE_FORMAT).map_err(|_| {
        AppError::Validation(format!(
            "{field} must be a calendar date in YYYY-MM-DD form, got '{value}'"
        ))
    })
}

/// Surrogate identifier of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(i64);

impl ProjectId {
    /// Creates a project id, rejecting zero and negative values.
    pub fn new(value: i64) -> AppResult<Self> {
        if value <= 0 {
            return Err(AppError::Validation(format!(
                "project id must be positive, got {value}"
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

impl std::fmt::Display for ProjectId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Non-negative, finite monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Budget(f64);

impl Budget {
    /// Creates a validated budget.
    pub fn new(value: f64) -> AppResult<Self> {
        if !value.is_finite() {
            return Err(AppError::Validation(
                "budget must be a finite number".to_owned(),
            ));
        }

        if value < 0.0 {
            return Err(AppError::Validation(format!(
                "budget must not be negative, got {value}"
            )));
        }

        // Adding positive zero folds -0.0 into 0.0.
        Ok(Self(value + 0.0))
    }

    /// Returns the amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.0
    }
}

/// Start and end dates of a project. The end never precedes the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectSchedule {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl ProjectSchedule {
    /// Creates a schedule, rejecting an end date before the start date.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> AppResult<Self> {
        if end_date < start_date {
            return Err(AppError::Validation(format!(
                "endDate {end_date} must not precede startDate {start_date}"
            )));
        }

        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Returns the first day of the project.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last day of the project.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns a schedule with either bound replaced, revalidated.
    pub fn with_changes(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Self> {
        Self::new(
            start_date.unwrap_or(self.start_date),
            end_date.unwrap_or(self.end_date),
        )
    }
}

/// Project owned by a department.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Surrogate id assigned by the store.
    pub id: ProjectId,
    /// Display name.
    pub name: NonEmptyString,
    /// Owning department.
    pub department_id: DepartmentKey,
    /// Start and end dates.
    pub schedule: ProjectSchedule,
    /// Approved budget.
    pub budget: Budget,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn date(value: &str) -> NaiveDate {
        parse_calendar_date("date", value).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn calendar_date_parses_iso_form() {
        let parsed = parse_calendar_date("startDate", "2024-02-29");
        assert_eq!(parsed.ok(), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn malformed_calendar_date_is_rejected() {
        assert!(parse_calendar_date("startDate", "29/02/2024").is_err());
        assert!(parse_calendar_date("startDate", "2023-02-29").is_err());
    }

    #[test]
    fn schedule_rejects_end_before_start() {
        assert!(ProjectSchedule::new(date("2024-05-02"), date("2024-05-01")).is_err());
        assert!(ProjectSchedule::new(date("2024-05-01"), date("2024-05-01")).is_ok());
    }

    #[test]
    fn schedule_changes_are_revalidated() {
        let schedule = ProjectSchedule::new(date("2024-01-01"), date("2024-06-30"))
            .unwrap_or_else(|_| unreachable!());
        assert!(schedule.with_changes(Some(date("2024-07-01")), None).is_err());

        let moved = schedule
            .with_changes(None, Some(date("2024-12-31")))
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(moved.start_date(), date("2024-01-01"));
        assert_eq!(moved.end_date(), date("2024-12-31"));
    }

    #[test]
    fn budget_rejects_non_finite_values() {
        assert!(Budget::new(f64::NAN).is_err());
        assert!(Budget::new(f64::INFINITY).is_err());
    }

    #[test]
    fn negative_zero_budget_is_stored_as_zero() {
        let budget = Budget::new(-0.0).unwrap_or_else(|_| unreachable!());
        assert!(budget.amount().is_sign_positive());
        assert_eq!(budget.amount().to_string(), "0");
    }

    proptest! {
        #[test]
        fn budget_accepts_exactly_the_non_negative_amounts(value in -1.0e12f64..1.0e12f64) {
            let budget = Budget::new(value);
            prop_assert_eq!(budget.is_ok(), value >= 0.0);
        }

        #[test]
        fn project_id_accepts_exactly_positive_values(value in any::<i64>()) {
            prop_assert_eq!(ProjectId::new(value).is_ok(), value > 0);
        }
    }
}
