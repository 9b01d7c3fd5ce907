//! Domain entities and invariants for the organisation directory.

#![forbid(unsafe_code)]

mod activity;
mod assignment;
mod department;
mod employee;
mod identifiers;
mod integrity;
mod organisation;
mod project;
mod security;
mod user;

pub use activity::{ActivityAction, ActivityEntry, ActivityKind};
pub use assignment::Assignment;
pub use department::Department;
pub use employee::Employee;
pub use identifiers::{DepartmentKey, EmployeeKey, NATURAL_KEY_MAX_LENGTH, OrganisationKey};
pub use integrity::{CascadePolicy, IntegrityPolicy, Relationship};
pub use organisation::Organisation;
pub use project::{
    Budget, CALENDAR_DATE_FORMAT, Project, ProjectId, ProjectSchedule, parse_calendar_date,
};
pub use security::{PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, validate_password};
pub use user::{
    EmailAddress, User, UserId, UserRole, UserStatus, WORKING_HOURS_MAX, validate_working_hours,
};
