//! Application services and ports.

#![forbid(unsafe_code)]

mod activity_log_service;
mod assignment_registry;
mod authenticator;
mod directory_ports;
mod directory_service;
mod integrity_guard;

pub use activity_log_service::{
    ACTIVITY_PAGE_MAX, ActivityLogRepository, ActivityLogService, ActivityQuery, NewActivityEntry,
};
pub use assignment_registry::{AssignmentChange, AssignmentRegistry, AssignmentRemoval};
pub use authenticator::{Authenticator, PasswordHasher, SessionToken, SessionTokenIssuer};
pub use directory_ports::{
    CreateDepartmentInput, CreateEmployeeInput, CreateOrganisationInput, CreateProjectInput,
    CreateUserInput, DepartmentFilter, DirectoryReader, DirectoryStore, DirectoryTransaction,
    EmployeeFilter, NewProject, NewUser, ProjectFilter, RowLock, UpdateDepartmentInput,
    UpdateEmployeeInput, UpdateOrganisationInput, UpdateProjectInput, UpdateUserInput, UserFilter,
};
pub use directory_service::{DirectoryService, LoginOutcome, UserProfile};
pub use integrity_guard::{DeletionReport, ReferentialIntegrityGuard};
