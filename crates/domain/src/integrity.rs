//! Cascade policy table for parent/child relationships.

use std::str::FromStr;

use orgdir_core::AppError;
use serde::{Deserialize, Serialize};

/// What happens to dependents when their parent is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadePolicy {
    /// Delete dependents together with the parent.
    Cascade,
    /// Refuse to delete the parent while dependents exist.
    Reject,
}

impl CascadePolicy {
    /// Returns the configuration value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "cascade",
            Self::Reject => "reject",
        }
    }
}

impl FromStr for CascadePolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cascade" => Ok(Self::Cascade),
            "reject" => Ok(Self::Reject),
            _ => Err(AppError::Validation(format!(
                "cascade policy must be 'cascade' or 'reject', got '{value}'"
            ))),
        }
    }
}

/// Parent to child edges in the directory graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// Department.oid references Organisation.
    OrganisationDepartments,
    /// Project.departmentId references Department.
    DepartmentProjects,
    /// User.did references Department.
    DepartmentUsers,
    /// Assignment.projectId references Project.
    ProjectAssignments,
    /// Assignment.eid references Employee.
    EmployeeAssignments,
}

impl Relationship {
    /// Returns a label used in conflict messages.
    #[must_use]
    pub fn dependents_label(&self) -> &'static str {
        match self {
            Self::OrganisationDepartments => "departments",
            Self::DepartmentProjects => "projects",
            Self::DepartmentUsers => "users",
            Self::ProjectAssignments | Self::EmployeeAssignments => "assignments",
        }
    }
}

/// Per-relationship cascade configuration.
///
/// Project assignments always cascade: a pairing cannot outlive its project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrityPolicy {
    /// Organisation deletion and its departments.
    pub organisation_departments: CascadePolicy,
    /// Department deletion and its projects.
    pub department_projects: CascadePolicy,
    /// Department deletion and the users that belong to it.
    pub department_users: CascadePolicy,
    /// Employee deletion and the employee's assignments.
    pub employee_assignments: CascadePolicy,
}

impl IntegrityPolicy {
    /// Returns the policy configured for a relationship.
    #[must_use]
    pub fn policy_for(&self, relationship: Relationship) -> CascadePolicy {
        match relationship {
            Relationship::OrganisationDepartments => self.organisation_departments,
            Relationship::DepartmentProjects => self.department_projects,
            Relationship::DepartmentUsers => self.department_users,
            Relationship::ProjectAssignments => CascadePolicy::Cascade,
            Relationship::EmployeeAssignments => self.employee_assignments,
        }
    }
}

impl Default for IntegrityPolicy {
    fn default() -> Self {
        Self {
            organisation_departments: CascadePolicy::Cascade,
            department_projects: CascadePolicy::Cascade,
            department_users: CascadePolicy::Reject,
            employee_assignments: CascadePolicy::Cascade,
        }
    }
}
