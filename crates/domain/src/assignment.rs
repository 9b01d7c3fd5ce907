use crate::{EmployeeKey, ProjectId};

/// One project/employee pairing. The pair itself is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    /// Staffed project.
    pub project_id: ProjectId,
    /// Assigned employee.
    pub eid: EmployeeKey,
}
