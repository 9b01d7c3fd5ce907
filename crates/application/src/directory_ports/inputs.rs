/// Input payload for organisation creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrganisationInput {
    /// Unique organisation key.
    pub oid: String,
    /// Display name.
    pub name: String,
}

/// Partial organisation update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOrganisationInput {
    /// New display name.
    pub name: Option<String>,
}

/// Input payload for department creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDepartmentInput {
    /// Unique department key.
    pub did: String,
    /// Display name.
    pub name: String,
    /// Owning organisation; must exist.
    pub oid: String,
    /// Optional manager reference.
    pub manager_id: Option<String>,
}

/// Partial department update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDepartmentInput {
    /// New display name.
    pub name: Option<String>,
    /// New owning organisation; must exist.
    pub oid: Option<String>,
    /// New manager reference.
    pub manager_id: Option<String>,
}

/// Input payload for project creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProjectInput {
    /// Display name.
    pub name: String,
    /// Owning department; must exist.
    pub department_id: String,
    /// `YYYY-MM-DD`.
    pub start_date: String,
    /// `YYYY-MM-DD`, not before `start_date`.
    pub end_date: String,
    /// Non-negative budget.
    pub budget: f64,
}

/// Partial project update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProjectInput {
    /// New display name.
    pub name: Option<String>,
    /// New owning department; must exist.
    pub department_id: Option<String>,
    /// New start date, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// New end date, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// New budget.
    pub budget: Option<f64>,
}

/// Input payload for employee creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeInput {
    /// Unique employee key.
    pub eid: String,
    /// First name.
    pub fname: String,
    /// Last name.
    pub lname: String,
    /// Unique contact email.
    pub email: String,
}

/// Partial employee update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateEmployeeInput {
    /// New first name.
    pub fname: Option<String>,
    /// New last name.
    pub lname: Option<String>,
    /// New contact email; must stay unique.
    pub email: Option<String>,
}

/// Input payload for user account creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    /// Optional unique employee key.
    pub eid: Option<String>,
    /// First name.
    pub fname: String,
    /// Last name.
    pub lname: Option<String>,
    /// Unique login email.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Role storage value; defaults to `employee`.
    pub role: Option<String>,
    /// Department membership; must exist when supplied.
    pub did: Option<String>,
    /// Contracted weekly hours; defaults to 0.
    pub working_hours: Option<u32>,
    /// First day of employment, `YYYY-MM-DD`.
    pub join_date: Option<String>,
    /// Status storage value; defaults to `active`.
    pub status: Option<String>,
}

/// Partial user update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserInput {
    /// New first name.
    pub fname: Option<String>,
    /// New last name.
    pub lname: Option<String>,
    /// New login email; must stay unique.
    pub email: Option<String>,
    /// New plaintext password; re-hashed.
    pub password: Option<String>,
    /// New role storage value.
    pub role: Option<String>,
    /// New department; must exist.
    pub did: Option<String>,
    /// New contracted weekly hours.
    pub working_hours: Option<u32>,
    /// New join date, `YYYY-MM-DD`.
    pub join_date: Option<String>,
    /// New status storage value.
    pub status: Option<String>,
}
