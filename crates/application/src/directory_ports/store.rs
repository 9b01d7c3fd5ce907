use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use orgdir_core::{AppResult, NonEmptyString};
use orgdir_domain::{
    Assignment, Budget, Department, DepartmentKey, EmailAddress, Employee, EmployeeKey,
    Organisation, OrganisationKey, Project, ProjectId, ProjectSchedule, User, UserId, UserRole,
    UserStatus,
};

/// Optional predicate for department listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentFilter {
    /// Only departments of this organisation.
    pub organisation: Option<OrganisationKey>,
}

/// Optional predicate for project listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// Only projects of this department.
    pub department: Option<DepartmentKey>,
}

/// Optional predicate for employee listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Case-insensitive substring over eid, names and email.
    pub search: Option<String>,
}

/// Optional predicate for user listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Only users holding this role.
    pub role: Option<UserRole>,
    /// Only users of this department.
    pub department: Option<DepartmentKey>,
}

/// Project fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
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
}

/// User fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// Optional employee key.
    pub eid: Option<EmployeeKey>,
    /// First name.
    pub fname: NonEmptyString,
    /// Last name.
    pub lname: Option<NonEmptyString>,
    /// Unique login email.
    pub email: EmailAddress,
    /// Password hash produced by the configured hasher.
    pub password_hash: String,
    /// Directory role.
    pub role: UserRole,
    /// Department membership.
    pub did: Option<DepartmentKey>,
    /// Contracted weekly hours.
    pub working_hours: u32,
    /// First day of employment.
    pub join_date: Option<NaiveDate>,
    /// Employment status.
    pub status: UserStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Strength of a row lock taken on a parent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLock {
    /// Keeps the row from being deleted while a child is written against it.
    Reference,
    /// Excludes new references while the row and its dependents are deleted.
    Delete,
}

/// Entry point to transactional directory storage.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Opens a read-only view of committed state. It never waits on an open
    /// [`DirectoryTransaction`].
    async fn read(&self) -> AppResult<Box<dyn DirectoryReader>>;

    /// Opens a unit of work. Every write made through it is discarded unless
    /// [`DirectoryTransaction::commit`] is called.
    async fn begin(&self) -> AppResult<Box<dyn DirectoryTransaction>>;
}

/// Lookups and listings over the entity store and assignment table.
///
/// Listings return rows in insertion order.
#[async_trait]
pub trait DirectoryReader: Send {
    /// Finds an organisation by key.
    async fn find_organisation(
        &mut self,
        oid: &OrganisationKey,
    ) -> AppResult<Option<Organisation>>;

    /// Lists all organisations.
    async fn list_organisations(&mut self) -> AppResult<Vec<Organisation>>;

    /// Finds a department by key.
    async fn find_department(&mut self, did: &DepartmentKey) -> AppResult<Option<Department>>;

    /// Lists departments matching the filter.
    async fn list_departments(&mut self, filter: &DepartmentFilter) -> AppResult<Vec<Department>>;

    /// Finds a project by id.
    async fn find_project(&mut self, id: ProjectId) -> AppResult<Option<Project>>;

    /// Lists projects matching the filter.
    async fn list_projects(&mut self, filter: &ProjectFilter) -> AppResult<Vec<Project>>;

    /// Finds an employee by key.
    async fn find_employee(&mut self, eid: &EmployeeKey) -> AppResult<Option<Employee>>;

    /// Lists employees matching the filter.
    async fn list_employees(&mut self, filter: &EmployeeFilter) -> AppResult<Vec<Employee>>;

    /// Finds a user by id.
    async fn find_user(&mut self, id: UserId) -> AppResult<Option<User>>;

    /// Finds a user by login email.
    async fn find_user_by_email(&mut self, email: &EmailAddress) -> AppResult<Option<User>>;

    /// Lists users matching the filter.
    async fn list_users(&mut self, filter: &UserFilter) -> AppResult<Vec<User>>;

    /// Lists the employees paired with a project, in assignment order.
    async fn list_assignees(&mut self, project_id: ProjectId) -> AppResult<Vec<Employee>>;

    /// Lists every pairing that references an employee.
    async fn list_assignments_for_employee(
        &mut self,
        eid: &EmployeeKey,
    ) -> AppResult<Vec<Assignment>>;
}

/// One atomic unit of work over the entity store and assignment table.
///
/// Inserts enforce natural-key uniqueness (`oid`, `did`, `eid`, `email`) and
/// fail with `Conflict`. A write that references a parent deleted by a
/// concurrent transaction fails with `InvalidReference`, and a delete that a
/// concurrent reference blocks fails with `Conflict`. Updates and deletes of
/// an absent key fail with `NotFound`. Reference checks and cascades are not
/// performed here.
#[async_trait]
pub trait DirectoryTransaction: DirectoryReader {
    /// Locks an organisation row until commit and returns it.
    async fn lock_organisation(
        &mut self,
        oid: &OrganisationKey,
        lock: RowLock,
    ) -> AppResult<Option<Organisation>>;

    /// Locks a department row until commit and returns it.
    async fn lock_department(
        &mut self,
        did: &DepartmentKey,
        lock: RowLock,
    ) -> AppResult<Option<Department>>;

    /// Locks a project row until commit and returns it.
    async fn lock_project(&mut self, id: ProjectId, lock: RowLock) -> AppResult<Option<Project>>;

    /// Locks an employee row until commit and returns it.
    async fn lock_employee(
        &mut self,
        eid: &EmployeeKey,
        lock: RowLock,
    ) -> AppResult<Option<Employee>>;

    /// Inserts a new organisation.
    async fn insert_organisation(&mut self, organisation: &Organisation) -> AppResult<()>;

    /// Replaces the stored organisation with the same key.
    async fn update_organisation(&mut self, organisation: &Organisation) -> AppResult<()>;

    /// Deletes an organisation row.
    async fn delete_organisation(&mut self, oid: &OrganisationKey) -> AppResult<()>;

    /// Inserts a new department.
    async fn insert_department(&mut self, department: &Department) -> AppResult<()>;

    /// Replaces the stored department with the same key.
    async fn update_department(&mut self, department: &Department) -> AppResult<()>;

    /// Deletes a department row.
    async fn delete_department(&mut self, did: &DepartmentKey) -> AppResult<()>;

    /// Inserts a project and returns it with its assigned id.
    async fn insert_project(&mut self, project: NewProject) -> AppResult<Project>;

    /// Replaces the stored project with the same id.
    async fn update_project(&mut self, project: &Project) -> AppResult<()>;

    /// Deletes a project row.
    async fn delete_project(&mut self, id: ProjectId) -> AppResult<()>;

    /// Inserts a new employee.
    async fn insert_employee(&mut self, employee: &Employee) -> AppResult<()>;

    /// Replaces the stored employee with the same key.
    async fn update_employee(&mut self, employee: &Employee) -> AppResult<()>;

    /// Deletes an employee row.
    async fn delete_employee(&mut self, eid: &EmployeeKey) -> AppResult<()>;

    /// Inserts a user and returns it with its assigned id.
    async fn insert_user(&mut self, user: NewUser) -> AppResult<User>;

    /// Replaces the stored user with the same id.
    async fn update_user(&mut self, user: &User) -> AppResult<()>;

    /// Deletes a user row.
    async fn delete_user(&mut self, id: UserId) -> AppResult<()>;

    /// Inserts a pairing. Returns `false` when it already existed.
    async fn insert_assignment(&mut self, assignment: &Assignment) -> AppResult<bool>;

    /// Removes a pairing. Returns `false` when it did not exist.
    async fn delete_assignment(&mut self, assignment: &Assignment) -> AppResult<bool>;

    /// Removes all pairings of a project. Returns how many were removed.
    async fn delete_assignments_for_project(&mut self, project_id: ProjectId) -> AppResult<usize>;

    /// Removes all pairings of an employee. Returns how many were removed.
    async fn delete_assignments_for_employee(&mut self, eid: &EmployeeKey) -> AppResult<usize>;

    /// Makes every write of this unit of work durable.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}
