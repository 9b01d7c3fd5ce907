mod inputs;
mod store;

pub use inputs::{
    CreateDepartmentInput, CreateEmployeeInput, CreateOrganisationInput, CreateProjectInput,
    CreateUserInput, UpdateDepartmentInput, UpdateEmployeeInput, UpdateOrganisationInput,
    UpdateProjectInput, UpdateUserInput,
};
pub use store::{
    DepartmentFilter, DirectoryReader, DirectoryStore, DirectoryTransaction, EmployeeFilter,
    NewProject, NewUser, ProjectFilter, RowLock, UserFilter,
};
