use async_trait::async_trait;
use orgdir_application::{
    DepartmentFilter, DirectoryReader, EmployeeFilter, ProjectFilter, UserFilter,
};
use orgdir_core::AppResult;
use orgdir_domain::{
    Assignment, Department, DepartmentKey, EmailAddress, Employee, EmployeeKey, Organisation,
    OrganisationKey, Project, ProjectId, User, UserId,
};

use super::{DirectoryState, InMemoryDirectoryReader, InMemoryDirectoryTransaction};

impl DirectoryState {
    pub(super) fn organisation(&self, oid: &OrganisationKey) -> Option<Organisation> {
        self.organisations
            .iter()
            .find(|organisation| &organisation.oid == oid)
            .cloned()
    }

    fn departments_matching(&self, filter: &DepartmentFilter) -> Vec<Department> {
        self.departments
            .iter()
            .filter(|department| {
                filter
                    .organisation
                    .as_ref()
                    .is_none_or(|oid| &department.oid == oid)
            })
            .cloned()
            .collect()
    }

    pub(super) fn department(&self, did: &DepartmentKey) -> Option<Department> {
        self.departments
            .iter()
            .find(|department| &department.did == did)
            .cloned()
    }

    pub(super) fn project(&self, id: ProjectId) -> Option<Project> {
        self.projects.iter().find(|project| project.id == id).cloned()
    }

    fn projects_matching(&self, filter: &ProjectFilter) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|project| {
                filter
                    .department
                    .as_ref()
                    .is_none_or(|did| &project.department_id == did)
            })
            .cloned()
            .collect()
    }

    pub(super) fn employee(&self, eid: &EmployeeKey) -> Option<Employee> {
        self.employees
            .iter()
            .find(|employee| &employee.eid == eid)
            .cloned()
    }

    fn employees_matching(&self, filter: &EmployeeFilter) -> Vec<Employee> {
        self.employees
            .iter()
            .filter(|employee| {
                filter
                    .search
                    .as_deref()
                    .is_none_or(|needle| employee.matches_search(needle))
            })
            .cloned()
            .collect()
    }

    fn user(&self, id: UserId) -> Option<User> {
        self.users.iter().find(|user| user.id == id).cloned()
    }

    fn user_by_email(&self, email: &EmailAddress) -> Option<User> {
        self.users.iter().find(|user| &user.email == email).cloned()
    }

    fn users_matching(&self, filter: &UserFilter) -> Vec<User> {
        self.users
            .iter()
            .filter(|user| filter.role.is_none_or(|role| user.role == role))
            .filter(|user| {
                filter
                    .department
                    .as_ref()
                    .is_none_or(|did| user.did.as_ref() == Some(did))
            })
            .cloned()
            .collect()
    }

    fn assignees(&self, project_id: ProjectId) -> Vec<Employee> {
        self.assignments
            .iter()
            .filter(|assignment| assignment.project_id == project_id)
            .filter_map(|assignment| self.employee(&assignment.eid))
            .collect()
    }

    fn assignments_for_employee(&self, eid: &EmployeeKey) -> Vec<Assignment> {
        self.assignments
            .iter()
            .filter(|assignment| &assignment.eid == eid)
            .cloned()
            .collect()
    }
}

/// Implements [`DirectoryReader`] by delegating to the [`DirectoryState`]
/// held in `$state`.
macro_rules! directory_reader_over_state {
    ($target:ty, $state:ident) => {
        #[async_trait]
        impl DirectoryReader for $target {
            async fn find_organisation(
                &mut self,
                oid: &OrganisationKey,
            ) -> AppResult<Option<Organisation>> {
                Ok(self.$state.organisation(oid))
            }

            async fn list_organisations(&mut self) -> AppResult<Vec<Organisation>> {
                Ok(self.$state.organisations.clone())
            }

            async fn find_department(
                &mut self,
                did: &DepartmentKey,
            ) -> AppResult<Option<Department>> {
                Ok(self.$state.department(did))
            }

            async fn list_departments(
                &mut self,
                filter: &DepartmentFilter,
            ) -> AppResult<Vec<Department>> {
                Ok(self.$state.departments_matching(filter))
            }

            async fn find_project(&mut self, id: ProjectId) -> AppResult<Option<Project>> {
                Ok(self.$state.project(id))
            }

            async fn list_projects(&mut self, filter: &ProjectFilter) -> AppResult<Vec<Project>> {
                Ok(self.$state.projects_matching(filter))
            }

            async fn find_employee(&mut self, eid: &EmployeeKey) -> AppResult<Option<Employee>> {
                Ok(self.$state.employee(eid))
            }

            async fn list_employees(
                &mut self,
                filter: &EmployeeFilter,
            ) -> AppResult<Vec<Employee>> {
                Ok(self.$state.employees_matching(filter))
            }

            async fn find_user(&mut self, id: UserId) -> AppResult<Option<User>> {
                Ok(self.$state.user(id))
            }

            async fn find_user_by_email(
                &mut self,
                email: &EmailAddress,
            ) -> AppResult<Option<User>> {
                Ok(self.$state.user_by_email(email))
            }

            async fn list_users(&mut self, filter: &UserFilter) -> AppResult<Vec<User>> {
                Ok(self.$state.users_matching(filter))
            }

            async fn list_assignees(&mut self, project_id: ProjectId) -> AppResult<Vec<Employee>> {
                Ok(self.$state.assignees(project_id))
            }

            async fn list_assignments_for_employee(
                &mut self,
                eid: &EmployeeKey,
            ) -> AppResult<Vec<Assignment>> {
                Ok(self.$state.assignments_for_employee(eid))
            }
        }
    };
}

directory_reader_over_state!(InMemoryDirectoryReader, state);
directory_reader_over_state!(InMemoryDirectoryTransaction, working);
