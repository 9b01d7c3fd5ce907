use std::sync::Arc;

use async_trait::async_trait;
use orgdir_application::{DirectoryTransaction, NewProject, NewUser, RowLock};
use orgdir_core::{AppError, AppResult};
use orgdir_domain::{
    Assignment, Department, DepartmentKey, EmailAddress, Employee, EmployeeKey, Organisation,
    OrganisationKey, Project, ProjectId, User, UserId,
};

use super::InMemoryDirectoryTransaction;

// Write transactions already exclude each other, so a row lock is a lookup.
#[async_trait]
impl DirectoryTransaction for InMemoryDirectoryTransaction {
    async fn lock_organisation(
        &mut self,
        oid: &OrganisationKey,
        _lock: RowLock,
    ) -> AppResult<Option<Organisation>> {
        Ok(self.working.organisation(oid))
    }

    async fn lock_department(
        &mut self,
        did: &DepartmentKey,
        _lock: RowLock,
    ) -> AppResult<Option<Department>> {
        Ok(self.working.department(did))
    }

    async fn lock_project(&mut self, id: ProjectId, _lock: RowLock) -> AppResult<Option<Project>> {
        Ok(self.working.project(id))
    }

    async fn lock_employee(
        &mut self,
        eid: &EmployeeKey,
        _lock: RowLock,
    ) -> AppResult<Option<Employee>> {
        Ok(self.working.employee(eid))
    }

    async fn insert_organisation(&mut self, organisation: &Organisation) -> AppResult<()> {
        if self
            .working
            .organisations
            .iter()
            .any(|existing| existing.oid == organisation.oid)
        {
            return Err(AppError::Conflict(format!(
                "organisation '{}' already exists",
                organisation.oid
            )));
        }

        self.working.organisations.push(organisation.clone());
        Ok(())
    }

    async fn update_organisation(&mut self, organisation: &Organisation) -> AppResult<()> {
        let stored = self
            .working
            .organisations
            .iter_mut()
            .find(|existing| existing.oid == organisation.oid)
            .ok_or_else(|| {
                AppError::NotFound(format!("organisation '{}' not found", organisation.oid))
            })?;

        *stored = organisation.clone();
        Ok(())
    }

    async fn delete_organisation(&mut self, oid: &OrganisationKey) -> AppResult<()> {
        let index = self
            .working
            .organisations
            .iter()
            .position(|organisation| &organisation.oid == oid)
            .ok_or_else(|| AppError::NotFound(format!("organisation '{oid}' not found")))?;

        self.working.organisations.remove(index);
        Ok(())
    }

    async fn insert_department(&mut self, department: &Department) -> AppResult<()> {
        if self
            .working
            .departments
            .iter()
            .any(|existing| existing.did == department.did)
        {
            return Err(AppError::Conflict(format!(
                "department '{}' already exists",
                department.did
            )));
        }

        self.working.departments.push(department.clone());
        Ok(())
    }

    async fn update_department(&mut self, department: &Department) -> AppResult<()> {
        let stored = self
            .working
            .departments
            .iter_mut()
            .find(|existing| existing.did == department.did)
            .ok_or_else(|| {
                AppError::NotFound(format!("department '{}' not found", department.did))
            })?;

        *stored = department.clone();
        Ok(())
    }

    async fn delete_department(&mut self, did: &DepartmentKey) -> AppResult<()> {
        let index = self
            .working
            .departments
            .iter()
            .position(|department| &department.did == did)
            .ok_or_else(|| AppError::NotFound(format!("department '{did}' not found")))?;

        self.working.departments.remove(index);
        Ok(())
    }

    async fn insert_project(&mut self, project: NewProject) -> AppResult<Project> {
        let id = ProjectId::new(self.working.last_project_id + 1)?;
        let project = Project {
            id,
            name: project.name,
            department_id: project.department_id,
            schedule: project.schedule,
            budget: project.budget,
            created_at: project.created_at,
            updated_at: project.created_at,
        };

        self.working.last_project_id = id.as_i64();
        self.working.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(&mut self, project: &Project) -> AppResult<()> {
        let stored = self
            .working
            .projects
            .iter_mut()
            .find(|existing| existing.id == project.id)
            .ok_or_else(|| AppError::NotFound(format!("project '{}' not found", project.id)))?;

        *stored = project.clone();
        Ok(())
    }

    async fn delete_project(&mut self, id: ProjectId) -> AppResult<()> {
        let index = self
            .working
            .projects
            .iter()
            .position(|project| project.id == id)
            .ok_or_else(|| AppError::NotFound(format!("project '{id}' not found")))?;

        self.working.projects.remove(index);
        Ok(())
    }

    async fn insert_employee(&mut self, employee: &Employee) -> AppResult<()> {
        if self
            .working
            .employees
            .iter()
            .any(|existing| existing.eid == employee.eid)
        {
            return Err(AppError::Conflict(format!(
                "employee '{}' already exists",
                employee.eid
            )));
        }
        self.ensure_employee_email_free(&employee.email, None)?;

        self.working.employees.push(employee.clone());
        Ok(())
    }

    async fn update_employee(&mut self, employee: &Employee) -> AppResult<()> {
        self.ensure_employee_email_free(&employee.email, Some(&employee.eid))?;
        let stored = self
            .working
            .employees
            .iter_mut()
            .find(|existing| existing.eid == employee.eid)
            .ok_or_else(|| AppError::NotFound(format!("employee '{}' not found", employee.eid)))?;

        *stored = employee.clone();
        Ok(())
    }

    async fn delete_employee(&mut self, eid: &EmployeeKey) -> AppResult<()> {
        let index = self
            .working
            .employees
            .iter()
            .position(|employee| &employee.eid == eid)
            .ok_or_else(|| AppError::NotFound(format!("employee '{eid}' not found")))?;

        self.working.employees.remove(index);
        Ok(())
    }

    async fn insert_user(&mut self, user: NewUser) -> AppResult<User> {
        self.ensure_user_unique(&user.email, user.eid.as_ref(), None)?;

        let id = UserId::new(self.working.last_user_id + 1)?;
        let user = User {
            id,
            eid: user.eid,
            fname: user.fname,
            lname: user.lname,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            did: user.did,
            working_hours: user.working_hours,
            join_date: user.join_date,
            status: user.status,
            created_at: user.created_at,
            updated_at: user.created_at,
        };

        self.working.last_user_id = id.as_i64();
        self.working.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&mut self, user: &User) -> AppResult<()> {
        self.ensure_user_unique(&user.email, user.eid.as_ref(), Some(user.id))?;
        let stored = self
            .working
            .users
            .iter_mut()
            .find(|existing| existing.id == user.id)
            .ok_or_else(|| AppError::NotFound(format!("user '{}' not found", user.id)))?;

        *stored = user.clone();
        Ok(())
    }

    async fn delete_user(&mut self, id: UserId) -> AppResult<()> {
        let index = self
            .working
            .users
            .iter()
            .position(|user| user.id == id)
            .ok_or_else(|| AppError::NotFound(format!("user '{id}' not found")))?;

        self.working.users.remove(index);
        Ok(())
    }

    async fn insert_assignment(&mut self, assignment: &Assignment) -> AppResult<bool> {
        if self.working.assignments.contains(assignment) {
            return Ok(false);
        }

        self.working.assignments.push(assignment.clone());
        Ok(true)
    }

    async fn delete_assignment(&mut self, assignment: &Assignment) -> AppResult<bool> {
        let before = self.working.assignments.len();
        self.working
            .assignments
            .retain(|existing| existing != assignment);

        Ok(self.working.assignments.len() < before)
    }

    async fn delete_assignments_for_project(&mut self, project_id: ProjectId) -> AppResult<usize> {
        let before = self.working.assignments.len();
        self.working
            .assignments
            .retain(|assignment| assignment.project_id != project_id);

        Ok(before - self.working.assignments.len())
    }

    async fn delete_assignments_for_employee(&mut self, eid: &EmployeeKey) -> AppResult<usize> {
        let before = self.working.assignments.len();
        self.working
            .assignments
            .retain(|assignment| &assignment.eid != eid);

        Ok(before - self.working.assignments.len())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let Self {
            snapshot,
            _writer,
            working,
        } = *self;
        *snapshot.write().await = Arc::new(working);
        Ok(())
    }
}

impl InMemoryDirectoryTransaction {
    fn ensure_employee_email_free(
        &self,
        email: &EmailAddress,
        owner: Option<&EmployeeKey>,
    ) -> AppResult<()> {
        let taken = self
            .working
            .employees
            .iter()
            .any(|existing| &existing.email == email && Some(&existing.eid) != owner);

        if taken {
            return Err(AppError::Conflict(format!(
                "employee email '{email}' is already in use"
            )));
        }

        Ok(())
    }

    fn ensure_user_unique(
        &self,
        email: &EmailAddress,
        eid: Option<&EmployeeKey>,
        owner: Option<UserId>,
    ) -> AppResult<()> {
        for existing in &self.working.users {
            if Some(existing.id) == owner {
                continue;
            }
            if &existing.email == email {
                return Err(AppError::Conflict(format!(
                    "user email '{email}' is already in use"
                )));
            }
            if let Some(eid) = eid
                && existing.eid.as_ref() == Some(eid)
            {
                return Err(AppError::Conflict(format!(
                    "user employee key '{eid}' is already in use"
                )));
            }
        }

        Ok(())
    }
}
