use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use orgdir_core::{AppError, AppResult, NonEmptyString};
use orgdir_domain::{
    Budget, Department, DepartmentKey, EmailAddress, Employee, EmployeeKey, Organisation,
    OrganisationKey, Project, ProjectId, ProjectSchedule, User, UserId, UserRole, UserStatus,
    validate_working_hours,
};

#[derive(Debug, FromRow)]
pub(super) struct OrganisationRow {
    oid: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrganisationRow> for Organisation {
    type Error = AppError;

    fn try_from(row: OrganisationRow) -> AppResult<Self> {
        Ok(Self {
            oid: OrganisationKey::new(row.oid)?,
            name: NonEmptyString::new(row.name)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct DepartmentRow {
    did: String,
    name: String,
    oid: String,
    manager_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DepartmentRow> for Department {
    type Error = AppError;

    fn try_from(row: DepartmentRow) -> AppResult<Self> {
        Ok(Self {
            did: DepartmentKey::new(row.did)?,
            name: NonEmptyString::new(row.name)?,
            oid: OrganisationKey::new(row.oid)?,
            manager_id: row.manager_id.map(NonEmptyString::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ProjectRow {
    id: i64,
    name: String,
    department_id: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    budget: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = AppError;

    fn try_from(row: ProjectRow) -> AppResult<Self> {
        Ok(Self {
            id: ProjectId::new(row.id)?,
            name: NonEmptyString::new(row.name)?,
            department_id: DepartmentKey::new(row.department_id)?,
            schedule: ProjectSchedule::new(row.start_date, row.end_date)?,
            budget: Budget::new(row.budget)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct EmployeeRow {
    eid: String,
    fname: String,
    lname: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = AppError;

    fn try_from(row: EmployeeRow) -> AppResult<Self> {
        Ok(Self {
            eid: EmployeeKey::new(row.eid)?,
            fname: NonEmptyString::new(row.fname)?,
            lname: NonEmptyString::new(row.lname)?,
            email: EmailAddress::new(row.email)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(super) struct UserRow {
    id: i64,
    eid: Option<String>,
    fname: String,
    lname: Option<String>,
    email: String,
    password_hash: String,
    role: String,
    did: Option<String>,
    working_hours: i32,
    join_date: Option<NaiveDate>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> AppResult<Self> {
        Ok(Self {
            id: UserId::new(row.id)?,
            eid: row.eid.map(EmployeeKey::new).transpose()?,
            fname: NonEmptyString::new(row.fname)?,
            lname: row.lname.map(NonEmptyString::new).transpose()?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            role: UserRole::from_str(row.role.as_str())?,
            did: row.did.map(DepartmentKey::new).transpose()?,
            working_hours: u32::try_from(row.working_hours).map_err(|_| {
                AppError::Internal(format!(
                    "stored working hours {} are negative",
                    row.working_hours
                ))
            })?,
            join_date: row.join_date,
            status: UserStatus::from_str(row.status.as_str())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(super) fn working_hours_column(working_hours: u32) -> AppResult<i32> {
    let working_hours = validate_working_hours(working_hours)?;
    i32::try_from(working_hours).map_err(|_| {
        AppError::Internal(format!("workingHours {working_hours} does not fit the column"))
    })
}
