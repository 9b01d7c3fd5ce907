use chrono::Utc;
use tracing::info;

use orgdir_core::{AppResult, NonEmptyString};
use orgdir_domain::{ActivityAction, ActivityKind, EmailAddress, Employee, EmployeeKey};

use super::{DirectoryService, lookups};
use crate::directory_ports::{CreateEmployeeInput, EmployeeFilter, UpdateEmployeeInput};
use crate::integrity_guard::DeletionReport;

impl DirectoryService {
    /// Creates an employee. Both the key and the email must be unique.
    pub async fn create_employee(&self, input: CreateEmployeeInput) -> AppResult<Employee> {
        let now = Utc::now();
        let employee = Employee {
            eid: EmployeeKey::new(input.eid)?,
            fname: NonEmptyString::for_field("fname", input.fname)?,
            lname: NonEmptyString::for_field("lname", input.lname)?,
            email: EmailAddress::new(input.email)?,
            created_at: now,
            updated_at: now,
        };

        let mut transaction = self.begin().await?;
        transaction.insert_employee(&employee).await?;
        transaction.commit().await?;

        self.activity_log
            .record(
                ActivityKind::Employee,
                employee.full_name(),
                ActivityAction::Create,
            )
            .await;

        Ok(employee)
    }

    /// Returns one employee.
    pub async fn get_employee(&self, eid: &str) -> AppResult<Employee> {
        let eid = EmployeeKey::new(eid)?;
        let mut reader = self.read().await?;
        lookups::employee(reader.as_mut(), &eid).await
    }

    /// Lists employees, optionally narrowed by a case-insensitive search term.
    pub async fn list_employees(&self, search: Option<&str>) -> AppResult<Vec<Employee>> {
        let filter = EmployeeFilter {
            search: search
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(ToOwned::to_owned),
        };
        let mut reader = self.read().await?;
        reader.list_employees(&filter).await
    }

    /// Applies the supplied fields to an employee.
    pub async fn update_employee(
        &self,
        eid: &str,
        input: UpdateEmployeeInput,
    ) -> AppResult<Employee> {
        let eid = EmployeeKey::new(eid)?;
        let mut transaction = self.begin().await?;
        let mut employee = lookups::employee(transaction.as_mut(), &eid).await?;

        if let Some(fname) = input.fname {
            employee.fname = NonEmptyString::for_field("fname", fname)?;
        }
        if let Some(lname) = input.lname {
            employee.lname = NonEmptyString::for_field("lname", lname)?;
        }
        if let Some(email) = input.email {
            employee.email = EmailAddress::new(email)?;
        }
        employee.updated_at = Utc::now();

        transaction.update_employee(&employee).await?;
        transaction.commit().await?;

        self.activity_log
            .record(
                ActivityKind::Employee,
                employee.full_name(),
                ActivityAction::Update,
            )
            .await;

        Ok(employee)
    }

    /// Deletes an employee, removing their assignments when policy allows.
    pub async fn delete_employee(&self, eid: &str) -> AppResult<DeletionReport> {
        let eid = EmployeeKey::new(eid)?;
        let mut transaction = self.begin().await?;
        let employee = lookups::employee(transaction.as_mut(), &eid).await?;
        let report = self
            .guard
            .delete_employee(transaction.as_mut(), &eid)
            .await?;
        transaction.commit().await?;

        if !report.is_empty() {
            info!(
                eid = %eid,
                assignments = report.assignments,
                "employee delete cascaded"
            );
        }

        self.activity_log
            .record(
                ActivityKind::Employee,
                employee.full_name(),
                ActivityAction::Delete,
            )
            .await;

        Ok(report)
    }
}
