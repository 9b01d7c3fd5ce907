use std::time::Duration;

use chrono::Utc;
use orgdir_application::{
    DeletionReport, DirectoryReader, DirectoryStore, NewProject, NewUser, ReferentialIntegrityGuard,
    RowLock,
};
use orgdir_core::{AppError, AppResult, NonEmptyString};
use orgdir_domain::{
    Assignment, Budget, CascadePolicy, Department, DepartmentKey, EmailAddress, Employee,
    EmployeeKey, IntegrityPolicy, Organisation, OrganisationKey, ProjectId, ProjectSchedule,
    UserRole, UserStatus, parse_calendar_date,
};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresDirectoryStore;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres directory tests: {error}");
    }

    Some(pool)
}

fn unique_key(prefix: &str) -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix}{}", nanos.rem_euclid(1_000_000_000_000))
}

fn organisation(oid: &str) -> AppResult<Organisation> {
    let now = Utc::now();
    Ok(Organisation {
        oid: OrganisationKey::new(oid)?,
        name: NonEmptyString::new("Acme")?,
        created_at: now,
        updated_at: now,
    })
}

fn department(did: &str, oid: &str) -> AppResult<Department> {
    let now = Utc::now();
    Ok(Department {
        did: DepartmentKey::new(did)?,
        name: NonEmptyString::new("Engineering")?,
        oid: OrganisationKey::new(oid)?,
        manager_id: None,
        created_at: now,
        updated_at: now,
    })
}

fn employee(eid: &str, email: &str) -> AppResult<Employee> {
    let now = Utc::now();
    Ok(Employee {
        eid: EmployeeKey::new(eid)?,
        fname: NonEmptyString::new("Ada")?,
        lname: NonEmptyString::new("Lovelace")?,
        email: EmailAddress::new(email)?,
        created_at: now,
        updated_at: now,
    })
}

fn new_project(did: &str) -> AppResult<NewProject> {
    Ok(NewProject {
        name: NonEmptyString::new("Apollo")?,
        department_id: DepartmentKey::new(did)?,
        schedule: ProjectSchedule::new(
            parse_calendar_date("startDate", "2024-01-01")?,
            parse_calendar_date("endDate", "2024-06-30")?,
        )?,
        budget: Budget::new(2500.5)?,
        created_at: Utc::now(),
    })
}

fn new_user(email: &str, eid: Option<&str>, did: Option<&str>) -> AppResult<NewUser> {
    Ok(NewUser {
        eid: eid.map(EmployeeKey::new).transpose()?,
        fname: NonEmptyString::new("Grace")?,
        lname: None,
        email: EmailAddress::new(email)?,
        password_hash: "plain$secret".to_owned(),
        role: UserRole::ProjectManager,
        did: did.map(DepartmentKey::new).transpose()?,
        working_hours: 40,
        join_date: None,
        status: UserStatus::Active,
        created_at: Utc::now(),
    })
}

/// Seeds an organisation with one department, one project and one assigned
/// employee. Returns the project id.
async fn seed_subtree(
    store: &PostgresDirectoryStore,
    oid: &str,
    did: &str,
    eid: &str,
) -> AppResult<ProjectId> {
    let mut transaction = store.begin().await?;
    transaction.insert_organisation(&organisation(oid)?).await?;
    transaction.insert_department(&department(did, oid)?).await?;
    let project = transaction.insert_project(new_project(did)?).await?;
    transaction
        .insert_employee(&employee(eid, &format!("{eid}@example.com"))?)
        .await?;
    transaction
        .insert_assignment(&Assignment {
            project_id: project.id,
            eid: EmployeeKey::new(eid)?,
        })
        .await?;
    transaction.commit().await?;
    Ok(project.id)
}

fn join_error(error: tokio::task::JoinError) -> AppError {
    AppError::Internal(format!("concurrent transaction task failed: {error}"))
}

#[tokio::test]
async fn dropped_transaction_rolls_back() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };
    let store = PostgresDirectoryStore::new(pool);
    let oid = unique_key("O");

    {
        let mut transaction = store.begin().await?;
        transaction.insert_organisation(&organisation(&oid)?).await?;
    }

    let mut transaction = store.begin().await?;
    let found = transaction
        .find_organisation(&OrganisationKey::new(oid.as_str())?)
        .await?;
    assert!(found.is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_organisation_is_a_conflict() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };
    let store = PostgresDirectoryStore::new(pool);
    let oid = unique_key("O");

    let mut transaction = store.begin().await?;
    transaction.insert_organisation(&organisation(&oid)?).await?;
    transaction.commit().await?;

    let mut transaction = store.begin().await?;
    let duplicate = transaction.insert_organisation(&organisation(&oid)?).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn project_rows_round_trip_with_assignees() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };
    let store = PostgresDirectoryStore::new(pool);
    let oid = unique_key("O");
    let did = unique_key("D");
    let eid = unique_key("E");

    let mut transaction = store.begin().await?;
    transaction.insert_organisation(&organisation(&oid)?).await?;
    transaction.insert_department(&department(&did, &oid)?).await?;
    let project = transaction.insert_project(new_project(&did)?).await?;
    transaction
        .insert_employee(&employee(&eid, &format!("{eid}@example.com"))?)
        .await?;

    let assignment = Assignment {
        project_id: project.id,
        eid: EmployeeKey::new(eid.as_str())?,
    };
    assert!(transaction.insert_assignment(&assignment).await?);
    assert!(!transaction.insert_assignment(&assignment).await?);

    let assignees = transaction.list_assignees(project.id).await?;
    assert_eq!(assignees.len(), 1);
    assert_eq!(assignees[0].eid.as_str(), eid);

    let stored = transaction.find_project(project.id).await?;
    assert_eq!(stored.map(|stored| stored.budget.amount()), Some(2500.5));

    assert_eq!(transaction.delete_assignments_for_project(project.id).await?, 1);
    Ok(())
}

#[tokio::test]
async fn organisation_delete_cascades_through_the_subtree() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };
    let store = PostgresDirectoryStore::new(pool);
    let oid = unique_key("O");
    let did = unique_key("D");
    let eid = unique_key("E");
    let project_id = seed_subtree(&store, &oid, &did, &eid).await?;

    let mut transaction = store.begin().await?;
    let email = format!("{}@example.com", unique_key("U"));
    transaction
        .insert_user(new_user(&email, None, Some(&did))?)
        .await?;
    transaction.commit().await?;

    let guard = ReferentialIntegrityGuard::new(IntegrityPolicy {
        department_users: CascadePolicy::Cascade,
        ..IntegrityPolicy::default()
    });
    let mut transaction = store.begin().await?;
    let report = guard
        .delete_organisation(transaction.as_mut(), &OrganisationKey::new(oid.as_str())?)
        .await?;
    transaction.commit().await?;

    assert_eq!(
        report,
        DeletionReport {
            departments: 1,
            projects: 1,
            users: 1,
            assignments: 1,
        }
    );

    let mut reader = store.read().await?;
    let department_key = DepartmentKey::new(did.as_str())?;
    let employee_key = EmployeeKey::new(eid.as_str())?;
    assert!(reader.find_department(&department_key).await?.is_none());
    assert!(reader.find_project(project_id).await?.is_none());
    assert!(reader.find_user_by_email(&EmailAddress::new(email)?).await?.is_none());
    assert!(reader.find_employee(&employee_key).await?.is_some());
    assert!(reader.list_assignments_for_employee(&employee_key).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn rejected_user_cascade_rolls_back_the_organisation_delete() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };
    let store = PostgresDirectoryStore::new(pool);
    let oid = unique_key("O");
    let did = unique_key("D");
    let eid = unique_key("E");
    let project_id = seed_subtree(&store, &oid, &did, &eid).await?;

    let mut transaction = store.begin().await?;
    let email = format!("{}@example.com", unique_key("U"));
    transaction
        .insert_user(new_user(&email, None, Some(&did))?)
        .await?;
    transaction.commit().await?;

    let guard = ReferentialIntegrityGuard::new(IntegrityPolicy::default());
    let mut transaction = store.begin().await?;
    let result = guard
        .delete_organisation(transaction.as_mut(), &OrganisationKey::new(oid.as_str())?)
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    drop(transaction);

    let mut reader = store.read().await?;
    let organisation_key = OrganisationKey::new(oid.as_str())?;
    assert!(reader.find_organisation(&organisation_key).await?.is_some());
    assert!(reader.find_department(&DepartmentKey::new(did.as_str())?).await?.is_some());
    assert!(reader.find_project(project_id).await?.is_some());
    assert_eq!(reader.list_assignees(project_id).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn duplicate_user_employee_key_is_a_conflict() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };
    let store = PostgresDirectoryStore::new(pool);
    let eid = unique_key("E");
    let first_email = format!("{}@example.com", unique_key("U"));
    let second_email = format!("{}@example.com", unique_key("V"));

    let mut transaction = store.begin().await?;
    transaction
        .insert_user(new_user(&first_email, Some(&eid), None)?)
        .await?;
    let duplicate = transaction
        .insert_user(new_user(&second_email, Some(&eid), None)?)
        .await;

    match duplicate {
        Err(AppError::Conflict(message)) => assert!(message.contains("employee key")),
        other => panic!("expected an employee key conflict, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn duplicate_employee_email_is_a_conflict() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };
    let store = PostgresDirectoryStore::new(pool);
    let email = format!("{}@example.com", unique_key("M"));

    let mut transaction = store.begin().await?;
    transaction
        .insert_employee(&employee(&unique_key("E"), &email)?)
        .await?;
    let duplicate = transaction
        .insert_employee(&employee(&unique_key("F"), &email)?)
        .await;

    match duplicate {
        Err(AppError::Conflict(message)) => assert!(message.contains("email")),
        other => panic!("expected an employee email conflict, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn department_with_unknown_organisation_is_an_invalid_reference() -> AppResult<()> {
    let Some(pool) = test_pool().await else {
        return Ok(());
    };
    let store = PostgresDirectoryStore::new(pool);

    let mut transaction = store.begin().await?;
    let result = transaction
        .insert_department(&department(&unique_key("D"), &unique_key("O"))?)
        .await;
    assert!(matches!(result, Err(AppError::InvalidReference(_))));
    Ok(())
}

#[tokio::test]
async fn organisation_delete_waits_for_a_referencing_transaction() -> AppResult<()> {
    let (Some(writer_pool), Some(deleter_pool)) = (test_pool().await, test_pool().await) else {
        return Ok(());
    };
    let writer = PostgresDirectoryStore::new(writer_pool);
    let deleter = PostgresDirectoryStore::new(deleter_pool);
    let oid = unique_key("O");
    let did = unique_key("D");

    let mut transaction = writer.begin().await?;
    transaction.insert_organisation(&organisation(&oid)?).await?;
    transaction.commit().await?;

    let guard = ReferentialIntegrityGuard::new(IntegrityPolicy::default());
    let mut referencing = writer.begin().await?;
    guard
        .require_organisation(referencing.as_mut(), &OrganisationKey::new(oid.as_str())?)
        .await?;

    let delete_oid = OrganisationKey::new(oid.as_str())?;
    let delete = tokio::spawn(async move {
        let mut transaction = deleter.begin().await?;
        let report = guard
            .delete_organisation(transaction.as_mut(), &delete_oid)
            .await?;
        transaction.commit().await?;
        Ok::<_, AppError>(report)
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!delete.is_finished());

    referencing.insert_department(&department(&did, &oid)?).await?;
    referencing.commit().await?;

    let report = delete.await.map_err(join_error)??;
    assert_eq!(report.departments, 1);

    let mut reader = writer.read().await?;
    assert!(reader.find_department(&DepartmentKey::new(did.as_str())?).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn reference_to_a_concurrently_deleted_organisation_is_invalid() -> AppResult<()> {
    let (Some(writer_pool), Some(deleter_pool)) = (test_pool().await, test_pool().await) else {
        return Ok(());
    };
    let writer = PostgresDirectoryStore::new(writer_pool);
    let deleter = PostgresDirectoryStore::new(deleter_pool);
    let oid = unique_key("O");
    let did = unique_key("D");

    let mut transaction = writer.begin().await?;
    transaction.insert_organisation(&organisation(&oid)?).await?;
    transaction.commit().await?;

    let organisation_key = OrganisationKey::new(oid.as_str())?;
    let mut deleting = deleter.begin().await?;
    deleting
        .lock_organisation(&organisation_key, RowLock::Delete)
        .await?;
    deleting.delete_organisation(&organisation_key).await?;

    let guard = ReferentialIntegrityGuard::new(IntegrityPolicy::default());
    let insert = tokio::spawn(async move {
        let mut transaction = writer.begin().await?;
        let organisation_key = OrganisationKey::new(oid.as_str())?;
        guard
            .require_organisation(transaction.as_mut(), &organisation_key)
            .await?;
        transaction.insert_department(&department(&did, &oid)?).await?;
        transaction.commit().await
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!insert.is_finished());

    deleting.commit().await?;

    let result = insert.await.map_err(join_error)?;
    assert!(matches!(result, Err(AppError::InvalidReference(_))));
    Ok(())
}
