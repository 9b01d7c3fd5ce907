use std::sync::Arc;

use async_trait::async_trait;
use orgdir_application::{
    ActivityLogRepository, ActivityLogService, ActivityQuery, Authenticator, CreateDepartmentInput,
    CreateEmployeeInput, CreateOrganisationInput, CreateProjectInput, CreateUserInput,
    DirectoryService, NewActivityEntry, PasswordHasher, ReferentialIntegrityGuard, SessionToken,
    SessionTokenIssuer, UpdateEmployeeInput, UpdateProjectInput, UpdateUserInput,
};
use orgdir_core::{AppError, AppResult, INVALID_CREDENTIALS_MESSAGE};
use orgdir_domain::{
    ActivityAction, ActivityEntry, ActivityKind, CascadePolicy, IntegrityPolicy, User,
};
use orgdir_infrastructure::{
    Argon2PasswordHasher, InMemoryActivityLogRepository, InMemoryDirectoryStore,
};

struct StubTokenIssuer;

#[async_trait]
impl SessionTokenIssuer for StubTokenIssuer {
    async fn issue(&self, user: &User) -> AppResult<SessionToken> {
        Ok(SessionToken::new(format!("stub-token-{}", user.id)))
    }
}

/// Reversible hasher so tests stay fast. Argon2 is covered separately.
struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("plain${password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash.strip_prefix("plain$") == Some(password))
    }
}

struct UnavailableActivityLog;

#[async_trait]
impl ActivityLogRepository for UnavailableActivityLog {
    async fn append(&self, _entry: NewActivityEntry) -> AppResult<()> {
        Err(AppError::Internal("activity log offline".to_owned()))
    }

    async fn list_recent(&self, _query: ActivityQuery) -> AppResult<Vec<ActivityEntry>> {
        Err(AppError::Internal("activity log offline".to_owned()))
    }
}

fn build_service_with(
    policy: IntegrityPolicy,
    activity_log: Arc<dyn ActivityLogRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
) -> DirectoryService {
    DirectoryService::new(
        Arc::new(InMemoryDirectoryStore::new()),
        ReferentialIntegrityGuard::new(policy),
        ActivityLogService::new(activity_log),
        Authenticator::new(password_hasher, Arc::new(StubTokenIssuer)),
    )
}

fn build_service() -> DirectoryService {
    build_service_with(
        IntegrityPolicy::default(),
        Arc::new(InMemoryActivityLogRepository::new()),
        Arc::new(PlainPasswordHasher),
    )
}

async fn seed_organisation(service: &DirectoryService, oid: &str) -> AppResult<()> {
    service
        .create_organisation(CreateOrganisationInput {
            oid: oid.to_owned(),
            name: format!("{oid} Ltd"),
        })
        .await
        .map(|_| ())
}

async fn seed_department(service: &DirectoryService, did: &str, oid: &str) -> AppResult<()> {
    service
        .create_department(CreateDepartmentInput {
            did: did.to_owned(),
            name: "Engineering".to_owned(),
            oid: oid.to_owned(),
            manager_id: None,
        })
        .await
        .map(|_| ())
}

async fn seed_project(service: &DirectoryService, did: &str) -> AppResult<i64> {
    let project = service
        .create_project(CreateProjectInput {
            name: "Apollo".to_owned(),
            department_id: did.to_owned(),
            start_date: "2024-01-01".to_owned(),
            end_date: "2024-12-31".to_owned(),
            budget: 125_000.0,
        })
        .await?;
    Ok(project.id.as_i64())
}

async fn seed_employee(service: &DirectoryService, eid: &str, email: &str) -> AppResult<()> {
    service
        .create_employee(CreateEmployeeInput {
            eid: eid.to_owned(),
            fname: "Ada".to_owned(),
            lname: "Lovelace".to_owned(),
            email: email.to_owned(),
        })
        .await
        .map(|_| ())
}

fn user_input(email: &str, password: &str) -> CreateUserInput {
    CreateUserInput {
        eid: None,
        fname: "Grace".to_owned(),
        lname: Some("Hopper".to_owned()),
        email: email.to_owned(),
        password: password.to_owned(),
        role: Some("admin".to_owned()),
        did: None,
        working_hours: None,
        join_date: Some("2023-09-01".to_owned()),
        status: None,
    }
}

#[tokio::test]
async fn duplicate_natural_keys_conflict() -> AppResult<()> {
    let service = build_service();

    seed_organisation(&service, "ORG1").await?;
    let organisation = seed_organisation(&service, "ORG1").await;
    assert!(matches!(organisation, Err(AppError::Conflict(_))));

    seed_department(&service, "DEPT1", "ORG1").await?;
    let department = seed_department(&service, "DEPT1", "ORG1").await;
    assert!(matches!(department, Err(AppError::Conflict(_))));

    seed_employee(&service, "E1", "ada@example.com").await?;
    let same_key = seed_employee(&service, "E1", "other@example.com").await;
    assert!(matches!(same_key, Err(AppError::Conflict(_))));
    let same_email = seed_employee(&service, "E2", "ada@example.com").await;
    assert!(matches!(same_email, Err(AppError::Conflict(_))));

    service
        .create_user(user_input("a@x.com", "correct-horse"))
        .await?;
    let same_user_email = service
        .create_user(user_input("a@x.com", "correct-horse"))
        .await;
    assert!(matches!(same_user_email, Err(AppError::Conflict(_))));

    assert_eq!(service.list_organisations().await?.len(), 1);
    assert_eq!(service.list_employees(None).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn assigning_twice_keeps_one_pair() -> AppResult<()> {
    let service = build_service();
    seed_organisation(&service, "ORG1").await?;
    seed_department(&service, "DEPT1", "ORG1").await?;
    let project_id = seed_project(&service, "DEPT1").await?;
    seed_employee(&service, "E1", "ada@example.com").await?;

    service.assign_employee(project_id, "E1").await?;
    service.assign_employee(project_id, "E1").await?;

    let assignees = service.list_assignees(project_id).await?;
    assert_eq!(assignees.len(), 1);
    assert_eq!(assignees[0].eid.as_str(), "E1");

    let assignment_entries = service
        .recent_activity(ActivityQuery {
            kind: Some(ActivityKind::Assignment),
            ..ActivityQuery::default()
        })
        .await?;
    assert_eq!(assignment_entries.len(), 1);
    assert_eq!(assignment_entries[0].name, "Apollo:E1");
    Ok(())
}

#[tokio::test]
async fn assigning_unknown_parties_is_not_found() -> AppResult<()> {
    let service = build_service();
    seed_organisation(&service, "ORG1").await?;
    seed_department(&service, "DEPT1", "ORG1").await?;
    let project_id = seed_project(&service, "DEPT1").await?;
    seed_employee(&service, "E1", "ada@example.com").await?;

    let unknown_project = service.assign_employee(project_id + 100, "E1").await;
    assert!(matches!(unknown_project, Err(AppError::NotFound(_))));

    let unknown_employee = service.assign_employee(project_id, "E404").await;
    assert!(matches!(unknown_employee, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn unassign_distinguishes_unknown_employee_from_missing_pair() -> AppResult<()> {
    let service = build_service();
    seed_organisation(&service, "ORG1").await?;
    seed_department(&service, "DEPT1", "ORG1").await?;
    let project_id = seed_project(&service, "DEPT1").await?;
    seed_employee(&service, "E1", "ada@example.com").await?;

    let never_assigned = match service.unassign_employee(project_id, "E1").await {
        Err(AppError::NotFound(message)) => message,
        other => panic!("expected not found, got {other:?}"),
    };
    let unknown_employee = match service.unassign_employee(project_id, "E404").await {
        Err(AppError::NotFound(message)) => message,
        other => panic!("expected not found, got {other:?}"),
    };

    assert_ne!(never_assigned, unknown_employee);
    assert!(never_assigned.contains("not assigned"));
    assert!(unknown_employee.contains("E404"));
    Ok(())
}

#[tokio::test]
async fn deleting_organisation_cascades_to_departments() -> AppResult<()> {
    let service = build_service();
    seed_organisation(&service, "ORG1").await?;
    seed_department(&service, "DEPT1", "ORG1").await?;
    let project_id = seed_project(&service, "DEPT1").await?;
    seed_employee(&service, "E1", "ada@example.com").await?;
    service.assign_employee(project_id, "E1").await?;

    let report = service.delete_organisation("ORG1").await?;
    assert_eq!(report.departments, 1);
    assert_eq!(report.projects, 1);
    assert_eq!(report.assignments, 1);

    let department = service.get_department("DEPT1").await;
    assert!(matches!(department, Err(AppError::NotFound(_))));
    let organisation = service.get_organisation("ORG1").await;
    assert!(matches!(organisation, Err(AppError::NotFound(_))));

    // Employees are not owned by the hierarchy.
    assert!(service.get_employee("E1").await.is_ok());
    Ok(())
}

#[tokio::test]
async fn deleting_project_removes_assignments() -> AppResult<()> {
    let service = build_service();
    seed_organisation(&service, "ORG1").await?;
    seed_department(&service, "DEPT1", "ORG1").await?;
    let project_id = seed_project(&service, "DEPT1").await?;
    seed_employee(&service, "E1", "ada@example.com").await?;
    seed_employee(&service, "E2", "grace@example.com").await?;
    service.assign_employee(project_id, "E1").await?;
    service.assign_employee(project_id, "E2").await?;

    let report = service.delete_project(project_id).await?;
    assert_eq!(report.assignments, 2);

    let assignees = service.list_assignees(project_id).await;
    assert!(matches!(assignees, Err(AppError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn deleting_employee_cascades_assignments_by_default() -> AppResult<()> {
    let service = build_service();
    seed_organisation(&service, "ORG1").await?;
    seed_department(&service, "DEPT1", "ORG1").await?;
    let project_id = seed_project(&service, "DEPT1").await?;
    seed_employee(&service, "E1", "ada@example.com").await?;
    service.assign_employee(project_id, "E1").await?;

    service.delete_employee("E1").await?;
    assert!(service.list_assignees(project_id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn rejected_cascade_leaves_everything_in_place() -> AppResult<()> {
    let policy = IntegrityPolicy {
        department_projects: CascadePolicy::Reject,
        ..IntegrityPolicy::default()
    };
    let service = build_service_with(
        policy,
        Arc::new(InMemoryActivityLogRepository::new()),
        Arc::new(PlainPasswordHasher),
    );
    seed_organisation(&service, "ORG1").await?;
    seed_department(&service, "DEPT1", "ORG1").await?;
    seed_department(&service, "DEPT2", "ORG1").await?;
    seed_project(&service, "DEPT2").await?;

    let deleted = service.delete_organisation("ORG1").await;
    assert!(matches!(deleted, Err(AppError::Conflict(_))));

    // DEPT1 was visited before DEPT2 rejected; the rollback restores it.
    assert!(service.get_organisation("ORG1").await.is_ok());
    assert!(service.get_department("DEPT1").await.is_ok());
    assert_eq!(service.list_projects(Some("DEPT2")).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn department_users_block_deletion_by_default() -> AppResult<()> {
    let service = build_service();
    seed_organisation(&service, "ORG1").await?;
    seed_department(&service, "DEPT1", "ORG1").await?;
    service
        .create_user(CreateUserInput {
            did: Some("DEPT1".to_owned()),
            ..user_input("member@example.com", "correct-horse")
        })
        .await?;

    let deleted = service.delete_department("DEPT1").await;
    assert!(matches!(deleted, Err(AppError::Conflict(message)) if message.contains("user")));
    assert!(service.get_department("DEPT1").await.is_ok());
    Ok(())
}

#[tokio::test]
async fn login_failures_are_indistinguishable() -> AppResult<()> {
    let service = build_service();
    service
        .create_user(user_input("a@x.com", "correct-horse"))
        .await?;

    let wrong_password = service.login("a@x.com", "battery-staple").await;
    let unknown_email = service.login("nobody@x.com", "correct-horse").await;
    let malformed_email = service.login("not-an-email", "correct-horse").await;

    for outcome in [wrong_password, unknown_email, malformed_email] {
        match outcome {
            Err(AppError::Authentication(message)) => {
                assert_eq!(message, INVALID_CREDENTIALS_MESSAGE);
            }
            other => panic!("expected authentication error, got {other:?}"),
        }
    }
    Ok(())
}

#[tokio::test]
async fn login_returns_profile_and_token() -> AppResult<()> {
    let service = build_service_with(
        IntegrityPolicy::default(),
        Arc::new(InMemoryActivityLogRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
    );
    let created = service
        .create_user(user_input("A@X.com", "correct-horse"))
        .await?;

    let outcome = service.login("a@x.com", "correct-horse").await?;
    assert_eq!(outcome.user, created);
    assert_eq!(outcome.user.email.as_str(), "a@x.com");
    assert_eq!(outcome.token.as_str(), format!("stub-token-{}", created.id));
    Ok(())
}

#[tokio::test]
async fn inactive_users_cannot_log_in() -> AppResult<()> {
    let service = build_service();
    service
        .create_user(CreateUserInput {
            status: Some("inactive".to_owned()),
            ..user_input("a@x.com", "correct-horse")
        })
        .await?;

    let outcome = service.login("a@x.com", "correct-horse").await;
    assert!(matches!(outcome, Err(AppError::Authentication(_))));
    Ok(())
}

#[tokio::test]
async fn partial_update_preserves_omitted_fields() -> AppResult<()> {
    let service = build_service();
    seed_employee(&service, "E1", "ada@example.com").await?;

    let updated = service
        .update_employee(
            "E1",
            UpdateEmployeeInput {
                fname: Some("Augusta".to_owned()),
                ..UpdateEmployeeInput::default()
            },
        )
        .await?;

    assert_eq!(updated.fname.as_str(), "Augusta");
    assert_eq!(updated.lname.as_str(), "Lovelace");
    assert_eq!(updated.email.as_str(), "ada@example.com");

    let stored = service.get_employee("E1").await?;
    assert_eq!(stored, updated);
    Ok(())
}

#[tokio::test]
async fn department_with_unknown_organisation_is_rejected() -> AppResult<()> {
    let service = build_service();

    let created = seed_department(&service, "DEPT1", "ORG404").await;
    assert!(matches!(created, Err(AppError::InvalidReference(_))));

    let lookup = service.get_department("DEPT1").await;
    assert!(matches!(lookup, Err(AppError::NotFound(_))));
    assert!(service.list_departments(None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn project_validation_rejects_bad_dates_and_budgets() -> AppResult<()> {
    let service = build_service();
    seed_organisation(&service, "ORG1").await?;
    seed_department(&service, "DEPT1", "ORG1").await?;

    let reversed = service
        .create_project(CreateProjectInput {
            name: "Apollo".to_owned(),
            department_id: "DEPT1".to_owned(),
            start_date: "2024-12-31".to_owned(),
            end_date: "2024-01-01".to_owned(),
            budget: 10.0,
        })
        .await;
    assert!(matches!(reversed, Err(AppError::Validation(_))));

    let unparseable = service
        .create_project(CreateProjectInput {
            name: "Apollo".to_owned(),
            department_id: "DEPT1".to_owned(),
            start_date: "31/12/2024".to_owned(),
            end_date: "2025-01-01".to_owned(),
            budget: 10.0,
        })
        .await;
    assert!(matches!(unparseable, Err(AppError::Validation(_))));

    let project_id = seed_project(&service, "DEPT1").await?;
    let negative = service
        .update_project(
            project_id,
            UpdateProjectInput {
                budget: Some(-1.0),
                ..UpdateProjectInput::default()
            },
        )
        .await;
    assert!(matches!(negative, Err(AppError::Validation(_))));

    let unknown_department = service
        .create_project(CreateProjectInput {
            name: "Apollo".to_owned(),
            department_id: "DEPT404".to_owned(),
            start_date: "2024-01-01".to_owned(),
            end_date: "2024-12-31".to_owned(),
            budget: 10.0,
        })
        .await;
    assert!(matches!(unknown_department, Err(AppError::InvalidReference(_))));
    Ok(())
}

#[tokio::test]
async fn every_mutation_appends_one_activity_entry() -> AppResult<()> {
    let service = build_service();
    seed_organisation(&service, "ORG1").await?;
    seed_department(&service, "DEPT1", "ORG1").await?;
    seed_employee(&service, "E1", "ada@example.com").await?;
    service
        .update_employee(
            "E1",
            UpdateEmployeeInput {
                lname: Some("King".to_owned()),
                ..UpdateEmployeeInput::default()
            },
        )
        .await?;
    service.delete_employee("E1").await?;

    let entries = service.recent_activity(ActivityQuery::default()).await?;
    let summary: Vec<(ActivityKind, &str, ActivityAction)> = entries
        .iter()
        .map(|entry| (entry.kind, entry.name.as_str(), entry.action))
        .collect();
    assert_eq!(
        summary,
        vec![
            (ActivityKind::Employee, "Ada King", ActivityAction::Delete),
            (ActivityKind::Employee, "Ada King", ActivityAction::Update),
            (ActivityKind::Employee, "Ada Lovelace", ActivityAction::Create),
            (ActivityKind::Department, "Engineering", ActivityAction::Create),
            (ActivityKind::Organisation, "ORG1 Ltd", ActivityAction::Create),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn failed_mutations_are_not_logged() -> AppResult<()> {
    let service = build_service();
    seed_organisation(&service, "ORG1").await?;
    let _ = seed_organisation(&service, "ORG1").await;

    let entries = service.recent_activity(ActivityQuery::default()).await?;
    assert_eq!(entries.len(), 1);
    Ok(())
}

#[tokio::test]
async fn activity_log_outage_does_not_fail_mutations() -> AppResult<()> {
    let service = build_service_with(
        IntegrityPolicy::default(),
        Arc::new(UnavailableActivityLog),
        Arc::new(PlainPasswordHasher),
    );

    seed_organisation(&service, "ORG1").await?;
    assert!(service.get_organisation("ORG1").await.is_ok());
    Ok(())
}

#[tokio::test]
async fn user_listing_filters_by_role_and_department() -> AppResult<()> {
    let service = build_service();
    seed_organisation(&service, "ORG1").await?;
    seed_department(&service, "DEPT1", "ORG1").await?;
    service
        .create_user(user_input("admin@example.com", "correct-horse"))
        .await?;
    service
        .create_user(CreateUserInput {
            role: None,
            did: Some("DEPT1".to_owned()),
            ..user_input("staff@example.com", "correct-horse")
        })
        .await?;

    let employees = service.list_users(Some("employee"), None).await?;
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].email.as_str(), "staff@example.com");

    let in_department = service.list_users(None, Some("DEPT1")).await?;
    assert_eq!(in_department.len(), 1);

    let unknown_role = service.list_users(Some("overlord"), None).await;
    assert!(matches!(unknown_role, Err(AppError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    let service = build_service();
    let created = service.create_user(user_input("a@x.com", "short")).await;
    assert!(matches!(created, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn working_hours_beyond_a_week_are_rejected() -> AppResult<()> {
    let service = build_service();
    let too_many = service
        .create_user(CreateUserInput {
            working_hours: Some(169),
            ..user_input("a@x.com", "correct-horse")
        })
        .await;
    assert!(matches!(too_many, Err(AppError::Validation(_))));

    let created = service
        .create_user(CreateUserInput {
            working_hours: Some(168),
            ..user_input("a@x.com", "correct-horse")
        })
        .await?;
    assert_eq!(created.working_hours, 168);

    let updated = service
        .update_user(
            created.id.as_i64(),
            UpdateUserInput {
                working_hours: Some(u32::MAX),
                ..UpdateUserInput::default()
            },
        )
        .await;
    assert!(matches!(updated, Err(AppError::Validation(_))));
    Ok(())
}
