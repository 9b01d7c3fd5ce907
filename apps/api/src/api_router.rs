mod cors;


use axum::Router;
use axum::routing::{delete, get, post};
use orgdir_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

use self::cors::build_cors_layer;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let directory_routes = Router::new()
        .route(
            "/api/organisations",
            get(handlers::organisations::list_organisations_handler)
                .post(handlers::organisations::create_organisation_handler),
        )
        .route(
            "/api/organisations/{oid}",
            get(handlers::organisations::get_organisation_handler)
                .put(handlers::organisations::update_organisation_handler)
                .delete(handlers::organisations::delete_organisation_handler),
        )
        .route(
            "/api/departments",
            get(handlers::departments::list_departments_handler)
                .post(handlers::departments::create_department_handler),
        )
        .route(
            "/api/departments/{did}",
            get(handlers::departments::get_department_handler)
                .put(handlers::departments::update_department_handler)
                .delete(handlers::departments::delete_department_handler),
        )
        .route(
            "/api/projects",
            get(handlers::projects::list_projects_handler)
                .post(handlers::projects::create_project_handler),
        )
        .route(
            "/api/projects/{project_id}",
            get(handlers::projects::get_project_handler)
                .put(handlers::projects::update_project_handler)
                .delete(handlers::projects::delete_project_handler),
        )
        .route(
            "/api/projects/{project_id}/assignees",
            get(handlers::assignments::list_assignees_handler)
                .post(handlers::assignments::assign_employee_handler),
        )
        .route(
            "/api/projects/{project_id}/assignees/{eid}",
            delete(handlers::assignments::unassign_employee_handler),
        )
        .route(
            "/api/employees",
            get(handlers::employees::list_employees_handler)
                .post(handlers::employees::create_employee_handler),
        )
        .route(
            "/api/employees/{eid}",
            get(handlers::employees::get_employee_handler)
                .put(handlers::employees::update_employee_handler)
                .delete(handlers::employees::delete_employee_handler),
        )
        .route(
            "/api/users",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/api/users/{user_id}",
            get(handlers::users::get_user_handler)
                .put(handlers::users::update_user_handler)
                .delete(handlers::users::delete_user_handler),
        )
        .route(
            "/api/activity",
            get(handlers::activity::list_activity_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/api/login", post(handlers::auth::login_handler))
        .merge(directory_routes)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
