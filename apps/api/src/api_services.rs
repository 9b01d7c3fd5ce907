use std::sync::Arc;

use orgdir_application::{
    ActivityLogRepository, ActivityLogService, Authenticator, DirectoryService, DirectoryStore,
    ReferentialIntegrityGuard,
};
use orgdir_core::AppError;
use orgdir_infrastructure::{
    Argon2PasswordHasher, InMemoryActivityLogRepository, InMemoryDirectoryStore,
    PostgresActivityLogRepository, PostgresDirectoryStore, RandomSessionTokenIssuer,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::api_config::{ApiConfig, StoreBackend};
use crate::state::AppState;

pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    Ok(pool)
}

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let (store, activity_log): (Arc<dyn DirectoryStore>, Arc<dyn ActivityLogRepository>) =
        match &config.store {
            StoreBackend::Memory => (
                Arc::new(InMemoryDirectoryStore::new()),
                Arc::new(InMemoryActivityLogRepository::new()),
            ),
            StoreBackend::Postgres {
                database_url,
                max_connections,
            } => {
                let pool = connect_and_migrate(database_url, *max_connections).await?;
                (
                    Arc::new(PostgresDirectoryStore::new(pool.clone())),
                    Arc::new(PostgresActivityLogRepository::new(pool)),
                )
            }
        };

    Ok(AppState {
        directory_service: build_directory_service(
            store,
            activity_log,
            ReferentialIntegrityGuard::new(config.integrity_policy),
        ),
    })
}

pub fn build_directory_service(
    store: Arc<dyn DirectoryStore>,
    activity_log: Arc<dyn ActivityLogRepository>,
    guard: ReferentialIntegrityGuard,
) -> DirectoryService {
    DirectoryService::new(
        store,
        guard,
        ActivityLogService::new(activity_log),
        Authenticator::new(
            Arc::new(Argon2PasswordHasher::new()),
            Arc::new(RandomSessionTokenIssuer),
        ),
    )
}
