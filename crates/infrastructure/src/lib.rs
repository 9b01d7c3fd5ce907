//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_activity_log_repository;
mod in_memory_directory_store;
mod postgres_activity_log_repository;
mod postgres_directory_store;
mod random_session_token_issuer;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_activity_log_repository::InMemoryActivityLogRepository;
pub use in_memory_directory_store::InMemoryDirectoryStore;
pub use postgres_activity_log_repository::PostgresActivityLogRepository;
pub use postgres_directory_store::PostgresDirectoryStore;
pub use random_session_token_issuer::RandomSessionTokenIssuer;
