use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use orgdir_core::AppError;
use orgdir_domain::{CascadePolicy, IntegrityPolicy};
use tracing_subscriber::EnvFilter;

/// Backing store selected by `DIRECTORY_STORE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres { .. } => "postgres",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub store: StoreBackend,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub integrity_policy: IntegrityPolicy,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    pub fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let store = match lookup("DIRECTORY_STORE")
            .unwrap_or_else(|| "memory".to_owned())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .filter(|value| !value.trim().is_empty())
                    .ok_or_else(|| {
                        AppError::Validation(
                            "DATABASE_URL is required when DIRECTORY_STORE=postgres".to_owned(),
                        )
                    })?,
                max_connections: parse_or_default(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            },
            other => {
                return Err(AppError::Validation(format!(
                    "DIRECTORY_STORE must be either 'memory' or 'postgres', got '{other}'"
                )));
            }
        };

        if migrate_only && store == StoreBackend::Memory {
            return Err(AppError::Validation(
                "migrate requires DIRECTORY_STORE=postgres".to_owned(),
            ));
        }

        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or_default(&lookup, "API_PORT", 5000)?;

        let defaults = IntegrityPolicy::default();
        let integrity_policy = IntegrityPolicy {
            organisation_departments: cascade_override(
                &lookup,
                "CASCADE_ORGANISATION_DEPARTMENTS",
                defaults.organisation_departments,
            )?,
            department_projects: cascade_override(
                &lookup,
                "CASCADE_DEPARTMENT_PROJECTS",
                defaults.department_projects,
            )?,
            department_users: cascade_override(
                &lookup,
                "CASCADE_DEPARTMENT_USERS",
                defaults.department_users,
            )?,
            employee_assignments: cascade_override(
                &lookup,
                "CASCADE_EMPLOYEE_ASSIGNMENTS",
                defaults.employee_assignments,
            )?,
        };

        Ok(Self {
            migrate_only,
            store,
            frontend_url,
            api_host,
            api_port,
            integrity_policy,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        None => Ok(default),
    }
}

fn cascade_override(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: CascadePolicy,
) -> Result<CascadePolicy, AppError> {
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        Some(value) => CascadePolicy::from_str(value.trim())
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use orgdir_core::AppError;
    use orgdir_domain::{CascadePolicy, IntegrityPolicy};

    use super::{ApiConfig, StoreBackend};

    fn load(migrate_only: bool, vars: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(migrate_only, |name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_to_in_memory_store() {
        let config = load(false, &[]).unwrap_or_else(|_| unreachable!());

        assert_eq!(config.store, StoreBackend::Memory);
        assert_eq!(config.api_port, 5000);
        assert_eq!(config.frontend_url, "http://localhost:3000");
        assert_eq!(config.integrity_policy, IntegrityPolicy::default());
    }

    #[test]
    fn postgres_store_requires_database_url() {
        let result = load(false, &[("DIRECTORY_STORE", "postgres")]);
        assert!(matches!(result, Err(AppError::Validation(_))));

        let config = load(
            false,
            &[
                ("DIRECTORY_STORE", "postgres"),
                ("DATABASE_URL", "postgres://localhost/orgdir"),
                ("DATABASE_MAX_CONNECTIONS", "4"),
            ],
        )
        .unwrap_or_else(|_| unreachable!());
        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/orgdir".to_owned(),
                max_connections: 4,
            }
        );
    }

    #[test]
    fn cascade_overrides_are_applied() {
        let config = load(
            false,
            &[
                ("CASCADE_DEPARTMENT_PROJECTS", "reject"),
                ("CASCADE_DEPARTMENT_USERS", "Cascade"),
            ],
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            config.integrity_policy.department_projects,
            CascadePolicy::Reject
        );
        assert_eq!(
            config.integrity_policy.department_users,
            CascadePolicy::Cascade
        );
    }

    #[test]
    fn invalid_values_fail_fast() {
        assert!(load(false, &[("CASCADE_EMPLOYEE_ASSIGNMENTS", "sometimes")]).is_err());
        assert!(load(false, &[("API_PORT", "not-a-port")]).is_err());
        assert!(load(false, &[("DIRECTORY_STORE", "redis")]).is_err());
        assert!(load(true, &[]).is_err());
    }
}
