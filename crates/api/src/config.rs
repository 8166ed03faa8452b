use std::time::Duration;

use bridge_crm::{CrmBackend, CrmConfig};
use bridge_provisioning::{ProvisioningBackend, ProvisioningConfig};

/// A start-up configuration problem. The binary exits with this message.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },

    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to initialise {integration} client: {reason}")]
    Client {
        integration: &'static str,
        reason: String,
    },
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Pool size (default: `10`).
    pub max_connections: u32,
}

/// Server configuration loaded from environment variables.
///
/// Everything except the database URL (and, in live mode, the CRM
/// credentials) has a default suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Deployment environment name (default: `development`).
    pub app_env: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `45`). Always longer than
    /// the worst case of the remote calls one request makes.
    pub request_timeout_secs: u64,
    pub database: DatabaseConfig,
    pub crm: CrmBackend,
    pub provisioning: ProvisioningBackend,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                     | Default                                |
    /// |-----------------------------|----------------------------------------|
    /// | `HOST`                      | `0.0.0.0`                              |
    /// | `PORT`                      | `5000`                                 |
    /// | `APP_ENV`                   | `development`                          |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`                |
    /// | `REQUEST_TIMEOUT_SECS`      | `45`                                   |
    /// | `DATABASE_URL`              | required                               |
    /// | `DATABASE_MAX_CONNECTIONS`  | `10`                                   |
    /// | `CRM_API_BASE_URL`          | `https://services.leadconnectorhq.com` |
    /// | `CRM_API_KEY`               | required unless `MOCK_CRM`             |
    /// | `CRM_LOCATION_ID`           | required unless `MOCK_CRM`             |
    /// | `CRM_TIMEOUT_SECS`          | `10`                                   |
    /// | `MOCK_CRM`                  | `false`                                |
    /// | `PROVISIONING_BASE_URL`     | `http://localhost:3000`                |
    /// | `PROVISIONING_TIMEOUT_SECS` | `10`                                   |
    /// | `MOCK_PROVISIONING`         | `false`                                |
    /// | `MOCK_LATENCY_MS`           | `0`                                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env.or("HOST", "0.0.0.0");
        let port: u16 = env.parse_or("PORT", 5000)?;
        let app_env = env.or("APP_ENV", "development");

        let cors_origins: Vec<String> = env
            .or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env.parse_or("REQUEST_TIMEOUT_SECS", 45)?;
        let crm_timeout_secs: u64 = env.parse_or("CRM_TIMEOUT_SECS", 10)?;
        let provisioning_timeout_secs: u64 = env.parse_or("PROVISIONING_TIMEOUT_SECS", 10)?;

        // One request makes at most two CRM calls and one provisioning call.
        // The request timeout must outlast all three so it never cuts a run
        // off between provisioning and persisting.
        let remote_budget = crm_timeout_secs
            .saturating_mul(2)
            .saturating_add(provisioning_timeout_secs);
        if request_timeout_secs <= remote_budget {
            return Err(ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                value: request_timeout_secs.to_string(),
                reason: format!(
                    "must exceed 2 x CRM_TIMEOUT_SECS + PROVISIONING_TIMEOUT_SECS ({remote_budget})"
                ),
            });
        }

        let database = DatabaseConfig {
            url: env.required("DATABASE_URL")?,
            max_connections: env.parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
        };

        let mock_latency = Duration::from_millis(env.parse_or("MOCK_LATENCY_MS", 0)?);

        let crm = if env.flag("MOCK_CRM")? {
            CrmBackend::Mock {
                latency: mock_latency,
            }
        } else {
            CrmBackend::Live(CrmConfig {
                base_url: env.or("CRM_API_BASE_URL", "https://services.leadconnectorhq.com"),
                api_key: env.required("CRM_API_KEY")?,
                location_id: env.required("CRM_LOCATION_ID")?,
                timeout: Duration::from_secs(crm_timeout_secs),
            })
        };

        let provisioning = if env.flag("MOCK_PROVISIONING")? {
            ProvisioningBackend::Mock {
                latency: mock_latency,
            }
        } else {
            ProvisioningBackend::Live(ProvisioningConfig {
                base_url: env.or("PROVISIONING_BASE_URL", "http://localhost:3000"),
                timeout: Duration::from_secs(provisioning_timeout_secs),
            })
        };

        Ok(Self {
            host,
            port,
            app_env,
            cors_origins,
            request_timeout_secs,
            database,
            crm,
            provisioning,
        })
    }

    /// Whether internal error details are withheld from responses.
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Value of `name`, treating a blank value as unset.
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|v| !v.trim().is_empty())
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.get(name).ok_or(ConfigError::Missing { name })
    }

    fn parse_or<T>(&self, name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(value) = self.get(name) else {
            return Ok(default);
        };
        let parsed = value.trim().parse::<T>();
        parsed.map_err(|e| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value,
        })
    }

    fn flag(&self, name: &'static str) -> Result<bool, ConfigError> {
        let Some(value) = self.get(name) else {
            return Ok(false);
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::Invalid {
                name,
                value,
                reason: "expected true or false".to_string(),
            }),
        }
    }
}
