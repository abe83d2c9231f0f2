// Start of file: /src/config/environment.rs

// * Environment configuration, read once at startup and passed around explicitly.

use std::{borrow::Cow, collections::HashMap};
// * anyhow for convenient error handling
use anyhow::{Context, Result};
use tracing::warn;

// ! Default values for environment variables (used if variables aren't set):
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_BODY_SIZE: usize = 2_097_152; // 2MB
const DEFAULT_TIMEOUT: u64 = 30; // 30 seconds
const DEFAULT_MYSQL_PORT: &str = "3306";
const DEFAULT_MYSQL_CONNECT_TIMEOUT: u64 = 10; // 10 seconds

/// Connection parameters for the backing MySQL store.
///
/// Nothing here is validated when it is read: a missing host or a port that
/// is not a number only shows up when a connection is attempted.
#[derive(Clone)]
pub struct MySqlSettings {
    pub host: Option<String>,
    pub port: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub connect_timeout_seconds: u64,
}

// * Keep the password out of debug logs
impl std::fmt::Debug for MySqlSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .finish()
    }
}

// * A struct containing all environment variables used by the app
#[derive(Clone, Debug)]
pub struct EnvironmentVariables {
    pub environment: Cow<'static, str>,
    pub host: Cow<'static, str>,
    pub port: u16,
    pub max_request_body_size: usize,
    pub default_timeout_seconds: u64,
    pub mysql: MySqlSettings,
}

impl EnvironmentVariables {
    // * Loads environment variables.
    // * Only reads .env if ENVIRONMENT != "production".
    pub fn load() -> Result<Self> {
        // ? In non-production environments, attempt to load .env
        if std::env::var("ENVIRONMENT").unwrap_or_default() != "production" {
            dotenv::dotenv().ok();
        }

        // * Collect all environment vars from the system and .env
        let vars: HashMap<String, String> = std::env::vars().collect();

        let config: EnvironmentVariables = Self::from_vars(&vars)?;

        if cfg!(debug_assertions) {
            tracing::debug!("Loaded environment configuration: {:#?}", config);
        }

        Ok(config)
    }

    /// Builds the configuration from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        // * A small helper closure to fetch a variable by key
        let get_var = |key: &str| vars.get(key).map(String::as_str);

        Ok(Self {
            environment: get_var("ENVIRONMENT")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or_else(|| {
                    warn!("Missing ENVIRONMENT, defaulting to '{DEFAULT_ENVIRONMENT}'");
                    Cow::Borrowed(DEFAULT_ENVIRONMENT)
                }),

            host: get_var("HOST")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_HOST)),

            port: get_var("PORT")
                .map(|s| s.parse().context("Invalid PORT value"))
                .transpose()?
                .unwrap_or(DEFAULT_PORT),

            max_request_body_size: get_var("MAX_REQUEST_BODY_SIZE")
                .map(|s| s.parse().context("Invalid MAX_REQUEST_BODY_SIZE"))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_BODY_SIZE),

            default_timeout_seconds: get_var("DEFAULT_TIMEOUT_SECONDS")
                .map(|s| s.parse().context("Invalid DEFAULT_TIMEOUT_SECONDS"))
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT),

            mysql: MySqlSettings {
                host: get_var("MYSQL_HOST").map(str::to_owned),
                port: get_var("MYSQL_PORT")
                    .unwrap_or(DEFAULT_MYSQL_PORT)
                    .to_owned(),
                user: get_var("MYSQL_USER").map(str::to_owned),
                password: get_var("MYSQL_PASSWORD").map(str::to_owned),
                database: get_var("MYSQL_DATABASE").map(str::to_owned),
                connect_timeout_seconds: get_var("MYSQL_CONNECT_TIMEOUT_SECONDS")
                    .map(|s| s.parse().context("Invalid MYSQL_CONNECT_TIMEOUT_SECONDS"))
                    .transpose()?
                    .unwrap_or(DEFAULT_MYSQL_CONNECT_TIMEOUT),
            },
        })
    }
}


// End of file: /src/config/environment.rs
