//! Environment-driven application settings.
//!
//! Settings are split into independent groups (app identity, database, cache,
//! deployment environment, server bind address) that are resolved from one
//! environment map and composed into [`Settings`]. Resolution happens once, at
//! process start, through [`resolve_settings`]; nothing here reads the
//! environment implicitly.

use std::{collections::HashMap, fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::server::error::config::ConfigError;

const DEFAULT_APP_NAME: &str = "API Example";
const DEFAULT_APP_VERSION: &str = "1.0.0";
const DEFAULT_APP_DESCRIPTION: &str = "API Example";

const DEFAULT_DB_USER: &str = "username";
const DEFAULT_DB_PASSWORD: &str = "password";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_NAME: &str = "dbname";
const DEFAULT_DB_SYNC_PREFIX: &str = "mysql://";
const DEFAULT_DB_ASYNC_PREFIX: &str = "mysql://";

const DEFAULT_CACHE_HOST: &str = "localhost";
const DEFAULT_CACHE_PORT: u16 = 6379;
const DEFAULT_CACHE_DB: u32 = 0;

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 8000;

/// Name of the local environment file read by [`resolve_settings`].
pub const ENV_FILE: &str = ".env";

/// Loads the local `.env` file and resolves settings from the process environment.
///
/// Same as [`resolve_settings_from`] with [`ENV_FILE`] in the working directory.
pub fn resolve_settings() -> Result<Settings, ConfigError> {
    resolve_settings_from(ENV_FILE)
}

/// Loads the environment file at `path` and resolves settings from the process
/// environment.
///
/// Values in the file override variables already present in the process
/// environment so local runs are reproducible. A missing file is not an error.
///
/// # Returns
/// - `Ok(Settings)` - Fully resolved settings
/// - `Err(ConfigError::EnvFile)` - The file exists but could not be read or parsed
/// - `Err(ConfigError::InvalidEnvironment)` - `ENVIRONMENT` is not a known literal
/// - `Err(ConfigError::InvalidInteger)` - A numeric variable failed to parse
pub fn resolve_settings_from(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    if let Err(err) = dotenvy::from_path_override(path.as_ref()) {
        if !err.not_found() {
            return Err(ConfigError::EnvFile(err));
        }
    }

    // Non-UTF-8 variables cannot belong to any settings group.
    Settings::from_vars(std::env::vars_os().filter_map(|(key, value)| {
        Some((key.into_string().ok()?, value.into_string().ok()?))
    }))
}

/// Read-only lookup over a captured environment map.
struct EnvMap(HashMap<String, String>);

impl EnvMap {
    fn string(&self, key: &str, default: &str) -> String {
        self.0
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Optional values treat an empty string as unset.
    fn optional(&self, key: &str) -> Option<String> {
        self.0.get(key).filter(|value| !value.is_empty()).cloned()
    }

    fn parsed<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr<Err = std::num::ParseIntError>,
    {
        match self.0.get(key) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse::<T>()
                .map_err(|source| ConfigError::InvalidInteger {
                    var: key.to_string(),
                    value: value.clone(),
                    source,
                }),
        }
    }
}

/// Composed application settings.
///
/// Each group is a plain struct; consumers that only need one group borrow it
/// by name (e.g. `&settings.database`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Settings {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    pub environment: EnvironmentSettings,
    pub server: ServerSettings,
}

impl Settings {
    /// Resolves settings from an explicit set of environment variables.
    ///
    /// Every field falls back to its documented default when the variable is
    /// absent, so an empty iterator yields a valid configuration.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env = EnvMap(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );

        Ok(Self {
            app: AppSettings::from_env_map(&env),
            database: DatabaseSettings::from_env_map(&env)?,
            cache: CacheSettings::from_env_map(&env)?,
            environment: EnvironmentSettings::from_env_map(&env)?,
            server: ServerSettings::from_env_map(&env)?,
        })
    }
}

/// Application identity shown in the API documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl AppSettings {
    fn from_env_map(env: &EnvMap) -> Self {
        Self {
            name: env.string("APP_NAME", DEFAULT_APP_NAME),
            version: env.string("APP_VERSION", DEFAULT_APP_VERSION),
            description: env.string("APP_DESCRIPTION", DEFAULT_APP_DESCRIPTION),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            version: DEFAULT_APP_VERSION.to_string(),
            description: DEFAULT_APP_DESCRIPTION.to_string(),
        }
    }
}

/// Relational database connection parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Scheme prefix used by the engine, e.g. `mysql://`.
    pub sync_prefix: String,
    /// Scheme prefix for consumers that need the non-blocking driver dialect.
    pub async_prefix: String,
    /// Complete connection string that bypasses composition when set.
    pub url: Option<String>,
}

impl DatabaseSettings {
    fn from_env_map(env: &EnvMap) -> Result<Self, ConfigError> {
        Ok(Self {
            user: env.string("DB_USER", DEFAULT_DB_USER),
            password: env.string("DB_PASSWORD", DEFAULT_DB_PASSWORD),
            host: env.string("DB_HOST", DEFAULT_DB_HOST),
            port: env.parsed("DB_PORT", DEFAULT_DB_PORT)?,
            name: env.string("DB_NAME", DEFAULT_DB_NAME),
            sync_prefix: env.string("DB_SYNC_PREFIX", DEFAULT_DB_SYNC_PREFIX),
            async_prefix: env.string("DB_ASYNC_PREFIX", DEFAULT_DB_ASYNC_PREFIX),
            url: env.optional("DB_URL"),
        })
    }

    /// `user:password@host:port/name`, without a scheme prefix.
    pub fn uri(&self) -> String {
        format!(
            "{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }

    /// Connection string used by the engine.
    ///
    /// Returns `DB_URL` verbatim when set, otherwise the composed URI behind the
    /// sync prefix. Composition never fails; malformed values surface later as
    /// connection errors from the driver.
    pub fn connection_string(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("{}{}", self.sync_prefix, self.uri()),
        }
    }

    /// Same as [`connection_string`](Self::connection_string) but behind the async prefix.
    pub fn async_connection_string(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("{}{}", self.async_prefix, self.uri()),
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            name: DEFAULT_DB_NAME.to_string(),
            sync_prefix: DEFAULT_DB_SYNC_PREFIX.to_string(),
            async_prefix: DEFAULT_DB_ASYNC_PREFIX.to_string(),
            url: None,
        }
    }
}

// Keeps the password out of `{:?}` output.
impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("sync_prefix", &self.sync_prefix)
            .field("async_prefix", &self.async_prefix)
            .field("url", &self.url.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Cache server connection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub host: String,
    pub port: u16,
    pub db: u32,
    pub password: Option<String>,
    pub username: Option<String>,
}

impl CacheSettings {
    fn from_env_map(env: &EnvMap) -> Result<Self, ConfigError> {
        Ok(Self {
            host: env.string("CACHE_HOST", DEFAULT_CACHE_HOST),
            port: env.parsed("CACHE_PORT", DEFAULT_CACHE_PORT)?,
            db: env.parsed("CACHE_DB", DEFAULT_CACHE_DB)?,
            password: env.optional("CACHE_PASSWORD"),
            username: env.optional("CACHE_USERNAME"),
        })
    }

    /// `redis://[user[:password]@]host:port/db`
    pub fn connection_url(&self) -> String {
        let credentials = match (&self.username, &self.password) {
            (Some(user), Some(password)) => format!("{}:{}@", user, password),
            (Some(user), None) => format!("{}@", user),
            (None, Some(password)) => format!(":{}@", password),
            (None, None) => String::new(),
        };

        format!(
            "redis://{}{}:{}/{}",
            credentials, self.host, self.port, self.db
        )
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_CACHE_HOST.to_string(),
            port: DEFAULT_CACHE_PORT,
            db: DEFAULT_CACHE_DB,
            password: None,
            username: None,
        }
    }
}

/// Deployment environment the process runs in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentOption {
    #[default]
    Local,
    Staging,
    Production,
}

impl EnvironmentOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for EnvironmentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentOption {
    type Err = ConfigError;

    /// Accepts exactly `local`, `staging` or `production`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "local" => Ok(Self::Local),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::InvalidEnvironment {
                value: other.to_string(),
            }),
        }
    }
}

/// Deployment environment group; its presence gates documentation routes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvironmentSettings {
    pub environment: EnvironmentOption,
}

impl EnvironmentSettings {
    fn from_env_map(env: &EnvMap) -> Result<Self, ConfigError> {
        let environment = env
            .string("ENVIRONMENT", EnvironmentOption::Local.as_str())
            .parse()?;

        Ok(Self { environment })
    }
}

/// Address the HTTP listener binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env_map(env: &EnvMap) -> Result<Self, ConfigError> {
        Ok(Self {
            host: env.string("SERVER_HOST", DEFAULT_SERVER_HOST),
            port: env.parsed("SERVER_PORT", DEFAULT_SERVER_PORT)?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

/// Capability view over a settings value.
///
/// The application factory only reacts to the groups a settings value
/// actually carries. [`Settings`] carries every group; each group struct
/// carries only itself, so e.g. `&settings.database` yields an application
/// without identity metadata or documentation routes.
pub trait SettingsGroups {
    fn app(&self) -> Option<&AppSettings> {
        None
    }

    fn database(&self) -> Option<&DatabaseSettings> {
        None
    }

    fn cache(&self) -> Option<&CacheSettings> {
        None
    }

    fn environment(&self) -> Option<&EnvironmentSettings> {
        None
    }
}

impl SettingsGroups for Settings {
    fn app(&self) -> Option<&AppSettings> {
        Some(&self.app)
    }

    fn database(&self) -> Option<&DatabaseSettings> {
        Some(&self.database)
    }

    fn cache(&self) -> Option<&CacheSettings> {
        Some(&self.cache)
    }

    fn environment(&self) -> Option<&EnvironmentSettings> {
        Some(&self.environment)
    }
}

impl SettingsGroups for AppSettings {
    fn app(&self) -> Option<&AppSettings> {
        Some(self)
    }
}

impl SettingsGroups for DatabaseSettings {
    fn database(&self) -> Option<&DatabaseSettings> {
        Some(self)
    }
}

impl SettingsGroups for CacheSettings {
    fn cache(&self) -> Option<&CacheSettings> {
        Some(self)
    }
}

impl SettingsGroups for EnvironmentSettings {
    fn environment(&self) -> Option<&EnvironmentSettings> {
        Some(self)
    }
}
