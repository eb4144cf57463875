use std::num::ParseIntError;
use thiserror::Error;

/// Invalid configuration detected while resolving settings.
///
/// Every variant is fatal at process start: the server exits before it binds
/// a listener.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `ENVIRONMENT` is set to something other than `local`, `staging` or `production`.
    #[error("Invalid configuration: ENVIRONMENT must be one of local, staging, production (got '{value}')")]
    InvalidEnvironment {
        /// The rejected literal
        value: String,
    },

    /// A numeric environment variable could not be parsed.
    #[error("Invalid configuration: {var}='{value}' is not a valid integer: {source}")]
    InvalidInteger {
        /// Name of the environment variable
        var: String,
        /// The raw value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// The local `.env` file exists but could not be read or parsed.
    #[error("Failed to load .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}
