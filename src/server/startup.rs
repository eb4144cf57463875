use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tokio::runtime::Runtime;
use url::{Position, Url};

use crate::server::config::DatabaseSettings;

/// Connection pool policy for [`build_engine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolOptions {
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    /// Forward individual SQL statements to the `sqlx` logger.
    pub sqlx_logging: bool,
}

impl PoolOptions {
    /// A pool that holds exactly one connection for its whole lifetime.
    ///
    /// Needed for in-memory SQLite, where every new connection would otherwise see
    /// an empty database, and used by the server entry point.
    pub fn single_connection() -> Self {
        Self {
            max_connections: 1,
            min_connections: 1,
            idle_timeout: None,
            ..Self::default()
        }
    }
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            sqlx_logging: false,
        }
    }
}

/// Builds the database engine, a pooled connection shared by every session.
///
/// Uses `DB_URL` verbatim when configured, otherwise the connection string composed
/// from the individual database settings behind the sync prefix. Each call returns an
/// independent pool; the entry point calls this exactly once and shares the result.
///
/// # Arguments
/// - `settings` - Database settings group
/// - `options` - Pool sizing and timeout policy
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected pool
/// - `Err(DbErr)` - The driver rejected the connection string or could not connect
pub async fn build_engine(
    settings: &DatabaseSettings,
    options: PoolOptions,
) -> Result<DatabaseConnection, DbErr> {
    let connection_string = settings.connection_string();

    tracing::debug!(
        "Database connection string: {}",
        loggable_connection_string(settings)
    );

    let mut opt = ConnectOptions::new(connection_string);
    opt.max_connections(options.max_connections)
        .min_connections(options.min_connections)
        .connect_timeout(options.connect_timeout)
        .sqlx_logging(options.sqlx_logging);
    if let Some(idle_timeout) = options.idle_timeout {
        opt.idle_timeout(idle_timeout);
    }

    Database::connect(opt).await
}

/// Creates every table that does not exist yet.
///
/// Runs the pending migrations of the `migration` crate. All of them use
/// `CREATE TABLE IF NOT EXISTS`, so existing data is never touched.
pub async fn ensure_schema(engine: &DatabaseConnection) -> Result<(), DbErr> {
    use migration::{Migrator, MigratorTrait};

    Migrator::up(engine, None).await
}

/// Connection string of `settings` with the password replaced by `***`.
///
/// The composed form is rebuilt from the individual fields, so the password
/// never goes through a URL parser. Only a `DB_URL` override is redacted with
/// [`redact_connection_string`].
pub fn loggable_connection_string(settings: &DatabaseSettings) -> String {
    match &settings.url {
        Some(url) => redact_connection_string(url),
        None => format!(
            "{}{}:***@{}:{}/{}",
            settings.sync_prefix, settings.user, settings.host, settings.port, settings.name
        ),
    }
}

/// Replaces the password of a connection string with `***` for logging.
///
/// Strings that cannot be parsed as a URL are replaced entirely, since there is
/// no reliable way to find the credential inside them. The same applies when an
/// `@` ends up after the authority: a password containing `/`, `?` or `#` makes
/// the parser read part of it as host and port and the rest as path.
pub fn redact_connection_string(connection_string: &str) -> String {
    match Url::parse(connection_string) {
        // e.g. `sqlite::memory:`; anything resembling userinfo is hidden.
        Ok(url) if url.cannot_be_a_base() => {
            if connection_string.contains('@') {
                "<redacted>".to_string()
            } else {
                connection_string.to_string()
            }
        }
        Ok(mut url) => {
            if url[Position::BeforePath..].contains('@') {
                return "<redacted>".to_string();
            }
            if url.password().is_some() && url.set_password(Some("***")).is_err() {
                return "<redacted>".to_string();
            }
            url.to_string()
        }
        Err(_) => "<redacted>".to_string(),
    }
}

/// Builds the multi-threaded runtime the server runs on.
///
/// `spawn_blocking` work on this runtime never uses more than
/// `blocking_pool_size` threads at once, the same bound the lifespan gives the
/// [`BlockingLimiter`](crate::server::lifecycle::BlockingLimiter).
pub fn build_runtime(blocking_pool_size: usize) -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .max_blocking_threads(blocking_pool_size)
        .build()
}

/// Installs the global tracing subscriber.
///
/// The filter is taken from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Resolves when the process receives Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
