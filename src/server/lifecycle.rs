//! Application lifespan and the blocking work pool.
//!
//! [`Lifespan`] runs once before the server accepts traffic and once after it
//! stops:
//!
//! ```text
//! Created -> Starting -> Running -> Stopping -> Stopped
//!               |                                  ^
//!               +------------- failure ------------+
//! ```
//!
//! Startup sizes the [`BlockingLimiter`], creates missing tables when asked to
//! and signals `initialization_complete`. Shutdown closes the engine. A lifespan
//! is single-use; restarting requires a new process.

use std::sync::{Arc, OnceLock};

use sea_orm::DatabaseConnection;
use tokio::sync::{watch, Mutex, Semaphore};

use crate::server::{error::lifecycle::LifecycleError, startup::ensure_schema};

/// Number of blocking tasks allowed to run concurrently unless configured otherwise.
pub const DEFAULT_BLOCKING_POOL_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Starting,
    Running,
    Stopping,
    Stopped,
}

/// Bounds the number of blocking operations running at once.
///
/// The token total is fixed once, during startup; clones share the same pool.
/// Work submitted before the pool is configured fails immediately instead of
/// waiting for tokens that will never arrive.
#[derive(Clone, Debug)]
pub struct BlockingLimiter {
    semaphore: Arc<Semaphore>,
    total_tokens: Arc<OnceLock<usize>>,
}

impl BlockingLimiter {
    pub fn new() -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(0)),
            total_tokens: Arc::new(OnceLock::new()),
        }
    }

    /// Sets the token total. Returns `false` if it was already set.
    pub fn set_total_tokens(&self, total: usize) -> bool {
        if self.total_tokens.set(total).is_err() {
            return false;
        }
        self.semaphore.add_permits(total);
        true
    }

    pub fn total_tokens(&self) -> Option<usize> {
        self.total_tokens.get().copied()
    }

    pub fn available_tokens(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Runs `f` on tokio's blocking thread pool once a token is available.
    ///
    /// The token is held by the blocking closure, so it is only returned when the
    /// work actually finishes, even if the calling future is dropped.
    ///
    /// # Returns
    /// - `Ok(R)` - The closure's return value
    /// - `Err(LifecycleError::BlockingPoolNotConfigured)` - Startup has not run yet
    /// - `Err(LifecycleError::BlockingTask)` - The closure panicked
    pub async fn run<F, R>(&self, f: F) -> Result<R, LifecycleError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if self.total_tokens().is_none() {
            return Err(LifecycleError::BlockingPoolNotConfigured);
        }

        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| LifecycleError::BlockingPoolClosed)?;

        let result = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            f()
        })
        .await?;

        Ok(result)
    }
}

impl Default for BlockingLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Startup and shutdown hook attached to an application.
pub struct Lifespan {
    state: watch::Sender<LifecycleState>,
    initialization_complete: watch::Sender<bool>,
    blocking: BlockingLimiter,
    blocking_pool_size: usize,
    create_tables_on_start: bool,
    engine: Mutex<Option<DatabaseConnection>>,
}

impl Lifespan {
    /// Creates a lifespan in the `Created` state.
    ///
    /// # Arguments
    /// - `blocking` - Limiter sized during startup
    /// - `blocking_pool_size` - Token total given to the limiter
    /// - `create_tables_on_start` - Run schema creation during startup
    /// - `engine` - Engine used for schema creation and closed on shutdown
    pub fn new(
        blocking: BlockingLimiter,
        blocking_pool_size: usize,
        create_tables_on_start: bool,
        engine: Option<DatabaseConnection>,
    ) -> Self {
        let (state, _) = watch::channel(LifecycleState::Created);
        let (initialization_complete, _) = watch::channel(false);

        Self {
            state,
            initialization_complete,
            blocking,
            blocking_pool_size,
            create_tables_on_start,
            engine: Mutex::new(engine),
        }
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    /// Receiver observing every state change.
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    pub fn is_initialized(&self) -> bool {
        *self.initialization_complete.borrow()
    }

    /// Resolves once startup has completed its one-time initialization.
    pub async fn initialized(&self) {
        let mut rx = self.initialization_complete.subscribe();
        let _ = rx.wait_for(|done| *done).await;
    }

    pub fn blocking(&self) -> &BlockingLimiter {
        &self.blocking
    }

    /// Runs one-time initialization and moves to `Running`.
    ///
    /// Any failure moves the lifespan straight to `Stopped`, releases the engine
    /// and returns the error; the caller is expected to exit.
    pub async fn startup(&self) -> Result<(), LifecycleError> {
        self.transition(LifecycleState::Created, LifecycleState::Starting)?;

        if let Err(err) = self.initialize().await {
            tracing::error!("Application startup failed: {}", err);
            self.release().await;
            self.state.send_replace(LifecycleState::Stopped);
            return Err(err);
        }

        self.initialization_complete.send_replace(true);
        self.transition(LifecycleState::Starting, LifecycleState::Running)?;

        Ok(())
    }

    /// Releases resources and moves to `Stopped`.
    ///
    /// Stopping a lifespan that never started is allowed, stopping an already
    /// stopped one is a no-op.
    pub async fn shutdown(&self) -> Result<(), LifecycleError> {
        match self.state() {
            LifecycleState::Stopped => return Ok(()),
            LifecycleState::Created => {
                self.release().await;
                self.state.send_replace(LifecycleState::Stopped);
                return Ok(());
            }
            _ => {}
        }

        self.transition(LifecycleState::Running, LifecycleState::Stopping)?;
        self.release().await;
        self.transition(LifecycleState::Stopping, LifecycleState::Stopped)
    }

    async fn initialize(&self) -> Result<(), LifecycleError> {
        if !self.blocking.set_total_tokens(self.blocking_pool_size) {
            tracing::warn!(
                "Blocking pool already configured with {:?} tokens",
                self.blocking.total_tokens()
            );
        }

        if self.create_tables_on_start {
            match self.engine.lock().await.as_ref() {
                Some(engine) => ensure_schema(engine)
                    .await
                    .map_err(LifecycleError::Schema)?,
                None => tracing::warn!("Table creation requested but no engine was provided"),
            }
        }

        Ok(())
    }

    async fn release(&self) {
        if let Some(engine) = self.engine.lock().await.take() {
            if let Err(e) = engine.close().await {
                tracing::warn!("Failed to close database engine: {}", e);
            }
        }
    }

    fn transition(&self, from: LifecycleState, to: LifecycleState) -> Result<(), LifecycleError> {
        let mut result = Ok(());

        self.state.send_if_modified(|current| {
            if *current == from {
                *current = to;
                true
            } else {
                result = Err(LifecycleError::InvalidTransition { from: *current, to });
                false
            }
        });

        if result.is_ok() {
            tracing::debug!("Lifespan {:?} -> {:?}", from, to);
        }

        result
    }
}
