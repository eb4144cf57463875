use thiserror::Error;

use crate::server::lifecycle::LifecycleState;

/// Errors raised by the application lifespan and the blocking pool.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// The requested transition is not allowed from the current state.
    ///
    /// Lifespans are single-use: a stopped application cannot be started again,
    /// a new process must run the whole startup sequence.
    #[error("Invalid lifecycle transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },

    /// Creating the database schema failed during startup.
    #[error("Failed to create database schema: {0}")]
    Schema(#[source] sea_orm::DbErr),

    /// Blocking work was submitted before the pool size was configured at startup.
    #[error("Blocking pool has not been configured")]
    BlockingPoolNotConfigured,

    /// The blocking pool semaphore was closed.
    #[error("Blocking pool is closed")]
    BlockingPoolClosed,

    /// A blocking task panicked or was cancelled.
    #[error(transparent)]
    BlockingTask(#[from] tokio::task::JoinError),
}
