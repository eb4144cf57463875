//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each
//! request handler through Axum's state extraction. Both fields are cheap to
//! clone and share one connection pool.

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::server::session::SessionFactory;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Database engine (connection pool).
    pub db: DatabaseConnection,

    /// Produces the request-scoped sessions extracted by handlers.
    pub sessions: SessionFactory,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database engine
    /// - `sessions` - Session factory bound to the same engine
    pub fn new(db: DatabaseConnection, sessions: SessionFactory) -> Self {
        Self { db, sessions }
    }
}

impl FromRef<AppState> for SessionFactory {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
