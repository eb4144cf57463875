//! Request-scoped database sessions.
//!
//! A [`SessionFactory`] wraps the shared engine and hands out one [`Session`]
//! per unit of work. Sessions never commit on their own: writes become visible
//! only after an explicit [`Session::commit`], and a session dropped on any
//! other path (error, early return, cancelled request) rolls its transaction
//! back.

use std::{
    convert::Infallible,
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Creates a factory producing sessions bound to `engine`.
pub fn make_session_factory(engine: DatabaseConnection) -> SessionFactory {
    SessionFactory { engine }
}

/// Produces a fresh [`Session`] on every call.
///
/// Cloning is cheap: clones share the same engine pool.
#[derive(Clone)]
pub struct SessionFactory {
    engine: DatabaseConnection,
}

impl SessionFactory {
    /// Returns a new session with autocommit and autoflush disabled.
    pub fn session(&self) -> Session {
        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        tracing::trace!("Opening session {}", id);

        Session {
            id,
            engine: self.engine.clone(),
            transaction: None,
        }
    }

    pub fn engine(&self) -> &DatabaseConnection {
        &self.engine
    }
}

/// A single unit of work owned by one caller.
///
/// The transaction is started lazily on the first call to
/// [`transaction`](Self::transaction), so a request that never touches the
/// database never checks out a connection.
pub struct Session {
    id: u64,
    engine: DatabaseConnection,
    transaction: Option<DatabaseTransaction>,
}

impl Session {
    /// Process-unique identifier of this session.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Always `false`: statements only persist through [`commit`](Self::commit).
    pub fn autocommit(&self) -> bool {
        false
    }

    /// Always `false`: nothing is sent to the database behind the caller's back.
    pub fn autoflush(&self) -> bool {
        false
    }

    /// Whether a transaction has been started and not yet finished.
    pub fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Gets or begins the session's transaction.
    ///
    /// # Returns
    /// - `Ok(&DatabaseTransaction)` - Open transaction usable with any repository
    /// - `Err(DbErr)` - Failed to check out a connection or begin the transaction
    pub async fn transaction(&mut self) -> Result<&DatabaseTransaction, DbErr> {
        match self.transaction {
            Some(ref txn) => Ok(txn),
            None => {
                let txn = self.engine.begin().await?;

                let txn_ref = self.transaction.insert(txn);

                Ok(&*txn_ref)
            }
        }
    }

    /// Commits the open transaction, if any, and ends the session.
    pub async fn commit(mut self) -> Result<(), DbErr> {
        match self.transaction.take() {
            Some(txn) => txn.commit().await,
            None => Ok(()),
        }
    }

    /// Rolls back the open transaction, if any, and ends the session.
    pub async fn rollback(mut self) -> Result<(), DbErr> {
        match self.transaction.take() {
            Some(txn) => txn.rollback().await,
            None => Ok(()),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // The transaction rolls itself back when dropped.
        if self.transaction.is_some() {
            tracing::debug!(
                "Session {} dropped with an open transaction, rolling back",
                self.id
            );
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("autocommit", &self.autocommit())
            .field("autoflush", &self.autoflush())
            .field("in_transaction", &self.in_transaction())
            .finish()
    }
}

/// Extracts a new session for the duration of one request.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    SessionFactory: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionFactory::from_ref(state).session())
    }
}
