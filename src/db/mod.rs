//! Database client trait and connection lifecycle management.
//!
//! The shared client moves through `UNINITIALIZED -> READY -> CLOSED` over
//! one process lifetime; there is no way back to `READY` once closed.
//! Handlers receive database handles through [`Lifecycle::handle`], never
//! through a mutable global.

use std::future::Future;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{AppError, Result};

pub mod mock;
pub mod mongo;

pub use mongo::MongoClient;

/// Seam between the lifecycle manager and a concrete database driver.
///
/// The production implementation is [`MongoClient`]; tests drive the same
/// lifecycle code through [`mock::MockClient`].
pub trait DbClient: Sized + Send + Sync + 'static {
    /// Database handle scoped to a named database.
    type Db: Clone + Send + Sync + 'static;

    /// Issue a liveness probe against the server.
    fn ping(&self) -> impl Future<Output = Result<()>> + Send;

    /// Get a handle scoped to the named database.
    fn database(&self, name: &str) -> Self::Db;

    /// Release the client and all pooled connections.
    fn shutdown(self) -> impl Future<Output = ()> + Send;
}

/// Lifecycle state of the shared client.
enum State<C: DbClient> {
    /// Before startup.
    Uninitialized,
    /// Serving window: client live, handle bound to the configured database.
    Ready { client: C, db: C::Db },
    /// After shutdown.
    Closed,
}

/// Connection lifecycle manager.
///
/// Owns the single shared client for the process. Concurrent request
/// handlers clone database handles out of the READY state; the client pools
/// connections internally, so no locking beyond the state guard is added.
pub struct Lifecycle<C: DbClient> {
    state: RwLock<State<C>>,
}

impl<C: DbClient> Lifecycle<C> {
    /// Create a manager in the UNINITIALIZED state.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::Uninitialized),
        }
    }

    /// Verify the client is live and bind the shared handle.
    ///
    /// The liveness probe failing is fatal and not retried: the client is
    /// released, the error surfaces to the caller, and the state stays
    /// UNINITIALIZED so no route ever observes a half-started manager.
    pub async fn startup(&self, client: C, database: &str) -> Result<()> {
        let mut state = self.state.write().await;

        if !matches!(*state, State::Uninitialized) {
            return Err(AppError::Startup("lifecycle already started".to_string()));
        }

        if let Err(e) = client.ping().await {
            client.shutdown().await;
            return Err(e);
        }

        let db = client.database(database);
        *state = State::Ready { client, db };
        debug!("database lifecycle is ready");
        Ok(())
    }

    /// Clone of the shared handle, scoped to the configured database name.
    ///
    /// Fails with [`AppError::Uninitialized`] before startup completed or
    /// after shutdown ran.
    pub async fn handle(&self) -> Result<C::Db> {
        match &*self.state.read().await {
            State::Ready { db, .. } => Ok(db.clone()),
            State::Uninitialized | State::Closed => Err(AppError::Uninitialized),
        }
    }

    /// Whether the manager is in the READY state.
    pub async fn is_ready(&self) -> bool {
        matches!(*self.state.read().await, State::Ready { .. })
    }

    /// Release the client and move to CLOSED. Idempotent.
    pub async fn shutdown(&self) {
        let mut state = self.state.write().await;
        if let State::Ready { client, .. } = std::mem::replace(&mut *state, State::Closed) {
            client.shutdown().await;
            debug!("database client released");
        }
    }
}

impl<C: DbClient> Default for Lifecycle<C> {
    fn default() -> Self {
        Self::new()
    }
}
