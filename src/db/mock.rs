//! Mock database client for unit testing.
//!
//! This module provides a mock client that drives the lifecycle manager in
//! tests without a real MongoDB server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::db::DbClient;
use crate::error::{AppError, Result};

/// Configuration for mock client behavior.
#[derive(Debug, Clone, Default)]
pub struct MockBehavior {
    /// Whether the liveness probe should fail.
    pub fail_ping: bool,
}

/// Flags recording which lifecycle calls the mock has seen.
///
/// Shared via [`MockClient::calls`] so assertions survive the client's
/// move into the lifecycle manager.
#[derive(Debug, Default)]
pub struct MockCalls {
    pinged: AtomicBool,
    shutdown: AtomicBool,
}

impl MockCalls {
    /// Whether the liveness probe was issued.
    pub fn ping_called(&self) -> bool {
        self.pinged.load(Ordering::SeqCst)
    }

    /// Whether the client was released.
    pub fn shutdown_called(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

/// Database handle produced by the mock client.
#[derive(Debug, Clone)]
pub struct MockDb {
    /// Database name the handle is scoped to.
    pub name: String,
}

/// Mock database client for testing.
#[derive(Debug, Clone)]
pub struct MockClient {
    behavior: MockBehavior,
    calls: Arc<MockCalls>,
}

impl MockClient {
    /// Create a new mock client with default behavior.
    pub fn new() -> Self {
        Self::with_behavior(MockBehavior::default())
    }

    /// Create a mock client with custom behavior.
    pub fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(MockCalls::default()),
        }
    }

    /// Shared call-tracking flags.
    pub fn calls(&self) -> Arc<MockCalls> {
        self.calls.clone()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DbClient for MockClient {
    type Db = MockDb;

    async fn ping(&self) -> Result<()> {
        self.calls.pinged.store(true, Ordering::SeqCst);

        if self.behavior.fail_ping {
            return Err(AppError::Startup("mock ping failure".to_string()));
        }

        Ok(())
    }

    fn database(&self, name: &str) -> MockDb {
        MockDb {
            name: name.to_string(),
        }
    }

    async fn shutdown(self) {
        self.calls.shutdown.store(true, Ordering::SeqCst);
    }
}
