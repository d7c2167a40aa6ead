//! Minimal HTTP service scaffold around a lifecycle-managed MongoDB client.
//!
//! Configuration is loaded once from the environment, the database
//! connection is verified before the listener binds, and the client is
//! released after the serve loop exits. There is no business logic beyond
//! a placeholder example route group.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types and HTTP error mapping
//! - [`db`]: Database client seam and connection lifecycle manager
//! - [`api`]: Router, handlers, and CORS policy
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod utils;

pub use config::Settings;
pub use error::{AppError, Result};
