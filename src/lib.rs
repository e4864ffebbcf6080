//! HTTP status/query service for cryptocurrency market snapshots.
//!
//! Exposes read-only records from a DynamoDB table populated by an external
//! ingestion process, plus a store-free liveness endpoint for infrastructure
//! health checks. Every request is reported to a fire-and-forget telemetry
//! sink in addition to the local structured log.
//!
//! # Modules
//!
//! - [`config`]: Listen-address and table configuration from environment or YAML
//! - [`error`]: Unified error types
//! - [`record`]: Wire-level record and status types
//! - [`store`]: Backing-store client and in-memory mock
//! - [`telemetry`]: Best-effort leveled event sink
//! - [`api`]: HTTP routes and handlers
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod record;
pub mod store;
pub mod telemetry;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
