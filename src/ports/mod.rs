//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (the hosted database, the auth service). Implementations
//! live in `src/adapters/`.

pub mod auth;
pub mod data_source;

pub use auth::{AuthClient, AuthFuture, Session};
pub use data_source::{DataSource, Record, SourceFuture};
