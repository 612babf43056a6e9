//! Live adapters backed by the hosted Roble API.

pub mod auth;
pub mod data_source;

pub use auth::RobleAuthClient;
pub use data_source::RobleDataSource;
