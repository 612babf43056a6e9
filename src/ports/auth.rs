//! Auth client port for login and registration.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`AuthClient`] to keep the trait
/// dyn-compatible.
pub type AuthFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// An authenticated session returned by a successful login.
///
/// The access token is carried as opaque state and attached to data-source
/// requests; refreshing an expired token is out of scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Token accepted by the backend's refresh endpoint (unused here).
    pub refresh_token: String,
    /// Email address of the authenticated user.
    pub user_email: String,
    /// Display name of the authenticated user, when the backend reports one.
    pub user_name: Option<String>,
}

/// Authenticates users against the remote backend.
pub trait AuthClient: Send + Sync {
    /// Logs in with email and password, returning the session tokens.
    ///
    /// # Errors
    ///
    /// Returns an error on bad credentials or transport failure.
    fn login(&self, email: &str, password: &str) -> AuthFuture<'_, Session>;

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the account already exists, the password is
    /// rejected, or the transport fails.
    fn register(&self, name: &str, email: &str, password: &str) -> AuthFuture<'_, ()>;
}
