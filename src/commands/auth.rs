//! Login and registration handlers.

use crate::config::ACCESS_TOKEN_VAR;
use crate::context::ServiceContext;
use crate::ports::auth::Session;

/// Logs in and prints the session report.
///
/// # Errors
///
/// Returns an error on bad credentials or transport failure.
pub async fn login(ctx: &ServiceContext, email: &str, password: &str) -> Result<(), String> {
    let session = ctx
        .auth
        .login(email, password)
        .await
        .map_err(|e| format!("Login failed: {e}"))?;
    println!("{}", format_session(&session));
    Ok(())
}

/// Registers a new account.
///
/// # Errors
///
/// Returns an error if the backend rejects the registration.
pub async fn register(
    ctx: &ServiceContext,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), String> {
    ctx.auth
        .register(name, email, password)
        .await
        .map_err(|e| format!("Registration failed: {e}"))?;
    println!("Registered {email}. Log in with `aula login` to get a session token.");
    Ok(())
}

/// Formats a session as a report plus a copy-pasteable export line.
#[must_use]
fn format_session(session: &Session) -> String {
    let who = match &session.user_name {
        Some(name) => format!("{name} <{}>", session.user_email),
        None => session.user_email.clone(),
    };
    format!(
        "Logged in as {who}.\nexport {ACCESS_TOKEN_VAR}={}",
        session.access_token
    )
}
