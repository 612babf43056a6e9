//! Command dispatch and handlers.

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod periods;

use std::env;

use crate::cli::Command;
use crate::config::RobleConfig;
use crate::context::ServiceContext;

/// Environment variable selecting the backend; `memory` runs fully
/// in-process, anything else (or unset) talks to the configured Roble
/// backend.
pub const BACKEND_VAR: &str = "AULA_BACKEND";

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if configuration is missing or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = if env::var(BACKEND_VAR).is_ok_and(|v| v == "memory") {
        ServiceContext::memory()
    } else {
        // Live runs pick up .env before reading the configuration.
        dotenvy::dotenv().ok();
        let config = RobleConfig::load()?;
        ServiceContext::live(&config)
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    runtime.block_on(dispatch_with_context(command, &ctx))
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Login { email, password } => auth::login(ctx, email, password).await,
        Command::Register { name, email, password } => {
            auth::register(ctx, name, email, password).await
        }
        Command::Courses { action } => courses::run(ctx, action).await,
        Command::Enroll { course_id, student } => {
            enrollments::enroll(ctx, *course_id, student).await
        }
        Command::Unenroll { course_id, student } => {
            enrollments::unenroll(ctx, *course_id, student).await
        }
        Command::Enrollments { course } => enrollments::list(ctx, *course).await,
        Command::Periods { action } => periods::run(ctx, action).await,
    }
}
