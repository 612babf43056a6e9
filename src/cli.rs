//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `aula`.
#[derive(Debug, Parser)]
#[command(name = "aula", version, about = "Manage courses, enrollments, and evaluation periods")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and print the session tokens.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Register a new account.
    Register {
        /// Display name for the new account.
        #[arg(long)]
        name: String,
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Work with courses.
    Courses {
        /// The course operation to perform.
        #[command(subcommand)]
        action: CourseAction,
    },
    /// Enroll a student in a course.
    Enroll {
        /// Numeric course ID.
        course_id: u32,
        /// Student email.
        #[arg(long)]
        student: String,
    },
    /// Remove a student's enrollment.
    Unenroll {
        /// Numeric course ID.
        course_id: u32,
        /// Student email.
        #[arg(long)]
        student: String,
    },
    /// List enrollments, optionally for one course.
    Enrollments {
        /// Restrict to this course ID.
        #[arg(long)]
        course: Option<u32>,
    },
    /// Work with evaluation periods.
    Periods {
        /// The period operation to perform.
        #[command(subcommand)]
        action: PeriodAction,
    },
}

/// Course operations.
#[derive(Debug, Subcommand)]
pub enum CourseAction {
    /// List courses, optionally filtered by category.
    List {
        /// Catalog category to filter on.
        #[arg(long)]
        category: Option<String>,
    },
    /// Create a course.
    Create {
        /// Course title.
        #[arg(long)]
        name: String,
        /// Free-text description.
        #[arg(long)]
        description: String,
        /// Catalog category.
        #[arg(long)]
        category: String,
        /// Teacher email, if known.
        #[arg(long)]
        teacher: Option<String>,
    },
    /// Show one course.
    Show {
        /// Numeric course ID.
        id: u32,
    },
    /// Delete a course.
    Delete {
        /// Numeric course ID.
        id: u32,
    },
}

/// Evaluation-period operations.
#[derive(Debug, Subcommand)]
pub enum PeriodAction {
    /// List periods, optionally for one course.
    List {
        /// Restrict to this course ID.
        #[arg(long)]
        course: Option<u32>,
    },
    /// Create a period.
    Create {
        /// Period label.
        #[arg(long)]
        name: String,
        /// Window start (RFC 3339 or YYYY-MM-DD).
        #[arg(long)]
        start: String,
        /// Window end (RFC 3339 or YYYY-MM-DD).
        #[arg(long)]
        end: String,
        /// Course ID to link the period to.
        #[arg(long)]
        course: Option<u32>,
    },
    /// Update a period's label or window.
    Update {
        /// Numeric period ID.
        id: u32,
        /// New label.
        #[arg(long)]
        name: Option<String>,
        /// New window start (RFC 3339 or YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,
        /// New window end (RFC 3339 or YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,
    },
    /// Delete a period.
    Delete {
        /// Numeric period ID.
        id: u32,
    },
}
