//! Core library entry for the `aula` CLI.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod ident;
pub mod model;
pub mod ports;
pub mod repo;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["aula", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_on_missing_required_args() {
        let result = run(["aula", "login"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("--email"));
    }
}
