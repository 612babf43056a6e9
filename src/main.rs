//! Binary entrypoint for the `aula` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // Backend selection is handled in commands::dispatch via AULA_BACKEND.
    match aula::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
