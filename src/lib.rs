//! Core library entry for the `coedit` CLI.

pub mod adapters;
pub mod cassette;
pub mod changes;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod diff;
pub mod error;
pub mod ports;
pub mod workspace;

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
    commands::dispatch(&cli)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["coedit", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_reports_unreadable_local_file() {
        let err = run(["coedit", "diff", "a.py", "/nonexistent/proposed.py"]).unwrap_err();
        assert!(err.contains("/nonexistent/proposed.py"), "{err}");
    }
}
