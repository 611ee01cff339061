//! Binary entrypoint for the `coedit` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // RUST_LOG controls verbosity; logs go to stderr so command output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Recording is handled in commands::dispatch via COEDIT_RECORD=<dir>.
    match coedit::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
