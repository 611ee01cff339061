//! Command dispatch and handlers.

pub mod chat;
pub mod files;
pub mod generate;
pub mod models;
pub mod review;

use std::env;
use std::path::PathBuf;

use crate::cassette::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::workspace::Workspace;

/// Dispatch a parsed command line to its handler.
///
/// When `COEDIT_RECORD` is set to a directory path, all port interactions are
/// recorded to per-port cassette files in a timestamped directory below it.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let mut config = Config::from_env()?;
    if let Some(backend) = &cli.backend {
        config.backend_url.clone_from(backend);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    let (ctx, session) = if let Ok(path) = env::var("COEDIT_RECORD") {
        let (ctx, session) = ServiceContext::recording(&config, &PathBuf::from(path))?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    let result = runtime.block_on(dispatch_with_context(&cli.command, &ctx, &config));

    // Recorders are shared with the adapters until the context is gone.
    if let Some(session) = session {
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
) -> Result<(), String> {
    match command {
        Command::Models => models::run(ctx).await,
        Command::Tree { filter, flat } => files::tree(ctx, filter.as_deref(), *flat).await,
        Command::Cat { path } => files::cat(ctx, path).await,
        Command::Create { path } => files::create(ctx, config, path).await,
        Command::Rm { path } => files::remove(ctx, config, path).await,
        Command::Generate { prompt, file, model, language, no_apply } => {
            let options = generate::Options {
                file: file.as_deref(),
                model: model.as_deref(),
                language: *language,
                no_apply: *no_apply,
            };
            generate::run(ctx, config, prompt, &options).await
        }
        Command::Diff { path, local_file, plain } => {
            review::diff(ctx, config, path, local_file, *plain).await
        }
        Command::Apply { path, local_file } => review::apply(ctx, config, path, local_file).await,
        Command::Revert { path } => review::revert(ctx, config, path).await,
        Command::Chat => chat::run(ctx, config).await,
    }
}

/// Print and clear the workspace's pending notifications.
///
/// Returns an error naming the first error notification, so failed actions
/// end the process with a non-zero status.
fn report(workspace: &mut Workspace<'_>) -> Result<(), String> {
    let mut first_error = None;
    for notification in workspace.take_notifications() {
        if notification.is_error() {
            eprintln!("{notification}");
            first_error.get_or_insert(notification.description);
        } else {
            println!("{notification}");
        }
    }
    first_error.map_or(Ok(()), Err)
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
