//! `coedit generate` command.

use crate::changes::Language;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::workspace::Workspace;

/// Flags of the `generate` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options<'a> {
    /// Store file to generate for; opened before the prompt is sent.
    pub file: Option<&'a str>,
    /// Model override.
    pub model: Option<&'a str>,
    /// Language override, applied after the file is opened.
    pub language: Option<Language>,
    /// Record the change without writing it.
    pub no_apply: bool,
}

/// Execute the `generate` command.
///
/// Without `--file` the raw response is printed. With `--file` the
/// generated content is written to that file (unless `--no-apply`) and the
/// resulting change is summarized.
///
/// # Errors
///
/// Returns an error string if the file cannot be opened, generation fails,
/// or the generated code cannot be written.
pub async fn run(
    ctx: &ServiceContext,
    config: &Config,
    prompt: &str,
    options: &Options<'_>,
) -> Result<(), String> {
    let config = Config { auto_apply: config.auto_apply && !options.no_apply, ..config.clone() };
    let mut workspace = Workspace::new(ctx, &config);

    if let Some(model) = options.model {
        workspace.select_model(model);
    }
    if let Some(path) = options.file {
        workspace.open_file(path).await.map_err(|e| format!("Failed to open {path}: {e}"))?;
    }
    if let Some(language) = options.language {
        workspace.set_language(language);
    }

    let outcome = workspace.submit_prompt(prompt).await;
    super::report(&mut workspace)?;
    let change = outcome.map_err(|e| e.to_string())?;

    match change {
        Some(change) if config.auto_apply => {
            println!("Updated {} ({})", change.file_path, change.language);
        }
        Some(change) => {
            println!("Proposed change to {} ({}):", change.file_path, change.language);
            print!("{}", change.content);
            if !change.content.ends_with('\n') {
                println!();
            }
        }
        None => {
            if let Some(reply) = workspace.transcript().messages().last() {
                println!("{}", reply.content);
            }
        }
    }
    Ok(())
}
