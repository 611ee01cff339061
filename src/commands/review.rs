//! `coedit diff`, `apply` and `revert` commands.

use std::path::Path;

use crate::changes::{ChangeKind, CodeChange};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::diff::{render, DiffStats};
use crate::workspace::{PreviewView, Workspace};

/// Execute the `diff` command.
///
/// Previews `local_file` as a change to `path`, as a diff against the stored
/// content or, with `plain`, as the proposed content itself.
///
/// # Errors
///
/// Returns an error string if the local file cannot be read.
pub async fn diff(
    ctx: &ServiceContext,
    config: &Config,
    path: &str,
    local_file: &Path,
    plain: bool,
) -> Result<(), String> {
    let change = local_change(ctx, path, local_file)?;
    let mut workspace = Workspace::new(ctx, config);
    if !plain {
        workspace.toggle_diff_mode();
    }
    workspace.select_change(&change).await;

    match workspace.preview_view() {
        Some(PreviewView::Diff(lines)) => {
            let stats = DiffStats::from_lines(&lines);
            if !lines.is_empty() {
                println!("{}", render(&lines));
            }
            println!("{path}: {stats}");
        }
        Some(PreviewView::Plain(content)) => {
            print!("{content}");
            if !content.is_empty() && !content.ends_with('\n') {
                println!();
            }
        }
        None => {}
    }
    Ok(())
}

/// Execute the `apply` command.
///
/// # Errors
///
/// Returns an error string if the local file cannot be read or the write fails.
pub async fn apply(
    ctx: &ServiceContext,
    config: &Config,
    path: &str,
    local_file: &Path,
) -> Result<(), String> {
    let change = local_change(ctx, path, local_file)?;
    let mut workspace = Workspace::new(ctx, config);
    let outcome = workspace.apply_change(&change).await;
    super::report(&mut workspace)?;
    outcome.map_err(|e| e.to_string())
}

/// Execute the `revert` command.
///
/// # Errors
///
/// Returns an error string if the file cannot be re-read or re-written.
pub async fn revert(ctx: &ServiceContext, config: &Config, path: &str) -> Result<(), String> {
    let change = CodeChange::new(path, "", ChangeKind::Update, ctx.clock.now());
    let mut workspace = Workspace::new(ctx, config);
    let outcome = workspace.revert_change(&change).await;
    super::report(&mut workspace)?;
    outcome.map_err(|e| e.to_string())
}

fn local_change(ctx: &ServiceContext, path: &str, local_file: &Path) -> Result<CodeChange, String> {
    let content = std::fs::read_to_string(local_file)
        .map_err(|e| format!("Failed to read {}: {e}", local_file.display()))?;
    Ok(CodeChange::new(path, content, ChangeKind::Update, ctx.clock.now()))
}
