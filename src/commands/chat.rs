//! `coedit chat` interactive session.
//!
//! Reads one line at a time. Lines starting with `:` are commands, anything
//! else is sent as a prompt. Notifications raised by an action are printed
//! after it.

use std::io::{self, BufRead, Write};

use crate::changes::CodeChange;
use crate::chat::Role;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::diff::render;
use crate::workspace::{PreviewView, Workspace};

const HELP: &str = "\
Commands:
  :open <path>     open a file for editing
  :changes         list proposed changes, newest first
  :select <n>      preview change n (again to close)
  :diff            toggle diff view of the preview
  :message <n>     show the prompt and reply that produced change n
  :apply [n]       apply change n, or the previewed change
  :revert [n]      revert change n, or the previewed change
  :models          list available models
  :model <id>      select a model
  :tree            show the file tree
  :quit            leave
Anything else is sent as a prompt.";

/// Execute the `chat` command on stdin and stdout.
///
/// # Errors
///
/// Returns an error string if reading input or writing output fails.
pub async fn run(ctx: &ServiceContext, config: &Config) -> Result<(), String> {
    let mut workspace = Workspace::new(ctx, config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_session(&mut workspace, stdin.lock(), &mut stdout)
        .await
        .map_err(|e| format!("Chat session failed: {e}"))
}

/// Runs a chat session until `:quit` or end of input.
///
/// # Errors
///
/// Returns any I/O error from `input` or `out`.
pub async fn run_session<R: BufRead, W: Write>(
    workspace: &mut Workspace<'_>,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    // Startup failures surface as notifications below.
    let _ = workspace.load_models().await;
    let _ = workspace.refresh_file_tree().await;
    writeln!(out, "Model: {}. Type :help for commands.", workspace.model_id())?;
    flush_notifications(workspace, out)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !handle_line(workspace, line, out).await? {
            break;
        }
        flush_notifications(workspace, out)?;
    }
    Ok(())
}

/// Handles one input line; returns `false` when the session should end.
async fn handle_line<W: Write>(
    workspace: &mut Workspace<'_>,
    line: &str,
    out: &mut W,
) -> io::Result<bool> {
    let Some(command) = line.strip_prefix(':') else {
        prompt(workspace, line, out).await?;
        return Ok(true);
    };
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim())),
        None => (command, None),
    };

    match (name, arg) {
        ("quit" | "q", _) => return Ok(false),
        ("help", _) => writeln!(out, "{HELP}")?,
        ("open", Some(path)) => match workspace.open_file(path).await {
            Ok(()) => writeln!(out, "Opened {path} ({})", workspace.language())?,
            Err(e) => writeln!(out, "Failed to open {path}: {e}")?,
        },
        ("changes", _) => {
            let changes = workspace.changes();
            if changes.is_empty() {
                writeln!(out, "No changes yet.")?;
            }
            for (i, change) in changes.iter().enumerate() {
                writeln!(
                    out,
                    "[{i}] {} ({}, {})",
                    change.file_path,
                    change.language,
                    change.timestamp.format("%H:%M:%S")
                )?;
            }
        }
        ("select", Some(arg)) => {
            if let Some(change) = change_at(workspace, arg, out)? {
                workspace.select_change(&change).await;
                show_preview(workspace, out)?;
            }
        }
        ("message", Some(arg)) => {
            if let Some(change) = change_at(workspace, arg, out)? {
                show_exchange(workspace, &change, out)?;
            }
        }
        ("diff", _) => {
            workspace.toggle_diff_mode();
            let mode = if workspace.diff_mode() { "diff" } else { "plain" };
            writeln!(out, "Preview mode: {mode}")?;
            show_preview(workspace, out)?;
        }
        ("apply", arg) => {
            if let Some(change) = target_change(workspace, arg, out)? {
                let _ = workspace.apply_change(&change).await;
            }
        }
        ("revert", arg) => {
            if let Some(change) = target_change(workspace, arg, out)? {
                let _ = workspace.revert_change(&change).await;
            }
        }
        ("models", _) => {
            if workspace.load_models().await.is_ok() {
                for model in workspace.models() {
                    let marker = if model.id == workspace.model_id() { "*" } else { " " };
                    writeln!(out, "{marker} {} ({}, {})", model.id, model.name, model.provider)?;
                }
            }
        }
        ("model", Some(id)) => {
            workspace.select_model(id);
            writeln!(out, "Model: {id}")?;
        }
        ("tree", _) => match workspace.refresh_file_tree().await {
            Ok(()) => write!(out, "{}", super::files::format_tree(workspace.file_tree()))?,
            Err(e) => writeln!(out, "Failed to fetch file tree: {e}")?,
        },
        ("open", None) => writeln!(out, "Usage: :open <path>")?,
        ("select" | "message", None) => writeln!(out, "Usage: :{name} <n>")?,
        ("model", None) => writeln!(out, "Usage: :model <id>")?,
        _ => writeln!(out, "Unknown command :{command}. Type :help for commands.")?,
    }
    Ok(true)
}

async fn prompt<W: Write>(workspace: &mut Workspace<'_>, text: &str, out: &mut W) -> io::Result<()> {
    match workspace.submit_prompt(text).await {
        Ok(change) => {
            if let Some(reply) = workspace.transcript().messages().last() {
                writeln!(out, "{}", reply.content)?;
            }
            if let Some(change) = change {
                writeln!(out, "Change recorded for {}", change.file_path)?;
            }
        }
        Err(e) => writeln!(out, "Generation failed: {e}")?,
    }
    Ok(())
}

fn change_at<W: Write>(
    workspace: &Workspace<'_>,
    arg: &str,
    out: &mut W,
) -> io::Result<Option<CodeChange>> {
    let change = arg.parse::<usize>().ok().and_then(|i| workspace.changes().into_iter().nth(i));
    if change.is_none() {
        writeln!(out, "No change numbered {arg}. Use :changes to list them.")?;
    }
    Ok(change)
}

fn target_change<W: Write>(
    workspace: &Workspace<'_>,
    arg: Option<&str>,
    out: &mut W,
) -> io::Result<Option<CodeChange>> {
    if let Some(arg) = arg {
        return change_at(workspace, arg, out);
    }
    let change = workspace.preview().change().cloned();
    if change.is_none() {
        writeln!(out, "Nothing selected. Use :select <n> or give a change number.")?;
    }
    Ok(change)
}

/// Prints the assistant reply carrying `change`, preceded by its prompt.
fn show_exchange<W: Write>(
    workspace: &Workspace<'_>,
    change: &CodeChange,
    out: &mut W,
) -> io::Result<()> {
    let transcript = workspace.transcript();
    let Some(reply) = transcript.message_for_change(change) else {
        return writeln!(out, "No message carries a change for {}.", change.file_path);
    };
    let messages = transcript.messages();
    let earlier = messages.iter().position(|m| m.id == reply.id).map_or(&[][..], |at| &messages[..at]);
    if let Some(prompt) = earlier.last().filter(|m| m.role == Role::User) {
        writeln!(out, "> {}", prompt.content)?;
    }
    writeln!(out, "{}", reply.content)
}

fn show_preview<W: Write>(workspace: &Workspace<'_>, out: &mut W) -> io::Result<()> {
    match workspace.preview_view() {
        Some(PreviewView::Diff(lines)) => writeln!(out, "{}", render(&lines)),
        Some(PreviewView::Plain(content)) => writeln!(out, "{content}"),
        None => writeln!(out, "Preview closed."),
    }
}

fn flush_notifications<W: Write>(workspace: &mut Workspace<'_>, out: &mut W) -> io::Result<()> {
    for notification in workspace.take_notifications() {
        writeln!(out, "{notification}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::adapters::memory::{MemoryFileStore, ScriptedCodeGen, SequentialIds, SteppingClock};
    use crate::ports::ModelInfo;

    fn context(store: &Arc<MemoryFileStore>, codegen: &Arc<ScriptedCodeGen>) -> ServiceContext {
        ServiceContext::from_parts(
            Box::new(Arc::clone(store)),
            Box::new(Arc::clone(codegen)),
            Box::new(SteppingClock::starting_at(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap())),
            Box::new(SequentialIds::new("msg")),
        )
    }

    async fn session(ctx: &ServiceContext, config: &Config, script: &str) -> String {
        let mut workspace = Workspace::new(ctx, config);
        let mut out = Vec::new();
        run_session(&mut workspace, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn proposes_previews_and_applies_a_change() {
        let store = Arc::new(MemoryFileStore::with_files([("app.py", "a\nb\n")]));
        let codegen = Arc::new(ScriptedCodeGen::new(vec![ModelInfo {
            id: "gpt-4".into(),
            name: "GPT-4".into(),
            provider: "openai".into(),
        }]));
        codegen.push_response("```python\na\nc\n```");
        let ctx = context(&store, &codegen);
        let config = Config { auto_apply: false, ..Config::default() };

        let output = session(
            &ctx,
            &config,
            ":open app.py\nchange b to c\n:changes\n:diff\n:select 0\n:apply\n:quit\n:model ignored\n",
        )
        .await;

        assert!(output.contains("Opened app.py (python)"), "{output}");
        assert!(output.contains("Change recorded for app.py"), "{output}");
        assert!(output.contains("[0] app.py (python, "), "{output}");
        assert!(output.contains("  a\n- b\n+ c"), "{output}");
        assert!(output.contains("[ok] Changes Applied: Successfully updated app.py"), "{output}");
        assert!(!output.contains("Model: ignored"), "{output}");
        assert_eq!(store.content("app.py").as_deref(), Some("a\nc\n"));
    }

    #[tokio::test]
    async fn reports_failures_as_notifications() {
        let store = Arc::new(MemoryFileStore::new());
        let codegen = Arc::new(ScriptedCodeGen::new(Vec::new()));
        codegen.fail_models(crate::error::BackendError::Transport("refused".into()));
        let ctx = context(&store, &codegen);

        let output = session(&ctx, &Config::default(), ":apply\n:select 3\n:bogus\n").await;

        assert!(output.contains("[error] Error: Failed to fetch available models"), "{output}");
        assert!(output.contains("Nothing selected."), "{output}");
        assert!(output.contains("No change numbered 3."), "{output}");
        assert!(output.contains("Unknown command :bogus."), "{output}");
    }

    #[tokio::test]
    async fn message_shows_the_exchange_behind_a_change() {
        let store = Arc::new(MemoryFileStore::with_files([("app.py", "x = 1\n"), ("b.py", "")]));
        let codegen = Arc::new(ScriptedCodeGen::new(Vec::new()));
        codegen.push_response("```python\nx = 2\n```");
        codegen.push_response("```python\ny = 3\n```");
        let ctx = context(&store, &codegen);
        let config = Config { auto_apply: false, ..Config::default() };

        let output = session(
            &ctx,
            &config,
            ":open app.py\nbump x\n:open b.py\nadd y\n:message 1\n:message 9\n",
        )
        .await;

        let tail = &output[output.rfind("Change recorded for b.py").unwrap()..];
        assert!(tail.contains("> bump x\n```python\nx = 2\n```\n"), "{output}");
        assert!(!tail.contains("> add y"), "{output}");
        assert!(tail.contains("No change numbered 9."), "{output}");
    }

    #[tokio::test]
    async fn commands_missing_their_argument_print_usage() {
        let store = Arc::new(MemoryFileStore::new());
        let codegen = Arc::new(ScriptedCodeGen::new(Vec::new()));
        let ctx = context(&store, &codegen);

        let output = session(&ctx, &Config::default(), ":open\n:select\n:message\n:model\n").await;

        assert!(output.contains("Usage: :open <path>\n"), "{output}");
        assert!(output.contains("Usage: :select <n>\n"), "{output}");
        assert!(output.contains("Usage: :message <n>\n"), "{output}");
        assert!(output.contains("Usage: :model <id>\n"), "{output}");
        assert!(!output.contains("Unknown command"), "{output}");
    }
}
