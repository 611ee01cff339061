//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::changes::Language;

/// Top-level CLI parser for `coedit`.
#[derive(Debug, Parser)]
#[command(name = "coedit", version, about = "Generate, preview and apply code changes against a file store backend")]
pub struct Cli {
    /// Backend base URL; overrides `COEDIT_BACKEND_URL`.
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the models available for generation.
    Models,
    /// Print the backend file tree.
    Tree {
        /// Only show entries whose name contains this text.
        #[arg(long)]
        filter: Option<String>,
        /// Print one file path per line instead of the indented tree.
        #[arg(long)]
        flat: bool,
    },
    /// Print the content of a stored file.
    Cat {
        /// Store path of the file.
        path: String,
    },
    /// Create an empty file.
    Create {
        /// Store path of the new file.
        path: String,
    },
    /// Delete a file.
    Rm {
        /// Store path of the file.
        path: String,
    },
    /// Generate code from a prompt.
    Generate {
        /// What to generate.
        prompt: String,
        /// Store file the generated code is for.
        #[arg(long)]
        file: Option<String>,
        /// Model id; defaults to `COEDIT_MODEL`.
        #[arg(long)]
        model: Option<String>,
        /// Language hint when no file is given.
        #[arg(long)]
        language: Option<Language>,
        /// Record the change without writing it to the file.
        #[arg(long)]
        no_apply: bool,
    },
    /// Preview a local file as a change to a stored file.
    Diff {
        /// Store path of the target file.
        path: String,
        /// Local file holding the proposed content.
        local_file: PathBuf,
        /// Show the proposed content instead of a diff.
        #[arg(long)]
        plain: bool,
    },
    /// Write a local file's content to a stored file.
    Apply {
        /// Store path of the target file.
        path: String,
        /// Local file holding the new content.
        local_file: PathBuf,
    },
    /// Re-write a stored file with its current content.
    Revert {
        /// Store path of the file.
        path: String,
    },
    /// Start an interactive chat session.
    Chat,
}
