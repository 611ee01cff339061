//! Session controller owning all client-side state.
//!
//! A [`Workspace`] holds the transcript, the file tree, the open editor, the
//! preview panel and pending notifications, and exposes one async method per
//! user action. Every backend failure is handled inside the method that
//! triggered it: state is left as it was and an error notification and/or a
//! log event is produced. Methods still return the error so scripted callers
//! can tell success from failure.

pub mod notify;
pub mod preview;
mod review;

use tracing::{info, warn};

use crate::changes::{ChangeKind, CodeChange, Language};
use crate::chat::{extract_code, Transcript};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::BackendError;
use crate::ports::{FileNode, GenerateRequest, ModelInfo};

pub use notify::{Level, Notification};
pub use preview::{Preview, PreviewState, PreviewView, Selection};

/// The file open in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    /// Store path of the file.
    pub path: String,
    /// Content shown in the editor.
    pub content: String,
    /// Syntax language derived from the path.
    pub language: Language,
}

impl EditorState {
    /// Creates editor state for `path`, deriving the language.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let language = Language::from_file_name(&path);
        Self { path, content: content.into(), language }
    }
}

/// Client-side state of one editing session.
pub struct Workspace<'a> {
    ctx: &'a ServiceContext,
    model_id: String,
    language: Language,
    auto_apply: bool,
    models: Vec<ModelInfo>,
    transcript: Transcript,
    tree: Vec<FileNode>,
    editor: Option<EditorState>,
    preview: PreviewState,
    diff_mode: bool,
    notifications: Vec<Notification>,
}

impl<'a> Workspace<'a> {
    /// Creates an empty session using the ports in `ctx`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &Config) -> Self {
        Self {
            ctx,
            model_id: config.model_id.clone(),
            language: config.language,
            auto_apply: config.auto_apply,
            models: Vec::new(),
            transcript: Transcript::new(),
            tree: Vec::new(),
            editor: None,
            preview: PreviewState::Closed,
            diff_mode: false,
            notifications: Vec::new(),
        }
    }

    // --- accessors ---

    /// Chat transcript.
    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Every change in the transcript, newest first.
    #[must_use]
    pub fn changes(&self) -> Vec<CodeChange> {
        self.transcript.changes_newest_first()
    }

    /// Last fetched file tree.
    #[must_use]
    pub fn file_tree(&self) -> &[FileNode] {
        &self.tree
    }

    /// The open file, if any.
    #[must_use]
    pub fn editor(&self) -> Option<&EditorState> {
        self.editor.as_ref()
    }

    /// Preview panel state.
    #[must_use]
    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    /// Whether previews render as diffs.
    #[must_use]
    pub fn diff_mode(&self) -> bool {
        self.diff_mode
    }

    /// Last fetched model list.
    #[must_use]
    pub fn models(&self) -> &[ModelInfo] {
        &self.models
    }

    /// Model used for the next generation.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Language sent with the next generation.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Notifications not yet dismissed, oldest first.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    // --- local transitions ---

    /// Selects the model for subsequent generations.
    pub fn select_model(&mut self, model_id: impl Into<String>) {
        self.model_id = model_id.into();
    }

    /// Sets the language sent with subsequent generations.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Removes the notification at `index`; out-of-range indices are ignored.
    pub fn dismiss_notification(&mut self, index: usize) {
        if index < self.notifications.len() {
            self.notifications.remove(index);
        }
    }

    /// Drains all pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    // --- backend actions ---

    /// Fetches the available models.
    ///
    /// # Errors
    ///
    /// Returns the backend error after queuing an error notification; the
    /// previous model list is kept.
    pub async fn load_models(&mut self) -> Result<(), BackendError> {
        match self.ctx.codegen.list_models().await {
            Ok(models) => {
                info!(count = models.len(), "loaded models");
                self.models = models;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch models");
                self.notify(Notification::error("Error", "Failed to fetch available models"));
                Err(e)
            }
        }
    }

    /// Re-reads the file tree.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the previous tree is kept.
    pub async fn refresh_file_tree(&mut self) -> Result<(), BackendError> {
        match self.ctx.files.list_tree().await {
            Ok(tree) => {
                self.tree = tree;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch file tree");
                Err(e)
            }
        }
    }

    /// Opens `path` in the editor and makes its language the active one.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the editor keeps its previous file.
    pub async fn open_file(&mut self, path: &str) -> Result<(), BackendError> {
        let content = self.ctx.files.read(path).await.inspect_err(|e| {
            warn!(path, error = %e, "failed to fetch file content");
        })?;
        let editor = EditorState::new(path, content);
        self.language = editor.language;
        self.editor = Some(editor);
        Ok(())
    }

    /// Creates an empty file and refreshes the tree. An empty path is ignored.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the file could not be created.
    pub async fn create_file(&mut self, path: &str) -> Result<(), BackendError> {
        if path.is_empty() {
            return Ok(());
        }
        self.ctx.files.create(path, "").await.inspect_err(|e| {
            warn!(path, error = %e, "failed to create file");
        })?;
        info!(path, "created file");
        let _ = self.refresh_file_tree().await;
        Ok(())
    }

    /// Deletes a file, refreshes the tree and closes it if it was open.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the file could not be deleted.
    pub async fn delete_file(&mut self, path: &str) -> Result<(), BackendError> {
        self.ctx.files.delete(path).await.inspect_err(|e| {
            warn!(path, error = %e, "failed to delete file");
        })?;
        info!(path, "deleted file");
        let _ = self.refresh_file_tree().await;
        if self.editor.as_ref().is_some_and(|editor| editor.path == path) {
            self.editor = None;
        }
        Ok(())
    }

    /// Replaces the editor content and writes it through to the store.
    ///
    /// Does nothing when no file is open. A failed write is only logged; the
    /// editor keeps the new content.
    pub async fn edit_open_file(&mut self, content: impl Into<String>) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        editor.content = content.into();
        if let Err(e) = self.ctx.files.update(&editor.path, &editor.content).await {
            warn!(path = %editor.path, error = %e, "failed to update file");
        }
    }

    /// Sends a prompt to the code generator and records the exchange.
    ///
    /// The user message is appended first. On success the first fenced code
    /// block of the response (or the whole response) becomes the new content
    /// of the open file, if there is one, and an `update` change is recorded
    /// on the assistant message. With auto-apply on, the content is written
    /// to the store first and the change is only recorded if that write
    /// succeeds. An empty prompt does nothing.
    ///
    /// Returns the recorded change, if any.
    ///
    /// # Errors
    ///
    /// Returns the generation error after queuing an error notification; no
    /// assistant message is appended.
    pub async fn submit_prompt(&mut self, prompt: &str) -> Result<Option<CodeChange>, BackendError> {
        if prompt.is_empty() {
            return Ok(None);
        }

        let id = self.ctx.id_gen.generate_id();
        let now = self.ctx.clock.now();
        self.transcript.push_user(id, prompt, now);

        let request = GenerateRequest {
            prompt: prompt.to_string(),
            model_id: self.model_id.clone(),
            language: self.language.as_str().to_string(),
            file_path: self.editor.as_ref().map(|editor| editor.path.clone()),
        };
        info!(model = %request.model_id, file = ?request.file_path, "generating code");

        let response = match self.ctx.codegen.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "code generation failed");
                self.notify(Notification::error(
                    "Error",
                    "Failed to generate code. Please try again.",
                ));
                return Err(e);
            }
        };

        let code = extract_code(&response.code).to_string();
        let change = match self.editor.as_ref().map(|editor| editor.path.clone()) {
            Some(path) => self.record_generated(&path, code).await,
            None => None,
        };

        let id = self.ctx.id_gen.generate_id();
        let now = self.ctx.clock.now();
        let changes = change.iter().cloned().collect();
        self.transcript.push_assistant(id, response.code, now, changes);
        Ok(change)
    }

    async fn record_generated(&mut self, path: &str, code: String) -> Option<CodeChange> {
        if self.auto_apply {
            if let Err(e) = self.ctx.files.update(path, &code).await {
                warn!(path, error = %e, "failed to write generated code");
                self.notify(Notification::error("Error", "Failed to update file"));
                self.set_editor_content(path, code);
                return None;
            }
            self.notify(Notification::success("Success", "File updated successfully"));
            self.set_editor_content(path, code.clone());
        }
        Some(CodeChange::new(path, code, ChangeKind::Update, self.ctx.clock.now()))
    }

    fn set_editor_content(&mut self, path: &str, content: String) {
        if let Some(editor) = self.editor.as_mut().filter(|editor| editor.path == path) {
            editor.content = content;
            editor.language = Language::from_file_name(path);
        }
    }
}
