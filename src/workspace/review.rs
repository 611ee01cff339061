//! Previewing, applying and reverting recorded changes.

use tracing::{info, warn};

use super::preview::{Preview, PreviewState, PreviewView, Selection};
use super::{Notification, Workspace};
use crate::changes::{ChangeKind, CodeChange};
use crate::error::BackendError;

impl Workspace<'_> {
    /// Selects `change` for preview.
    ///
    /// Selecting the previewed path again closes the panel. Otherwise the
    /// file's current store content is fetched as the old side of the diff;
    /// a failed fetch falls back to an empty old side.
    pub async fn select_change(&mut self, change: &CodeChange) {
        match self.preview.on_select(change) {
            Selection::Close => {
                self.preview = PreviewState::Closed;
            }
            Selection::Open => {
                let current_content = match self.ctx.files.read(&change.file_path).await {
                    Ok(content) => content,
                    Err(e) => {
                        warn!(path = %change.file_path, error = %e, "failed to fetch current content");
                        String::new()
                    }
                };
                self.preview =
                    PreviewState::Previewing(Preview { change: change.clone(), current_content });
            }
        }
    }

    /// Switches the preview between diff and plain rendering.
    pub fn toggle_diff_mode(&mut self) {
        self.diff_mode = !self.diff_mode;
    }

    /// Current preview body, or `None` when the panel is closed.
    #[must_use]
    pub fn preview_view(&self) -> Option<PreviewView<'_>> {
        self.preview.view(self.diff_mode)
    }

    /// Writes `change.content` to its file.
    ///
    /// On success the tree is refreshed, an editor showing the file picks up
    /// the new content and the preview closes. On failure nothing local
    /// changes and the change can be applied again.
    ///
    /// # Errors
    ///
    /// Returns the backend error after queuing an error notification.
    pub async fn apply_change(&mut self, change: &CodeChange) -> Result<(), BackendError> {
        let path = change.file_path.as_str();
        let written = match change.kind {
            ChangeKind::Create => self.ctx.files.create(path, &change.content).await,
            ChangeKind::Update | ChangeKind::Delete => {
                self.ctx.files.update(path, &change.content).await
            }
        };
        if let Err(e) = written {
            warn!(path, error = %e, "failed to apply change");
            self.notify(Notification::error("Error", "Failed to apply changes. Please try again."));
            return Err(e);
        }

        info!(path, "applied change");
        self.finish_write(path, change.content.clone()).await;
        self.notify(Notification::success("Changes Applied", format!("Successfully updated {path}")));
        Ok(())
    }

    /// Re-reads the file's current store content and writes it back.
    ///
    /// No snapshot is kept, so the store ends up as it was before the call.
    /// Success and failure are handled like [`Workspace::apply_change`].
    ///
    /// # Errors
    ///
    /// Returns the backend error after queuing an error notification.
    pub async fn revert_change(&mut self, change: &CodeChange) -> Result<(), BackendError> {
        let path = change.file_path.as_str();
        let reverted = async {
            let current = self.ctx.files.read(path).await?;
            self.ctx.files.update(path, &current).await?;
            Ok::<_, BackendError>(current)
        }
        .await;

        match reverted {
            Ok(current) => {
                info!(path, "reverted change");
                self.finish_write(path, current).await;
                self.notify(Notification::success(
                    "Changes Reverted",
                    format!("Successfully reverted {path}"),
                ));
                Ok(())
            }
            Err(e) => {
                warn!(path, error = %e, "failed to revert change");
                self.notify(Notification::error(
                    "Error",
                    "Failed to revert changes. Please try again.",
                ));
                Err(e)
            }
        }
    }

    async fn finish_write(&mut self, path: &str, content: String) {
        // Tree failures are already logged by refresh_file_tree.
        let _ = self.refresh_file_tree().await;
        self.set_editor_content(path, content);
        self.preview = PreviewState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use crate::adapters::memory::{MemoryFileStore, ScriptedCodeGen, SequentialIds, SteppingClock};
    use crate::changes::{ChangeKind, CodeChange};
    use crate::config::Config;
    use crate::context::ServiceContext;
    use crate::diff::DiffLine;
    use crate::ports::FileStore;
    use crate::workspace::{PreviewView, Workspace};

    fn context(store: &Arc<MemoryFileStore>) -> ServiceContext {
        ServiceContext::from_parts(
            Box::new(Arc::clone(store)),
            Box::new(ScriptedCodeGen::default()),
            Box::new(SteppingClock::starting_at(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())),
            Box::new(SequentialIds::new("msg")),
        )
    }

    fn update(path: &str, content: &str, secs: i64) -> CodeChange {
        CodeChange::new(path, content, ChangeKind::Update, Utc.timestamp_opt(secs, 0).unwrap())
    }

    #[tokio::test]
    async fn selecting_same_path_toggles_preview() {
        let store = Arc::new(MemoryFileStore::with_files([("a.py", "x")]));
        let ctx = context(&store);
        let mut ws = Workspace::new(&ctx, &Config::default());
        let change = update("a.py", "y", 1);

        ws.select_change(&change).await;
        assert!(ws.preview().is_open());
        ws.select_change(&change).await;
        assert!(!ws.preview().is_open());
        ws.select_change(&change).await;
        assert!(ws.preview().is_open());
    }

    #[tokio::test]
    async fn selecting_other_path_switches_preview() {
        let store = Arc::new(MemoryFileStore::with_files([("a.py", "x"), ("b.py", "z")]));
        let ctx = context(&store);
        let mut ws = Workspace::new(&ctx, &Config::default());

        ws.select_change(&update("a.py", "y", 1)).await;
        ws.select_change(&update("b.py", "w", 2)).await;
        assert_eq!(ws.preview().change().unwrap().file_path, "b.py");
    }

    #[tokio::test]
    async fn preview_diffs_against_store_content() {
        let store = Arc::new(MemoryFileStore::with_files([("a.py", "a\nb")]));
        let ctx = context(&store);
        let mut ws = Workspace::new(&ctx, &Config::default());

        ws.select_change(&update("a.py", "a\nc", 1)).await;
        assert_eq!(ws.preview_view(), Some(PreviewView::Plain("a\nc")));

        ws.toggle_diff_mode();
        assert_eq!(
            ws.preview_view(),
            Some(PreviewView::Diff(vec![
                DiffLine::Unchanged("a"),
                DiffLine::Removed("b"),
                DiffLine::Added("c"),
            ]))
        );
    }

    #[tokio::test]
    async fn preview_of_unreadable_file_diffs_against_empty() {
        let store = Arc::new(MemoryFileStore::new());
        let ctx = context(&store);
        let mut ws = Workspace::new(&ctx, &Config::default());

        ws.toggle_diff_mode();
        ws.select_change(&update("new.py", "one\ntwo", 1)).await;
        assert_eq!(
            ws.preview_view(),
            Some(PreviewView::Diff(vec![DiffLine::Added("one"), DiffLine::Added("two")]))
        );
    }

    #[tokio::test]
    async fn apply_writes_content_and_closes_preview() {
        let store = Arc::new(MemoryFileStore::with_files([("a.py", "old")]));
        let ctx = context(&store);
        let mut ws = Workspace::new(&ctx, &Config::default());
        let change = update("a.py", "new", 1);

        ws.open_file("a.py").await.unwrap();
        ws.select_change(&change).await;
        ws.apply_change(&change).await.unwrap();

        assert_eq!(store.content("a.py").as_deref(), Some("new"));
        assert_eq!(ws.editor().unwrap().content, "new");
        assert!(!ws.preview().is_open());
        assert_eq!(ws.file_tree().len(), 1);
        let notes = ws.take_notifications();
        assert_eq!(notes[0].title, "Changes Applied");
        assert_eq!(notes[0].description, "Successfully updated a.py");
    }

    #[tokio::test]
    async fn apply_create_change_creates_missing_file() {
        let store = Arc::new(MemoryFileStore::new());
        let ctx = context(&store);
        let mut ws = Workspace::new(&ctx, &Config::default());
        let change =
            CodeChange::new("new.ts", "export {}", ChangeKind::Create, Utc.timestamp_opt(1, 0).unwrap());

        ws.apply_change(&change).await.unwrap();
        assert_eq!(store.content("new.ts").as_deref(), Some("export {}"));
    }

    #[tokio::test]
    async fn failed_apply_leaves_everything_untouched() {
        let store = Arc::new(MemoryFileStore::with_files([("a.py", "old")]));
        let ctx = context(&store);
        let mut ws = Workspace::new(&ctx, &Config::default());
        let change = update("a.py", "new", 1);

        ws.open_file("a.py").await.unwrap();
        ws.select_change(&change).await;
        store.set_reject_writes(true);

        assert!(ws.apply_change(&change).await.is_err());
        assert_eq!(store.content("a.py").as_deref(), Some("old"));
        assert_eq!(ws.editor().unwrap().content, "old");
        assert_eq!(ws.preview().change(), Some(&change));
        let notes = ws.take_notifications();
        assert!(notes[0].is_error());
        assert_eq!(notes[0].description, "Failed to apply changes. Please try again.");

        store.set_reject_writes(false);
        ws.apply_change(&change).await.unwrap();
        assert_eq!(store.content("a.py").as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn revert_keeps_latest_store_content() {
        let store = Arc::new(MemoryFileStore::new());
        let ctx = context(&store);
        let mut ws = Workspace::new(&ctx, &Config::default());
        let first = update("a.py", "A", 1);
        let second = update("a.py", "B", 2);

        ws.create_file("a.py").await.unwrap();
        ws.apply_change(&first).await.unwrap();
        ws.apply_change(&second).await.unwrap();
        ws.revert_change(&first).await.unwrap();

        assert_eq!(store.content("a.py").as_deref(), Some("B"));
        let last = ws.take_notifications().pop().unwrap();
        assert_eq!(last.title, "Changes Reverted");
        assert_eq!(last.description, "Successfully reverted a.py");
    }

    #[tokio::test]
    async fn revert_closes_open_preview() {
        let store = Arc::new(MemoryFileStore::with_files([("a.py", "old")]));
        let ctx = context(&store);
        let mut ws = Workspace::new(&ctx, &Config::default());
        let change = update("a.py", "new", 1);

        ws.select_change(&change).await;
        assert!(ws.preview().is_open());
        ws.revert_change(&change).await.unwrap();

        assert!(!ws.preview().is_open());
        assert_eq!(ws.preview_view(), None);
        assert_eq!(store.content("a.py").as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn revert_syncs_stale_editor_with_store() {
        let store = Arc::new(MemoryFileStore::with_files([("a.py", "first")]));
        let ctx = context(&store);
        let mut ws = Workspace::new(&ctx, &Config::default());

        ws.open_file("a.py").await.unwrap();
        store.update("a.py", "written elsewhere").await.unwrap();
        assert_eq!(ws.editor().unwrap().content, "first");

        ws.revert_change(&update("a.py", "ignored", 1)).await.unwrap();

        assert_eq!(ws.editor().unwrap().content, "written elsewhere");
        assert_eq!(store.content("a.py").as_deref(), Some("written elsewhere"));
    }

    #[tokio::test]
    async fn failed_revert_notifies_and_keeps_preview() {
        let store = Arc::new(MemoryFileStore::with_files([("a.py", "old")]));
        let ctx = context(&store);
        let mut ws = Workspace::new(&ctx, &Config::default());
        let change = update("a.py", "new", 1);

        ws.select_change(&change).await;
        store.set_offline(true);

        assert!(ws.revert_change(&change).await.is_err());
        assert!(ws.preview().is_open());
        assert_eq!(
            ws.take_notifications()[0].description,
            "Failed to revert changes. Please try again."
        );
    }
}
