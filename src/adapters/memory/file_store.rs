//! In-process file store with the backend's semantics.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::BackendError;
use crate::ports::{BackendFuture, FileNode, FileStore};

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<String, String>,
    offline: bool,
    reject_writes: bool,
    writes: usize,
}

/// File store kept in memory.
///
/// Mirrors the backend: reading, updating or deleting a missing file is
/// rejected with 404, creating overwrites. Failures can be injected to
/// exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    state: Mutex<State>,
}

impl MemoryFileStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given `(path, content)` pairs.
    #[must_use]
    pub fn with_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().expect("memory store lock poisoned");
            for (path, content) in files {
                state.files.insert(path.to_string(), content.to_string());
            }
        }
        store
    }

    /// Makes every operation fail with a transport error while `offline` is set.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Makes create, update and delete fail with a 500 rejection while set.
    pub fn set_reject_writes(&self, reject: bool) {
        self.lock().reject_writes = reject;
    }

    /// Current content of `path`, bypassing failure injection.
    #[must_use]
    pub fn content(&self, path: &str) -> Option<String> {
        self.lock().files.get(path).cloned()
    }

    /// Number of successful create/update/delete calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("memory store lock poisoned")
    }

    fn check_reachable(state: &State) -> Result<(), BackendError> {
        if state.offline {
            return Err(BackendError::Transport("memory store is offline".into()));
        }
        Ok(())
    }

    fn check_writable(state: &State) -> Result<(), BackendError> {
        Self::check_reachable(state)?;
        if state.reject_writes {
            return Err(BackendError::Rejected { status: 500, detail: "writes rejected".into() });
        }
        Ok(())
    }

    fn not_found() -> BackendError {
        BackendError::Rejected { status: 404, detail: "File not found".into() }
    }
}

/// Builds one tree level; directories first, then files, each by name.
fn build_level(prefix: &str, paths: &[&str]) -> Vec<FileNode> {
    let mut files = Vec::new();
    let mut dirs: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for path in paths {
        match path.split_once('/') {
            Some((dir, rest)) => dirs.entry(dir).or_default().push(rest),
            None => files.push(*path),
        }
    }

    let join =
        |name: &str| if prefix.is_empty() { name.to_string() } else { format!("{prefix}/{name}") };

    let mut nodes: Vec<FileNode> = dirs
        .into_iter()
        .map(|(name, rest)| {
            let path = join(name);
            let children = build_level(&path, &rest);
            FileNode::directory(name, path, children)
        })
        .collect();
    files.sort_unstable();
    nodes.extend(files.into_iter().map(|name| FileNode::file(name, join(name))));
    nodes
}

impl FileStore for MemoryFileStore {
    fn list_tree(&self) -> BackendFuture<'_, Vec<FileNode>> {
        let result = {
            let state = self.lock();
            Self::check_reachable(&state).map(|()| {
                let paths: Vec<&str> = state.files.keys().map(String::as_str).collect();
                build_level("", &paths)
            })
        };
        Box::pin(async move { result })
    }

    fn read(&self, path: &str) -> BackendFuture<'_, String> {
        let result = {
            let state = self.lock();
            Self::check_reachable(&state)
                .and_then(|()| state.files.get(path).cloned().ok_or_else(Self::not_found))
        };
        Box::pin(async move { result })
    }

    fn create(&self, path: &str, content: &str) -> BackendFuture<'_, ()> {
        let result = {
            let mut state = self.lock();
            Self::check_writable(&state).map(|()| {
                state.files.insert(path.to_string(), content.to_string());
                state.writes += 1;
            })
        };
        Box::pin(async move { result })
    }

    fn update(&self, path: &str, content: &str) -> BackendFuture<'_, ()> {
        let result = {
            let mut state = self.lock();
            Self::check_writable(&state).and_then(|()| match state.files.get_mut(path) {
                Some(existing) => {
                    *existing = content.to_string();
                    state.writes += 1;
                    Ok(())
                }
                None => Err(Self::not_found()),
            })
        };
        Box::pin(async move { result })
    }

    fn delete(&self, path: &str) -> BackendFuture<'_, ()> {
        let result = {
            let mut state = self.lock();
            Self::check_writable(&state).and_then(|()| match state.files.remove(path) {
                Some(_) => {
                    state.writes += 1;
                    Ok(())
                }
                None => Err(Self::not_found()),
            })
        };
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::NodeKind;

    #[tokio::test]
    async fn update_requires_existing_file() {
        let store = MemoryFileStore::new();
        let err = store.update("missing.py", "x").await.unwrap_err();
        assert!(err.is_not_found());

        store.create("missing.py", "").await.unwrap();
        store.update("missing.py", "x").await.unwrap();
        assert_eq!(store.read("missing.py").await.unwrap(), "x");
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn tree_lists_directories_before_files() {
        let store = MemoryFileStore::with_files([
            ("zeta.md", ""),
            ("src/b.ts", ""),
            ("src/a.ts", ""),
            ("alpha.py", ""),
        ]);
        let tree = store.list_tree().await.unwrap();
        let names: Vec<_> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["src", "alpha.py", "zeta.md"]);
        assert_eq!(tree[0].kind, NodeKind::Directory);
        assert_eq!(tree[0].children()[0].path, "src/a.ts");
    }

    #[tokio::test]
    async fn offline_store_fails_every_call() {
        let store = MemoryFileStore::with_files([("a.py", "1")]);
        store.set_offline(true);
        assert!(matches!(store.read("a.py").await, Err(BackendError::Transport(_))));
        assert!(store.list_tree().await.is_err());
        store.set_offline(false);
        assert_eq!(store.read("a.py").await.unwrap(), "1");
    }

    #[tokio::test]
    async fn rejected_writes_leave_content_alone() {
        let store = MemoryFileStore::with_files([("a.py", "1")]);
        store.set_reject_writes(true);
        assert!(store.update("a.py", "2").await.is_err());
        assert!(store.delete("a.py").await.is_err());
        assert_eq!(store.content("a.py").as_deref(), Some("1"));
        assert_eq!(store.read("a.py").await.unwrap(), "1");
    }
}
