//! File store port: CRUD over the backend's virtual file tree.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::BackendFuture;

/// Whether a tree node is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Regular file with content.
    File,
    /// Directory with children.
    Directory,
}

/// One entry of the file tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// Base name.
    pub name: String,
    /// File or directory.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Path relative to the store root.
    pub path: String,
    /// Children of a directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
}

impl FileNode {
    /// Creates a file node.
    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self { name: name.into(), kind: NodeKind::File, path: path.into(), children: None }
    }

    /// Creates a directory node.
    #[must_use]
    pub fn directory(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<FileNode>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            path: path.into(),
            children: Some(children),
        }
    }

    /// Children of this node; empty for files.
    #[must_use]
    pub fn children(&self) -> &[FileNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Paths of every file at or below this node, depth-first.
    #[must_use]
    pub fn file_paths(&self) -> Vec<&str> {
        match self.kind {
            NodeKind::File => vec![self.path.as_str()],
            NodeKind::Directory => self.children().iter().flat_map(FileNode::file_paths).collect(),
        }
    }
}

/// Filters a tree down to nodes whose name contains `query` (case-insensitive).
///
/// A directory that does not match itself is kept when any descendant
/// matches, with only the matching descendants.
#[must_use]
pub fn filter_tree(nodes: &[FileNode], query: &str) -> Vec<FileNode> {
    let query = query.to_lowercase();
    filter_lowercased(nodes, &query)
}

fn filter_lowercased(nodes: &[FileNode], query: &str) -> Vec<FileNode> {
    let mut filtered = Vec::new();
    for node in nodes {
        if node.name.to_lowercase().contains(query) {
            filtered.push(node.clone());
        } else if node.kind == NodeKind::Directory {
            let children = filter_lowercased(node.children(), query);
            if !children.is_empty() {
                filtered.push(FileNode { children: Some(children), ..node.clone() });
            }
        }
    }
    filtered
}

/// Provides access to the backend file store.
///
/// Paths are store-relative strings such as `src/app.py`.
pub trait FileStore: Send + Sync {
    /// Lists the whole file tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or rejects the request.
    fn list_tree(&self) -> BackendFuture<'_, Vec<FileNode>>;

    /// Reads the current content of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or the request fails.
    fn read(&self, path: &str) -> BackendFuture<'_, String>;

    /// Creates a file with the given content.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn create(&self, path: &str, content: &str) -> BackendFuture<'_, ()>;

    /// Replaces the content of an existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or the request fails.
    fn update(&self, path: &str, content: &str) -> BackendFuture<'_, ()>;

    /// Deletes a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or the request fails.
    fn delete(&self, path: &str) -> BackendFuture<'_, ()>;
}

impl<T: FileStore + ?Sized> FileStore for Arc<T> {
    fn list_tree(&self) -> BackendFuture<'_, Vec<FileNode>> {
        (**self).list_tree()
    }

    fn read(&self, path: &str) -> BackendFuture<'_, String> {
        (**self).read(path)
    }

    fn create(&self, path: &str, content: &str) -> BackendFuture<'_, ()> {
        (**self).create(path, content)
    }

    fn update(&self, path: &str, content: &str) -> BackendFuture<'_, ()> {
        (**self).update(path, content)
    }

    fn delete(&self, path: &str) -> BackendFuture<'_, ()> {
        (**self).delete(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Vec<FileNode> {
        vec![
            FileNode::directory(
                "src",
                "src",
                vec![FileNode::file("App.tsx", "src/App.tsx"), FileNode::file("theme.ts", "src/theme.ts")],
            ),
            FileNode::file("README.md", "README.md"),
        ]
    }

    #[test]
    fn deserializes_backend_shape() {
        let json = r#"[{"name":"src","type":"directory","path":"src","children":[
            {"name":"a.py","type":"file","path":"src/a.py","children":null}]},
            {"name":"b.md","type":"file","path":"b.md"}]"#;
        let nodes: Vec<FileNode> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes[0].kind, NodeKind::Directory);
        assert_eq!(nodes[0].children()[0].path, "src/a.py");
        assert_eq!(nodes[1].children, None);
    }

    #[test]
    fn file_paths_walks_depth_first() {
        let tree = FileNode::directory("root", "", sample_tree());
        assert_eq!(tree.file_paths(), vec!["src/App.tsx", "src/theme.ts", "README.md"]);
    }

    #[test]
    fn filter_keeps_matching_descendants_only() {
        let filtered = filter_tree(&sample_tree(), "THEME");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "src");
        assert_eq!(filtered[0].children().len(), 1);
        assert_eq!(filtered[0].children()[0].name, "theme.ts");
    }

    #[test]
    fn filter_with_no_match_is_empty() {
        assert!(filter_tree(&sample_tree(), "nothing").is_empty());
    }
}
