//! `coedit tree`, `cat`, `create` and `rm` commands.

use crate::config::Config;
use crate::context::ServiceContext;
use crate::ports::{file_store::filter_tree, FileNode, NodeKind};
use crate::workspace::Workspace;

/// Execute the `tree` command.
///
/// # Errors
///
/// Returns an error string if the tree cannot be fetched.
pub async fn tree(ctx: &ServiceContext, filter: Option<&str>, flat: bool) -> Result<(), String> {
    let nodes = ctx.files.list_tree().await.map_err(|e| format!("Failed to fetch file tree: {e}"))?;
    let nodes = match filter {
        Some(query) => filter_tree(&nodes, query),
        None => nodes,
    };
    if nodes.is_empty() {
        println!("No files.");
        return Ok(());
    }
    if flat {
        print!("{}", format_flat(&nodes));
    } else {
        print!("{}", format_tree(&nodes));
    }
    Ok(())
}

/// Execute the `cat` command.
///
/// # Errors
///
/// Returns an error string if the file cannot be read.
pub async fn cat(ctx: &ServiceContext, path: &str) -> Result<(), String> {
    let content = ctx.files.read(path).await.map_err(|e| format!("Failed to read {path}: {e}"))?;
    print!("{content}");
    if !content.is_empty() && !content.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Execute the `create` command.
///
/// # Errors
///
/// Returns an error string if the file cannot be created.
pub async fn create(ctx: &ServiceContext, config: &Config, path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("File path must not be empty".to_string());
    }
    let mut workspace = Workspace::new(ctx, config);
    workspace.create_file(path).await.map_err(|e| format!("Failed to create {path}: {e}"))?;
    println!("Created {path}");
    Ok(())
}

/// Execute the `rm` command.
///
/// # Errors
///
/// Returns an error string if the file cannot be deleted.
pub async fn remove(ctx: &ServiceContext, config: &Config, path: &str) -> Result<(), String> {
    let mut workspace = Workspace::new(ctx, config);
    workspace.delete_file(path).await.map_err(|e| format!("Failed to delete {path}: {e}"))?;
    println!("Deleted {path}");
    Ok(())
}

/// Renders a tree with two-space indentation per level; directories end in `/`.
pub(crate) fn format_tree(nodes: &[FileNode]) -> String {
    fn walk(nodes: &[FileNode], depth: usize, out: &mut String) {
        for node in nodes {
            out.push_str(&"  ".repeat(depth));
            out.push_str(&node.name);
            if node.kind == NodeKind::Directory {
                out.push('/');
            }
            out.push('\n');
            walk(node.children(), depth + 1, out);
        }
    }

    let mut out = String::new();
    walk(nodes, 0, &mut out);
    out
}

/// Lists the store path of every file, one per line, depth-first.
fn format_flat(nodes: &[FileNode]) -> String {
    nodes.iter().flat_map(FileNode::file_paths).map(|path| format!("{path}\n")).collect()
}
