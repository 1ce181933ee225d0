//! Loading catalog files into nodes and validating them
use path_clean::PathClean;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::checker::core::{IssueRecord, Node, NodeKind};
use crate::checker::errors::{Error, Result};
use crate::checker::runner::CheckRunner;

/// List every `.json` file under `root`, sorted. Symlinks are not followed
pub fn discover(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::file_not_found(root));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "json")
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Parse one STAC file into a node whose path is relative to `root`
pub fn load_node(root: &Path, file_path: &Path) -> Result<Node> {
    let content =
        std::fs::read_to_string(file_path).map_err(|_| Error::file_not_found(file_path))?;

    let document: Value = serde_json::from_str(&content)?;
    let Value::Object(payload) = document else {
        return Err(Error::invalid_format(format!(
            "{}: expected a JSON object",
            file_path.display()
        )));
    };

    let kind = node_kind(&payload)
        .ok_or_else(|| Error::invalid_format(format!("{}: unknown type", file_path.display())))?;
    let id = payload
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::invalid_format(format!("{}: missing id", file_path.display())))?
        .to_string();
    let relative = file_path
        .strip_prefix(root)
        .map_err(|_| {
            Error::invalid_format(format!(
                "{} is not under {}",
                file_path.display(),
                root.display()
            ))
        })?
        .clean();

    tracing::debug!(path = %relative.display(), %id, %kind, "loaded node");

    Node::builder()
        .id(id)
        .path(relative)
        .kind(kind)
        .payload(payload)
        .build()
        .map_err(|e| Error::Builder(e.to_string()))
}

fn node_kind(payload: &Map<String, Value>) -> Option<NodeKind> {
    match payload.get("type").and_then(Value::as_str)? {
        "Catalog" => Some(NodeKind::Catalog),
        "Collection" => Some(NodeKind::Collection),
        _ => None,
    }
}

/// Load every node of the catalog rooted at `root`
pub fn load_catalog(root: &Path) -> Result<Vec<Node>> {
    let files = discover(root)?;
    let mut nodes = Vec::with_capacity(files.len());
    for file in &files {
        nodes.push(load_node(root, file)?);
    }
    tracing::info!(root = %root.display(), nodes = nodes.len(), "catalog loaded");
    Ok(nodes)
}

/// Validate a single catalog file
pub fn validate_file(root: &Path, file_path: &Path, runner: &CheckRunner) -> Result<Vec<IssueRecord>> {
    let node = load_node(root, file_path)?;
    Ok(runner.run(&node).iter().map(|issue| issue.to_record()).collect())
}
