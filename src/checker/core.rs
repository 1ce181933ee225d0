use derive_builder::Builder;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::checker::utils::id_segments;

/// STAC node type, as found in the `type` field of the metadata document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Catalog,
    Collection,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            NodeKind::Catalog => "Catalog",
            NodeKind::Collection => "Collection",
        };
        write!(f, "{}", key)
    }
}

/// One metadata file of the catalog tree.
#[derive(Debug, Clone, PartialEq, Serialize, Builder)]
#[builder(setter(into))]
pub struct Node {
    pub id: String,
    /// Location of the file relative to the catalog root.
    pub path: PathBuf,
    pub kind: NodeKind,
    #[builder(default)]
    pub payload: Map<String, Value>,
}

impl Node {
    pub fn builder() -> NodeBuilder {
        NodeBuilder::default()
    }

    pub fn new(
        id: impl Into<String>,
        path: impl Into<PathBuf>,
        kind: NodeKind,
        payload: Map<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            kind,
            payload,
        }
    }

    pub fn segments(&self) -> Vec<&str> {
        id_segments(&self.id)
    }

    pub fn is_catalog(&self) -> bool {
        self.kind == NodeKind::Catalog
    }
}

/// A single rule violation found on a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue<'a> {
    #[serde(rename = "check")]
    pub check_name: &'static str,
    #[serde(rename = "node", serialize_with = "serialize_node_ref")]
    pub node: &'a Node,
    pub message: String,
}

fn serialize_node_ref<S: Serializer>(node: &&Node, serializer: S) -> Result<S::Ok, S::Error> {
    NodeRef::from(*node).serialize(serializer)
}

#[derive(Serialize)]
struct NodeRef<'a> {
    id: &'a str,
    path: &'a Path,
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    fn from(node: &'a Node) -> Self {
        Self {
            id: &node.id,
            path: &node.path,
        }
    }
}

impl<'a> Issue<'a> {
    pub fn new(check_name: &'static str, node: &'a Node, message: impl Into<String>) -> Self {
        Self {
            check_name,
            node,
            message: message.into(),
        }
    }

    pub fn to_record(&self) -> IssueRecord {
        IssueRecord {
            check: self.check_name.to_string(),
            id: self.node.id.clone(),
            path: self.node.path.clone(),
            message: self.message.clone(),
        }
    }
}

impl fmt::Display for Issue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {}",
            self.node.path.display(),
            self.check_name,
            self.message
        )
    }
}

/// Owned form of an [`Issue`] that no longer borrows its node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueRecord {
    pub check: String,
    pub id: String,
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for IssueRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.path.display(), self.check, self.message)
    }
}

/// A validation rule applied to every node.
///
/// Implementations must be pure: the same node always yields the same issues
/// and no check depends on the output of another.
pub trait Check: Send + Sync {
    fn name(&self) -> &'static str;

    fn run<'a>(&self, node: &'a Node) -> Vec<Issue<'a>>;

    fn new_issue<'a>(&self, node: &'a Node, message: String) -> Issue<'a> {
        Issue::new(self.name(), node, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_defaults_payload() {
        let node = Node::builder()
            .id("NASA/catalog")
            .path("NASA/catalog.json")
            .kind(NodeKind::Catalog)
            .build()
            .unwrap();
        assert!(node.payload.is_empty());
        assert!(node.is_catalog());
        assert_eq!(node.segments(), vec!["NASA", "catalog"]);
    }

    #[test]
    fn builder_requires_id() {
        let result = Node::builder()
            .path("a/a_b.json")
            .kind(NodeKind::Collection)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn issue_display_and_json() {
        let node = Node::new("a/b", "a/a_b.json", NodeKind::Collection, Map::new());
        let issue = Issue::new("file_path", &node, "bad");
        assert_eq!(issue.to_string(), "a/a_b.json: file_path: bad");
        assert_eq!(
            serde_json::to_value(&issue).unwrap(),
            json!({
                "check": "file_path",
                "node": {"id": "a/b", "path": "a/a_b.json"},
                "message": "bad",
            })
        );
        assert_eq!(issue.to_record().to_string(), issue.to_string());
    }

    #[test]
    fn record_serializes_flat() {
        let node = Node::new("ORG/b", "ORG/ORG_b.json", NodeKind::Collection, Map::new());
        let record = Issue::new("gee_classes", &node, "values must be sorted").to_record();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "check": "gee_classes",
                "id": "ORG/b",
                "path": "ORG/ORG_b.json",
                "message": "values must be sorted",
            })
        );
        assert_eq!(serde_json::to_value(NodeKind::Catalog).unwrap(), json!("Catalog"));
    }
}
