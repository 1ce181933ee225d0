//! File location rules.
//!
//! Catalogs:
//! - The root is `catalog.json` with an id of `GEE_catalog`.
//! - An organization catalog lives at `ORG/catalog.json` and its id is `ORG`.
//! - Two-level organizations may also have `ORG/sub/catalog.json` with an id
//!   of `ORG/sub`. Nothing deeper is allowed.
//!
//! Collections:
//! - `ORG/b` lives at `ORG/ORG_b.json`; deeper ids clamp at one directory, so
//!   `ORG/b/c/d` lives at `ORG/ORG_b_c_d.json`.
//! - ids under `projects/` drop that segment from the directory only:
//!   `projects/x/y` lives at `x/projects_x_y.json`.
//! - Two-level organizations nest ids of three or more segments one level
//!   deeper: `NASA/b/c` lives at `NASA/b/NASA_b_c.json`.
//! - Versioned collections such as `USGS/GFSAD1000_V1` live at
//!   `USGS/GFSAD1000/USGS_GFSAD1000_V1.json`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::checker::core::{Check, Issue, Node, NodeKind};
use crate::checker::exceptions::{PathExceptions, VersionedCollection};
use crate::checker::utils::id_segments;

pub const ROOT_ID: &str = "GEE_catalog";
pub const CATALOG_FILE: &str = "catalog.json";
pub const PROJECTS: &str = "projects";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Root,
    Catalog,
    TwoLevelCatalog,
    Collection,
    TwoLevelCollection,
    Versioned(VersionedCollection),
}

impl Layout {
    /// Issue text for a node of this layout found at `found` instead of `expected`.
    fn mismatch(&self, expected: &Path, found: &Path) -> String {
        let label = match self {
            Self::Root => return format!("\"{ROOT_ID}\" in the wrong place"),
            Self::Catalog => "expected path".to_string(),
            Self::TwoLevelCatalog => "2-level expected path".to_string(),
            Self::Collection => "Col: expected one level path".to_string(),
            Self::TwoLevelCollection => "Col 2-level: expected path".to_string(),
            Self::Versioned(exception) => format!(
                "Col {}/{}: expected path",
                exception.organization, exception.dataset
            ),
        };
        format!("{label}: {} found: {}", expected.display(), found.display())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedPath {
    pub layout: Layout,
    pub path: PathBuf,
}

/// Ids for which no location can be derived.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathRejection {
    #[error("Empty id field")]
    EmptyId,
    #[error("Catalog too deep")]
    CatalogTooDeep,
    #[error("expected length 1 path: {0:?}")]
    NotSingleLevel(Vec<String>),
}

/// Maps an id and node kind to the one location the node may live at.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathDeriver {
    exceptions: PathExceptions,
}

impl PathDeriver {
    pub fn new(exceptions: PathExceptions) -> Self {
        Self { exceptions }
    }

    pub fn is_two_level_organization(&self, organization: &str) -> bool {
        self.exceptions
            .two_level_organizations
            .iter()
            .any(|known| *known == organization)
    }

    pub fn is_two_level(&self, segments: &[&str], kind: NodeKind) -> bool {
        let Some(organization) = segments.first() else {
            return false;
        };
        if !self.is_two_level_organization(organization) {
            return false;
        }
        match kind {
            NodeKind::Catalog => segments.len() == 2,
            NodeKind::Collection => segments.len() > 2,
        }
    }

    pub fn expected_path(&self, id: &str, kind: NodeKind) -> Result<ExpectedPath, PathRejection> {
        let segments = id_segments(id);
        if segments.is_empty() {
            return Err(PathRejection::EmptyId);
        }

        match kind {
            NodeKind::Catalog => self.catalog_path(id, &segments),
            NodeKind::Collection => Ok(self.collection_path(id, &segments)),
        }
    }

    fn catalog_path(&self, id: &str, segments: &[&str]) -> Result<ExpectedPath, PathRejection> {
        if id == ROOT_ID {
            return Ok(ExpectedPath {
                layout: Layout::Root,
                path: PathBuf::from(CATALOG_FILE),
            });
        }
        if segments.len() > 2 {
            return Err(PathRejection::CatalogTooDeep);
        }
        if self.is_two_level(segments, NodeKind::Catalog) {
            return Ok(ExpectedPath {
                layout: Layout::TwoLevelCatalog,
                path: [segments[0], segments[1], CATALOG_FILE].iter().collect(),
            });
        }
        if segments.len() != 1 {
            return Err(PathRejection::NotSingleLevel(
                segments.iter().map(|s| s.to_string()).collect(),
            ));
        }
        Ok(ExpectedPath {
            layout: Layout::Catalog,
            path: [segments[0], CATALOG_FILE].iter().collect(),
        })
    }

    fn collection_path(&self, id: &str, segments: &[&str]) -> ExpectedPath {
        if let Some((exception, version)) = self.versioned(id) {
            let filename = format!(
                "{}_{}_{version}.json",
                exception.organization, exception.dataset
            );
            return ExpectedPath {
                layout: Layout::Versioned(exception),
                path: [exception.organization, exception.dataset, filename.as_str()]
                    .iter()
                    .collect(),
            };
        }

        if self.is_two_level(segments, NodeKind::Collection) {
            return ExpectedPath {
                layout: Layout::TwoLevelCollection,
                path: two_level_collection_path(segments),
            };
        }

        let subdir = if segments[0] == PROJECTS {
            segments.get(1).copied().unwrap_or(segments[0])
        } else {
            segments[0]
        };
        let filename = format!("{}.json", id.replace('/', "_"));
        ExpectedPath {
            layout: Layout::Collection,
            path: Path::new(subdir).join(filename),
        }
    }

    /// Versioned exceptions only apply under a two-level organization.
    fn versioned<'i>(&self, id: &'i str) -> Option<(VersionedCollection, &'i str)> {
        self.exceptions
            .versioned_collections
            .iter()
            .filter(|exception| self.is_two_level_organization(exception.organization))
            .find_map(|exception| {
                let rest = id
                    .strip_prefix(exception.organization)?
                    .strip_prefix('/')?
                    .strip_prefix(exception.dataset)?;
                let version = rest.strip_prefix('_')?;
                if version.is_empty() || version.contains(['/', '_']) {
                    return None;
                }
                Some((*exception, version))
            })
    }
}

fn two_level_collection_path(segments: &[&str]) -> PathBuf {
    assert!(
        segments.len() > 2,
        "internal error: two-level collection id needs at least three segments: {}",
        segments.join("/")
    );
    let filename = format!("{}.json", segments.join("_"));
    [segments[0], segments[1], filename.as_str()]
        .iter()
        .collect()
}

/// Compares each node's location with the one derived from its id.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilePathCheck {
    deriver: PathDeriver,
}

impl FilePathCheck {
    pub fn new(deriver: PathDeriver) -> Self {
        Self { deriver }
    }
}

impl Check for FilePathCheck {
    fn name(&self) -> &'static str {
        "file_path"
    }

    fn run<'a>(&self, node: &'a Node) -> Vec<Issue<'a>> {
        if node.segments().is_empty() {
            return vec![self.new_issue(node, PathRejection::EmptyId.to_string())];
        }

        if node.is_catalog() && node.id != ROOT_ID {
            if node.path == Path::new(CATALOG_FILE) {
                return vec![self.new_issue(node, format!("Root must have an id of {ROOT_ID}"))];
            }
            if node.path.file_name() != Some(OsStr::new(CATALOG_FILE)) {
                return vec![self.new_issue(node, format!("Catalog file must be {CATALOG_FILE}"))];
            }
        }

        match self.deriver.expected_path(&node.id, node.kind) {
            Err(rejection) => vec![self.new_issue(node, rejection.to_string())],
            Ok(expected) if expected.path != node.path => vec![self.new_issue(
                node,
                expected.layout.mismatch(&expected.path, &node.path),
            )],
            Ok(_) => Vec::new(),
        }
    }
}
