//! Named hierarchies loaded from TOML files.
//!
//! A hierarchy file lists entries that optionally name their parent:
//!
//! ```toml
//! [[node]]
//! name = "Object"
//!
//! [[node]]
//! name = "Throwable"
//! parent = "Object"
//! ```
//!
//! Entries carry their parent's name, so the predicates are simple field comparisons
//! and the whole file becomes a [`Tree`] without any explicit links.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::errors::TreeError;
use crate::tree::{Tree, TreeOptions};

/// One named entry of a hierarchy; the root has no parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Entry {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    pub fn child(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.into()),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub fn is_root_entry(entry: &Entry) -> bool {
    entry.parent.is_none()
}

pub fn is_parent_entry(parent: &Entry, child: &Entry) -> bool {
    child.parent.as_deref() == Some(parent.name.as_str())
}

pub type RootFn = fn(&Entry) -> bool;
pub type RelationFn = fn(&Entry, &Entry) -> bool;

/// A tree of hierarchy entries.
pub type EntryTree = Tree<Entry, RootFn, RelationFn>;

#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error("cannot read hierarchy file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid hierarchy file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("duplicate entry name: {0}")]
    DuplicateName(String),

    #[error("unknown entry: {0}")]
    UnknownEntry(String),

    #[error("invalid hierarchy: {0}")]
    Tree(#[from] TreeError<String>),
}

pub type HierarchyResult<T> = Result<T, HierarchyError>;

#[derive(Debug, Default, Deserialize, Serialize)]
struct HierarchyFile {
    #[serde(default, rename = "node")]
    nodes: Vec<Entry>,
}

/// Parse hierarchy entries from TOML text, in file order.
pub fn parse_entries(content: &str, path: &Path) -> HierarchyResult<Vec<Entry>> {
    let file: HierarchyFile = toml::from_str(content).map_err(|e| HierarchyError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut names = HashSet::new();
    for entry in &file.nodes {
        if !names.insert(entry.name.as_str()) {
            return Err(HierarchyError::DuplicateName(entry.name.clone()));
        }
    }
    Ok(file.nodes)
}

/// Build a validated tree from entries.
pub fn build_tree(entries: Vec<Entry>, options: TreeOptions) -> HierarchyResult<EntryTree> {
    Tree::from_nodes_with_options(is_root_entry as RootFn, is_parent_entry as RelationFn, entries, options)
        .map_err(|e| HierarchyError::Tree(e.map(|entry| entry.name)))
}

/// Read, parse and validate a hierarchy file.
#[instrument(level = "debug", skip(options))]
pub fn load(path: &Path, options: TreeOptions) -> HierarchyResult<EntryTree> {
    let content = std::fs::read_to_string(path).map_err(|source| HierarchyError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_entries(&content, path)?;
    debug!("loaded {} entries from {}", entries.len(), path.display());
    build_tree(entries, options)
}

/// Look up a member by name.
pub fn find<'t>(tree: &'t EntryTree, name: &str) -> HierarchyResult<&'t Entry> {
    tree.nodes()
        .iter()
        .find(|e| e.name == name)
        .ok_or_else(|| HierarchyError::UnknownEntry(name.to_string()))
}

/// Look up several members by name, preserving argument order.
pub fn find_all<'t>(tree: &'t EntryTree, names: &[String]) -> HierarchyResult<Vec<&'t Entry>> {
    names.iter().map(|name| find(tree, name)).collect()
}
