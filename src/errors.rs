use std::fmt::Debug;
use thiserror::Error;

/// Structural failures raised by [`Tree`](crate::Tree) operations.
///
/// Each variant carries the offending node(s) so callers can react without parsing
/// messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError<T: Debug> {
    #[error("node not in tree: {0:?}")]
    NodeAbsent(T),

    #[error("node already in tree: {0:?}")]
    NodeExists(T),

    #[error("parent of node not in tree: {0:?}")]
    ParentAbsent(T),

    #[error("not a root node: {0:?}")]
    InvalidRoot(T),

    #[error("no root node in collection")]
    RootAbsent,

    #[error("multiple root nodes in collection: {0:?}")]
    MultiRoot(Vec<T>),

    #[error("ancestor chain does not reach the root: {0:?}")]
    Detached(T),
}

impl<T: Debug> TreeError<T> {
    /// The single node this error is about, if any.
    pub fn node(&self) -> Option<&T> {
        match self {
            TreeError::NodeAbsent(n)
            | TreeError::NodeExists(n)
            | TreeError::ParentAbsent(n)
            | TreeError::InvalidRoot(n)
            | TreeError::Detached(n) => Some(n),
            TreeError::RootAbsent | TreeError::MultiRoot(_) => None,
        }
    }

    /// The competing roots of a `MultiRoot` error.
    pub fn roots(&self) -> Option<&[T]> {
        match self {
            TreeError::MultiRoot(roots) => Some(roots),
            _ => None,
        }
    }

    /// Convert the carried node(s), e.g. to their display names.
    pub fn map<U: Debug>(self, mut f: impl FnMut(T) -> U) -> TreeError<U> {
        match self {
            TreeError::NodeAbsent(n) => TreeError::NodeAbsent(f(n)),
            TreeError::NodeExists(n) => TreeError::NodeExists(f(n)),
            TreeError::ParentAbsent(n) => TreeError::ParentAbsent(f(n)),
            TreeError::InvalidRoot(n) => TreeError::InvalidRoot(f(n)),
            TreeError::RootAbsent => TreeError::RootAbsent,
            TreeError::MultiRoot(roots) => TreeError::MultiRoot(roots.into_iter().map(f).collect()),
            TreeError::Detached(n) => TreeError::Detached(f(n)),
        }
    }
}

pub type TreeResult<R, T> = Result<R, TreeError<T>>;
