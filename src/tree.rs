//! Predicate-driven tree engine.
//!
//! [`Tree`] stores nodes in insertion order and derives every relationship on demand from
//! its [`RootPredicate`] and [`RelationPredicate`]. There is no parent/child index: each
//! query is a scan or walk over the stored nodes.
//!
//! ```
//! use gentree::Tree;
//!
//! // A=root, B and C under A, D and E under B
//! let parent_of = |c: &char| match c {
//!     'B' | 'C' => Some('A'),
//!     'D' | 'E' => Some('B'),
//!     _ => None,
//! };
//! let mut tree = Tree::new(|n: &char| *n == 'A', move |p: &char, c: &char| parent_of(c) == Some(*p));
//! for n in ['A', 'B', 'C', 'D', 'E'] {
//!     tree.add_node(n).unwrap();
//! }
//!
//! assert_eq!(tree.find_same_parent([&'D', &'E']), Some(&'B'));
//! assert_eq!(tree.find_same_parents([&'D', &'C']), vec![&'A']);
//! assert_eq!(tree.subtree(&'B').unwrap().nodes(), &['B', 'D', 'E']);
//! assert_eq!(tree.local_tree([&'D', &'C']).unwrap().nodes(), &['A', 'B', 'D', 'C']);
//!
//! tree.remove_node(&'B').unwrap();
//! assert_eq!(tree.nodes(), &['A', 'C']);
//! ```

use std::collections::HashSet;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::iter;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::errors::{TreeError, TreeResult};
use crate::predicate::{NodeIs, RelationPredicate, RootPredicate};

/// Engine behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    /// Reject bulk-loaded collections where a node's ancestor chain does not end at the
    /// root (cycles, or islands that only parent each other).
    pub cycle_guard: bool,
}

/// Tree over arbitrary values whose structure comes from two predicates.
///
/// Invariants between operations:
/// - a non-empty tree has exactly one node satisfying the root predicate
/// - no node is stored twice
/// - every non-root node has a parent among the stored nodes
/// - nodes stay in insertion order, which is also sibling order
pub struct Tree<T, R, P> {
    nodes: Vec<T>,
    root_predicate: R,
    relation_predicate: P,
    options: TreeOptions,
}

impl<T, R, P> Tree<T, R, P>
where
    T: Clone + Eq + Hash + Debug,
    R: RootPredicate<T>,
    P: RelationPredicate<T>,
{
    /// Empty tree; the first [`add_node`](Self::add_node) supplies the root.
    pub fn new(root_predicate: R, relation_predicate: P) -> Self {
        Self::with_options(root_predicate, relation_predicate, TreeOptions::default())
    }

    pub fn with_options(root_predicate: R, relation_predicate: P, options: TreeOptions) -> Self {
        Self {
            nodes: Vec::new(),
            root_predicate,
            relation_predicate,
            options,
        }
    }

    /// Tree over a pre-built collection, validated as a whole.
    ///
    /// # Errors
    /// - `NodeExists` if the collection holds a node twice
    /// - `MultiRoot` / `RootAbsent` unless exactly one node is a root
    /// - `ParentAbsent` for a non-root node without a parent in the collection
    /// - `Detached` when [`TreeOptions::cycle_guard`] is set and a chain misses the root
    pub fn from_nodes(
        root_predicate: R,
        relation_predicate: P,
        nodes: impl IntoIterator<Item = T>,
    ) -> TreeResult<Self, T> {
        Self::from_nodes_with_options(root_predicate, relation_predicate, nodes, TreeOptions::default())
    }

    pub fn from_nodes_with_options(
        root_predicate: R,
        relation_predicate: P,
        nodes: impl IntoIterator<Item = T>,
        options: TreeOptions,
    ) -> TreeResult<Self, T> {
        let mut tree = Self::with_options(root_predicate, relation_predicate, options);
        tree.replace_nodes(nodes)?;
        Ok(tree)
    }

    /// Replace all nodes with a new collection.
    ///
    /// The collection is validated before it is installed; on error the tree keeps its
    /// previous nodes.
    pub fn replace_nodes(&mut self, nodes: impl IntoIterator<Item = T>) -> TreeResult<(), T> {
        let staged: Vec<T> = nodes.into_iter().collect();
        self.validate(&staged)?;
        debug!("installing {} validated nodes", staged.len());
        self.nodes = staged;
        Ok(())
    }

    #[instrument(level = "debug", skip(self, nodes), fields(count = nodes.len()))]
    fn validate(&self, nodes: &[T]) -> TreeResult<(), T> {
        let mut seen = HashSet::with_capacity(nodes.len());
        if let Some(duplicate) = nodes.iter().find(|n| !seen.insert(*n)) {
            return Err(TreeError::NodeExists(duplicate.clone()));
        }

        let roots: Vec<&T> = nodes
            .iter()
            .filter(|n| self.root_predicate.is_root(n))
            .collect();
        if roots.len() > 1 {
            return Err(TreeError::MultiRoot(roots.into_iter().cloned().collect()));
        }
        let Some(root) = roots.first().copied() else {
            return Err(TreeError::RootAbsent);
        };

        for node in nodes.iter().filter(|n| *n != root) {
            let has_parent = nodes
                .iter()
                .any(|p| p != node && self.relation_predicate.is_parent_of(p, node));
            if !has_parent {
                return Err(TreeError::ParentAbsent(node.clone()));
            }
        }

        if self.options.cycle_guard {
            for node in nodes.iter().filter(|n| *n != root) {
                let chain = ancestors_in(nodes, &self.relation_predicate, node);
                if chain.first().copied() != Some(root) {
                    return Err(TreeError::Detached(node.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn options(&self) -> TreeOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    /// The node satisfying the root predicate; `None` while the tree is empty.
    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<&T> {
        self.nodes.iter().find(|n| self.root_predicate.is_root(n))
    }

    pub fn contains(&self, node: &T) -> bool {
        self.nodes.contains(node)
    }

    /// First stored node that is the parent of `node`.
    ///
    /// `node` need not be a member.
    #[instrument(level = "trace", skip(self))]
    pub fn find_parent(&self, node: &T) -> Option<&T> {
        parent_in(&self.nodes, &self.relation_predicate, node)
    }

    /// Ancestors of `node`, root first and direct parent last.
    ///
    /// Empty for the root and for nodes without a discoverable parent. Membership is not
    /// required.
    #[instrument(level = "trace", skip(self))]
    pub fn find_parents(&self, node: &T) -> Vec<&T> {
        ancestors_in(&self.nodes, &self.relation_predicate, node)
    }

    /// Ancestor chain shared by all `nodes`, root first.
    #[instrument(level = "trace", skip(self, nodes))]
    pub fn find_same_parents<'a>(&self, nodes: impl IntoIterator<Item = &'a T>) -> Vec<&T>
    where
        T: 'a,
    {
        let chains: Vec<Vec<&T>> = nodes.into_iter().map(|n| self.find_parents(n)).collect();
        let Some((first, rest)) = chains.split_first() else {
            return Vec::new();
        };
        first
            .iter()
            .enumerate()
            .take_while(|(i, node)| rest.iter().all(|chain| chain.get(*i) == Some(*node)))
            .map(|(_, node)| *node)
            .collect()
    }

    /// Nearest common ancestor of `nodes`.
    pub fn find_same_parent<'a>(&self, nodes: impl IntoIterator<Item = &'a T>) -> Option<&T>
    where
        T: 'a,
    {
        self.find_same_parents(nodes).pop()
    }

    /// Direct children of `node` in insertion order.
    #[instrument(level = "trace", skip(self))]
    pub fn find_children(&self, node: &T) -> Vec<&T> {
        self.nodes
            .iter()
            .filter(|c| self.relation_predicate.is_child_of(c, node))
            .collect()
    }

    /// All descendants of `node` in pre-order: each child followed by its own
    /// descendants. `node` need not be a member.
    #[instrument(level = "trace", skip(self))]
    pub fn find_younger(&self, node: &T) -> Vec<&T> {
        let mut younger = Vec::new();
        let mut stack: Vec<&T> = self.find_children(node).into_iter().rev().collect();

        while let Some(current) = stack.pop() {
            if younger.len() == self.nodes.len() {
                warn!("descendant walk from {:?} exceeds tree size, relation predicate is cyclic", node);
                break;
            }
            younger.push(current);
            stack.extend(self.find_children(current).into_iter().rev());
        }
        younger
    }

    /// Add a node below its parent.
    ///
    /// Ancestors must be added before descendants.
    ///
    /// # Errors
    /// - `InvalidRoot` if the tree is empty and `node` is not a root
    /// - `NodeExists` if `node` is already present
    /// - `ParentAbsent` if no member is the parent of `node`
    /// - `MultiRoot` if `node` has a parent but also satisfies the root predicate
    #[instrument(level = "debug", skip(self))]
    pub fn add_node(&mut self, node: T) -> TreeResult<(), T> {
        if self.nodes.is_empty() {
            if !self.root_predicate.is_root(&node) {
                return Err(TreeError::InvalidRoot(node));
            }
            debug!("root set");
            self.nodes.push(node);
            return Ok(());
        }
        if self.contains(&node) {
            return Err(TreeError::NodeExists(node));
        }
        if self.find_parent(&node).is_none() {
            return Err(TreeError::ParentAbsent(node));
        }
        // a parented node must not become a second root
        if self.root_predicate.is_root(&node) {
            let mut roots: Vec<T> = self.root().into_iter().cloned().collect();
            roots.push(node);
            return Err(TreeError::MultiRoot(roots));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Remove `node` together with all of its descendants.
    ///
    /// Returns the removed nodes, `node` first, then its descendants in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_node(&mut self, node: &T) -> TreeResult<Vec<T>, T> {
        if !self.contains(node) {
            return Err(TreeError::NodeAbsent(node.clone()));
        }
        let removed: Vec<T> = iter::once(node)
            .chain(self.find_younger(node))
            .cloned()
            .collect();
        let doomed: HashSet<&T> = removed.iter().collect();
        self.nodes.retain(|n| !doomed.contains(n));
        debug!("removed {} nodes, {} left", removed.len(), self.nodes.len());
        Ok(removed)
    }

    /// Independent tree rooted at `node`, holding `node` and its descendants.
    ///
    /// The relation predicate is shared with the source; the root predicate becomes
    /// "equals `node`".
    #[instrument(level = "debug", skip(self))]
    pub fn subtree(&self, node: &T) -> TreeResult<Tree<T, NodeIs<T>, P>, T>
    where
        P: Clone,
    {
        if !self.contains(node) {
            return Err(TreeError::NodeAbsent(node.clone()));
        }
        let nodes: Vec<T> = iter::once(node)
            .chain(self.find_younger(node))
            .cloned()
            .collect();
        Tree::from_nodes_with_options(
            NodeIs(node.clone()),
            self.relation_predicate.clone(),
            nodes,
            self.options,
        )
    }

    /// Minimal tree spanning `nodes` and their ancestor chains back to the root.
    ///
    /// Chains are merged in first-seen order without duplicates. Both predicates are
    /// shared with the source.
    #[instrument(level = "debug", skip(self, nodes))]
    pub fn local_tree<'a>(&self, nodes: impl IntoIterator<Item = &'a T>) -> TreeResult<Self, T>
    where
        T: 'a,
        R: Clone,
        P: Clone,
    {
        let nodes: Vec<&T> = nodes.into_iter().collect();
        if let Some(absent) = nodes.iter().find(|n| !self.contains(n)) {
            return Err(TreeError::NodeAbsent((*absent).clone()));
        }
        let elders: Vec<T> = nodes
            .iter()
            .flat_map(|n| {
                self.find_parents(n)
                    .into_iter()
                    .cloned()
                    .chain(iter::once((*n).clone()))
            })
            .unique()
            .collect();
        Self::from_nodes_with_options(
            self.root_predicate.clone(),
            self.relation_predicate.clone(),
            elders,
            self.options,
        )
    }
}

impl<T: Debug, R, P> Debug for Tree<T, R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("nodes", &self.nodes)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn parent_in<'n, T, P: RelationPredicate<T>>(nodes: &'n [T], relation: &P, node: &T) -> Option<&'n T> {
    nodes.iter().find(|p| relation.is_parent_of(p, node))
}

/// Walks parents upward, bounded by the collection size so a cyclic relation terminates.
fn ancestors_in<'n, T: Debug, P: RelationPredicate<T>>(nodes: &'n [T], relation: &P, node: &T) -> Vec<&'n T> {
    let mut parents = Vec::new();
    let mut current = parent_in(nodes, relation, node);

    while let Some(parent) = current {
        if parents.len() == nodes.len() {
            warn!("ancestor walk from {:?} exceeds tree size, relation predicate is cyclic", node);
            break;
        }
        parents.push(parent);
        current = parent_in(nodes, relation, parent);
    }
    parents.reverse();
    parents
}
