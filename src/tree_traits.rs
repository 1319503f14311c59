//! Traversal and rendering shared by anything that can name its root and list children.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::predicate::{RelationPredicate, RootPredicate};
use crate::tree::Tree;

/// Minimal read access to a tree: its root and the children of a node.
///
/// Everything else here (iteration, depth, leaves, branches) is derived from these two.
pub trait IterableTree<T> {
    fn root(&self) -> Option<&T>;

    /// Children of `node` in sibling order.
    fn children(&self, node: &T) -> Vec<&T>;

    /// Pre-order walk from the root.
    fn iter(&self) -> PreOrderIterator<'_, T, Self>
    where
        Self: Sized,
    {
        PreOrderIterator::new(self)
    }

    /// Post-order walk from the root: children before their parent.
    fn iter_postorder(&self) -> PostOrderIterator<'_, T, Self>
    where
        Self: Sized,
    {
        PostOrderIterator::new(self)
    }

    /// Number of levels; 0 for an empty tree, 1 for a lone root.
    fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&T, usize)> = self.root().map(|r| (r, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in self.children(node) {
                stack.push((child, depth + 1));
            }
        }
        max_depth
    }

    /// Nodes without children, in pre-order.
    fn leaf_nodes(&self) -> Vec<&T>
    where
        Self: Sized,
    {
        self.iter()
            .filter(|node| self.children(node).is_empty())
            .collect()
    }

    /// One path per leaf, leaf first and root last, leaves in pre-order.
    fn branches(&self) -> Vec<Vec<&T>> {
        let mut branches = Vec::new();
        let mut stack: Vec<(&T, Vec<&T>)> = self.root().map(|r| (r, vec![r])).into_iter().collect();

        while let Some((node, path)) = stack.pop() {
            let children = self.children(node);
            if children.is_empty() {
                branches.push(path.into_iter().rev().collect());
                continue;
            }
            for child in children.into_iter().rev() {
                let mut child_path = path.clone();
                child_path.push(child);
                stack.push((child, child_path));
            }
        }
        branches
    }
}

impl<T, R, P> IterableTree<T> for Tree<T, R, P>
where
    T: Clone + Eq + Hash + Debug,
    R: RootPredicate<T>,
    P: RelationPredicate<T>,
{
    fn root(&self) -> Option<&T> {
        Tree::root(self)
    }

    fn children(&self, node: &T) -> Vec<&T> {
        self.find_children(node)
    }
}

pub struct PreOrderIterator<'a, T, S> {
    tree: &'a S,
    stack: Vec<&'a T>,
}

impl<'a, T, S: IterableTree<T>> PreOrderIterator<'a, T, S> {
    fn new(tree: &'a S) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, T, S: IterableTree<T>> Iterator for PreOrderIterator<'a, T, S> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // reversed so the first child is popped first
        self.stack.extend(self.tree.children(current).into_iter().rev());
        Some(current)
    }
}

pub struct PostOrderIterator<'a, T, S> {
    tree: &'a S,
    stack: Vec<(&'a T, bool)>,
}

impl<'a, T, S: IterableTree<T>> PostOrderIterator<'a, T, S> {
    fn new(tree: &'a S) -> Self {
        Self {
            tree,
            stack: tree.root().map(|r| (r, false)).into_iter().collect(),
        }
    }
}

impl<'a, T, S: IterableTree<T>> Iterator for PostOrderIterator<'a, T, S> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if visited {
                return Some(current);
            }
            self.stack.push((current, true));
            for child in self.tree.children(current).into_iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Conversion into a printable `termtree` rendering.
pub trait TreeNodeConvert<T> {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl<T, S> TreeNodeConvert<T> for S
where
    T: Display,
    S: IterableTree<T>,
{
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> TermTree<String> {
        fn build_tree<T: Display, S: IterableTree<T>>(tree: &S, node: &T) -> TermTree<String> {
            let leaves: Vec<_> = tree
                .children(node)
                .into_iter()
                .map(|child| build_tree(tree, child))
                .collect();
            TermTree::new(node.to_string()).with_leaves(leaves)
        }

        match self.root() {
            Some(root) => build_tree(self, root),
            None => TermTree::new("Empty tree".to_string()),
        }
    }
}
