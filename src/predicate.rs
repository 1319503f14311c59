//! Root and parent/child predicates.
//!
//! The tree never inspects a node's fields. Everything structural comes from these two
//! traits, so any existing collection of related values can be viewed as a tree.
//! Both are implemented for plain closures:
//!
//! ```
//! use gentree::{RelationPredicate, RootPredicate};
//!
//! let is_root = |n: &u32| *n == 1;
//! let is_parent = |p: &u32, c: &u32| *c / 10 == *p;
//!
//! assert!(is_root.is_root(&1));
//! assert!(is_parent.is_parent_of(&1, &12));
//! assert!(is_parent.is_child_of(&12, &1));
//! ```
//!
//! Predicates must be pure: the engine calls them repeatedly and in no fixed order.

/// Decides whether a node is the root.
pub trait RootPredicate<T> {
    fn is_root(&self, node: &T) -> bool;
}

/// Decides whether one node is the direct parent of another.
///
/// For any non-root node of a valid tree exactly one other member must satisfy
/// `is_parent_of(member, node)`. The engine does not verify this.
pub trait RelationPredicate<T> {
    fn is_parent_of(&self, parent: &T, child: &T) -> bool;

    fn is_child_of(&self, child: &T, parent: &T) -> bool {
        self.is_parent_of(parent, child)
    }
}

impl<T, F> RootPredicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn is_root(&self, node: &T) -> bool {
        self(node)
    }
}

impl<T, F> RelationPredicate<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn is_parent_of(&self, parent: &T, child: &T) -> bool {
        self(parent, child)
    }
}

/// Root predicate satisfied by exactly one value, compared by equality.
///
/// Subtrees are re-rooted with this predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIs<T>(pub T);

impl<T: PartialEq> RootPredicate<T> for NodeIs<T> {
    fn is_root(&self, node: &T) -> bool {
        *node == self.0
    }
}
