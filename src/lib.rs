//! Generic trees over arbitrary values.
//!
//! A [`Tree`] never asks its nodes where their parent is. Root-ness and the parent/child
//! relation are supplied as predicates ([`RootPredicate`], [`RelationPredicate`]), so an
//! existing collection (a class hierarchy, an org chart, a taxonomy) can be queried as a
//! tree as long as each value can tell who its parent is.
//!
//! The engine keeps nodes in insertion order and recomputes relationships on every call;
//! there is no index to keep in sync. It is meant for a single owner and does no locking.
//!
//! ```
//! use gentree::{IterableTree, Tree, TreeError};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! struct Employee {
//!     name: &'static str,
//!     boss: Option<&'static str>,
//! }
//!
//! let mut org = Tree::new(
//!     |e: &Employee| e.boss.is_none(),
//!     |boss: &Employee, e: &Employee| e.boss == Some(boss.name),
//! );
//! let ceo = Employee { name: "ceo", boss: None };
//! let cto = Employee { name: "cto", boss: Some("ceo") };
//! let dev = Employee { name: "dev", boss: Some("cto") };
//!
//! // ancestors before descendants
//! assert_eq!(org.add_node(dev.clone()), Err(TreeError::InvalidRoot(dev.clone())));
//! org.add_node(ceo.clone()).unwrap();
//! org.add_node(cto.clone()).unwrap();
//! org.add_node(dev.clone()).unwrap();
//!
//! assert_eq!(org.find_parents(&dev), vec![&ceo, &cto]);
//! assert_eq!(org.depth(), 3);
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod hierarchy;
pub mod predicate;
pub mod tree;
pub mod tree_traits;
pub mod util;

pub use errors::{TreeError, TreeResult};
pub use predicate::{NodeIs, RelationPredicate, RootPredicate};
pub use tree::{Tree, TreeOptions};
pub use tree_traits::{IterableTree, PostOrderIterator, PreOrderIterator, TreeNodeConvert};
