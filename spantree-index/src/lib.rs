//! A static, memory-compact interval index.
//!
//! This crate packs a batch of values, each covering a half-open range
//! `[start, start + length)`, into an implicit complete binary tree stored in a
//! single array, augmented with the greatest end of every subtree. Once built,
//! the tree answers three kinds of question:
//!
//! - does any stored interval overlap a query range ([`SpanTree::any_overlap`])
//! - which stored intervals match a query range, in start order ([`SpanTree::collect_matching`])
//! - every stored interval in start order ([`SpanTree::iter`])
//!
//! The query engine in [`traversal`] is generic over the [`NodeTree`] trait, so
//! any tree shape that exposes roots, children, values and max-end nodes can
//! reuse it. Traversals never recurse; their stacks come from a shared
//! [`pool::ScratchPool`].
//!
//! ## Quick Start
//!
//! ```rust
//! use spantree_index::{SpanTree, predicates};
//! use spantree_core::models::{Interval, IntervalSpan};
//!
//! // highlight ranges in an editor buffer
//! let highlights = vec![
//!     Interval { start: 0i32, end: 3, val: "keyword" },
//!     Interval { start: 5, end: 7, val: "string" },
//!     Interval { start: 10, end: 11, val: "comment" },
//!     Interval { start: 12, end: 16, val: "keyword" },
//! ];
//!
//! let tree = SpanTree::build_sorted(highlights, IntervalSpan).unwrap();
//!
//! // is anything highlighted on [4, 6)?
//! assert_eq!(tree.has_overlap(4, 2).unwrap(), true);
//!
//! // everything on [0, 20), in order
//! let all: Vec<&str> = tree.find_overlapping(0, 20).unwrap().iter().map(|i| i.val).collect();
//! assert_eq!(all, vec!["keyword", "string", "comment", "keyword"]);
//!
//! // the first hit only
//! let mut first = Vec::new();
//! tree.collect_matching(6, 10, predicates::overlaps, &mut first, true).unwrap();
//! assert_eq!(first[0].val, "string");
//! ```
//!
//! ## Custom payloads
//!
//! Any type can be stored as long as an [`Introspector`] can report its span:
//!
//! ```rust
//! use spantree_index::SpanTree;
//! use spantree_core::models::{Introspector, Span};
//!
//! struct Diagnostic {
//!     offset: u32,
//!     width: u32,
//!     message: &'static str,
//! }
//!
//! struct DiagnosticSpan;
//!
//! impl Introspector<Diagnostic> for DiagnosticSpan {
//!     type Position = u32;
//!
//!     fn span(&self, value: &Diagnostic) -> Span<u32> {
//!         Span { start: value.offset, end: value.offset + value.width }
//!     }
//! }
//!
//! let tree = SpanTree::build(
//!     vec![
//!         Diagnostic { offset: 40, width: 2, message: "unused variable" },
//!         Diagnostic { offset: 8, width: 0, message: "expected `;`" },
//!     ],
//!     DiagnosticSpan,
//! )
//! .unwrap();
//!
//! let hit = tree.first_overlapping(8, 0).unwrap().unwrap();
//! assert_eq!(hit.message, "expected `;`");
//! ```

/// Packing sorted values into the implicit tree layout.
mod build;

/// Settings for the scratch pool and default queries.
pub mod config;

/// Per-document indexing.
///
/// See [`document_index::DocumentIndex`].
pub mod document_index;

/// Reusable traversal stacks.
pub mod pool;

/// Standard query predicates.
pub mod predicates;

/// Capability contract for tree shapes.
pub mod traits;

/// Generic query algorithms.
pub mod traversal;

/// The array-packed interval tree.
pub mod tree;

// re-exports
pub use self::config::IndexConfig;
pub use self::predicates::PredicateKind;
pub use self::traits::NodeTree;
pub use self::tree::SpanTree;
pub use spantree_core::models::{Introspector, Span};
