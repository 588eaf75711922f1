//! # treeswap-core
//!
//! Core library for recursive find-and-replace across a directory tree.
//!
//! A single compiled [`Pattern`] is applied to the contents of every regular
//! file and to the name of every file and directory below a root. Directories
//! are renamed while the tree is being walked, so traversal works from an
//! explicit stack of pending directories whose paths are re-derived after
//! each rename commits.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types for rewrite operations
pub mod error;

/// Rewrite options passed explicitly to the rewriter
pub mod options;

/// Compiled substitution pattern
pub mod pattern;

/// Run statistics and summary reporting
pub mod report;

/// Tree traversal and in-place rewriting
pub mod rewriter;


pub use error::{Result, RewriteError};
pub use options::{NameScope, RewriteOptions};
pub use pattern::Pattern;
pub use report::{ContentEdit, EntryKind, Rename, RewriteReporter, RewriteResult};
pub use rewriter::TreeRewriter;
