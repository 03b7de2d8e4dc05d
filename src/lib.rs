//! highlight-types library
//!
//! This library provides a post-write hook for static-site builders that
//! highlights primitive integer type names (`u8`, `i32`, `usize`, …) inside
//! the code blocks of generated HTML pages. The primary interface is the
//! highlight-types binary, but the library can be used programmatically by a
//! builder that invokes hooks directly.
//!
//! ## Public API
//!
//! The main public interface is [`TypenameHighlighter`], which implements
//! the [`PostWriteHook`] trait.
//!
//! Additional utilities:
//! - [`rewrite_document`] - Rewrite a single HTML string without touching the filesystem
//! - [`run_post_write_hooks`] - Invoke an injected hook list for one written file
//! - [`HookInput`] - The invocation payload a builder pipes over stdin

mod highlighter;
mod hook;
mod reporting;
mod rewrite;

pub use highlighter::{FileReport, TypenameHighlighter};
pub use hook::{run_post_write_hooks, BuildContext, HookInput, PostWriteHook};
pub use reporting::{print_summary, report_error};
pub use rewrite::{rewrite_document, RewriteOutcome, TYPENAME_CLASS};
