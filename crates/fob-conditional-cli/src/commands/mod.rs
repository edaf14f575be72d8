//! Command implementations.
//!
//! - [`resolve`] - resolve specifiers, optionally expanding a build bundle
//! - [`check`] - parse specifiers only

pub mod check;
pub mod resolve;

pub use check::execute as check_execute;
pub use resolve::execute as resolve_execute;
