//! Utility functions and helpers.
//!
//! Common functionality used across multiple confd crates.

pub mod path;

// Re-export commonly used utilities
pub use path::{build_subpath, is_fragment_name, split_subpath};
