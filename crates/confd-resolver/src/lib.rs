//! Resolution engine for directory trees of configuration fragments
//!
//! A configuration tree is a root directory whose nested directories hold
//! `.conf`/`.json` fragments. This crate reads those fragments and reduces them
//! into a single value for any node of the tree, using one of the strategies
//! in [`Strategy`].

pub mod fragment;
pub mod handle;
pub mod merge;
pub mod resolve;

// Re-export main types
pub use confd_core::{ConfdError, ConfdResult, Strategy};
pub use handle::{from, Conf, StrategySelector};
pub use merge::{merge, merge_all};
pub use resolve::{load, Resolved};

/// A parsed configuration fragment
pub type Document = serde_json::Value;
