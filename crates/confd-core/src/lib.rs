//! # confd-core
//!
//! Core types and utilities shared across all confd crates.
//!
//! This crate provides:
//! - The `Strategy` enumeration that selects how a configuration tree is resolved
//! - `ConfdError` for unified error handling
//! - Path helpers for building and normalizing resolution subpaths
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Strategy)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{ConfdError, ConfdResult};
pub use types::Strategy;
