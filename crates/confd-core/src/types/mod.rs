//! Core data types for confd.
//!
//! This module provides the fundamental types used throughout confd:
//! - The resolution strategy enumeration

pub mod strategy;

// Re-export all public types
pub use strategy::Strategy;
