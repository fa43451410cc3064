//! Path utilities for resolution subpaths.
//!
//! Subpaths are always relative to a handle's root and are normalized
//! lexically, so a subpath can never point outside the root.

use crate::error::{ConfdError, ConfdResult};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// File name suffixes recognized as configuration fragments
pub const FRAGMENT_SUFFIXES: [&str; 2] = [".conf", ".json"];

/// Build a normalized subpath from path segments.
///
/// Empty segments are skipped and a segment may itself contain separators.
/// No segments at all resolve to `.`, the root itself.
pub fn build_subpath<S: AsRef<str>>(segments: &[S]) -> ConfdResult<Utf8PathBuf> {
    let mut parts: Vec<&str> = Vec::new();

    for segment in segments {
        for component in Utf8Path::new(segment.as_ref()).components() {
            match component {
                Utf8Component::Normal(part) => parts.push(part),
                Utf8Component::ParentDir => {
                    if parts.pop().is_none() {
                        return Err(ConfdError::invalid_argument(
                            "segments",
                            format!("'{}' escapes the configuration root", segment.as_ref()),
                        ));
                    }
                },
                // Segments are relative to the root whatever their shape
                Utf8Component::CurDir | Utf8Component::RootDir | Utf8Component::Prefix(_) => {},
            }
        }
    }

    if parts.is_empty() {
        Ok(Utf8PathBuf::from("."))
    } else {
        Ok(parts.into_iter().collect())
    }
}

/// Split a subpath into its ordered directory names (`.` yields none)
pub fn split_subpath(subpath: &Utf8Path) -> Vec<String> {
    subpath
        .components()
        .filter_map(|component| match component {
            Utf8Component::Normal(part) => Some(part.to_string()),
            _ => None,
        })
        .collect()
}

/// Check if a directory entry name denotes a configuration fragment
pub fn is_fragment_name(name: &str) -> bool {
    FRAGMENT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}
