//! Folder resolvers and strategy dispatch
//!
//! Sibling reads inside one directory, and the per-level `common` loads of a
//! backcursion, are driven concurrently on the calling task. Their results are
//! always reduced in the order fixed before the reads were issued.

use camino::{Utf8Path, Utf8PathBuf};
use confd_core::error::{ConfdError, ConfdResult};
use confd_core::utils::path::{build_subpath, is_fragment_name, split_subpath};
use confd_core::Strategy;
use futures::future::try_join_all;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::fragment::{
    list_directory, load_common, promote_common_by, read_fragment, DirEntryInfo,
};
use crate::merge::{merge, merge_all};
use crate::Document;


/// Outcome of resolving one node of a configuration tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    /// The target directory does not exist or cannot be read
    Missing,
    /// A merged document (`LEAVES`, `BACKCURSION`)
    Document(Document),
    /// Unmerged documents (`ARRAY`)
    Sequence(Vec<Document>),
}

impl Resolved {
    fn from_document(document: Option<Document>) -> Self {
        document.map_or(Resolved::Missing, Resolved::Document)
    }

    fn from_sequence(sequence: Option<Vec<Document>>) -> Self {
        sequence.map_or(Resolved::Missing, Resolved::Sequence)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Resolved::Missing)
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Resolved::Document(document) => Some(document),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Resolved::Sequence(documents) => Some(documents),
            _ => None,
        }
    }

    /// Collapse into a plain JSON value, `null` when missing
    pub fn into_value(self) -> Document {
        match self {
            Resolved::Missing => Document::Null,
            Resolved::Document(document) => document,
            Resolved::Sequence(documents) => Document::Array(documents),
        }
    }
}

fn empty_object() -> Document {
    Document::Object(serde_json::Map::new())
}

/// Merge every fragment directly inside `folder`.
///
/// Child directories are not visited. The directory's `common` fragment is
/// applied first, the remaining fragments follow in name order.
pub async fn unify_folder(folder: impl AsRef<Path>) -> ConfdResult<Option<Document>> {
    let folder = folder.as_ref();
    let Some(entries) = list_directory(folder).await? else {
        return Ok(None);
    };

    let fragments = promote_common_by(
        entries
            .into_iter()
            .filter(|entry| !entry.is_dir && is_fragment_name(&entry.name))
            .collect(),
        |entry: &DirEntryInfo| entry.name.as_str(),
    );

    let reads = fragments.iter().map(|entry| read_fragment(&entry.path));
    let documents = try_join_all(reads).await?;

    debug!("Merging {} fragments under {}", documents.len(), folder.display());
    Ok(Some(merge_all(documents).unwrap_or_else(empty_object)))
}

/// Collect one document per fragment in `folder`, plus the merged contents of
/// each child directory, without merging them together.
pub async fn arrayize_folder(folder: impl AsRef<Path>) -> ConfdResult<Option<Vec<Document>>> {
    let folder = folder.as_ref();
    let Some(entries) = list_directory(folder).await? else {
        return Ok(None);
    };

    let reads = entries.into_iter().map(arrayize_entry);
    let documents: Vec<Document> = try_join_all(reads).await?.into_iter().flatten().collect();

    debug!("Collected {} documents under {}", documents.len(), folder.display());
    Ok(Some(documents))
}

async fn arrayize_entry(entry: DirEntryInfo) -> ConfdResult<Option<Document>> {
    if entry.is_dir {
        unify_folder(&entry.path).await
    } else if is_fragment_name(&entry.name) {
        read_fragment(&entry.path).await.map(Some)
    } else {
        Ok(None)
    }
}

/// Merge the `common` fragments found at `root` and at every directory on the
/// way down through `segments`, root first. Levels without one are skipped.
pub async fn load_commons(root: &Utf8Path, segments: &[String]) -> ConfdResult<Document> {
    // Every level path is fixed before any load starts
    let levels: Vec<Utf8PathBuf> = std::iter::once(root.to_path_buf())
        .chain(segments.iter().scan(root.to_path_buf(), |prefix, segment| {
            prefix.push(segment);
            Some(prefix.clone())
        }))
        .collect();

    let commons = try_join_all(levels.iter().map(|level| load_common(level))).await?;

    debug!(
        "Found {} common fragments across {} levels",
        commons.iter().flatten().count(),
        levels.len()
    );
    Ok(merge_all(commons.into_iter().flatten()).unwrap_or_else(empty_object))
}

/// Resolve `subpath` below `root` with the given strategy
pub async fn load(root: &Utf8Path, subpath: &str, strategy: Strategy) -> ConfdResult<Resolved> {
    if root.as_str().is_empty() {
        return Err(ConfdError::invalid_argument("root", "must not be empty"));
    }
    if subpath.is_empty() {
        return Err(ConfdError::invalid_argument("subpath", "must not be empty"));
    }

    let subpath = build_subpath(&[subpath])?;
    let target = root.join(&subpath);
    debug!("Resolving {} with strategy {}", target, strategy);

    match strategy {
        Strategy::Leaves => Ok(Resolved::from_document(unify_folder(&target).await?)),
        Strategy::Backcursion => {
            let segments = split_subpath(&subpath);
            let (commons, inner) =
                futures::try_join!(load_commons(root, &segments), unify_folder(&target))?;

            let resolved = match inner {
                Some(inner) => merge(commons, inner),
                None => commons,
            };
            Ok(Resolved::Document(resolved))
        }
        Strategy::Array => Ok(Resolved::from_sequence(arrayize_folder(&target).await?)),
    }
}
