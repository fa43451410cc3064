//! Fragment reading, directory listing, and `common` precedence

use confd_core::error::{ConfdError, ConfdResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::Document;

/// File names of a directory's base fragment, in precedence order
pub const COMMON_FRAGMENTS: [&str; 2] = ["common.conf", "common.json"];

/// One entry of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// Entry file name, lossily decoded; only used for matching and ordering
    pub name: String,
    /// Full path as returned by the listing
    pub path: PathBuf,
    /// Whether the entry is a directory (symlinks followed)
    pub is_dir: bool,
}

/// Read and parse a single fragment file
pub async fn read_fragment(path: impl AsRef<Path>) -> ConfdResult<Document> {
    let path = path.as_ref();
    trace!("Reading fragment {}", path.display());

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfdError::io(format!("Failed to read {}", path.display()), e))?;

    serde_json::from_str(&content).map_err(|e| ConfdError::FragmentParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Move the directory's `common` fragment to the front of `names`.
///
/// `common.conf` wins over `common.json`; only one of them is promoted.
/// No other entry changes position.
pub fn promote_common(names: Vec<String>) -> Vec<String> {
    promote_common_by(names, |name| name.as_str())
}

/// [`promote_common`] over any items carrying a file name
pub fn promote_common_by<T, F>(mut items: Vec<T>, name_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let position = COMMON_FRAGMENTS
        .iter()
        .find_map(|common| items.iter().position(|item| name_of(item) == *common));

    if let Some(pos) = position.filter(|&pos| pos != 0) {
        let common = items.remove(pos);
        items.insert(0, common);
    }

    items
}

/// List the entries of a directory, sorted by name.
///
/// A missing or unreadable directory yields `None`.
pub async fn list_directory(path: impl AsRef<Path>) -> ConfdResult<Option<Vec<DirEntryInfo>>> {
    let path = path.as_ref();
    let mut reader = match tokio::fs::read_dir(path).await {
        Ok(reader) => reader,
        Err(e) if is_missing(&e) => {
            debug!("Directory {} not available: {}", path.display(), e);
            return Ok(None);
        }
        Err(e) => {
            return Err(ConfdError::io(format!("Failed to list {}", path.display()), e));
        }
    };

    let mut entries = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .map_err(|e| ConfdError::io(format!("Failed to list {}", path.display()), e))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        let entry_path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| ConfdError::io(format!("Failed to stat {}", entry_path.display()), e))?;

        let is_dir = if file_type.is_symlink() {
            // Dangling links are neither fragments nor directories
            tokio::fs::metadata(&entry_path)
                .await
                .map(|meta| meta.is_dir())
                .unwrap_or(false)
        } else {
            file_type.is_dir()
        };

        entries.push(DirEntryInfo {
            name,
            path: entry_path,
            is_dir,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
    debug!("Listed {} entries in {}", entries.len(), path.display());

    Ok(Some(entries))
}

/// Load the `common` fragment of one directory, if it has one
pub async fn load_common(dir: impl AsRef<Path>) -> ConfdResult<Option<Document>> {
    let dir = dir.as_ref();
    for common in COMMON_FRAGMENTS {
        let candidate = dir.join(common);

        // Anything that cannot be stat'ed as a regular file counts as absent
        if let Ok(meta) = tokio::fs::metadata(&candidate).await {
            if meta.is_file() {
                debug!("Loading common fragment {}", candidate.display());
                return read_fragment(&candidate).await.map(Some);
            }
        }
    }

    Ok(None)
}

fn is_missing(error: &std::io::Error) -> bool {
    matches!(error.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use serde_json::json;
    use tempfile::TempDir;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    fn utf8_root(temp_dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_promote_common_conf_to_front() {
        let ordered = promote_common(names(&["a.json", "b.conf", "common.conf"]));
        assert_eq!(ordered, names(&["common.conf", "a.json", "b.conf"]));
    }

    #[test]
    fn test_promote_common_conf_over_common_json() {
        let ordered = promote_common(names(&["a.json", "common.json", "common.conf"]));
        assert_eq!(ordered, names(&["common.conf", "a.json", "common.json"]));
    }

    #[test]
    fn test_promote_common_json_when_alone() {
        let ordered = promote_common(names(&["a.json", "common.json", "z.conf"]));
        assert_eq!(ordered, names(&["common.json", "a.json", "z.conf"]));
    }

    #[test]
    fn test_promote_common_is_noop_without_common_or_when_first() {
        let ordered = promote_common(names(&["b.json", "a.json", "notes.txt"]));
        assert_eq!(ordered, names(&["b.json", "a.json", "notes.txt"]));

        let ordered = promote_common(names(&["common.json", "a.json"]));
        assert_eq!(ordered, names(&["common.json", "a.json"]));

        assert!(promote_common(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn test_read_fragment_parses_conf_as_json() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8_root(&temp_dir);
        let path = root.join("service.conf");
        tokio::fs::write(&path, r#"{"port": 8080, "tags": ["a"]}"#).await.unwrap();

        let document = read_fragment(&path).await.unwrap();
        assert_eq!(document, json!({"port": 8080, "tags": ["a"]}));
    }

    #[tokio::test]
    async fn test_read_fragment_reports_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8_root(&temp_dir);
        let path = root.join("broken.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = read_fragment(&path).await.unwrap_err();
        assert!(matches!(
            err,
            ConfdError::FragmentParse { ref path, .. } if path.ends_with("broken.json")
        ));
    }

    #[tokio::test]
    async fn test_read_fragment_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8_root(&temp_dir);

        let err = read_fragment(&root.join("absent.json")).await.unwrap_err();
        assert!(matches!(err, ConfdError::Io { .. }));
    }

    #[tokio::test]
    async fn test_list_directory_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8_root(&temp_dir);

        assert_eq!(list_directory(&root.join("nope")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_directory_sorts_and_flags_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8_root(&temp_dir);
        tokio::fs::write(root.join("b.json"), "{}").await.unwrap();
        tokio::fs::write(root.join("a.conf"), "{}").await.unwrap();
        tokio::fs::create_dir(root.join("child")).await.unwrap();

        let entries = list_directory(&root).await.unwrap().unwrap();
        let listed: Vec<(&str, bool)> = entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.is_dir))
            .collect();
        assert_eq!(listed, vec![("a.conf", false), ("b.json", false), ("child", true)]);
        assert_eq!(entries[2].path, root.join("child").into_std_path_buf());
    }

    #[tokio::test]
    async fn test_load_common_prefers_conf() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8_root(&temp_dir);
        tokio::fs::write(root.join("common.json"), r#"{"from": "json"}"#).await.unwrap();
        tokio::fs::write(root.join("common.conf"), r#"{"from": "conf"}"#).await.unwrap();

        let common = load_common(&root).await.unwrap();
        assert_eq!(common, Some(json!({"from": "conf"})));
    }

    #[tokio::test]
    async fn test_load_common_falls_back_to_json_and_none() {
        let temp_dir = TempDir::new().unwrap();
        let root = utf8_root(&temp_dir);

        assert_eq!(load_common(&root).await.unwrap(), None);
        assert_eq!(load_common(&root.join("missing")).await.unwrap(), None);

        tokio::fs::write(root.join("common.json"), r#"{"from": "json"}"#).await.unwrap();
        assert_eq!(load_common(&root).await.unwrap(), Some(json!({"from": "json"})));
    }
}
