//! File-based store backend

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{StoreBackend, StoreResult};

/// Keeps the tree in a single pretty-printed JSON file.
///
/// Identifier fields detected at generation time live next to it in
/// `<stem>.ids.json` (`db.json` → `db.ids.json`), keyed by collection name.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn id_fields_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_default();
        name.push(".ids.json");
        self.path.with_file_name(name)
    }

    /// Identifier field per collection, empty when none were recorded
    pub async fn load_id_fields(&self) -> StoreResult<HashMap<String, String>> {
        match read_optional(&self.id_fields_path()).await? {
            Some(content) => Ok(serde_json::from_str(&content)?),
            None => Ok(HashMap::new()),
        }
    }

    pub async fn persist_id_fields(&self, fields: &IndexMap<String, String>) -> StoreResult<()> {
        write_pretty(&self.id_fields_path(), fields).await
    }
}

#[async_trait]
impl StoreBackend for JsonFileBackend {
    async fn load(&self) -> StoreResult<Option<Value>> {
        match read_optional(&self.path).await? {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }

    async fn persist(&self, tree: &Value) -> StoreResult<()> {
        write_pretty(&self.path, tree).await
    }
}

/// File content, or `None` when the file is missing or blank
async fn read_optional(path: &Path) -> StoreResult<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) if content.trim().is_empty() => Ok(None),
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Pretty JSON written to a `.tmp` sibling, then renamed over `path`
async fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');

    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    let temp = path.with_file_name(name);

    fs::write(&temp, content).await?;
    fs::rename(&temp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_and_empty_files_load_as_none() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("db.json"));
        assert!(backend.load().await.unwrap().is_none());

        std::fs::write(backend.path(), "  \n").unwrap();
        assert!(backend.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_persist_creates_parent_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("db.json");
        let backend = JsonFileBackend::new(&path);

        backend.persist(&json!({ "users": [] })).await.unwrap();

        assert_eq!(backend.load().await.unwrap(), Some(json!({ "users": [] })));
        assert!(!dir.path().join("data").join("db.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_identifier_fields_sit_next_to_the_dataset() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("db.json"));
        assert_eq!(backend.id_fields_path(), dir.path().join("db.ids.json"));
        assert!(backend.load_id_fields().await.unwrap().is_empty());

        let fields = IndexMap::from([("robots".to_string(), "blid".to_string())]);
        backend.persist_id_fields(&fields).await.unwrap();

        let loaded = backend.load_id_fields().await.unwrap();
        assert_eq!(loaded.get("robots").map(String::as_str), Some("blid"));
        assert!(backend.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("db.json"));
        std::fs::write(backend.path(), "{ not json").unwrap();

        assert!(matches!(
            backend.load().await,
            Err(crate::store::StoreError::Json(_))
        ));
    }
}
