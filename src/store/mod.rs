//! Path-addressed JSON document store
//!
//! The whole dataset is one JSON object. A path such as `petstore/pets/42`
//! walks object keys by name and array elements by identifier, so request
//! URLs map directly onto store paths.
//!
//! Backends:
//! - File-based (`JsonFileBackend`, pretty-printed JSON on disk)
//! - In-memory (`InMemoryBackend`, for tests and throwaway runs)

mod error;
mod file;
mod in_memory;
mod path;


pub use error::{StoreError, StoreResult};
pub use file::JsonFileBackend;
pub use in_memory::InMemoryBackend;
pub use path::StorePath;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::identifier_text;

/// Where the document tree is loaded from and written back to
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Load the persisted tree, or `None` when nothing has been persisted yet
    async fn load(&self) -> StoreResult<Option<Value>>;

    /// Replace the persisted tree with `tree`
    async fn persist(&self, tree: &Value) -> StoreResult<()>;
}

pub const DEFAULT_ID_FIELD: &str = "id";

/// How array elements are matched against path segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub default_id_field: String,
    /// Identifier field per collection name, for collections not keyed by the default
    pub id_fields: HashMap<String, String>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            default_id_field: DEFAULT_ID_FIELD.to_string(),
            id_fields: HashMap::new(),
        }
    }
}

impl StoreOptions {
    /// Identifier field used for elements of `collection` (matched ignoring case)
    /// Add identifier fields detected while generating the dataset.
    /// Collections configured explicitly keep their configured field.
    pub fn with_detected_id_fields<I>(mut self, detected: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (collection, field) in detected {
            let configured = self
                .id_fields
                .keys()
                .any(|name| name.eq_ignore_ascii_case(&collection));
            if !configured {
                self.id_fields.insert(collection, field);
            }
        }
        self
    }

    pub fn id_field(&self, collection: &str) -> &str {
        self.id_fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(collection))
            .map(|(_, field)| field.as_str())
            .unwrap_or(&self.default_id_field)
    }
}

/// The document tree with single-writer access.
///
/// Every successful mutation persists the full tree while still holding the
/// write lock, so concurrent mutations never interleave their writes.
pub struct DocumentStore {
    tree: RwLock<Value>,
    backend: Arc<dyn StoreBackend>,
    options: StoreOptions,
}

impl DocumentStore {
    /// Store with an empty tree; nothing is loaded from the backend
    pub fn new(backend: Arc<dyn StoreBackend>, options: StoreOptions) -> Self {
        Self {
            tree: RwLock::new(Value::Object(Map::new())),
            backend,
            options,
        }
    }

    /// Store initialized from whatever the backend has persisted
    pub async fn open(backend: Arc<dyn StoreBackend>, options: StoreOptions) -> StoreResult<Self> {
        let tree = match backend.load().await? {
            Some(tree @ Value::Object(_)) => tree,
            Some(other) => return Err(StoreError::InvalidRoot(value_kind(&other).to_string())),
            None => Value::Object(Map::new()),
        };
        Ok(Self {
            tree: RwLock::new(tree),
            backend,
            options,
        })
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Copy of the whole tree
    pub async fn snapshot(&self) -> Value {
        self.tree.read().await.clone()
    }

    /// Replace the whole tree and persist it
    pub async fn seed(&self, tree: Value) -> StoreResult<()> {
        if !tree.is_object() {
            return Err(StoreError::InvalidRoot(value_kind(&tree).to_string()));
        }
        let mut current = self.tree.write().await;
        self.commit(&mut current, tree).await?;
        debug!("Seeded document store");
        Ok(())
    }

    /// Value at `path`, or `None` when any segment is missing
    pub async fn get(&self, path: &str) -> Option<Value> {
        let path = StorePath::parse(path);
        let tree = self.tree.read().await;
        self.walk(&tree, path.segments()).cloned()
    }

    /// Append `data` to the collection named by the last segment of `path`.
    ///
    /// Missing intermediate objects are created and a non-array value at the
    /// collection key is replaced by a new array. Returns `None` when the path
    /// runs through a scalar or an unknown array element.
    pub async fn create(&self, path: &str, data: Value) -> StoreResult<Option<Value>> {
        let path = StorePath::parse(path);
        let Some((parent, last)) = path.split_last() else {
            return Ok(None);
        };

        let mut tree = self.tree.write().await;
        let mut draft = tree.clone();
        let Some(parent_node) = self.walk_mut(&mut draft, parent, true) else {
            debug!(path = %path, "Create target not reachable");
            return Ok(None);
        };
        if parent_node.is_null() {
            *parent_node = Value::Object(Map::new());
        }
        let Value::Object(map) = parent_node else {
            debug!(path = %path, "Create parent is not an object");
            return Ok(None);
        };

        let collection = map
            .entry(last.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !collection.is_array() {
            *collection = Value::Array(Vec::new());
        }
        if let Value::Array(items) = collection {
            items.push(data.clone());
        }

        self.commit(&mut tree, draft).await?;
        debug!(path = %path, "Created record");
        Ok(Some(data))
    }

    /// Replace the element at `collection/identifier` with `data`
    pub async fn update(&self, path: &str, data: Value) -> StoreResult<Option<Value>> {
        let path = StorePath::parse(path);
        let mut tree = self.tree.write().await;
        let mut draft = tree.clone();
        let Some((items, index)) = self.locate_mut(&mut draft, &path) else {
            debug!(path = %path, "Update target not found");
            return Ok(None);
        };

        items[index] = data.clone();

        self.commit(&mut tree, draft).await?;
        debug!(path = %path, "Updated record");
        Ok(Some(data))
    }

    /// Shallow-merge `data` into the element at `collection/identifier`.
    ///
    /// Top-level keys of `data` overwrite; nested values are replaced whole.
    /// Returns the merged element.
    pub async fn patch(&self, path: &str, data: Value) -> StoreResult<Option<Value>> {
        let path = StorePath::parse(path);
        let mut tree = self.tree.write().await;
        let mut draft = tree.clone();
        let Some((items, index)) = self.locate_mut(&mut draft, &path) else {
            debug!(path = %path, "Patch target not found");
            return Ok(None);
        };

        merge_shallow(&mut items[index], data);
        let patched = items[index].clone();

        self.commit(&mut tree, draft).await?;
        debug!(path = %path, "Patched record");
        Ok(Some(patched))
    }

    /// Remove the element at `collection/identifier`, returning it
    pub async fn delete(&self, path: &str) -> StoreResult<Option<Value>> {
        let path = StorePath::parse(path);
        let mut tree = self.tree.write().await;
        let mut draft = tree.clone();
        let Some((items, index)) = self.locate_mut(&mut draft, &path) else {
            debug!(path = %path, "Delete target not found");
            return Ok(None);
        };

        let removed = items.remove(index);

        self.commit(&mut tree, draft).await?;
        debug!(path = %path, "Deleted record");
        Ok(Some(removed))
    }

    /// Persist `draft`, then make it the current tree. A failed persist
    /// leaves the current tree untouched.
    async fn commit(&self, current: &mut Value, draft: Value) -> StoreResult<()> {
        self.backend.persist(&draft).await?;
        *current = draft;
        Ok(())
    }

    fn position(&self, items: &[Value], collection: &str, id: &str) -> Option<usize> {
        let field = self.options.id_field(collection);
        items.iter().position(|item| {
            item.get(field)
                .and_then(identifier_text)
                .is_some_and(|text| text == id)
        })
    }

    fn walk<'v>(&self, root: &'v Value, segments: &[String]) -> Option<&'v Value> {
        let mut current = root;
        let mut collection = "";
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => &items[self.position(items, collection, segment)?],
                _ => return None,
            };
            collection = segment.as_str();
        }
        Some(current)
    }

    /// Mutable counterpart of `walk`; with `create`, missing or null object
    /// entries along the way become empty objects.
    fn walk_mut<'v>(
        &self,
        root: &'v mut Value,
        segments: &[String],
        create: bool,
    ) -> Option<&'v mut Value> {
        let mut current = root;
        let mut collection = "";
        for segment in segments {
            if create && current.is_null() {
                *current = Value::Object(Map::new());
            }
            current = match current {
                Value::Object(map) => {
                    if create {
                        map.entry(segment.clone())
                            .or_insert_with(|| Value::Object(Map::new()))
                    } else {
                        map.get_mut(segment)?
                    }
                }
                Value::Array(items) => {
                    let index = self.position(items, collection, segment)?;
                    &mut items[index]
                }
                _ => return None,
            };
            collection = segment.as_str();
        }
        Some(current)
    }

    /// The array and index addressed by a `collection/identifier` path
    fn locate_mut<'v>(
        &self,
        root: &'v mut Value,
        path: &StorePath,
    ) -> Option<(&'v mut Vec<Value>, usize)> {
        let (parent, id) = path.split_last()?;
        let (collection, _) = parent.split_last()?;
        let Value::Array(items) = self.walk_mut(root, parent, false)? else {
            return None;
        };
        let index = self.position(items, collection, id)?;
        Some((items, index))
    }
}

fn merge_shallow(target: &mut Value, data: Value) {
    match data {
        Value::Object(changes) if target.is_object() => {
            if let Some(existing) = target.as_object_mut() {
                existing.extend(changes);
            }
        }
        other => *target = other,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
