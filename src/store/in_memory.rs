//! In-memory store backend

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{StoreBackend, StoreResult};

/// Keeps the last persisted tree in memory and counts persists
#[derive(Default)]
pub struct InMemoryBackend {
    snapshot: Arc<RwLock<Option<Value>>>,
    persists: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that loads `tree` as if it had been persisted before
    pub fn with_tree(tree: Value) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Some(tree))),
            persists: AtomicUsize::new(0),
        }
    }

    pub async fn persisted(&self) -> Option<Value> {
        self.snapshot.read().await.clone()
    }

    pub fn persist_count(&self) -> usize {
        self.persists.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreBackend for InMemoryBackend {
    async fn load(&self) -> StoreResult<Option<Value>> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn persist(&self, tree: &Value) -> StoreResult<()> {
        let mut snapshot = self.snapshot.write().await;
        *snapshot = Some(tree.clone());
        self.persists.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
