/// Optimistic synchronization engine for Wishdeck
///
/// Applies mutations to the in-memory snapshot with zero perceived
/// latency, reconciles them against the remote service in the
/// background, and keeps the durable local store coherent with memory
/// across confirmations and rollbacks.

pub mod engine;
pub mod query;

pub use engine::{SyncEngine, SyncStatus};

use std::sync::Arc;

use anyhow::Result;

use wishdeck_core::LocalStore;
use wishdeck_remote::RemoteService;

/// Builder for constructing a `SyncEngine`.
pub struct EngineBuilder {
    store: Option<LocalStore>,
    remote: Option<Arc<dyn RemoteService>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            remote: None,
        }
    }

    pub fn with_store(mut self, store: LocalStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteService>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn build(self) -> Result<SyncEngine> {
        let store = self
            .store
            .ok_or_else(|| anyhow::anyhow!("a local store is required"))?;
        let remote = self
            .remote
            .ok_or_else(|| anyhow::anyhow!("a remote service is required"))?;
        Ok(SyncEngine::new(store, remote))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishdeck_remote::MockRemote;

    #[test]
    fn test_builder_requires_remote() {
        let dir = tempfile::tempdir().unwrap();
        let result = EngineBuilder::new()
            .with_store(LocalStore::open(dir.path()))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_seeds_from_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path());
        let seeded = vec![wishdeck_core::Stack {
            id: wishdeck_core::RecordId::generate(),
            name: "Books".to_string(),
            cover: wishdeck_core::Cover::random_gradient(),
            created_at: wishdeck_core::now_millis(),
        }];
        store.save_stacks(&seeded);

        let engine = EngineBuilder::new()
            .with_store(store)
            .with_remote(Arc::new(MockRemote::without_latency()))
            .build()
            .unwrap();

        // The snapshot is seeded from the store before any remote call
        assert_eq!(engine.stacks(), seeded);
        assert_eq!(engine.sync_status(), SyncStatus::Idle);
    }
}
