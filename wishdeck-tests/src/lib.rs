/// Shared fixtures for the integration tests.
use std::sync::Arc;

use tempfile::TempDir;

use wishdeck_core::LocalStore;
use wishdeck_engine::{EngineBuilder, SyncEngine};
use wishdeck_remote::MockRemote;

/// Engine over a fresh temp-dir store and a zero-latency mock remote.
/// The mock handle stays available for failure injection and
/// server-state inspection; the temp dir must outlive the engine.
pub fn test_engine() -> (SyncEngine, Arc<MockRemote>, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let remote = Arc::new(MockRemote::without_latency());
    let engine = EngineBuilder::new()
        .with_store(LocalStore::open(dir.path()))
        .with_remote(remote.clone())
        .build()
        .expect("build engine");
    (engine, remote, dir)
}

/// Engine with real (shortened) simulated latency, for tests that
/// need to observe the optimistic window before reconciliation.
pub fn test_engine_with_latency(ms: u64) -> (Arc<SyncEngine>, Arc<MockRemote>, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let remote = Arc::new(MockRemote::new().with_latency(ms, ms));
    let engine = EngineBuilder::new()
        .with_store(LocalStore::open(dir.path()))
        .with_remote(remote.clone())
        .build()
        .expect("build engine");
    (Arc::new(engine), remote, dir)
}

/// Rebuild an engine over an existing store directory, as after a
/// process restart.
pub fn reopen_engine(dir: &TempDir, remote: Arc<MockRemote>) -> SyncEngine {
    EngineBuilder::new()
        .with_store(LocalStore::open(dir.path()))
        .with_remote(remote)
        .build()
        .expect("rebuild engine")
}
