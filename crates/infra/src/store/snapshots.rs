use async_trait::async_trait;
use parking_lot::RwLock;
use slotwatch_core::SnapshotStore;
use slotwatch_domain::{Result, StatsSnapshot};

/// Holds the latest published snapshot.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    current: RwLock<Option<StatsSnapshot>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn publish(&self, snapshot: StatsSnapshot) -> Result<()> {
        *self.current.write() = Some(snapshot);
        Ok(())
    }

    async fn current(&self) -> Result<Option<StatsSnapshot>> {
        Ok(self.current.read().clone())
    }
}
