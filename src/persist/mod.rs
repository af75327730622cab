pub mod types;
pub use types::*;
pub mod snapshot;
pub mod wal;
pub mod file;
use async_trait::async_trait;

pub use file::JsonFileSnapshotStore;

#[async_trait]
pub trait SnapshotStore {
    async fn load_snapshot(&self) -> PersistResult<Option<SnapshotData>>;
    async fn save_snapshot(&mut self, snapshot: &SnapshotData) -> PersistResult<()>;
}
