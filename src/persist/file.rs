use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::persist::types::{PersistResult, SnapshotData};
use crate::persist::SnapshotStore;

/// Snapshot kept as one pretty-printed JSON document on disk.
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshotStore {
    async fn load_snapshot(&self) -> PersistResult<Option<SnapshotData>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let snapshot: SnapshotData = serde_json::from_str(&text)?;
        Ok(Some(snapshot))
    }

    async fn save_snapshot(&mut self, snapshot: &SnapshotData) -> PersistResult<()> {
        let json = serde_json::to_string_pretty(snapshot)?;

        // replace atomically via a sibling temp file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        info!(path = %self.path.display(), accounts = snapshot.accounts.len(), "Saved snapshot");
        Ok(())
    }
}
