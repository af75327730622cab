use thiserror::Error;

use crate::engine::types::{BookError, SignatureDetails};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("format mismatch: {0}")]
    FormatMismatch(String),
    #[error("journal entry {line} could not be applied: {source}")]
    Replay { line: usize, source: BookError },
}

pub type PersistResult<T> = Result<T, PersistError>;

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SnapshotData {
    pub version: u32,
    pub accounts: Vec<SnapshotAccount>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SnapshotAccount {
    pub offerer: String,
    pub signatures: Vec<SignatureDetails>,
}
