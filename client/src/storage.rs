//! Optional content-addressed blob storage for oversized payloads.

use async_trait::async_trait;
use thiserror::Error;

/// Content identifier: the 32-byte digest addressing an uploaded blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub [u8; 32]);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("content not found")]
    NotFound,
    #[error("transport: {0}")]
    Transport(String),
}

/// External blob store. When configured on the orchestrator, post content
/// that exceeds its on-ledger slot is uploaded here and referenced by id.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn upload(&self, bytes: &[u8]) -> Result<ContentId, StorageError>;
    async fn retrieve(&self, id: &ContentId) -> Result<Vec<u8>, StorageError>;
}
