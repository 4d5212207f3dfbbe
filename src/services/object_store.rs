use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Artifact staging abstraction
///
/// The training export and the model-output artifact cross this seam. The
/// bucket-backed implementation lives with the orchestrator; in this crate the
/// seam is satisfied by a plain directory, which is also what the tests use.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the object stored under `key`
    async fn get(&self, key: &str) -> AppResult<Vec<u8>>;

    /// Store `bytes` under `key`, replacing any previous object
    async fn put(&self, key: &str, bytes: &[u8]) -> AppResult<()>;
}

/// `ObjectStore` backed by a local directory
pub struct DirObjectStore {
    root: PathBuf,
}

impl DirObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait::async_trait]
impl ObjectStore for DirObjectStore {
    async fn get(&self, key: &str) -> AppResult<Vec<u8>> {
        let path = self.object_path(key);
        tokio::fs::read(&path)
            .await
            .map_err(|e| AppError::Storage(format!("read {}: {}", path.display(), e)))
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> AppResult<()> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("create {}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Storage(format!("write {}: {}", path.display(), e)))
    }
}
