use crate::core::ModelStore;
use crate::utils::error::ModelError;
use std::path::{Path, PathBuf};

/// Reads model artifacts from the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalModelStore {
    base_path: PathBuf,
}

impl LocalModelStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Default for LocalModelStore {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ModelStore for LocalModelStore {
    async fn read_artifact(&self, name: &str) -> Result<Vec<u8>, ModelError> {
        // 絕對路徑會直接取代 base_path
        let full_path = self.base_path.join(name);
        tracing::debug!("Reading model artifact from {}", full_path.display());
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }
}
