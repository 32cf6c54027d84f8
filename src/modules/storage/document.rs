//! Whole-file JSON documents with atomic replace.

use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::io::AsyncWriteExt;

use super::StoreResult;

/// One collection persisted as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
}

impl Document {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> StoreResult<bool> {
        Ok(tokio::fs::try_exists(&self.path).await?)
    }

    /// Parse the whole file
    pub async fn read<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        let raw = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Serialise to a sibling temp file, flush it, then rename it over the
    /// target so readers never observe a partial document.
    pub async fn write<T: Serialize>(&self, items: &[T]) -> StoreResult<()> {
        let body = serde_json::to_vec_pretty(items)?;
        let tmp = self.temp_path();

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&body).await?;
        file.sync_all().await?;
        drop(file);

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, uuid::Uuid::new_v4()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let doc = Document::new(dir.path().join("numbers.json"));
        assert!(!doc.exists().await.unwrap());

        doc.write(&[1, 2, 3]).await.unwrap();
        assert!(doc.exists().await.unwrap());
        assert_eq!(doc.read::<i32>().await.unwrap(), vec![1, 2, 3]);

        let raw = std::fs::read_to_string(doc.path()).unwrap();
        assert!(raw.contains('\n'), "document should be pretty-printed");
    }

    #[tokio::test]
    async fn test_write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let doc = Document::new(dir.path().join("items.json"));
        doc.write(&["a"]).await.unwrap();
        doc.write(&["b"]).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(doc.read::<String>().await.unwrap(), vec!["b".to_string()]);
    }

    #[tokio::test]
    async fn test_read_rejects_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{").unwrap();
        let doc = Document::new(path);
        assert!(doc.read::<i32>().await.is_err());
    }
}
