use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use loadplan_core::api::{AdapterError, ResourceAdapter, ResourceHandle};

use super::registry::AttachedRegistry;

/// Loads resources from the local filesystem.
///
/// Relative locators resolve against `root`; absolute ones are used as-is.
pub struct FsAdapter {
    root: PathBuf,
    attached: AttachedRegistry,
}

impl FsAdapter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            attached: AttachedRegistry::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, locator: &str) -> PathBuf {
        let path = Path::new(locator);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn is_attached(&self, handle: &ResourceHandle) -> bool {
        self.attached.contains(&handle.id)
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Contents of an attached resource.
    pub fn contents(&self, handle: &ResourceHandle) -> Option<Bytes> {
        self.attached.get(&handle.id)
    }
}

#[async_trait]
impl ResourceAdapter for FsAdapter {
    fn name(&self) -> &str {
        "fs"
    }

    async fn attach(&self, locator: &str) -> Result<ResourceHandle, AdapterError> {
        let path = self.resolve(locator);
        tracing::debug!(target: "loadplan.adapter", adapter = "fs", path = %path.display(), "attach");

        let data = tokio::fs::read(&path)
            .await
            .map_err(|e| AdapterError::io(locator, e))?;
        if data.is_empty() {
            return Err(AdapterError::Rejected(format!("{locator} is empty")));
        }

        let handle = ResourceHandle::new(locator).with_size(data.len() as u64);
        self.attached.insert(handle.id, Bytes::from(data));
        Ok(handle)
    }

    fn detach(&self, handle: ResourceHandle) {
        if self.attached.remove(&handle.id).is_none() {
            tracing::warn!(target: "loadplan.adapter", adapter = "fs", locator = %handle.locator, "detach of unknown handle");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_attach_reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("vendor")).unwrap();
        std::fs::write(dir.path().join("vendor/a.js"), "console.log('a')").unwrap();

        let adapter = FsAdapter::new(dir.path());
        let handle = adapter.attach("vendor/a.js").await.unwrap();

        assert_eq!(handle.locator, "vendor/a.js");
        assert_eq!(handle.size_bytes, Some(16));
        assert!(adapter.is_attached(&handle));
        assert_eq!(
            adapter.contents(&handle).as_deref(),
            Some(&b"console.log('a')"[..])
        );

        adapter.detach(handle.clone());
        assert!(!adapter.is_attached(&handle));
        assert_eq!(adapter.attached_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = FsAdapter::new(dir.path());
        let err = adapter.attach("nope.js").await.unwrap_err();
        assert!(matches!(err, AdapterError::NotFound(ref l) if l == "nope.js"));
    }

    #[tokio::test]
    async fn test_empty_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("empty.js"), "").unwrap();
        let adapter = FsAdapter::new(dir.path());
        assert!(matches!(
            adapter.attach("empty.js").await,
            Err(AdapterError::Rejected(_))
        ));
    }
}
