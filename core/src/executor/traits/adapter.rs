use async_trait::async_trait;

use crate::error::AdapterError;
use crate::executor::types::ResourceHandle;

/// Platform-specific attach/detach of a resource.
#[async_trait]
pub trait ResourceAdapter: Send + Sync {
    fn name(&self) -> &str;

    /// Load the resource behind `locator`. Resolves once it is usable.
    async fn attach(&self, locator: &str) -> Result<ResourceHandle, AdapterError>;

    /// Remove a previously attached resource. Never fails.
    fn detach(&self, handle: ResourceHandle);
}
