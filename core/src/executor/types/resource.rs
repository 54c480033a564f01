use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::task::{Callback, Identity};

/// Opaque handle to an attached resource.
///
/// The core only moves it around; adapters keep any payload keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    pub id: Uuid,
    pub locator: String,
    pub attached_at: DateTime<Utc>,
    pub size_bytes: Option<u64>,
}

impl ResourceHandle {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            locator: locator.into(),
            attached_at: Utc::now(),
            size_bytes: None,
        }
    }

    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }
}

/// Record of a successfully loaded resource.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub identity: Identity,
    pub handle: ResourceHandle,
    pub on_destroy: Option<Callback>,
}
