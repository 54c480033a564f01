use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use bytes::Bytes;
use uuid::Uuid;

/// Payloads of attached resources, keyed by handle id.
#[derive(Default)]
pub struct AttachedRegistry {
    payloads: Mutex<HashMap<Uuid, Bytes>>,
}

impl AttachedRegistry {
    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Bytes>> {
        match self.payloads.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn insert(&self, id: Uuid, payload: Bytes) {
        self.lock().insert(id, payload);
    }

    pub fn remove(&self, id: &Uuid) -> Option<Bytes> {
        self.lock().remove(id)
    }

    pub fn get(&self, id: &Uuid) -> Option<Bytes> {
        self.lock().get(id).cloned()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
