use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::render::surface::Surface;

/// Opaque reference to a rendered preview, handed to clients so a later
/// export can rasterize exactly what they saw.
pub type SurfaceHandle = Uuid;

/// Recently rendered surfaces. Bounded: once `limit` entries are held the
/// oldest one is dropped.
#[derive(Debug)]
pub struct SurfaceRegistry {
    limit: usize,
    inner: Mutex<Entries>,
}

#[derive(Debug, Default)]
struct Entries {
    by_handle: HashMap<SurfaceHandle, Arc<Surface>>,
    order: VecDeque<SurfaceHandle>,
}

impl SurfaceRegistry {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            inner: Mutex::new(Entries::default()),
        }
    }

    pub fn insert(&self, surface: Surface) -> SurfaceHandle {
        let handle = Uuid::new_v4();
        let mut entries = self.lock();
        entries.by_handle.insert(handle, Arc::new(surface));
        entries.order.push_back(handle);
        while entries.order.len() > self.limit {
            if let Some(oldest) = entries.order.pop_front() {
                entries.by_handle.remove(&oldest);
                tracing::debug!(handle = %oldest, "evicted preview surface");
            }
        }
        handle
    }

    pub fn get(&self, handle: &SurfaceHandle) -> Option<Arc<Surface>> {
        self.lock().by_handle.get(handle).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Entries> {
        // Every mutation leaves both maps consistent, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemplateKind;
    use crate::style::Rgb;

    fn surface() -> Surface {
        Surface::new(TemplateKind::Classic, Rgb::WHITE)
    }

    #[test]
    fn test_insert_then_get() {
        let registry = SurfaceRegistry::new(4);
        let handle = registry.insert(surface());
        assert!(registry.get(&handle).is_some());
        assert!(registry.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_oldest_entry_is_evicted_past_limit() {
        let registry = SurfaceRegistry::new(2);
        let first = registry.insert(surface());
        let second = registry.insert(surface());
        let third = registry.insert(surface());
        assert_eq!(registry.len(), 2);
        assert!(registry.get(&first).is_none());
        assert!(registry.get(&second).is_some());
        assert!(registry.get(&third).is_some());
    }
}
