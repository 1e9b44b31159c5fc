// SPDX-License-Identifier: MPL-2.0
//! Displayable preview handles and their release accounting.

use bytes::Bytes;
use iced::widget::image::Handle;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts preview creations and releases.
///
/// Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    counters: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    created: AtomicUsize,
    released: AtomicUsize,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a preview for the given encoded image bytes.
    ///
    /// The handle keeps a reference to `bytes` rather than a copy.
    pub fn create(&self, bytes: Bytes) -> PreviewResource {
        self.counters.created.fetch_add(1, Ordering::SeqCst);
        PreviewResource {
            handle: Handle::from_bytes(bytes),
            registry: self.clone(),
        }
    }

    pub fn created(&self) -> usize {
        self.counters.created.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.counters.released.load(Ordering::SeqCst)
    }

    /// Number of previews currently alive.
    pub fn live(&self) -> usize {
        self.created().saturating_sub(self.released())
    }
}

/// A revocable handle used by the view to draw the selected image.
///
/// Released exactly once, either through [`PreviewResource::release`] or on drop.
#[derive(Debug)]
pub struct PreviewResource {
    handle: Handle,
    registry: PreviewRegistry,
}

impl PreviewResource {
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Releases the preview. Consuming `self` rules out a second release.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for PreviewResource {
    fn drop(&mut self) {
        self.registry
            .counters
            .released
            .fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_is_counted_once() {
        let registry = PreviewRegistry::new();
        let preview = registry.create(Bytes::from_static(b"bytes"));
        assert_eq!(registry.live(), 1);

        preview.release();
        assert_eq!(registry.created(), 1);
        assert_eq!(registry.released(), 1);
        assert_eq!(registry.live(), 0);
    }

    #[test]
    fn dropping_releases() {
        let registry = PreviewRegistry::new();
        {
            let _preview = registry.create(Bytes::from_static(b"bytes"));
            assert_eq!(registry.live(), 1);
        }
        assert_eq!(registry.live(), 0);
    }

    #[test]
    fn clones_share_counters() {
        let registry = PreviewRegistry::new();
        let observer = registry.clone();
        let preview = registry.create(Bytes::from_static(b"bytes"));
        assert_eq!(observer.live(), 1);
        drop(preview);
        assert_eq!(observer.released(), 1);
    }
}
