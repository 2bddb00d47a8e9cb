// SPDX-License-Identifier: MIT OR Apache-2.0
//! Catalog of imported media items.

use crate::item::{MediaId, MediaItem};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The catalog of imported media items.
///
/// Holders of a [`MediaId`] must treat a failed [`MediaCatalog::find`] as a
/// degraded but valid state; removal from the catalog never chases down or
/// repairs outstanding references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaCatalog {
    items: IndexMap<MediaId, MediaItem>,
}

impl MediaCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, returning its ID
    pub fn add(&mut self, item: MediaItem) -> MediaId {
        let id = item.id;
        tracing::debug!(media = %item.name, "added media item");
        self.items.insert(id, item);
        id
    }

    /// Remove an item. Outstanding references become dangling and render
    /// as fallbacks; they are not touched here.
    pub fn remove(&mut self, id: MediaId) -> Option<MediaItem> {
        self.items.shift_remove(&id)
    }

    /// Look up an item by ID
    pub fn find(&self, id: MediaId) -> Option<&MediaItem> {
        self.items.get(&id)
    }

    /// Iterate over all items
    pub fn items(&self) -> impl Iterator<Item = &MediaItem> {
        self.items.values()
    }

    /// Number of items in the catalog
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::MediaType;

    #[test]
    fn test_add_and_find() {
        let mut catalog = MediaCatalog::new();
        let id = catalog.add(MediaItem::new("a.mp4", MediaType::Video, "file:///a.mp4"));
        assert_eq!(catalog.find(id).unwrap().name, "a.mp4");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_dangling_reference_is_a_miss() {
        let mut catalog = MediaCatalog::new();
        let id = catalog.add(MediaItem::new("a.mp4", MediaType::Video, "file:///a.mp4"));
        catalog.remove(id);
        assert!(catalog.find(id).is_none());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut catalog = MediaCatalog::new();
        assert!(catalog.remove(MediaId::new()).is_none());
    }
}
