// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory workspace — the ordered list of staged images.
//
// Nothing here touches the filesystem. The workspace lives for one session
// and is handed by reference to the composer and exporters.

use tracing::debug;

use crate::types::{ImageId, StagedImage};

/// Ordered collection of staged images.
///
/// Order is insertion order and decides page order in the PDF and index
/// order in the archive.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    images: Vec<StagedImage>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an image and return its id.
    ///
    /// Ids stay unique: an image whose id is already staged (a clone added
    /// twice) is stored under a fresh id, and that id is returned.
    pub fn add(&mut self, image: StagedImage) -> ImageId {
        let image = if self.get(image.id()).is_some() {
            debug!(id = %image.id(), name = image.name(), "Duplicate id re-keyed");
            image.with_fresh_id()
        } else {
            image
        };
        let id = image.id();
        debug!(
            %id,
            name = image.name(),
            bytes = image.byte_size(),
            added_at = %image.added_at(),
            "Image staged"
        );
        self.images.push(image);
        id
    }

    /// Remove one image, keeping the relative order of the rest.
    pub fn remove(&mut self, id: ImageId) -> Option<StagedImage> {
        let index = self.images.iter().position(|img| img.id() == id)?;
        let removed = self.images.remove(index);
        debug!(%id, index, "Image removed");
        Some(removed)
    }

    /// Drop every staged image.
    pub fn clear(&mut self) {
        debug!(count = self.images.len(), "Workspace cleared");
        self.images.clear();
    }

    pub fn get(&self, id: ImageId) -> Option<&StagedImage> {
        self.images.iter().find(|img| img.id() == id)
    }

    pub fn images(&self) -> &[StagedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Sum of the encoded payload sizes.
    pub fn total_bytes(&self) -> u64 {
        self.images.iter().map(StagedImage::byte_size).sum()
    }
}

impl Extend<StagedImage> for Workspace {
    fn extend<T: IntoIterator<Item = StagedImage>>(&mut self, iter: T) {
        for image in iter {
            self.add(image);
        }
    }
}
