// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content registry: the ordered list of images the user has added.
//
// Sequence order is the only ordering there is: page order in the exported
// document follows it directly. Every operation here is infallible; inputs
// that do not make sense (unknown id, out-of-range index) are no-ops.

use std::sync::Arc;

use tracing::debug;

use crate::acquire::{self, IncomingFile};
use crate::types::ImageId;

/// One image held in the registry.
///
/// Holds bytes only. Intrinsic width and height are read at conversion time
/// and travel as `SizedImage` in `pagewerk-document`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub id: ImageId,
    /// Display name, usually the original file name.
    pub name: String,
    /// Encoded image bytes. Shared so snapshots are cheap.
    pub data: Arc<[u8]>,
}

/// Direction of a single-step reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards the start of the list (index - 1).
    Up,
    /// Towards the end of the list (index + 1).
    Down,
}

/// Ordered collection of images with stable, session-scoped ids.
#[derive(Debug, Clone)]
pub struct ContentRegistry {
    entries: Vec<ImageEntry>,
    next_id: ImageId,
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: ImageId::FIRST,
        }
    }

    /// Append an image to the end of the list and return its new id.
    pub fn append(&mut self, name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> ImageId {
        let id = self.next_id;
        self.next_id = id.next();
        let entry = ImageEntry {
            id,
            name: name.into(),
            data: data.into(),
        };
        debug!(%id, name = %entry.name, bytes = entry.data.len(), "image appended");
        self.entries.push(entry);
        id
    }

    /// Append every incoming file that looks like an image, in order.
    ///
    /// Files that are not images are skipped. Returns the ids assigned to
    /// the accepted files.
    pub fn append_files<I>(&mut self, files: I) -> Vec<ImageId>
    where
        I: IntoIterator<Item = IncomingFile>,
    {
        acquire::accept_images(files)
            .into_iter()
            .map(|file| self.append(file.name, file.data))
            .collect()
    }

    /// Remove the entry with the given id. Returns `false` if no such entry
    /// exists.
    pub fn remove_by_id(&mut self, id: ImageId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.entries.remove(index);
                debug!(%id, index, "image removed");
                true
            }
            None => false,
        }
    }

    /// Swap the entry at `index` with its neighbour in `direction`.
    ///
    /// Returns `false` (and leaves the order untouched) when either index
    /// would fall outside the list.
    pub fn move_adjacent(&mut self, index: usize, direction: MoveDirection) -> bool {
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => index.checked_add(1),
        };
        match target {
            Some(target) if index < self.entries.len() && target < self.entries.len() => {
                self.entries.swap(index, target);
                debug!(from = index, to = target, "image moved");
                true
            }
            _ => false,
        }
    }

    /// Remove every entry and restart id numbering.
    pub fn clear(&mut self) {
        debug!(removed = self.entries.len(), "registry cleared");
        self.entries.clear();
        self.next_id = ImageId::FIRST;
    }

    /// Owned copy of the current order. Image bytes are shared, not copied.
    pub fn snapshot(&self) -> Vec<ImageEntry> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: ImageId) -> Option<&ImageEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Current index of the entry with the given id.
    pub fn position(&self, id: ImageId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}
