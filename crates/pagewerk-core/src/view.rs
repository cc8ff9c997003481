// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Render model: what the UI needs to draw the content list, derived from a
// registry snapshot. Event handlers map back onto registry calls by id and
// index; nothing here mutates the registry.

use crate::registry::ContentRegistry;
use crate::types::ImageId;

/// One row of the content list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRow {
    pub id: ImageId,
    pub name: String,
    /// Zero-based index, passed back to `move_adjacent`.
    pub position: usize,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

/// Everything the content panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentView {
    pub rows: Vec<ContentRow>,
    /// "1 image", "3 images", or nothing when the list is empty.
    pub count_label: Option<String>,
    pub can_convert: bool,
    pub can_clear: bool,
}

impl ContentView {
    pub fn project(registry: &ContentRegistry) -> Self {
        let len = registry.len();
        let rows = registry
            .entries()
            .iter()
            .enumerate()
            .map(|(position, entry)| ContentRow {
                id: entry.id,
                name: entry.name.clone(),
                position,
                can_move_up: position > 0,
                can_move_down: position + 1 < len,
            })
            .collect();

        let count_label = match len {
            0 => None,
            1 => Some("1 image".to_owned()),
            n => Some(format!("{n} images")),
        };

        Self {
            rows,
            count_label,
            can_convert: len > 0,
            can_clear: len > 0,
        }
    }
}
