// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File acquisition: decide which dropped or picked files are images.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::types::ImageKind;

/// A file handed over by the UI (drag-and-drop or file picker).
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub data: Arc<[u8]>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Classify a file as an image, first by extension and then by sniffing the
/// leading bytes.
pub fn detect_kind(file: &IncomingFile) -> Option<ImageKind> {
    let by_extension = Path::new(&file.name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageKind::from_extension);

    by_extension.or_else(|| {
        image::guess_format(&file.data)
            .ok()
            .and_then(ImageKind::from_image_format)
    })
}

/// Keep only the files that are images, preserving their order.
pub fn accept_images<I>(files: I) -> Vec<IncomingFile>
where
    I: IntoIterator<Item = IncomingFile>,
{
    files
        .into_iter()
        .filter(|file| match detect_kind(file) {
            Some(kind) => {
                debug!(name = %file.name, mime = kind.mime_type(), "accepted file");
                true
            }
            None => {
                warn!(name = %file.name, "skipping file that is not an image");
                false
            }
        })
        .collect()
}
