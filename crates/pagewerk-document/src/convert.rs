// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion pipeline: registry snapshot → decode → layout → encode.
//
// Decodes run concurrently on tokio's blocking pool and are awaited in
// registry order, so placements never depend on which decode finishes first.
// The first failure abandons the run; nothing partial is returned.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::{ExportConfig, ImageEntry};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::image::{ImageCrateDecoder, ImageDecoder};
use crate::layout::{LayoutConfig, Placement, SizedImage, layout, page_count};
use crate::pdf::{DocumentEncoder, EncodeJob, PdfEncoder, PlacedImage};

/// Result of a successful conversion run.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// File name derived from the export settings, including extension.
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
    /// One per input image, in registry order.
    pub placements: Vec<Placement>,
}

impl ExportedDocument {
    /// Write the document into `dir` under its file name and return the path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!("Wrote PDF to {}", path.display());
        Ok(path)
    }
}

/// Runs conversions with a pluggable decoder and encoder.
pub struct Converter<D = ImageCrateDecoder, E = PdfEncoder> {
    decoder: Arc<D>,
    encoder: Arc<E>,
}

impl Converter {
    /// Converter using the `image` crate and `printpdf`.
    pub fn pdf() -> Self {
        Self::new(ImageCrateDecoder, PdfEncoder)
    }
}

impl<D: ImageDecoder, E: DocumentEncoder> Converter<D, E> {
    pub fn new(decoder: D, encoder: E) -> Self {
        Self {
            decoder: Arc::new(decoder),
            encoder: Arc::new(encoder),
        }
    }

    /// Convert a registry snapshot into a finished document.
    #[instrument(skip_all, fields(images = snapshot.len(), paper = ?config.paper_size))]
    pub async fn convert(
        &self,
        snapshot: &[ImageEntry],
        config: &ExportConfig,
    ) -> Result<ExportedDocument> {
        if snapshot.is_empty() {
            return Err(PagewerkError::NothingToConvert);
        }

        let sized = self.decode_all(snapshot).await?;

        let layout_config = LayoutConfig::from(config);
        let placements = layout(&layout_config, &sized)?;
        let page_count = page_count(&placements);

        let file_name = config.file_name();
        let title = Path::new(&file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(file_name.as_str())
            .to_owned();

        let job = EncodeJob {
            title,
            page_width: layout_config.page_width,
            page_height: layout_config.page_height,
            page_count,
            images: placements
                .iter()
                .zip(snapshot)
                .map(|(placement, entry)| PlacedImage {
                    placement: *placement,
                    data: Arc::clone(&entry.data),
                })
                .collect(),
        };

        let encoder = Arc::clone(&self.encoder);
        let bytes = tokio::task::spawn_blocking(move || encoder.encode(&job))
            .await
            .map_err(|err| PagewerkError::EncodeFailure(format!("encoder task failed: {err}")))??;

        info!(
            file_name = %file_name,
            page_count,
            bytes = bytes.len(),
            "Conversion complete"
        );

        Ok(ExportedDocument {
            file_name,
            bytes,
            page_count,
            placements,
        })
    }

    /// Decode every entry's dimensions concurrently, returning them in
    /// snapshot order.
    pub async fn decode_all(&self, snapshot: &[ImageEntry]) -> Result<Vec<SizedImage>> {
        let handles: Vec<JoinHandle<Result<_>>> = snapshot
            .iter()
            .map(|entry| {
                let decoder = Arc::clone(&self.decoder);
                let data = Arc::clone(&entry.data);
                let id = entry.id;
                tokio::task::spawn_blocking(move || decoder.dimensions(id, &data))
            })
            .collect();

        let mut sized = Vec::with_capacity(snapshot.len());
        for (entry, handle) in snapshot.iter().zip(handles) {
            let dimensions = handle.await.map_err(|err| PagewerkError::DecodeFailure {
                id: entry.id,
                detail: format!("decode task failed: {err}"),
            })??;
            debug!(id = %entry.id, ?dimensions, "Decoded");
            sized.push(SizedImage {
                id: entry.id,
                dimensions,
            });
        }
        Ok(sized)
    }
}
