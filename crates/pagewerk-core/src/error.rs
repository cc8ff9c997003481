// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pagewerk.

use thiserror::Error;

use crate::types::ImageId;

/// Top-level error type for all Pagewerk operations.
///
/// Registry operations never produce one of these; only a conversion run
/// (decode, layout, encode) and the configuration/file helpers around it do.
#[derive(Debug, Error)]
pub enum PagewerkError {
    // -- Conversion errors --
    #[error("image {id} has invalid dimensions {width}x{height}")]
    InvalidImage { id: ImageId, width: u32, height: u32 },

    #[error("failed to decode image {id}: {detail}")]
    DecodeFailure { id: ImageId, detail: String },

    #[error("document encoding failed: {0}")]
    EncodeFailure(String),

    #[error("no images to convert")]
    NothingToConvert,

    #[error("margin of {margin_mm}mm does not fit a {page_width}x{page_height}mm page")]
    InvalidMargin {
        margin_mm: f32,
        page_width: f32,
        page_height: f32,
    },

    // -- Ambient --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of a [`PagewerkError`], so the UI can pick a
/// message without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// An image has a zero dimension.
    InvalidImage,
    /// An image source could not be decoded.
    Decode,
    /// The document encoder rejected the assembled placements.
    Encode,
    /// Anything outside the conversion pipeline proper.
    Other,
}

impl PagewerkError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidImage { .. } => FailureKind::InvalidImage,
            Self::DecodeFailure { .. } => FailureKind::Decode,
            Self::EncodeFailure(_) => FailureKind::Encode,
            Self::NothingToConvert
            | Self::InvalidMargin { .. }
            | Self::Io(_)
            | Self::Serialization(_) => FailureKind::Other,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PagewerkError>;
