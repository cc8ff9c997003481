// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagewerk-document: turning an ordered set of images into a document.
//
// Provides image header probing and decoding, the page layout engine
// (stack-flow and one-per-page-centered fit modes), a printpdf-backed encoder,
// and the async conversion pipeline that ties them together.

pub mod convert;
pub mod image;
pub mod layout;
pub mod pdf;

// Re-export the primary items so callers can use `pagewerk_document::Converter` etc.
pub use convert::{Converter, ExportedDocument};
pub use self::image::{ImageCrateDecoder, ImageDecoder};
pub use layout::{LayoutConfig, Placement, SizedImage, layout};
pub use pdf::{DocumentEncoder, EncodeJob, PdfEncoder, PlacedImage};
