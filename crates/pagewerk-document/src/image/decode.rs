// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image decoding: intrinsic dimensions for layout, full pixels for encoding.

use std::io::Cursor;

use image::{ImageReader, RgbImage};
use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::{Dimensions, ImageId};
use tracing::{debug, instrument};

/// Source of intrinsic image dimensions.
///
/// Called on tokio's blocking pool, one call per image, possibly many at
/// once.
pub trait ImageDecoder: Send + Sync + 'static {
    /// Decode enough of `data` to know its pixel size.
    fn dimensions(&self, id: ImageId, data: &[u8]) -> Result<Dimensions>;
}

/// Decoder backed by the `image` crate. Only reads the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    fn dimensions(&self, id: ImageId, data: &[u8]) -> Result<Dimensions> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|err| decode_failure(id, err))?;
        let (width, height) = reader.into_dimensions().map_err(|err| decode_failure(id, err))?;
        debug!(%id, width, height, "Image dimensions read");
        Ok(Dimensions::new(width, height))
    }
}

/// Fully decode `data` into 8-bit RGB pixels.
pub fn decode_rgb8(id: ImageId, data: &[u8]) -> Result<RgbImage> {
    let image = image::load_from_memory(data).map_err(|err| decode_failure(id, err))?;
    Ok(image.to_rgb8())
}

fn decode_failure(id: ImageId, err: impl std::fmt::Display) -> PagewerkError {
    PagewerkError::DecodeFailure {
        id,
        detail: err.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};

    /// Encode a blank image of the given size in `format`.
    pub(crate) fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Vec::new();
        DynamicImage::new_rgb8(width, height)
            .write_to(&mut Cursor::new(&mut buffer), format)
            .unwrap();
        buffer
    }

    #[test]
    fn reads_png_dimensions() {
        let data = encoded_image(40, 30, ImageFormat::Png);
        let dims = ImageCrateDecoder.dimensions(ImageId(1), &data).unwrap();
        assert_eq!(dims, Dimensions::new(40, 30));
    }

    #[test]
    fn reads_jpeg_dimensions() {
        let data = encoded_image(12, 20, ImageFormat::Jpeg);
        let dims = ImageCrateDecoder.dimensions(ImageId(1), &data).unwrap();
        assert_eq!(dims, Dimensions::new(12, 20));
    }

    #[test]
    fn garbage_is_a_decode_failure() {
        let err = ImageCrateDecoder
            .dimensions(ImageId(9), b"definitely not an image")
            .unwrap_err();
        assert!(matches!(err, PagewerkError::DecodeFailure { id: ImageId(9), .. }));
    }

    #[test]
    fn rgb8_keeps_pixel_size() {
        let data = encoded_image(5, 7, ImageFormat::Png);
        let rgb = decode_rgb8(ImageId(1), &data).unwrap();
        assert_eq!((rgb.width(), rgb.height()), (5, 7));
    }
}
