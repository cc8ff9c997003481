// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout engine: decide, for each image in registry order, which page it
// lands on and where. Pure: no decoding, no encoding, no I/O.
//
// Coordinates are millimetres with the origin at the top-left corner of the
// page and y growing downwards. The PDF writer flips them.

use pagewerk_core::error::{PagewerkError, Result};
use pagewerk_core::{Dimensions, ExportConfig, FitMode, ImageId};
use tracing::{debug, instrument};

/// Vertical gap between consecutive images in stack-flow mode, in millimetres.
pub const STACK_GAP_MM: f32 = 10.0;

/// Page geometry and fit policy for one conversion run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Applied on all four sides.
    pub margin: f32,
    pub fit_mode: FitMode,
}

impl LayoutConfig {
    /// Width of the area inside the margins.
    pub fn usable_width(&self) -> f32 {
        (self.page_width - 2.0 * self.margin).max(0.0)
    }

    /// Height of the area inside the margins.
    pub fn usable_height(&self) -> f32 {
        (self.page_height - 2.0 * self.margin).max(0.0)
    }

    /// Reject margins that are negative (or NaN) or that leave no usable
    /// area on the shorter page side.
    pub fn validate(&self) -> Result<()> {
        let short_side = self.page_width.min(self.page_height);
        if self.margin >= 0.0 && 2.0 * self.margin < short_side {
            return Ok(());
        }
        Err(PagewerkError::InvalidMargin {
            margin_mm: self.margin,
            page_width: self.page_width,
            page_height: self.page_height,
        })
    }
}

impl From<&ExportConfig> for LayoutConfig {
    fn from(config: &ExportConfig) -> Self {
        let (page_width, page_height) = config.page_size_mm();
        Self {
            page_width,
            page_height,
            margin: config.margin_mm,
            fit_mode: config.fit_mode,
        }
    }
}

/// An image whose intrinsic size is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizedImage {
    pub id: ImageId,
    pub dimensions: Dimensions,
}

impl SizedImage {
    pub fn new(id: ImageId, width: u32, height: u32) -> Self {
        Self {
            id,
            dimensions: Dimensions::new(width, height),
        }
    }
}

/// Where one image goes: page index plus bounding box in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub image_id: ImageId,
    pub page_index: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Scale `dimensions` into a `box_width` x `box_height` box, preserving the
/// aspect ratio. Width-bound first; falls back to height-bound when the
/// width-bound height would overflow.
///
/// `dimensions` must not contain a zero.
pub fn fit_to_box(dimensions: Dimensions, box_width: f32, box_height: f32) -> (f32, f32) {
    let ratio = dimensions.width as f32 / dimensions.height as f32;
    let mut width = box_width;
    let mut height = width / ratio;
    if height > box_height {
        height = box_height;
        width = height * ratio;
    }
    (width, height)
}

/// Compute one placement per image, in the order given.
///
/// Fails with [`PagewerkError::InvalidMargin`] if the margin does not fit
/// the page, and with [`PagewerkError::InvalidImage`] if any image has a zero
/// dimension; in either case nothing is placed.
#[instrument(skip_all, fields(images = images.len(), fit_mode = ?config.fit_mode))]
pub fn layout(config: &LayoutConfig, images: &[SizedImage]) -> Result<Vec<Placement>> {
    config.validate()?;
    validate_images(images)?;

    let placements = match config.fit_mode {
        FitMode::StackFlow => stack_flow(config, images),
        FitMode::OnePerPageCentered => one_per_page_centered(config, images),
    };

    debug!(
        placements = placements.len(),
        pages = page_count(&placements),
        "Layout complete"
    );
    Ok(placements)
}

/// Number of pages a set of placements spans.
pub fn page_count(placements: &[Placement]) -> usize {
    placements
        .iter()
        .map(|p| p.page_index + 1)
        .max()
        .unwrap_or(0)
}

fn validate_images(images: &[SizedImage]) -> Result<()> {
    match images
        .iter()
        .find(|image| image.dimensions.width == 0 || image.dimensions.height == 0)
    {
        Some(image) => Err(PagewerkError::InvalidImage {
            id: image.id,
            width: image.dimensions.width,
            height: image.dimensions.height,
        }),
        None => Ok(()),
    }
}

fn stack_flow(config: &LayoutConfig, images: &[SizedImage]) -> Vec<Placement> {
    let usable_width = config.usable_width();
    let usable_height = config.usable_height();
    let bottom = config.page_height - config.margin;

    let mut page_index = 0;
    let mut cursor = config.margin;
    let mut page_has_content = false;

    images
        .iter()
        .map(|image| {
            let (width, height) = fit_to_box(image.dimensions, usable_width, usable_height);

            // A fresh page always takes the image; it fits by construction.
            if page_has_content && cursor + height > bottom {
                page_index += 1;
                cursor = config.margin;
            }

            let placement = Placement {
                image_id: image.id,
                page_index,
                x: config.margin,
                y: cursor,
                width,
                height,
            };
            cursor += height + STACK_GAP_MM;
            page_has_content = true;
            placement
        })
        .collect()
}

fn one_per_page_centered(config: &LayoutConfig, images: &[SizedImage]) -> Vec<Placement> {
    let usable_width = config.usable_width();
    let usable_height = config.usable_height();

    images
        .iter()
        .enumerate()
        .map(|(page_index, image)| {
            let (width, height) = fit_to_box(image.dimensions, usable_width, usable_height);
            Placement {
                image_id: image.id,
                page_index,
                x: (config.page_width - width) / 2.0,
                y: (config.page_height - height) / 2.0,
                width,
                height,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagewerk_core::{Orientation, PaperSize};

    const EPS: f32 = 1e-3;

    fn a4(fit_mode: FitMode) -> LayoutConfig {
        LayoutConfig::from(&ExportConfig {
            fit_mode,
            ..Default::default()
        })
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_box(p: &Placement, page: usize, x: f32, y: f32, w: f32, h: f32) {
        assert_eq!(p.page_index, page, "page of {}", p.image_id);
        assert_close(p.x, x);
        assert_close(p.y, y);
        assert_close(p.width, w);
        assert_close(p.height, h);
    }

    #[test]
    fn landscape_then_portrait_breaks_page() {
        let images = [
            SizedImage::new(ImageId(1), 800, 600),
            SizedImage::new(ImageId(2), 600, 800),
        ];
        let placements = layout(&a4(FitMode::StackFlow), &images).unwrap();

        assert_eq!(placements.len(), 2);
        assert_box(&placements[0], 0, 15.0, 15.0, 180.0, 135.0);
        // 180x240 fits the 267mm usable height but not the 122mm left on page 0.
        assert_box(&placements[1], 1, 15.0, 15.0, 180.0, 240.0);
        assert_eq!(page_count(&placements), 2);
    }

    #[test]
    fn small_images_share_a_page() {
        let images: Vec<SizedImage> = (1..=3)
            .map(|n| SizedImage::new(ImageId(n), 1000, 100))
            .collect();
        let placements = layout(&a4(FitMode::StackFlow), &images).unwrap();

        assert_box(&placements[0], 0, 15.0, 15.0, 180.0, 18.0);
        assert_box(&placements[1], 0, 15.0, 43.0, 180.0, 18.0);
        assert_box(&placements[2], 0, 15.0, 71.0, 180.0, 18.0);
        assert_eq!(page_count(&placements), 1);
    }

    #[test]
    fn tall_image_is_height_bound() {
        let images = [SizedImage::new(ImageId(1), 100, 1000)];
        let placements = layout(&a4(FitMode::StackFlow), &images).unwrap();
        assert_box(&placements[0], 0, 15.0, 15.0, 26.7, 267.0);
    }

    #[test]
    fn centered_mode_gives_each_image_its_own_page() {
        let images = [
            SizedImage::new(ImageId(1), 800, 600),
            SizedImage::new(ImageId(2), 600, 800),
            SizedImage::new(ImageId(3), 10, 10),
        ];
        let placements = layout(&a4(FitMode::OnePerPageCentered), &images).unwrap();

        assert_box(&placements[0], 0, 15.0, 81.0, 180.0, 135.0);
        assert_box(&placements[1], 1, 15.0, 28.5, 180.0, 240.0);
        assert_box(&placements[2], 2, 15.0, 58.5, 180.0, 180.0);
        assert_eq!(page_count(&placements), 3);
    }

    #[test]
    fn landscape_orientation_uses_rotated_page() {
        let config = LayoutConfig::from(&ExportConfig {
            paper_size: PaperSize::A4,
            orientation: Orientation::Landscape,
            ..Default::default()
        });
        let images = [SizedImage::new(ImageId(1), 800, 600)];
        let placements = layout(&config, &images).unwrap();
        // 267 wide would need 200.25 tall; the usable height is only 180.
        assert_box(&placements[0], 0, 15.0, 15.0, 240.0, 180.0);
    }

    #[test]
    fn aspect_ratio_is_preserved_within_usable_box() {
        let config = a4(FitMode::StackFlow);
        let sizes = [
            (1, 1),
            (4000, 3000),
            (3000, 4000),
            (1, 5000),
            (5000, 1),
            (1920, 1080),
            (297, 210),
        ];
        for (w, h) in sizes {
            let (width, height) = fit_to_box(
                Dimensions::new(w, h),
                config.usable_width(),
                config.usable_height(),
            );
            let ratio = w as f32 / h as f32;
            assert!(
                ((width / height) - ratio).abs() / ratio < 1e-4,
                "{w}x{h} distorted to {width}x{height}"
            );
            assert!(width <= config.usable_width() + EPS);
            assert!(height <= config.usable_height() + EPS);
        }
    }

    #[test]
    fn zero_height_is_rejected() {
        let images = [SizedImage::new(ImageId(1), 640, 0)];
        let err = layout(&a4(FitMode::StackFlow), &images).unwrap_err();
        assert!(matches!(
            err,
            PagewerkError::InvalidImage { id: ImageId(1), width: 640, height: 0 }
        ));
    }

    #[test]
    fn one_invalid_image_fails_the_whole_run() {
        let images = [
            SizedImage::new(ImageId(1), 800, 600),
            SizedImage::new(ImageId(2), 0, 600),
        ];
        let result = layout(&a4(FitMode::OnePerPageCentered), &images);
        assert!(matches!(result, Err(PagewerkError::InvalidImage { id: ImageId(2), .. })));
    }

    fn with_margin(margin: f32) -> LayoutConfig {
        LayoutConfig {
            margin,
            ..a4(FitMode::StackFlow)
        }
    }

    #[test]
    fn negative_margin_is_rejected() {
        let images = [SizedImage::new(ImageId(1), 800, 600)];
        let err = layout(&with_margin(-50.0), &images).unwrap_err();
        assert!(matches!(err, PagewerkError::InvalidMargin { .. }));
    }

    #[test]
    fn margin_wider_than_half_the_page_is_rejected() {
        let images = [SizedImage::new(ImageId(1), 800, 600)];
        let err = layout(&with_margin(200.0), &images).unwrap_err();
        assert!(matches!(
            err,
            PagewerkError::InvalidMargin { margin_mm, .. } if margin_mm == 200.0
        ));
    }

    #[test]
    fn margin_of_exactly_half_the_short_side_is_rejected() {
        // A4 portrait is 210mm wide; a 105mm margin leaves zero usable width.
        assert!(with_margin(105.0).validate().is_err());
        assert!(with_margin(104.5).validate().is_ok());
    }

    #[test]
    fn nan_margin_is_rejected() {
        assert!(with_margin(f32::NAN).validate().is_err());
    }

    #[test]
    fn zero_margin_uses_the_full_page() {
        let images = [SizedImage::new(ImageId(1), 800, 600)];
        let placements = layout(&with_margin(0.0), &images).unwrap();
        assert_box(&placements[0], 0, 0.0, 0.0, 210.0, 157.5);
    }

    #[test]
    fn empty_input_yields_no_pages() {
        let placements = layout(&a4(FitMode::StackFlow), &[]).unwrap();
        assert!(placements.is_empty());
        assert_eq!(page_count(&placements), 0);
    }
}
