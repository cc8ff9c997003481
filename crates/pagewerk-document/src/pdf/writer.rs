// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: turn laid-out images into a PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::sync::Arc;

use pagewerk_core::error::{PagewerkError, Result};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::image::decode_rgb8;
use crate::layout::Placement;

/// Resolution at which one image pixel is one PDF point; scaling is then
/// simply target points over pixels.
const POINT_DPI: f32 = 72.0;

/// One image bound to its placement.
#[derive(Debug, Clone)]
pub struct PlacedImage {
    pub placement: Placement,
    pub data: Arc<[u8]>,
}

/// Everything a document encoder needs for one run.
#[derive(Debug, Clone)]
pub struct EncodeJob {
    /// Title stored in the document metadata.
    pub title: String,
    /// Page size in millimetres, orientation already applied.
    pub page_width: f32,
    pub page_height: f32,
    pub page_count: usize,
    /// In registry order.
    pub images: Vec<PlacedImage>,
}

/// Produces final document bytes from placed images.
pub trait DocumentEncoder: Send + Sync + 'static {
    fn encode(&self, job: &EncodeJob) -> Result<Vec<u8>>;
}

/// Encoder that writes a PDF with `printpdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfEncoder;

impl DocumentEncoder for PdfEncoder {
    #[instrument(skip_all, fields(pages = job.page_count, images = job.images.len()))]
    fn encode(&self, job: &EncodeJob) -> Result<Vec<u8>> {
        if job.page_count == 0 || job.images.is_empty() {
            return Err(PagewerkError::EncodeFailure(
                "a document needs at least one page".into(),
            ));
        }

        info!(
            title = %job.title,
            page_width = job.page_width,
            page_height = job.page_height,
            "Creating image PDF"
        );

        let page_h_pt = Mm(job.page_height).into_pt().0;
        let mut doc = PdfDocument::new(&job.title);
        let mut page_ops: Vec<Vec<Op>> = (0..job.page_count).map(|_| Vec::new()).collect();

        for placed in &job.images {
            let placement = &placed.placement;
            let ops = page_ops.get_mut(placement.page_index).ok_or_else(|| {
                PagewerkError::EncodeFailure(format!(
                    "image {} placed on page {} of a {}-page document",
                    placement.image_id,
                    placement.page_index + 1,
                    job.page_count
                ))
            })?;

            // Only the header was read before layout; truncated or corrupt
            // pixel data surfaces here as a decode failure for this image.
            let rgb = decode_rgb8(placement.image_id, &placed.data)?;
            let (px_w, px_h) = (rgb.width() as f32, rgb.height() as f32);

            let raw = RawImage {
                pixels: RawImageData::U8(rgb.into_raw()),
                width: px_w as usize,
                height: px_h as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let width_pt = Mm(placement.width).into_pt().0;
            let height_pt = Mm(placement.height).into_pt().0;
            let x_pt = Mm(placement.x).into_pt().0;
            // PDF origin is bottom-left; placements are top-left.
            let y_pt = page_h_pt - Mm(placement.y).into_pt().0 - height_pt;

            ops.push(Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(x_pt)),
                    translate_y: Some(Pt(y_pt)),
                    scale_x: Some(width_pt / px_w),
                    scale_y: Some(height_pt / px_h),
                    dpi: Some(POINT_DPI),
                    rotate: None,
                },
            });

            debug!(
                id = %placement.image_id,
                page = placement.page_index,
                width_pt,
                height_pt,
                "Image placed on page"
            );
        }

        let pages: Vec<PdfPage> = page_ops
            .into_iter()
            .map(|ops| PdfPage::new(Mm(job.page_width), Mm(job.page_height), ops))
            .collect();
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings");
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::decode::tests::encoded_image;
    use ::image::ImageFormat;
    use pagewerk_core::ImageId;

    fn placed(id: u64, page_index: usize, data: Vec<u8>) -> PlacedImage {
        PlacedImage {
            placement: Placement {
                image_id: ImageId(id),
                page_index,
                x: 15.0,
                y: 15.0,
                width: 180.0,
                height: 135.0,
            },
            data: data.into(),
        }
    }

    fn job(page_count: usize, images: Vec<PlacedImage>) -> EncodeJob {
        EncodeJob {
            title: "test".into(),
            page_width: 210.0,
            page_height: 297.0,
            page_count,
            images,
        }
    }

    #[test]
    fn writes_one_pdf_page_per_page_index() {
        let png = encoded_image(8, 6, ImageFormat::Png);
        let bytes = PdfEncoder
            .encode(&job(
                2,
                vec![placed(1, 0, png.clone()), placed(2, 1, png)],
            ))
            .unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        let document = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(document.get_pages().len(), 2);
    }

    #[test]
    fn empty_job_is_rejected() {
        let err = PdfEncoder.encode(&job(0, Vec::new())).unwrap_err();
        assert!(matches!(err, PagewerkError::EncodeFailure(_)));
    }

    #[test]
    fn placement_past_last_page_is_rejected() {
        let png = encoded_image(4, 4, ImageFormat::Png);
        let err = PdfEncoder.encode(&job(1, vec![placed(1, 3, png)])).unwrap_err();
        assert!(matches!(err, PagewerkError::EncodeFailure(_)));
    }

    #[test]
    fn unreadable_pixels_are_a_decode_failure() {
        let err = PdfEncoder
            .encode(&job(1, vec![placed(4, 0, b"junk".to_vec())]))
            .unwrap_err();
        assert!(matches!(err, PagewerkError::DecodeFailure { id: ImageId(4), .. }));
    }
}
