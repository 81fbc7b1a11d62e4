// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Region of interest — the strip of a rendered page that is searched for the
// barcode.
//
// Layout precondition: the barcode is printed within a fixed distance of the
// top edge of every page. Nothing below the strip is ever decoded, so a
// barcode placed lower on the page reads as unreadable.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::otsu_level;
use tracing::debug;

/// The part of a rendered page handed to the barcode decoder.
///
/// Transformations consume `self` and return the new strip, so the full-page
/// render is released as soon as it has been cropped.
///
/// ```ignore
/// let strip = PageStrip::from_page(render)
///     .crop_top(413)
///     .binarize_otsu();
/// ```
pub struct PageStrip {
    image: DynamicImage,
}

impl PageStrip {
    /// Wrap a full-page render.
    pub fn from_page(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Keep only the top `height_px` rows when the image is taller than
    /// that; otherwise keep the whole image.
    pub fn crop_top(self, height_px: u32) -> Self {
        let height_px = height_px.max(1);
        if self.image.height() <= height_px {
            return self;
        }
        let strip = self.image.crop_imm(0, 0, self.image.width(), height_px);
        debug!(
            from_h = self.image.height(),
            to_h = strip.height(),
            "Cropped to top strip"
        );
        // `self.image` (the full render) is dropped here.
        Self { image: strip }
    }

    /// Global black/white threshold at the Otsu level of the strip.
    pub fn binarize_otsu(self) -> Self {
        let gray = self.image.to_luma8();
        let level = otsu_level(&gray);
        let binary = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
            if gray.get_pixel(x, y)[0] > level {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        debug!(level, "Strip binarized");
        Self {
            image: DynamicImage::ImageLuma8(binary),
        }
    }
}
