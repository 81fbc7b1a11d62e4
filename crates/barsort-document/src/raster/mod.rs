// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rasterization — render one PDF page at a time to a pixel image.

pub mod poppler;

use std::path::Path;

use barsort_core::error::Result;
use image::DynamicImage;

pub use poppler::PopplerRasterizer;

/// Renders a single page of a PDF on disk to an image.
///
/// Implementations render exactly one page per call so that at most one
/// page image is alive at a time.
pub trait Rasterizer {
    /// Render `page_number` (1-based) of the PDF at `document` at `dpi`.
    ///
    /// Backend failures (missing renderer, corrupt page) are reported as
    /// [`barsort_core::BarsortError::RenderError`].
    fn rasterize(&self, document: &Path, page_number: u32, dpi: u32) -> Result<DynamicImage>;
}
