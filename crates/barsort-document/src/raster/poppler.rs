// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Poppler backend — shells out to `pdftoppm` (poppler-utils).
//
//   pdftoppm -png -r <dpi> -f <n> -l <n> -singlefile input.pdf <scratch>/page
//
// The PNG lands in a scratch directory that is removed when the call returns,
// whatever the outcome.

use std::path::{Path, PathBuf};

use barsort_core::error::{BarsortError, Result};
use image::DynamicImage;
use tracing::{debug, instrument};

use super::Rasterizer;
use crate::tool;

const PDFTOPPM: &str = "pdftoppm";

/// Rasterizer backed by poppler's `pdftoppm`.
#[derive(Debug, Clone, Default)]
pub struct PopplerRasterizer {
    /// Directory holding the poppler binaries; `None` uses `PATH`.
    tool_dir: Option<PathBuf>,
}

impl PopplerRasterizer {
    pub fn new(tool_dir: Option<PathBuf>) -> Self {
        Self { tool_dir }
    }

    /// Verify that `pdftoppm` can be started. Call once before a run so a
    /// missing renderer aborts the run instead of failing every page.
    pub fn probe(&self) -> Result<()> {
        tool::probe(self.tool_dir.as_deref(), PDFTOPPM, "-v")
    }
}

impl Rasterizer for PopplerRasterizer {
    #[instrument(skip(self, document))]
    fn rasterize(&self, document: &Path, page_number: u32, dpi: u32) -> Result<DynamicImage> {
        let scratch = tempfile::tempdir().map_err(|err| {
            BarsortError::RenderError(format!("cannot create scratch directory: {}", err))
        })?;
        let prefix = scratch.path().join("page");
        let page = page_number.to_string();

        let output = tool::command(self.tool_dir.as_deref(), PDFTOPPM)
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-f")
            .arg(&page)
            .arg("-l")
            .arg(&page)
            .arg("-singlefile")
            .arg(document)
            .arg(&prefix)
            .output()
            .map_err(|err| {
                BarsortError::RenderError(format!("failed to execute pdftoppm: {}", err))
            })?;

        if !output.status.success() {
            return Err(BarsortError::RenderError(format!(
                "pdftoppm failed on page {} ({}): {}",
                page_number,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let png_path = prefix.with_extension("png");
        let image = image::open(&png_path).map_err(|err| {
            BarsortError::RenderError(format!(
                "cannot load rendered page {}: {}",
                page_number, err
            ))
        })?;

        debug!(width = image.width(), height = image.height(), "Page rasterized");
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_renderer_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let rasterizer = PopplerRasterizer::new(Some(dir.path().to_path_buf()));

        let err = rasterizer
            .rasterize(Path::new("scan.pdf"), 1, 150)
            .unwrap_err();
        assert!(matches!(err, BarsortError::RenderError(_)));
        assert!(matches!(
            rasterizer.probe(),
            Err(BarsortError::ToolUnavailable(_))
        ));
    }
}
