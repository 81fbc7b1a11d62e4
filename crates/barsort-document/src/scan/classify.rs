// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page classifier — renders every page of a document, one at a time, and
// records the label found on it.

use std::path::Path;

use barsort_core::{BarsortError, Label, PageRecord, SortConfig};
use tracing::{debug, info, instrument, warn};

use super::label::LabelDecoder;
use super::symbols::SymbolDecoder;
use crate::raster::Rasterizer;

/// Classifies the pages of a PDF on disk.
///
/// A page that cannot be rendered or decoded becomes [`Label::Fatal`] and the
/// run moves on to the next page; `classify` itself never fails.
pub struct PageClassifier<R, D> {
    rasterizer: R,
    labels: LabelDecoder<D>,
    dpi: u32,
}

impl<R: Rasterizer, D: SymbolDecoder> PageClassifier<R, D> {
    pub fn new(rasterizer: R, decoder: D, config: &SortConfig) -> Self {
        Self {
            rasterizer,
            labels: LabelDecoder::new(decoder, config),
            dpi: config.dpi,
        }
    }

    /// One record per page, in source order. `original_index` is the page's
    /// position in the source, independent of when it was processed.
    #[instrument(skip(self, document), fields(path = %document.display()))]
    pub fn classify(&self, document: &Path, page_count: usize) -> Vec<PageRecord> {
        info!(
            page_count,
            dpi = self.dpi,
            crop_height_px = self.labels.crop_height_px(),
            "Classifying pages"
        );
        (0..page_count)
            .map(|index| {
                info!(page = index + 1, total = page_count, "Processing page");
                PageRecord::new(self.classify_page(document, index), index)
            })
            .collect()
    }

    fn classify_page(&self, document: &Path, index: usize) -> Label {
        let page_number = index + 1;
        let outcome = u32::try_from(page_number)
            .map_err(|_| {
                BarsortError::RenderError(format!(
                    "page number {} exceeds renderer range",
                    page_number
                ))
            })
            .and_then(|number| self.rasterizer.rasterize(document, number, self.dpi))
            .and_then(|render| self.labels.decode(render));

        match outcome {
            Ok(label) => {
                debug!(page = page_number, %label, "Page classified");
                label
            }
            Err(err) => {
                warn!(page = page_number, error = %err, "Page failed, marking as fatal");
                Label::Fatal(err.to_string())
            }
        }
    }
}
