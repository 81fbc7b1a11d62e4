// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BarsortError, Result};
use crate::types::Symbology;

const CM_PER_INCH: f64 = 2.54;

/// Settings for one sort run, passed explicitly into the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Rasterization resolution. Higher values read small barcodes more
    /// reliably but cost time and memory per page.
    pub dpi: u32,
    /// Height of the strip, measured from the top edge of the page, that is
    /// searched for the barcode.
    pub crop_height_cm: f64,
    /// Directory containing `pdftoppm`. `None` resolves it from `PATH`.
    pub renderer_path: Option<PathBuf>,
    /// Directory containing `zbarimg`. `None` resolves it from `PATH`.
    pub decoder_path: Option<PathBuf>,
    /// Barcode formats the decoder accepts.
    pub symbologies: Vec<Symbology>,
    /// Otsu-binarize the strip before decoding (helps with grey, low-contrast scans).
    pub binarize: bool,
    /// Appended to the output file stem to name the audit report.
    pub report_suffix: String,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            dpi: 150,
            crop_height_cm: 7.0,
            renderer_path: None,
            decoder_path: None,
            symbologies: Symbology::DEFAULT_SET.to_vec(),
            binarize: false,
            report_suffix: "_relatorio".to_string(),
        }
    }
}

impl SortConfig {
    /// Load settings from a JSON file. Fields absent from the file keep their
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|err| {
            BarsortError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every page unreadable or the
    /// rasterizer unusable.
    pub fn validate(&self) -> Result<()> {
        if !(36..=1200).contains(&self.dpi) {
            return Err(BarsortError::Config(format!(
                "dpi must be between 36 and 1200, got {}",
                self.dpi
            )));
        }
        if !self.crop_height_cm.is_finite() || self.crop_height_cm <= 0.0 {
            return Err(BarsortError::Config(format!(
                "crop height must be a positive length in cm, got {}",
                self.crop_height_cm
            )));
        }
        if self.symbologies.is_empty() {
            return Err(BarsortError::Config(
                "at least one barcode symbology must be enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Crop height in pixels at the configured resolution.
    pub fn crop_height_px(&self) -> u32 {
        crop_height_px(self.crop_height_cm, self.dpi)
    }
}

/// Convert a physical length from the top edge into a pixel distance.
pub fn crop_height_px(height_cm: f64, dpi: u32) -> u32 {
    (height_cm / CM_PER_INCH * f64::from(dpi)).round() as u32
}
