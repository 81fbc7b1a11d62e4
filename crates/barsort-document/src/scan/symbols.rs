// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barcode symbol decoding.
//
// The zbar backend shells out to `zbarimg` with every symbology disabled
// except the requested ones:
//
//   zbarimg --quiet --raw -Sdisable -Scode128.enable ... strip.png
//
// Exit status 0 means at least one symbol was found (one payload per stdout
// line); exit status 4 means the image was processed and nothing was found.

use std::io::Write;
use std::path::PathBuf;

use barsort_core::Symbology;
use barsort_core::error::{BarsortError, Result};
use image::{DynamicImage, ImageFormat};
use tracing::{debug, instrument};

use crate::tool;

const ZBARIMG: &str = "zbarimg";

/// `zbarimg` exit status when no barcode was detected.
const ZBAR_NOTHING_FOUND: i32 = 4;

/// Finds barcodes in an image.
pub trait SymbolDecoder {
    /// Return the payloads of every barcode of the requested symbologies,
    /// in detection order. An empty list means nothing was found; `Err`
    /// means the decoder itself failed.
    fn decode(&self, image: &DynamicImage, symbologies: &[Symbology]) -> Result<Vec<String>>;
}

/// Symbol decoder backed by zbar's `zbarimg`.
#[derive(Debug, Clone, Default)]
pub struct ZbarDecoder {
    /// Directory holding `zbarimg`; `None` uses `PATH`.
    tool_dir: Option<PathBuf>,
}

impl ZbarDecoder {
    pub fn new(tool_dir: Option<PathBuf>) -> Self {
        Self { tool_dir }
    }

    /// Verify that `zbarimg` can be started.
    pub fn probe(&self) -> Result<()> {
        tool::probe(self.tool_dir.as_deref(), ZBARIMG, "--version")
    }
}

impl SymbolDecoder for ZbarDecoder {
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn decode(&self, image: &DynamicImage, symbologies: &[Symbology]) -> Result<Vec<String>> {
        let mut scratch = tempfile::Builder::new()
            .prefix("barsort-strip-")
            .suffix(".png")
            .tempfile()
            .map_err(|err| {
                BarsortError::DecodeError(format!("cannot create scratch image: {}", err))
            })?;

        image
            .write_to(&mut scratch, ImageFormat::Png)
            .map_err(|err| BarsortError::ImageError(format!("PNG encoding failed: {}", err)))?;
        scratch.flush()?;

        let mut command = tool::command(self.tool_dir.as_deref(), ZBARIMG);
        command.arg("--quiet").arg("--raw").arg("-Sdisable");
        for symbology in symbologies {
            command.arg(format!("-S{}.enable", symbology.name()));
        }
        let output = command.arg(scratch.path()).output().map_err(|err| {
            BarsortError::DecodeError(format!("failed to execute zbarimg: {}", err))
        })?;

        match output.status.code() {
            Some(0) => {
                let payloads = parse_payloads(&output.stdout);
                debug!(found = payloads.len(), "Barcodes decoded");
                Ok(payloads)
            }
            Some(ZBAR_NOTHING_FOUND) => Ok(Vec::new()),
            _ => Err(BarsortError::DecodeError(format!(
                "zbarimg failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }
}

/// One payload per non-empty line of `zbarimg --raw` output.
fn parse_payloads(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
