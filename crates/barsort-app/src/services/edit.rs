// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page editing commands — delete pages from one PDF, merge several into one.
// Inputs are fully opened and validated before the output is touched.

use std::fmt;
use std::path::{Path, PathBuf};

use barsort_core::BarsortError;
use barsort_core::error::Result;
use barsort_document::PdfReader;
use tracing::{info, instrument};

use super::persist_verified;

/// Result of a delete or merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub output_path: PathBuf,
    pub page_count: usize,
    pub output_sha256: String,
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} pages -> {} (sha256 {})",
            self.page_count,
            self.output_path.display(),
            self.output_sha256
        )
    }
}

/// Remove the 1-based `pages` from `input`.
#[instrument(skip_all, fields(input = %input.display(), pages = pages.len()))]
pub fn delete_pages(input: &Path, output: &Path, pages: &[u32]) -> Result<EditOutcome> {
    let reader = PdfReader::open(input)?;
    let bytes = reader.delete_pages(pages)?;
    finish(output, &bytes)
}

/// Concatenate `inputs` in order into `output`.
#[instrument(skip_all, fields(documents = inputs.len()))]
pub fn merge_documents(output: &Path, inputs: &[PathBuf]) -> Result<EditOutcome> {
    let (first, rest) = inputs
        .split_first()
        .ok_or_else(|| BarsortError::Config("merge needs at least one input PDF".to_string()))?;

    let base = PdfReader::open(first)?;
    let others = rest
        .iter()
        .map(PdfReader::open)
        .collect::<Result<Vec<_>>>()?;

    let bytes = base.merge(&others)?;
    finish(output, &bytes)
}

fn finish(output: &Path, bytes: &[u8]) -> Result<EditOutcome> {
    let output_sha256 = persist_verified(output, bytes)?;
    let page_count = PdfReader::from_bytes(bytes)?.page_count();
    info!(path = %output.display(), pages = page_count, "Output written");
    Ok(EditOutcome {
        output_path: output.to_path_buf(),
        page_count,
        output_sha256,
    })
}
