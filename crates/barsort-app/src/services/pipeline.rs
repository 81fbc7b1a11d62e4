// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sort pipeline — classify every page, sort by label, audit the result, and
// write the reordered PDF plus its report.
//
//   PdfReader ─┬─ PageClassifier ── SortedSequence ─┬─ AuditReport ── report.txt
//              └────────────────────────────────────┴─ reassemble ─── output.pdf

use std::fmt;
use std::path::{Path, PathBuf};

use barsort_audit::report::report_path_for;
use barsort_audit::{AuditReport, ReportHeader, integrity};
use barsort_core::error::Result;
use barsort_core::{SortConfig, SortedSequence};
use barsort_document::{PageClassifier, PdfReader, Rasterizer, SymbolDecoder, write_report};
use tracing::{info, instrument, warn};

use super::persist_verified;

/// What one run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub page_count: usize,
    pub valid_pages: usize,
    pub error_pages: usize,
    pub gap_count: u64,
    pub duplicate_count: usize,
    pub output_path: PathBuf,
    pub output_sha256: String,
    pub report_path: PathBuf,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sorted {} pages -> {}", self.page_count, self.output_path.display())?;
        writeln!(f, "  sha256: {}", self.output_sha256)?;
        writeln!(
            f,
            "  valid: {}  errors: {}  missing labels: {}  duplicated labels: {}",
            self.valid_pages, self.error_pages, self.gap_count, self.duplicate_count
        )?;
        write!(f, "  report: {}", self.report_path.display())
    }
}

/// One configured sort pipeline. Holds the backends and every setting the
/// run needs.
pub struct SortPipeline<R, D> {
    config: SortConfig,
    classifier: PageClassifier<R, D>,
}

impl<R: Rasterizer, D: SymbolDecoder> SortPipeline<R, D> {
    pub fn new(config: SortConfig, rasterizer: R, decoder: D) -> Self {
        let classifier = PageClassifier::new(rasterizer, decoder, &config);
        Self { config, classifier }
    }

    /// Sort `input` into `output` and write the audit report next to it.
    ///
    /// A missing or unparsable input aborts before any page is rendered.
    /// Unreadable pages never abort; they end up at the back of the output
    /// and in the report's error section.
    #[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
    pub fn run(&self, input: &Path, output: &Path) -> Result<RunSummary> {
        let reader = PdfReader::open(input)?;
        let source_sha256 = integrity::hash_file(input)?;
        let page_count = reader.page_count();

        let records = self.classifier.classify(input, page_count);
        let sequence = SortedSequence::sort(records)?;
        let audit = AuditReport::build(&sequence);

        if audit.has_no_valid_labels() {
            warn!(page_count, "No page carried a readable numeric label");
        }

        let sorted = reader.reassemble(&sequence)?;
        let output_sha256 = persist_verified(output, &sorted)?;

        let report_path = report_path_for(output, &self.config.report_suffix);
        let header = ReportHeader::new(input, output, page_count, source_sha256);
        write_report(&report_path, &header.render_with(&audit))?;

        let summary = RunSummary {
            page_count,
            valid_pages: audit.valid_page_count(),
            error_pages: audit.error_pages().len(),
            gap_count: audit.gap_count(),
            duplicate_count: audit.duplicates().len(),
            output_path: output.to_path_buf(),
            output_sha256,
            report_path,
        };
        info!(
            pages = summary.page_count,
            valid = summary.valid_pages,
            errors = summary.error_pages,
            gaps = summary.gap_count,
            duplicates = summary.duplicate_count,
            "Sort complete"
        );
        Ok(summary)
    }
}
