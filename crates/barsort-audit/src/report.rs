// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report document — provenance header plus the audit body, and where the
// report file lives relative to the sorted output.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::audit::AuditReport;

/// Provenance lines printed above the audit sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub source: PathBuf,
    pub output: PathBuf,
    pub page_count: usize,
    /// SHA-256 of the source document as read.
    pub source_sha256: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportHeader {
    /// Header stamped with the current time.
    pub fn new(source: &Path, output: &Path, page_count: usize, source_sha256: String) -> Self {
        Self {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            page_count,
            source_sha256,
            generated_at: Utc::now(),
        }
    }

    /// Full report text: header, blank line, audit body.
    pub fn render_with(&self, audit: &AuditReport) -> String {
        format!("{}\n{}", self, audit)
    }
}

impl fmt::Display for ReportHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source:    {}", self.source.display())?;
        writeln!(f, "Output:    {}", self.output.display())?;
        writeln!(f, "Pages:     {}", self.page_count)?;
        writeln!(f, "SHA-256:   {}", self.source_sha256)?;
        writeln!(
            f,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// `<dir>/<output-stem><suffix>.txt`, next to the sorted output.
pub fn report_path_for(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "barsort".to_string());
    output.with_file_name(format!("{}{}.txt", stem, suffix))
}
