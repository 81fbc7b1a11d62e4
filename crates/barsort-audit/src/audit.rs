// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sequence audit — what a sorted batch says about the labels it contains.
//
// Every page lands in exactly one of two buckets:
//   occurrences  label (as integer) -> 1-based source page numbers
//   error_pages  pages whose label is not a plain integer (sentinels included)
//
// From the occurrences the audit derives the label range, the labels missing
// from that range, and the labels seen more than once.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use barsort_core::SortedSequence;
use tracing::{debug, instrument};

/// Above this many missing labels the report prints runs instead of every
/// label. Only reachable when a misread label stretches the range far past
/// any real batch size.
const MAX_LISTED_GAPS: u64 = 100_000;

const SECTION_RULE: &str = "--------------------------------------------------";

/// A page whose label could not be read as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage {
    /// 1-based page number in the source document.
    pub original_page_number: usize,
    /// The label as classified: decoded text or sentinel.
    pub raw_label: String,
}

/// A label found on more than one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate {
    pub label: u64,
    /// 1-based source page numbers, in sorted-sequence order: source order
    /// when the label text is identical, otherwise the text order of the
    /// spellings (`0001` before `001` before `1`).
    pub pages: Vec<usize>,
}

/// Read-only audit of a [`SortedSequence`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditReport {
    occurrences: BTreeMap<u64, Vec<usize>>,
    error_pages: Vec<ErrorPage>,
}

impl AuditReport {
    /// Partition the sequence into numeric occurrences and error pages.
    ///
    /// Never fails: anything that is not a plain run of digits is an error
    /// page.
    #[instrument(skip_all, fields(pages = sequence.len()))]
    pub fn build(sequence: &SortedSequence) -> Self {
        let mut report = Self::default();
        for record in sequence {
            let page = record.original_page_number();
            match record.label.as_number() {
                Some(label) => report.occurrences.entry(label).or_default().push(page),
                None => report.error_pages.push(ErrorPage {
                    original_page_number: page,
                    raw_label: record.label.to_string(),
                }),
            }
        }
        debug!(
            labels = report.occurrences.len(),
            error_pages = report.error_pages.len(),
            "Audit built"
        );
        report
    }

    pub fn occurrences(&self) -> &BTreeMap<u64, Vec<usize>> {
        &self.occurrences
    }

    pub fn error_pages(&self) -> &[ErrorPage] {
        &self.error_pages
    }

    /// `true` when no page carried a numeric label.
    pub fn has_no_valid_labels(&self) -> bool {
        self.occurrences.is_empty()
    }

    /// Lowest and highest numeric label.
    pub fn range(&self) -> Option<(u64, u64)> {
        let min = *self.occurrences.keys().next()?;
        let max = *self.occurrences.keys().next_back()?;
        Some((min, max))
    }

    /// Pages carrying a numeric label.
    pub fn valid_page_count(&self) -> usize {
        self.occurrences.values().map(Vec::len).sum()
    }

    /// Every page audited, valid or not.
    pub fn total_page_count(&self) -> usize {
        self.valid_page_count() + self.error_pages.len()
    }

    /// Labels missing between the lowest and highest label, as ascending
    /// inclusive runs.
    pub fn gap_ranges(&self) -> Vec<RangeInclusive<u64>> {
        let keys: Vec<u64> = self.occurrences.keys().copied().collect();
        keys.windows(2)
            .filter(|pair| pair[1] - pair[0] > 1)
            .map(|pair| (pair[0] + 1)..=(pair[1] - 1))
            .collect()
    }

    /// Number of labels missing from the range.
    pub fn gap_count(&self) -> u64 {
        self.gap_ranges()
            .iter()
            .map(|run| run.end() - run.start() + 1)
            .sum()
    }

    /// Missing labels, ascending.
    pub fn gaps(&self) -> impl Iterator<Item = u64> + '_ {
        self.gap_ranges().into_iter().flatten()
    }

    /// Labels seen on more than one page, ascending by label.
    pub fn duplicates(&self) -> Vec<Duplicate> {
        self.occurrences
            .iter()
            .filter(|(_, pages)| pages.len() > 1)
            .map(|(&label, pages)| Duplicate {
                label,
                pages: pages.clone(),
            })
            .collect()
    }

    /// Human-readable report body.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn fmt_summary(&self, f: &mut fmt::Formatter<'_>, min: u64, max: u64) -> fmt::Result {
        writeln!(f, "1. IDENTIFIED RANGE:")?;
        writeln!(f, " - Lowest label: {:04}", min)?;
        writeln!(f, " - Highest label: {:04}", max)?;
        writeln!(
            f,
            " - Total valid pages processed: {}",
            self.valid_page_count()
        )
    }

    fn fmt_gaps(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "2. SEQUENCE AUDIT (MISSING LABELS):")?;

        let runs = self.gap_ranges();
        if runs.is_empty() {
            return writeln!(f, " [OK] Sequence complete (no gaps).");
        }

        let count = self.gap_count();
        writeln!(f, " [ALERT] {} labels missing from this range:", count)?;
        let listed: Vec<String> = if count <= MAX_LISTED_GAPS {
            runs.into_iter()
                .flatten()
                .map(|label| format!("{:04}", label))
                .collect()
        } else {
            runs.iter()
                .map(|run| {
                    if run.start() == run.end() {
                        format!("{:04}", run.start())
                    } else {
                        format!("{:04}-{:04}", run.start(), run.end())
                    }
                })
                .collect()
        };
        writeln!(f, "{}", listed.join(", "))
    }

    fn fmt_duplicates(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "3. DUPLICATE ANALYSIS:")?;

        let duplicates = self.duplicates();
        if duplicates.is_empty() {
            return writeln!(f, " [OK] No duplicates found.");
        }

        writeln!(
            f,
            " [WARNING] {} repeated labels found:",
            duplicates.len()
        )?;
        for duplicate in &duplicates {
            writeln!(
                f,
                "  - Label {:04}: appears {} times at original pages {:?}",
                duplicate.label,
                duplicate.pages.len(),
                duplicate.pages
            )?;
        }
        Ok(())
    }

    fn fmt_errors(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", SECTION_RULE)?;
        writeln!(f, "4. UNREAD PAGES / ERRORS:")?;
        if self.error_pages.is_empty() {
            return writeln!(f, " No pages with read errors.");
        }
        writeln!(f, " Total pages with errors: {}", self.error_pages.len())?;
        for page in &self.error_pages {
            writeln!(
                f,
                " - Original page {}: {}",
                page.original_page_number, page.raw_label
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== PROCESSING AND AUDIT REPORT ===")?;
        writeln!(f)?;

        match self.range() {
            Some((min, max)) => {
                self.fmt_summary(f, min, max)?;
                self.fmt_gaps(f)?;
                self.fmt_duplicates(f)?;
            }
            None => writeln!(f, "[CRITICAL] No valid barcode label was read.")?,
        }

        self.fmt_errors(f)
    }
}
