// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sequence sorter — turns per-page classification records into the order the
// output document is emitted in.

use crate::error::{BarsortError, Result};
use crate::types::PageRecord;

/// Page records in emission order.
///
/// Always holds exactly one record for every source index in
/// `0..len()`; construction fails otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedSequence {
    records: Vec<PageRecord>,
}

impl SortedSequence {
    /// Stable sort by `(label, original_index)`.
    ///
    /// Labels collate with [`crate::Label::collate`], so sentinel pages end up
    /// last. Pages sharing a label keep their source order.
    pub fn sort(mut records: Vec<PageRecord>) -> Result<Self> {
        check_dense(&records)?;
        records.sort_by(|a, b| {
            a.label
                .collate(&b.label)
                .then(a.original_index.cmp(&b.original_index))
        });
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageRecord> {
        self.records.iter()
    }

    /// Source indices (0-based) in emission order.
    pub fn source_order(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.original_index).collect()
    }
}

impl<'a> IntoIterator for &'a SortedSequence {
    type Item = &'a PageRecord;
    type IntoIter = std::slice::Iter<'a, PageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Every index in `0..records.len()` must appear exactly once.
fn check_dense(records: &[PageRecord]) -> Result<()> {
    let mut seen = vec![false; records.len()];
    for record in records {
        let slot = seen.get_mut(record.original_index).ok_or_else(|| {
            BarsortError::InvalidSequence(format!(
                "page index {} out of range for {} pages",
                record.original_index,
                records.len()
            ))
        })?;
        if *slot {
            return Err(BarsortError::InvalidSequence(format!(
                "page index {} classified twice",
                record.original_index
            )));
        }
        *slot = true;
    }
    Ok(())
}
