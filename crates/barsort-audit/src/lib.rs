// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// barsort-audit — Post-sort audit of a page sequence (label range, missing
// labels, duplicates, unreadable pages) and SHA-256 document fingerprints.

pub mod audit;
pub mod integrity;
pub mod report;

pub use audit::{AuditReport, Duplicate, ErrorPage};
pub use report::ReportHeader;
