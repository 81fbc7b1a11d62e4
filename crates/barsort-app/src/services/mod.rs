// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — one entry point per subcommand, wiring the document, audit
// and core crates together.

pub mod edit;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod fixtures;

use std::path::Path;

use barsort_audit::integrity;
use barsort_core::error::Result;
use barsort_document::write_atomic;

/// Write `bytes` atomically and confirm the file on disk matches. Returns the
/// SHA-256 of what was written.
pub fn persist_verified(path: &Path, bytes: &[u8]) -> Result<String> {
    write_atomic(path, bytes)?;
    integrity::verify_written(path, bytes)
}
