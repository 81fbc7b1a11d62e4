// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Integrity — SHA-256 fingerprints of source and output documents.

use std::fs;
use std::path::Path;

use barsort_core::error::{BarsortError, Result};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Lowercase hex SHA-256 of `data`.
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Lowercase hex SHA-256 of a file on disk.
pub fn hash_file(path: &Path) -> Result<String> {
    let data = fs::read(path)?;
    Ok(hash_bytes(&data))
}

/// Fail with [`BarsortError::IntegrityMismatch`] unless `data` hashes to
/// `expected_hex`.
pub fn verify_hash(data: &[u8], expected_hex: &str) -> Result<()> {
    let actual = hash_bytes(data);
    if actual.eq_ignore_ascii_case(expected_hex) {
        Ok(())
    } else {
        Err(BarsortError::IntegrityMismatch {
            expected: expected_hex.to_owned(),
            actual,
        })
    }
}

/// Read a freshly written file back and check it against the bytes that
/// were meant to be written.
pub fn verify_written(path: &Path, intended: &[u8]) -> Result<String> {
    let expected = hash_bytes(intended);
    let on_disk = fs::read(path)?;
    verify_hash(&on_disk, &expected)?;
    debug!(path = %path.display(), sha256 = %expected, "Output verified");
    Ok(expected)
}
