// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Barsort.
//
// Only structural failures live here. Per-page data-quality problems (a page
// that cannot be rendered, a barcode that cannot be read) are carried as
// `Label` values and never surface through this enum past the classifier.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Barsort operations.
#[derive(Debug, Error)]
pub enum BarsortError {
    // -- Input --
    #[error("input document not found: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("page {page} out of range (document has {total} pages)")]
    PageOutOfRange { page: u32, total: usize },

    // -- Per-page collaborators --
    #[error("rasterization failed: {0}")]
    RenderError(String),

    #[error("barcode decoding failed: {0}")]
    DecodeError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("external tool unavailable: {0}")]
    ToolUnavailable(String),

    // -- Ordering --
    #[error("invalid page sequence: {0}")]
    InvalidSequence(String),

    // -- Output --
    #[error("failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BarsortError>;
