// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — barcode symbol decoding, page label extraction, and
// per-page classification of a whole document.

pub mod classify;
pub mod label;
pub mod symbols;

pub use classify::PageClassifier;
pub use label::LabelDecoder;
pub use symbols::{SymbolDecoder, ZbarDecoder};
