// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Barsort — Core types, ordering, configuration and error definitions shared
// across all crates.

pub mod config;
pub mod error;
pub mod sequence;
pub mod types;

pub use config::SortConfig;
pub use error::BarsortError;
pub use sequence::SortedSequence;
pub use types::*;
