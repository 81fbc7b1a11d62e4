// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: barcode symbologies, page labels and per-page records.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Rendered text of [`Label::Unreadable`].
pub const UNREADABLE_SENTINEL: &str = "ZZZZ_ERRO_LEITURA";

/// Rendered text of [`Label::Fatal`].
pub const FATAL_SENTINEL: &str = "ZZZZ_ERRO_FATAL";

/// Barcode symbologies the decoder can be asked to look for.
///
/// Serialised names match the zbar configuration symbol names so they can be
/// passed straight through to `zbarimg -S<name>.enable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbology {
    Code128,
    Code39,
    Code93,
    Ean13,
    Ean8,
    Upca,
    /// Interleaved 2 of 5.
    I25,
    Codabar,
}

impl Symbology {
    /// The symbology set enabled when nothing is configured.
    pub const DEFAULT_SET: [Symbology; 3] = [Self::Code128, Self::Code39, Self::Ean13];

    /// Name used by zbar and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Code128 => "code128",
            Self::Code39 => "code39",
            Self::Code93 => "code93",
            Self::Ean13 => "ean13",
            Self::Ean8 => "ean8",
            Self::Upca => "upca",
            Self::I25 => "i25",
            Self::Codabar => "codabar",
        }
    }

    /// Parse a symbology from its zbar name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "code128" => Some(Self::Code128),
            "code39" => Some(Self::Code39),
            "code93" => Some(Self::Code93),
            "ean13" => Some(Self::Ean13),
            "ean8" => Some(Self::Ean8),
            "upca" => Some(Self::Upca),
            "i25" => Some(Self::I25),
            "codabar" => Some(Self::Codabar),
            _ => None,
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The identifying label of a single page.
///
/// Failures to read a page are data, not errors: `Unreadable` means the
/// decoder ran and found nothing, `Fatal` means rendering or decoding the page
/// blew up. Both collate after every decoded label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Decoded(String),
    Unreadable,
    /// Carries the cause for logging; it does not take part in ordering.
    Fatal(String),
}

impl Label {
    /// Text used for ordering among sentinels and in the audit report.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Decoded(text) => text,
            Self::Unreadable => UNREADABLE_SENTINEL,
            Self::Fatal(_) => FATAL_SENTINEL,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Self::Decoded(_))
    }

    /// Key the page order is built from: every decoded label comes before
    /// every sentinel, then labels compare as text.
    pub fn collation_key(&self) -> (bool, &str) {
        (self.is_sentinel(), self.as_str())
    }

    /// Compare two labels by [`Label::collation_key`].
    pub fn collate(&self, other: &Self) -> Ordering {
        self.collation_key().cmp(&other.collation_key())
    }

    /// Numeric value of the label, if it is a plain run of ASCII digits that
    /// fits in a `u64`. Sentinels never parse.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Decoded(text) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
                text.parse().ok()
            }
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result for one source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub label: Label,
    /// 0-based position of the page in the source document.
    pub original_index: usize,
}

impl PageRecord {
    pub fn new(label: Label, original_index: usize) -> Self {
        Self {
            label,
            original_index,
        }
    }

    /// 1-based page number in the source document, as shown to operators.
    pub fn original_page_number(&self) -> usize {
        self.original_index + 1
    }
}
