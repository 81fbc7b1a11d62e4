// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// barsort-document — Document processing for the Barsort page sorter.
//
// Provides PDF operations (open, reorder, delete, merge, atomic write), page
// rasterization through poppler's `pdftoppm`, region-of-interest image
// helpers, and barcode label decoding through zbar's `zbarimg`.

pub mod image;
pub mod pdf;
pub mod raster;
pub mod scan;

mod tool;

// Re-export the primary structs so callers can use `barsort_document::PdfReader` etc.
pub use self::image::region::PageStrip;
pub use pdf::reader::PdfReader;
pub use pdf::writer::{write_atomic, write_report};
pub use raster::{PopplerRasterizer, Rasterizer};
pub use scan::classify::PageClassifier;
pub use scan::label::LabelDecoder;
pub use scan::symbols::{SymbolDecoder, ZbarDecoder};
