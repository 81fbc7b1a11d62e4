// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — region-of-interest cropping and binarization of page renders.

pub mod region;

pub use region::PageStrip;
