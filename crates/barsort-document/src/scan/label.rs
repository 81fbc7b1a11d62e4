// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label decoder — reads the identifying barcode from the top strip of a
// rendered page.

use barsort_core::error::Result;
use barsort_core::{Label, SortConfig, Symbology};
use image::DynamicImage;
use tracing::debug;

use super::symbols::SymbolDecoder;
use crate::image::PageStrip;

/// Turns a full-page render into a [`Label`].
///
/// Only the top `crop_height_px` rows of the page are searched (see
/// [`PageStrip`] for the layout precondition). The first barcode found wins;
/// no barcode at all yields [`Label::Unreadable`]. Decoder failures are
/// returned as errors and left for the caller to downgrade.
pub struct LabelDecoder<D> {
    decoder: D,
    crop_height_px: u32,
    symbologies: Vec<Symbology>,
    binarize: bool,
}

impl<D: SymbolDecoder> LabelDecoder<D> {
    pub fn new(decoder: D, config: &SortConfig) -> Self {
        Self {
            decoder,
            crop_height_px: config.crop_height_px(),
            symbologies: config.symbologies.clone(),
            binarize: config.binarize,
        }
    }

    pub fn crop_height_px(&self) -> u32 {
        self.crop_height_px
    }

    /// Decode the label of one page. Consumes the render so it is released
    /// as soon as the strip has been cut from it.
    pub fn decode(&self, page: DynamicImage) -> Result<Label> {
        let mut strip = PageStrip::from_page(page).crop_top(self.crop_height_px);
        if self.binarize {
            strip = strip.binarize_otsu();
        }
        debug!(
            width = strip.width(),
            height = strip.height(),
            binarized = self.binarize,
            "Decoding top strip"
        );

        let payloads = self
            .decoder
            .decode(strip.as_dynamic(), &self.symbologies)?;

        match payloads.into_iter().next() {
            Some(text) => Ok(Label::Decoded(text)),
            None => {
                debug!(
                    crop_height_px = self.crop_height_px,
                    "No barcode in top strip"
                );
                Ok(Label::Unreadable)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barsort_core::BarsortError;
    use std::cell::RefCell;

    /// Records the strip it was handed and returns canned payloads.
    struct Canned {
        payloads: Result<Vec<String>>,
        seen: RefCell<Vec<(u32, u32)>>,
    }

    impl Canned {
        fn new(payloads: Result<Vec<String>>) -> Self {
            Self {
                payloads,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl SymbolDecoder for Canned {
        fn decode(&self, image: &DynamicImage, _: &[Symbology]) -> Result<Vec<String>> {
            self.seen.borrow_mut().push((image.width(), image.height()));
            match &self.payloads {
                Ok(p) => Ok(p.clone()),
                Err(err) => Err(BarsortError::DecodeError(err.to_string())),
            }
        }
    }

    fn config() -> SortConfig {
        SortConfig::default()
    }

    #[test]
    fn first_payload_wins() {
        let canned = Canned::new(Ok(vec!["0007".into(), "0008".into()]));
        let decoder = LabelDecoder::new(canned, &config());
        let label = decoder.decode(DynamicImage::new_luma8(1240, 1754)).unwrap();
        assert_eq!(label, Label::Decoded("0007".into()));
    }

    #[test]
    fn nothing_found_is_unreadable() {
        let decoder = LabelDecoder::new(Canned::new(Ok(Vec::new())), &config());
        let label = decoder.decode(DynamicImage::new_luma8(100, 100)).unwrap();
        assert_eq!(label, Label::Unreadable);
    }

    #[test]
    fn decoder_sees_only_the_top_strip() {
        let decoder = LabelDecoder::new(Canned::new(Ok(Vec::new())), &config());
        decoder.decode(DynamicImage::new_luma8(1240, 1754)).unwrap();
        decoder.decode(DynamicImage::new_luma8(1240, 300)).unwrap();
        assert_eq!(decoder.crop_height_px(), 413);
        assert_eq!(
            *decoder.decoder.seen.borrow(),
            vec![(1240, 413), (1240, 300)]
        );
    }

    #[test]
    fn decoder_failure_propagates() {
        let canned = Canned::new(Err(BarsortError::DecodeError("zbar crashed".into())));
        let decoder = LabelDecoder::new(canned, &config());
        assert!(decoder.decode(DynamicImage::new_luma8(10, 10)).is_err());
    }

    #[test]
    fn binarize_option_keeps_strip_size() {
        let cfg = SortConfig {
            binarize: true,
            ..SortConfig::default()
        };
        let decoder = LabelDecoder::new(Canned::new(Ok(vec!["1".into()])), &cfg);
        let label = decoder.decode(DynamicImage::new_rgb8(640, 900)).unwrap();
        assert_eq!(label, Label::Decoded("1".into()));
        assert_eq!(*decoder.decoder.seen.borrow(), vec![(640, 413)]);
    }
}
