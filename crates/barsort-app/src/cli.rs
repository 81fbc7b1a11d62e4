// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command line — subcommands and the flags that override the config file.

use std::path::PathBuf;

use barsort_core::error::Result;
use barsort_core::{SortConfig, Symbology};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "barsort",
    about = "Reorder scanned PDFs by the barcode printed on each page",
    long_about = "Reorder scanned PDFs by the barcode printed on each page.\n\
                  \n\
                  Every page is rendered, the top strip is searched for a barcode, and the\n\
                  pages are written back in label order. An audit report listing missing\n\
                  labels, duplicates and unreadable pages is written next to the output.",
    version
)]
pub struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log per-page details
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sort pages by barcode label and write the audit report
    Sort {
        /// Scanned PDF to sort
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Where to write the sorted PDF
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        options: SortOptions,
    },

    /// Remove pages (1-based) from a PDF
    Delete {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Page to remove; repeat for several
        #[arg(short, long = "page", value_name = "N", required = true, num_args = 1..)]
        pages: Vec<u32>,
    },

    /// Concatenate PDFs in argument order
    Merge {
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[arg(value_name = "INPUTS", required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,
    },
}

/// Flags for `sort`. Anything given here wins over the config file.
#[derive(Args, Debug, Default)]
pub struct SortOptions {
    /// JSON settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rasterization resolution
    #[arg(long, value_name = "DPI")]
    pub dpi: Option<u32>,

    /// Height of the barcode strip from the top edge, in centimetres
    #[arg(long, value_name = "CM")]
    pub crop_height_cm: Option<f64>,

    /// Directory containing pdftoppm
    #[arg(long, value_name = "DIR")]
    pub renderer_path: Option<PathBuf>,

    /// Directory containing zbarimg
    #[arg(long, value_name = "DIR")]
    pub decoder_path: Option<PathBuf>,

    /// Accepted barcode format; repeat for several (code128, code39, ean13, ...)
    #[arg(long = "symbology", value_name = "NAME", value_parser = parse_symbology)]
    pub symbologies: Vec<Symbology>,

    /// Otsu-binarize the strip before decoding
    #[arg(long)]
    pub binarize: bool,

    /// Suffix appended to the output file stem for the report
    #[arg(long, value_name = "SUFFIX")]
    pub report_suffix: Option<String>,
}

impl SortOptions {
    /// Config file (or defaults) with the command line layered on top.
    pub fn resolve(&self) -> Result<SortConfig> {
        let mut config = match &self.config {
            Some(path) => SortConfig::load(path)?,
            None => SortConfig::default(),
        };

        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if let Some(cm) = self.crop_height_cm {
            config.crop_height_cm = cm;
        }
        if let Some(dir) = &self.renderer_path {
            config.renderer_path = Some(dir.clone());
        }
        if let Some(dir) = &self.decoder_path {
            config.decoder_path = Some(dir.clone());
        }
        if !self.symbologies.is_empty() {
            config.symbologies = self.symbologies.clone();
        }
        if self.binarize {
            config.binarize = true;
        }
        if let Some(suffix) = &self.report_suffix {
            config.report_suffix = suffix.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_symbology(name: &str) -> std::result::Result<Symbology, String> {
    Symbology::from_name(&name.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown symbology '{}'", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use barsort_core::BarsortError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("barsort").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn sort_flags_override_defaults() {
        let cli = parse(&[
            "sort",
            "in.pdf",
            "out.pdf",
            "--dpi",
            "300",
            "--symbology",
            "code128",
            "--symbology",
            "I25",
            "--binarize",
        ]);
        let Command::Sort { options, input, .. } = cli.command else {
            panic!("expected sort");
        };
        assert_eq!(input, PathBuf::from("in.pdf"));

        let config = options.resolve().unwrap();
        assert_eq!(config.dpi, 300);
        assert_eq!(config.symbologies, vec![Symbology::Code128, Symbology::I25]);
        assert!(config.binarize);
        assert_eq!(config.crop_height_cm, 7.0);
    }

    #[test]
    fn command_line_wins_over_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("barsort.json");
        std::fs::write(&path, r#"{ "dpi": 200, "crop_height_cm": 5.0 }"#).unwrap();

        let options = SortOptions {
            config: Some(path),
            dpi: Some(100),
            ..SortOptions::default()
        };
        let config = options.resolve().unwrap();
        assert_eq!(config.dpi, 100);
        assert_eq!(config.crop_height_cm, 5.0);
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let options = SortOptions {
            dpi: Some(5),
            ..SortOptions::default()
        };
        assert!(matches!(options.resolve(), Err(BarsortError::Config(_))));
    }

    #[test]
    fn unknown_symbology_fails_to_parse() {
        let result = Cli::try_parse_from(["barsort", "sort", "a.pdf", "b.pdf", "--symbology", "qr"]);
        assert!(result.is_err());
    }

    #[test]
    fn delete_requires_pages() {
        assert!(Cli::try_parse_from(["barsort", "delete", "a.pdf", "b.pdf"]).is_err());
        let cli = parse(&["delete", "a.pdf", "b.pdf", "--page", "2", "-p", "5"]);
        let Command::Delete { pages, .. } = cli.command else {
            panic!("expected delete");
        };
        assert_eq!(pages, vec![2, 5]);
    }

    #[test]
    fn verbosity_sets_default_filter() {
        assert_eq!(parse(&["-v", "merge", "o.pdf", "a.pdf"]).default_log_level(), "debug");
        assert_eq!(parse(&["merge", "o.pdf", "a.pdf", "-q"]).default_log_level(), "warn");
        assert_eq!(parse(&["merge", "o.pdf", "a.pdf"]).default_log_level(), "info");
        assert!(Cli::try_parse_from(["barsort", "-q", "-v", "merge", "o.pdf", "a.pdf"]).is_err());
    }
}
