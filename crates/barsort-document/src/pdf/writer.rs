// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output writer — persist serialised documents and reports.
//
// Files are written to a temporary sibling in the destination directory and
// renamed into place once fully flushed, so an interrupted run never leaves a
// truncated output under the final name.

use std::io::Write;
use std::path::Path;

use barsort_core::error::{BarsortError, Result};
use tracing::{info, instrument};

/// Atomically write `bytes` to `path`.
#[instrument(skip_all, fields(path = %path.as_ref().display(), bytes_len = bytes.len()))]
pub fn write_atomic(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let wrap = |source: std::io::Error| BarsortError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".barsort-")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(wrap)?;
    temp.write_all(bytes).map_err(wrap)?;
    temp.as_file().sync_all().map_err(wrap)?;
    temp.persist(path).map_err(|err| wrap(err.error))?;

    info!("Wrote {}", path.display());
    Ok(())
}

/// Atomically write a UTF-8 text report.
pub fn write_report(path: impl AsRef<Path>, text: &str) -> Result<()> {
    write_atomic(path, text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");

        // No temporary siblings left behind.
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn report_is_utf8_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out_relatorio.txt");
        write_report(&path, "Página 3: ZZZZ_ERRO_LEITURA\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Página 3: ZZZZ_ERRO_LEITURA\n"
        );
    }

    #[test]
    fn missing_directory_is_output_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.pdf");
        let err = write_atomic(&path, b"x").unwrap_err();
        assert!(matches!(err, BarsortError::OutputWrite { .. }));
    }
}
