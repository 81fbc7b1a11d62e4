// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Locating and probing the external command-line tools Barsort drives.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use barsort_core::error::{BarsortError, Result};
use tracing::debug;

/// Full path of `name` inside `dir`, or the bare name for a `PATH` lookup.
pub(crate) fn resolve(dir: Option<&Path>, name: &str) -> PathBuf {
    match dir {
        Some(dir) => dir.join(executable_name(name)),
        None => PathBuf::from(executable_name(name)),
    }
}

/// A `Command` for `name`, resolved against `dir` when one is configured.
pub(crate) fn command(dir: Option<&Path>, name: &str) -> Command {
    Command::new(resolve(dir, name))
}

/// Check that the tool can be started at all.
///
/// Only a failure to spawn counts: some poppler builds exit non-zero for
/// `-v`, so the exit status is ignored.
pub(crate) fn probe(dir: Option<&Path>, name: &str, version_flag: &str) -> Result<()> {
    let program = resolve(dir, name);
    command(dir, name)
        .arg(version_flag)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|err| {
            BarsortError::ToolUnavailable(format!("cannot run {}: {}", program.display(), err))
        })?;
    debug!(tool = %program.display(), "External tool available");
    Ok(())
}

#[cfg(windows)]
fn executable_name(name: &str) -> String {
    format!("{name}.exe")
}

#[cfg(not(windows))]
fn executable_name(name: &str) -> String {
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_uses_configured_directory() {
        let path = resolve(Some(Path::new("/opt/poppler/bin")), "pdftoppm");
        assert!(path.starts_with("/opt/poppler/bin"));
        assert!(path.to_string_lossy().contains("pdftoppm"));
    }

    #[test]
    fn resolve_without_directory_is_bare_name() {
        let path = resolve(None, "zbarimg");
        assert_eq!(path.components().count(), 1);
    }

    #[test]
    fn probe_reports_missing_tool() {
        let dir = tempfile::tempdir().unwrap();
        let err = probe(Some(dir.path()), "no-such-tool", "--version").unwrap_err();
        assert!(matches!(err, BarsortError::ToolUnavailable(_)));
    }
}
