//! Hand-off of a resolved location to the editor.

use anyhow::{Context as _, Result};
use std::io::Write;

/// Opens a file at a 1-based line.
pub trait EditorOpener {
    /// # Errors
    /// Returns an error if the hand-off fails.
    fn open_at(&mut self, path: &str, line_number: usize) -> Result<()>;
}

/// `vscode://file/<path>:<line>` link for a location.
#[must_use]
pub fn vscode_url(path: &str, line_number: usize) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("vscode://file/{path}:{line_number}")
}

/// Writes one VS Code link per opened location; the OS URL handler (or the
/// browser extension) does the actual opening.
#[derive(Debug)]
pub struct VscodeLinkWriter<W> {
    out: W,
}

impl<W: Write> VscodeLinkWriter<W> {
    #[inline]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EditorOpener for VscodeLinkWriter<W> {
    fn open_at(&mut self, path: &str, line_number: usize) -> Result<()> {
        writeln!(self.out, "{}", vscode_url(path, line_number)).context("Failed to write editor link")?;
        self.out.flush().context("Failed to flush editor link")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_and_windows_paths() {
        assert_eq!(vscode_url("/home/dev/site/css/a.css", 12), "vscode://file/home/dev/site/css/a.css:12");
        assert_eq!(vscode_url("C:/site/css/a.css", 3), "vscode://file/C:/site/css/a.css:3");
    }

    #[test]
    fn writer_emits_one_link_per_line() -> Result<()> {
        let mut writer = VscodeLinkWriter::new(Vec::new());
        writer.open_at("/a/b.css", 1)?;
        writer.open_at("/a/c.css", 2)?;
        let text = String::from_utf8(writer.into_inner())?;
        assert_eq!(text, "vscode://file/a/b.css:1\nvscode://file/a/c.css:2\n");
        Ok(())
    }
}
