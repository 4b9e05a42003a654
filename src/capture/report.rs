//! Report assembly and file output.
//!
//! A [`StatementReport`] is the ordered set of captured panel fragments
//! plus the company title they were captured for. Rendering joins the raw
//! fragments with blank lines; saving writes `<company>.html` into a
//! caller-chosen directory.

// ============================================================================
// Imports
// ============================================================================

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::error::Result;

use super::Statement;

// ============================================================================
// Constants
// ============================================================================

/// Separator between fragments in the rendered document.
const FRAGMENT_SEPARATOR: &str = "\n\n";

/// File extension of the rendered document.
const FILE_EXTENSION: &str = "html";

/// Characters a filename cannot carry: path separators, NUL, controls.
static FILENAME_HOSTILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[/\\\x00-\x1f\x7f\x{80}-\x{9f}]").expect("valid filename pattern")
});

// ============================================================================
// StatementReport
// ============================================================================

/// The captured statements of one company, in capture order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementReport {
    /// Trimmed company title the report is named after.
    company: String,
    /// Captured fragments in statement order.
    fragments: Vec<(Statement, String)>,
}

impl StatementReport {
    /// Creates a report from captured fragments.
    #[inline]
    #[must_use]
    pub fn new(company: impl Into<String>, fragments: Vec<(Statement, String)>) -> Self {
        Self {
            company: company.into(),
            fragments,
        }
    }

    /// Returns the company title.
    #[inline]
    #[must_use]
    pub fn company(&self) -> &str {
        &self.company
    }

    /// Returns the captured fragments in statement order.
    #[inline]
    #[must_use]
    pub fn fragments(&self) -> &[(Statement, String)] {
        &self.fragments
    }

    /// Returns the fragment captured for a statement, if present.
    #[must_use]
    pub fn fragment(&self, statement: Statement) -> Option<&str> {
        self.fragments
            .iter()
            .find(|(s, _)| *s == statement)
            .map(|(_, markup)| markup.as_str())
    }
}

// ============================================================================
// StatementReport - Rendering
// ============================================================================

impl StatementReport {
    /// Renders the report document: fragments joined by blank lines.
    ///
    /// Fragments are emitted raw, exactly as captured.
    #[must_use]
    pub fn render(&self) -> String {
        let parts: Vec<&str> = self
            .fragments
            .iter()
            .map(|(_, markup)| markup.as_str())
            .collect();
        parts.join(FRAGMENT_SEPARATOR)
    }

    /// Returns the report filename: the company title plus `.html`.
    ///
    /// Only characters a filename cannot carry (path separators, NUL,
    /// other control characters) are replaced; ordinary titles pass
    /// through unchanged.
    #[must_use]
    pub fn file_name(&self) -> String {
        let safe = FILENAME_HOSTILE.replace_all(&self.company, "_");
        format!("{safe}.{FILE_EXTENSION}")
    }
}

// ============================================================================
// StatementReport - Save
// ============================================================================

impl StatementReport {
    /// Writes the rendered document into `dir` and returns the full path.
    ///
    /// The directory is created if missing. An existing report for the same
    /// company is overwritten, never duplicated.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the directory cannot be created or
    /// the file cannot be written.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let path = dir.join(self.file_name());
        std::fs::write(&path, self.render())?;

        info!(path = %path.display(), "Report saved");

        Ok(path)
    }
}

// ============================================================================
// Tests
// ============================================================================
