//! The set of stylesheets a resolution searches, and where they live on disk.

use css_selector_locator::{CssSourceFile, SelectorMatch};

/// Directory assumed for files tracked without a relative path.
const DEFAULT_CSS_DIR: &str = "css";

/// Stylesheets of one project, freshly loaded by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CssCorpus {
    /// Project root as the editor sees it.
    pub project_path: Option<String>,
    pub files: Vec<CssSourceFile>,
}

impl CssCorpus {
    #[inline]
    pub fn new(project_path: impl Into<String>, files: Vec<CssSourceFile>) -> Self {
        Self {
            project_path: Some(project_path.into()),
            files,
        }
    }

    /// The configured project root, ignoring blank values.
    #[must_use]
    pub fn project_path(&self) -> Option<&str> {
        self.project_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
    }
}

/// Absolute editor path of a match inside `project_path`.
///
/// Files tracked without a relative path are assumed to live in `css/`.
/// Backslashes become `/` and runs of `/` collapse to one.
#[must_use]
pub fn source_path(project_path: &str, found: &SelectorMatch) -> String {
    let joined = if found.has_relative_path {
        format!("{project_path}/{}", found.file_path)
    } else {
        format!("{project_path}/{DEFAULT_CSS_DIR}/{}", found.file_name)
    };
    normalize_separators(&joined)
}

fn normalize_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for character in path.chars().map(|character| if character == '\\' { '/' } else { character }) {
        if character == '/' && out.ends_with('/') {
            continue;
        }
        out.push(character);
    }
    out
}
