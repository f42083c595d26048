//! Resolves a clicked element to the stylesheet line that defines it.
//!
//! This crate does no I/O. The caller settles the window, loads a fresh
//! [`CssCorpus`] and hands the result to an editor; here the corpus is checked
//! for misconfiguration and the locator is driven through the element's
//! selectors.

use css_selector_locator::{SelectorKind, SelectorMatch, SelectorQuery, locate};
use log::{debug, info};
use thiserror::Error;

pub mod corpus;
pub mod selection;

pub use corpus::{CssCorpus, source_path};
pub use selection::ElementSelection;

/// Misconfiguration detected before any search runs.
///
/// Distinct from "no match", which is `Ok(None)`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("the selected element has neither an id nor a class")]
    NothingToResolve,
    #[error("no project path is configured")]
    NoProjectPath,
    #[error("no CSS files are loaded")]
    NoCssFiles,
}

/// A located definition, ready to open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The selector that matched; may be a fallback class.
    pub query: SelectorQuery,
    pub found: SelectorMatch,
    /// Absolute path for the editor.
    pub source_path: String,
}

impl Resolution {
    /// 1-based line of the definition.
    #[inline]
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.found.line_number
    }
}

/// Check that `corpus` can be searched at all and return its project root.
fn validate(corpus: &CssCorpus) -> Result<&str, ResolveError> {
    let project_path = corpus.project_path().ok_or(ResolveError::NoProjectPath)?;
    if corpus.files.is_empty() {
        return Err(ResolveError::NoCssFiles);
    }
    Ok(project_path)
}

/// Resolve a clicked element.
///
/// Tries the id, then the element's own class, then each co-present class in
/// order, stopping at the first match.
///
/// # Errors
/// Returns a [`ResolveError`] when the selection or corpus is unusable.
pub fn resolve(selection: &ElementSelection, corpus: &CssCorpus) -> Result<Option<Resolution>, ResolveError> {
    if selection.is_empty() {
        return Err(ResolveError::NothingToResolve);
    }
    let project_path = validate(corpus)?;

    for query in selection.candidates() {
        debug!(target: "css_orchestrator", "looking up {query}");
        if let Some(found) = locate(&query, &corpus.files) {
            info!(
                target: "css_orchestrator",
                "{query} -> {}:{}",
                found.file_name,
                found.line_number
            );
            return Ok(Some(Resolution {
                source_path: source_path(project_path, &found),
                query,
                found,
            }));
        }
    }

    info!(
        target: "css_orchestrator",
        "no definition found in {} file(s) for {:?}",
        corpus.files.len(),
        selection.primary_class().or(selection.id.as_deref())
    );
    Ok(None)
}

/// Resolve a single selector at the given viewport width.
///
/// # Errors
/// Returns a [`ResolveError`] when the corpus is unusable.
pub fn resolve_query(
    name: &str,
    kind: SelectorKind,
    viewport_width_px: u32,
    corpus: &CssCorpus,
) -> Result<Option<Resolution>, ResolveError> {
    if name.trim().is_empty() {
        return Err(ResolveError::NothingToResolve);
    }
    let project_path = validate(corpus)?;
    let query = SelectorQuery::for_viewport(name.trim(), kind, viewport_width_px);
    Ok(locate(&query, &corpus.files).map(|found| Resolution {
        source_path: source_path(project_path, &found),
        query,
        found,
    }))
}
