//! Media-query aware lookup of the stylesheet line that defines an id or class.
//!
//! Files are scanned in the order given and lines top to bottom. Each line is
//! tested against a boundary-aware pattern while a [`css_media_scope`] fold
//! tracks whether it sits inside an `@media` block.
//!
//! Tie-break:
//! - desktop-class queries return the first match and stop scanning;
//! - mobile-class queries (`prefer_media_query`) scan everything and return
//!   the first match inside a media block, falling back to the first match.

use css_media_scope::{LineScope, scoped_lines};
use log::{debug, error, warn};

mod pattern;
pub mod types;

pub use pattern::SelectorPattern;
pub use types::{
    CssSourceFile, EXCLUDED_STYLESHEETS, MOBILE_BREAKPOINT_PX, SelectorKind, SelectorMatch,
    SelectorQuery, is_excluded_stylesheet, prefers_media_query,
};

/// Find the best declaration site for `query` in `files`.
///
/// Excluded and empty files are skipped. Returns `None` when nothing matches.
pub fn locate(query: &SelectorQuery, files: &[CssSourceFile]) -> Option<SelectorMatch> {
    let pattern = match SelectorPattern::new(query) {
        Ok(pattern) => pattern,
        Err(err) => {
            error!(target: "css_selector_locator", "Cannot build matcher for {query}: {err}");
            return None;
        }
    };

    let mut first_match: Option<SelectorMatch> = None;
    let mut media_match: Option<SelectorMatch> = None;

    for file in searchable(files) {
        for (index, line, scope) in scoped_lines(&file.content) {
            if !pattern.is_match(line) {
                continue;
            }
            let found = selector_match(file, index, line, scope);
            debug!(
                target: "css_selector_locator",
                "{query} matched {}:{} (media: {:?})",
                found.file_name,
                found.line_number,
                found.media
            );

            if !query.prefer_media_query {
                return Some(found);
            }
            if media_match.is_none() && found.is_in_media_query() {
                media_match = Some(found.clone());
            }
            if first_match.is_none() {
                first_match = Some(found);
            }
        }
    }

    media_match.or(first_match)
}

/// Files the locator is allowed to read.
fn searchable(files: &[CssSourceFile]) -> impl Iterator<Item = &CssSourceFile> {
    files.iter().filter(|file| {
        if file.excluded {
            debug!(target: "css_selector_locator", "Skipping excluded stylesheet {}", file.name);
            return false;
        }
        if file.content.is_empty() {
            warn!(target: "css_selector_locator", "Stylesheet {} has no content", file.name);
            return false;
        }
        true
    })
}

fn selector_match(file: &CssSourceFile, index: usize, line: &str, scope: LineScope) -> SelectorMatch {
    let has_relative_path = !file.relative_path.trim().is_empty();
    let file_path = if has_relative_path {
        file.relative_path.clone()
    } else {
        file.name.clone()
    };
    SelectorMatch {
        file_path,
        has_relative_path,
        file_name: file.name.clone(),
        line_number: index + 1,
        line_content: line.trim().to_owned(),
        media: scope.media,
    }
}
