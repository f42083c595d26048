//! Line-oriented `@media` scope tracking for CSS source text.
//!
//! The tracker does not parse CSS. It counts braces line by line and remembers
//! the depth at which the outermost open `@media` block started, which is
//! enough to tell whether a selector on a given line is guarded by a media
//! query and whether that query targets narrow or wide viewports.
//!
//! Known limitation: only one media block is tracked at a time. A nested
//! `@media` inside an open one does not get its own scope; the whole region is
//! attributed to the outer block.

use core::iter::Enumerate;
use core::str::Lines;
use log::trace;

/// The at-rule keyword that opens a media block.
const MEDIA_KEYWORD: &str = "@media";

/// Viewport class a media block is written for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Condition mentions neither `max-width` nor `min-width`.
    #[default]
    Unclassified,
    /// `max-width` condition: styles for narrow viewports.
    Mobile,
    /// `min-width` condition: styles for wide viewports.
    Desktop,
}

impl MediaKind {
    /// Classify the `@media` prelude found on `line`.
    ///
    /// `max-width` wins when both bounds appear on the same line.
    #[inline]
    #[must_use]
    pub fn classify(line: &str) -> Self {
        if line.contains("max-width") {
            Self::Mobile
        } else if line.contains("min-width") {
            Self::Desktop
        } else {
            Self::Unclassified
        }
    }
}

/// Returns true when `line` contains `@media` followed by whitespace.
#[inline]
#[must_use]
pub fn opens_media_block(line: &str) -> bool {
    line.match_indices(MEDIA_KEYWORD).any(|(index, keyword)| {
        line[index + keyword.len()..]
            .chars()
            .next()
            .is_some_and(char::is_whitespace)
    })
}

/// Scope information for one line, observed after the line's opening braces
/// were counted and before its closing braces were.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineScope {
    /// Brace depth before any brace on this line was counted.
    pub depth_before: u32,
    /// Kind of the enclosing media block, `None` outside any media block.
    pub media: Option<MediaKind>,
}

impl LineScope {
    #[inline]
    #[must_use]
    pub const fn is_in_media_query(&self) -> bool {
        self.media.is_some()
    }
}

/// Per-file fold state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScopeState {
    /// Current brace nesting depth. Stray `}` saturate at zero.
    brace_depth: u32,
    /// Depth recorded when the active media block was opened.
    media_start_depth: Option<u32>,
    /// Kind of the active media block; meaningful only while one is open.
    media_kind: MediaKind,
}

impl ScopeState {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            brace_depth: 0,
            media_start_depth: None,
            media_kind: MediaKind::Unclassified,
        }
    }

    #[inline]
    #[must_use]
    pub const fn brace_depth(&self) -> u32 {
        self.brace_depth
    }

    #[inline]
    #[must_use]
    pub const fn media_start_depth(&self) -> Option<u32> {
        self.media_start_depth
    }

    /// Advance the fold over one line.
    ///
    /// # Returns
    ///
    /// The state after the whole line, and the scope of the line as seen at
    /// the point where a selector on it is tested.
    #[must_use]
    pub fn advance(self, line: &str) -> (Self, LineScope) {
        let mut next = self;
        let depth_before = self.brace_depth;

        if next.media_start_depth.is_none() && opens_media_block(line) {
            next.media_start_depth = Some(depth_before);
            next.media_kind = MediaKind::classify(line);
            trace!(target: "css_media_scope", "media block opened at depth {depth_before}");
        }

        let (opening, closing) = count_braces(line);
        next.brace_depth = next.brace_depth.saturating_add(opening);

        let media = next
            .media_start_depth
            .filter(|&start| next.brace_depth > start)
            .map(|_| next.media_kind);

        next.brace_depth = next.brace_depth.saturating_sub(closing);

        if let Some(start) = next.media_start_depth
            && next.brace_depth <= start
        {
            trace!(target: "css_media_scope", "media block closed back to depth {start}");
            next.media_start_depth = None;
            next.media_kind = MediaKind::Unclassified;
        }

        (next, LineScope { depth_before, media })
    }
}

/// Count `{` and `}` on a line.
fn count_braces(line: &str) -> (u32, u32) {
    line.bytes().fold((0, 0), |(opening, closing), byte| match byte {
        b'{' => (opening + 1, closing),
        b'}' => (opening, closing + 1),
        _ => (opening, closing),
    })
}

/// Iterator over the lines of one CSS text, yielding each line with its
/// zero-based index and scope.
#[derive(Clone, Debug)]
pub struct ScopedLines<'text> {
    lines: Enumerate<Lines<'text>>,
    state: ScopeState,
}

impl<'text> Iterator for ScopedLines<'text> {
    type Item = (usize, &'text str, LineScope);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, line) = self.lines.next()?;
        let (state, scope) = self.state.advance(line);
        self.state = state;
        Some((index, line, scope))
    }
}

/// Fold `text` line by line.
#[inline]
#[must_use]
pub fn scoped_lines(text: &str) -> ScopedLines<'_> {
    ScopedLines {
        lines: text.lines().enumerate(),
        state: ScopeState::new(),
    }
}
