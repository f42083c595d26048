//! Query, source and match types shared by the locator and its callers.

use core::fmt;
use css_media_scope::MediaKind;

/// Viewport widths strictly below this are treated as mobile-class.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Stylesheets that only reset browser defaults and never define project rules.
pub const EXCLUDED_STYLESHEETS: [&str; 3] = ["reset.css", "normalize.css", "sanitize.css"];

/// True when `name` is on the reset/normalize denylist (ASCII case-insensitive).
#[inline]
#[must_use]
pub fn is_excluded_stylesheet(name: &str) -> bool {
    EXCLUDED_STYLESHEETS
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(name))
}

/// True when a viewport of `viewport_width_px` should prefer rules inside media queries.
#[inline]
#[must_use]
pub const fn prefers_media_query(viewport_width_px: u32) -> bool {
    viewport_width_px < MOBILE_BREAKPOINT_PX
}

/// Which simple selector a query names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    /// `#name`
    Id,
    /// `.name`
    Class,
}

impl SelectorKind {
    #[inline]
    #[must_use]
    pub const fn sigil(self) -> char {
        match self {
            Self::Id => '#',
            Self::Class => '.',
        }
    }
}

/// A single id or class to look up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorQuery {
    pub name: String,
    pub kind: SelectorKind,
    /// Prefer a definition inside a media query over an earlier plain one.
    pub prefer_media_query: bool,
}

impl SelectorQuery {
    #[inline]
    pub fn new(name: impl Into<String>, kind: SelectorKind) -> Self {
        Self {
            name: name.into(),
            kind,
            prefer_media_query: false,
        }
    }

    /// Build a query whose media preference follows the caller's viewport width.
    #[inline]
    pub fn for_viewport(name: impl Into<String>, kind: SelectorKind, viewport_width_px: u32) -> Self {
        Self::new(name, kind).with_media_preference(prefers_media_query(viewport_width_px))
    }

    #[inline]
    #[must_use]
    pub fn with_media_preference(mut self, prefer_media_query: bool) -> Self {
        self.prefer_media_query = prefer_media_query;
        self
    }
}

impl fmt::Display for SelectorQuery {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}{}", self.kind.sigil(), self.name)
    }
}

/// One tracked stylesheet with its current text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssSourceFile {
    /// File name, e.g. `style.css`.
    pub name: String,
    /// Path relative to the project root, e.g. `css/style.css`.
    pub relative_path: String,
    pub content: String,
    /// Reset/normalize stylesheets are never searched.
    pub excluded: bool,
}

impl CssSourceFile {
    /// Create a source file, deriving `excluded` from its name.
    pub fn new(
        name: impl Into<String>,
        relative_path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            excluded: is_excluded_stylesheet(&name),
            name,
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

/// A declaration site found by the locator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorMatch {
    /// The source's relative path, or its name when no relative path is known.
    pub file_path: String,
    /// False when `file_path` fell back to the file name.
    pub has_relative_path: bool,
    pub file_name: String,
    /// 1-based.
    pub line_number: usize,
    /// The matching line, trimmed.
    pub line_content: String,
    /// Enclosing media block, if any.
    pub media: Option<MediaKind>,
}

impl SelectorMatch {
    #[inline]
    #[must_use]
    pub const fn is_in_media_query(&self) -> bool {
        self.media.is_some()
    }
}
