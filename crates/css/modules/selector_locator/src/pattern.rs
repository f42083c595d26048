//! Per-query line matcher.

use crate::types::SelectorQuery;
use regex::{Error as RegexError, Regex, escape};

/// Characters (besides whitespace and end of line) that may follow a selector
/// name without extending it.
const BOUNDARY: &str = r"(?:[{,:\[]|\s|$)";

/// Compiled, case-insensitive matcher for one id or class.
///
/// The boundary keeps `.nav` from matching inside `.navigation`.
#[derive(Clone, Debug)]
pub struct SelectorPattern {
    regex: Regex,
}

impl SelectorPattern {
    /// Compile the matcher for `query`.
    ///
    /// # Errors
    /// Returns an error if the escaped pattern exceeds the regex size limits.
    pub fn new(query: &SelectorQuery) -> Result<Self, RegexError> {
        let sigil = escape(&query.kind.sigil().to_string());
        let regex = Regex::new(&format!("(?i){sigil}{}{BOUNDARY}", escape(&query.name)))?;
        Ok(Self { regex })
    }

    #[inline]
    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SelectorKind;

    fn class(name: &str) -> Result<SelectorPattern, RegexError> {
        SelectorPattern::new(&SelectorQuery::new(name, SelectorKind::Class))
    }

    #[test]
    fn class_boundaries() -> Result<(), RegexError> {
        let nav = class("nav")?;
        assert!(nav.is_match(".nav{display:flex}"));
        assert!(nav.is_match(".nav {"));
        assert!(nav.is_match(".nav, .menu {"));
        assert!(nav.is_match(".nav:hover {"));
        assert!(nav.is_match(".nav[data-open] {"));
        assert!(nav.is_match(".nav .item {"));
        assert!(nav.is_match("  .nav"));
        assert!(!nav.is_match(".navigation{display:flex}"));
        assert!(!nav.is_match(".nav-item {"));
        assert!(!nav.is_match(".nav_item {"));
        assert!(!nav.is_match("nav {"));
        Ok(())
    }

    #[test]
    fn id_requires_hash() -> Result<(), RegexError> {
        let header = SelectorPattern::new(&SelectorQuery::new("header", SelectorKind::Id))?;
        assert!(header.is_match("#header {"));
        assert!(!header.is_match(".header {"));
        assert!(!header.is_match("#header-top {"));
        Ok(())
    }

    #[test]
    fn matching_ignores_case() -> Result<(), RegexError> {
        assert!(class("Btn")?.is_match(".btn {"));
        assert!(class("btn")?.is_match(".BTN{"));
        Ok(())
    }

    #[test]
    fn names_are_escaped() -> Result<(), RegexError> {
        let escaped = class("w-1/2")?;
        assert!(escaped.is_match(".w-1/2 {"));
        let dotted = class("a.b")?;
        assert!(dotted.is_match(".a.b {"));
        assert!(!dotted.is_match(".aXb {"));
        Ok(())
    }
}
