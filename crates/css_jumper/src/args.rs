//! Command line parsing.

use anyhow::{Result, anyhow, bail};
use std::path::PathBuf;

pub const USAGE: &str = "usage: css_jumper <project-dir> <#id.class.other> [viewport-width]";

/// A parsed invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub project_dir: PathBuf,
    pub id: Option<String>,
    /// Classes in the order given; the first is the primary class.
    pub classes: Vec<String>,
    pub viewport_width: Option<u32>,
}

/// Split `#hero.btn.btn-primary` into its id and classes.
fn split_selector(selector: &str) -> Result<(Option<String>, Vec<String>)> {
    let mut id = None;
    let mut classes = Vec::new();
    let mut rest = selector.trim();
    while let Some(sigil) = rest.chars().next() {
        let body = &rest[sigil.len_utf8()..];
        let end = body.find(['#', '.']).unwrap_or(body.len());
        let name = &body[..end];
        if name.is_empty() {
            bail!("empty name after '{sigil}' in {selector:?}");
        }
        match sigil {
            '#' if id.is_none() => id = Some(name.to_owned()),
            '#' => bail!("more than one id in {selector:?}"),
            '.' => classes.push(name.to_owned()),
            other => bail!("expected '#' or '.' but found '{other}' in {selector:?}"),
        }
        rest = &body[end..];
    }
    if id.is_none() && classes.is_empty() {
        bail!("no id or class in {selector:?}");
    }
    Ok((id, classes))
}

/// Parse the arguments following the program name.
///
/// # Errors
/// Returns an error with the usage line when the arguments are malformed.
pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Invocation> {
    let mut args = args.into_iter();
    let project_dir = args.next().ok_or_else(|| anyhow!("missing project directory\n{USAGE}"))?;
    let selector = args.next().ok_or_else(|| anyhow!("missing selector\n{USAGE}"))?;
    let viewport_width = args
        .next()
        .map(|width| {
            width
                .parse::<u32>()
                .map_err(|err| anyhow!("invalid viewport width {width:?}: {err}\n{USAGE}"))
        })
        .transpose()?;
    if let Some(extra) = args.next() {
        bail!("unexpected argument {extra:?}\n{USAGE}");
    }
    let (id, classes) = split_selector(&selector)?;
    Ok(Invocation {
        project_dir: PathBuf::from(project_dir),
        id,
        classes,
        viewport_width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(args: &[&str]) -> Vec<String> {
        args.iter().map(|&arg| arg.to_owned()).collect()
    }

    #[test]
    fn id_and_classes() -> Result<()> {
        let invocation = parse(owned(&["site", "#hero.btn.btn-primary", "375"]))?;
        assert_eq!(invocation.project_dir, PathBuf::from("site"));
        assert_eq!(invocation.id.as_deref(), Some("hero"));
        assert_eq!(invocation.classes, vec!["btn".to_owned(), "btn-primary".to_owned()]);
        assert_eq!(invocation.viewport_width, Some(375));
        Ok(())
    }

    #[test]
    fn class_only_without_width() -> Result<()> {
        let invocation = parse(owned(&["site", ".nav"]))?;
        assert_eq!(invocation.id, None);
        assert_eq!(invocation.classes, vec!["nav".to_owned()]);
        assert_eq!(invocation.viewport_width, None);
        Ok(())
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(parse(owned(&["site"])).is_err());
        assert!(parse(owned(&["site", "nav"])).is_err());
        assert!(parse(owned(&["site", ".a..b"])).is_err());
        assert!(parse(owned(&["site", "#a#b"])).is_err());
        assert!(parse(owned(&["site", ".a", "wide"])).is_err());
        assert!(parse(owned(&["site", ".a", "375", "extra"])).is_err());
    }
}
