#![cfg(test)]

use core::error::Error;
use css_media_scope::MediaKind;
use css_orchestrator::{CssCorpus, ElementSelection, ResolveError, resolve, resolve_query};
use css_selector_locator::{CssSourceFile, SelectorKind};

const PROJECT: &str = "/home/dev/site";

fn corpus(files: &[(&str, &str)]) -> CssCorpus {
    CssCorpus::new(
        PROJECT,
        files
            .iter()
            .map(|(name, content)| CssSourceFile::new(*name, format!("css/{name}"), *content))
            .collect(),
    )
}

#[test]
fn resolves_primary_class() -> Result<(), Box<dyn Error>> {
    let corpus = corpus(&[("style.css", "body{}\n.btn {\n  color: red;\n}\n")]);
    let selection = ElementSelection::from_attributes(None, "btn", 1280);
    let resolution = resolve(&selection, &corpus)?.ok_or("expected a match")?;
    assert_eq!(resolution.line_number(), 2);
    assert_eq!(resolution.source_path, "/home/dev/site/css/style.css");
    assert_eq!(resolution.query.to_string(), ".btn");
    Ok(())
}

#[test]
fn widens_to_co_present_classes() -> Result<(), Box<dyn Error>> {
    let corpus = corpus(&[("style.css", ".card{}\n.btn{padding:4px}\n")]);
    let selection = ElementSelection::from_attributes(None, "btn-primary btn", 1280);
    let resolution = resolve(&selection, &corpus)?.ok_or("expected a match")?;
    assert_eq!(resolution.query.name, "btn");
    assert_eq!(resolution.line_number(), 2);
    Ok(())
}

#[test]
fn id_is_tried_before_classes() -> Result<(), Box<dyn Error>> {
    let corpus = corpus(&[("style.css", ".hero{}\n#top{}\n")]);
    let selection = ElementSelection::from_attributes(Some("top"), "hero", 1280);
    let resolution = resolve(&selection, &corpus)?.ok_or("expected a match")?;
    assert_eq!(resolution.query.kind, SelectorKind::Id);
    assert_eq!(resolution.line_number(), 2);
    Ok(())
}

#[test]
fn narrow_viewport_prefers_media_rule() -> Result<(), Box<dyn Error>> {
    let corpus = corpus(&[(
        "style.css",
        ".a{color:red}\n@media (max-width:600px){\n.a{color:blue}\n}\n",
    )]);

    let narrow = ElementSelection::from_attributes(None, "a", 767);
    let resolution = resolve(&narrow, &corpus)?.ok_or("expected a match")?;
    assert_eq!(resolution.line_number(), 3);
    assert_eq!(resolution.found.media, Some(MediaKind::Mobile));

    let wide = ElementSelection::from_attributes(None, "a", 768);
    let resolution = resolve(&wide, &corpus)?.ok_or("expected a match")?;
    assert_eq!(resolution.line_number(), 1);
    Ok(())
}

#[test]
fn only_excluded_definition_is_no_match() -> Result<(), Box<dyn Error>> {
    let corpus = corpus(&[("reset.css", ".btn{}\n"), ("style.css", ".card{}\n")]);
    let selection = ElementSelection::from_attributes(None, "btn", 1280);
    assert_eq!(resolve(&selection, &corpus)?, None);
    Ok(())
}

#[test]
fn misconfiguration_is_reported_before_searching() {
    let selection = ElementSelection::from_attributes(None, "btn", 1280);

    let no_project = CssCorpus {
        project_path: None,
        files: vec![CssSourceFile::new("style.css", "css/style.css", ".btn{}")],
    };
    assert_eq!(resolve(&selection, &no_project), Err(ResolveError::NoProjectPath));

    let no_files = CssCorpus::new(PROJECT, Vec::new());
    assert_eq!(resolve(&selection, &no_files), Err(ResolveError::NoCssFiles));

    let nothing = ElementSelection::from_attributes(None, "", 1280);
    assert_eq!(resolve(&nothing, &no_files), Err(ResolveError::NothingToResolve));
}

#[test]
fn single_query_lookup() -> Result<(), Box<dyn Error>> {
    let corpus = corpus(&[("layout.css", "#main {\n}\n")]);
    let resolution = resolve_query("main", SelectorKind::Id, 1280, &corpus)?;
    assert_eq!(resolution.map(|found| found.line_number()), Some(1));
    assert_eq!(resolve_query("side", SelectorKind::Id, 1280, &corpus)?, None);
    Ok(())
}

#[test]
fn selection_message_deserializes() -> Result<(), Box<dyn Error>> {
    let message = r#"{"id":"","className":"nav","allClasses":["nav","is-open"],"viewportWidth":390}"#;
    let selection: ElementSelection = serde_json::from_str(message)?;
    assert_eq!(selection.primary_class(), Some("nav"));
    let candidates = selection.candidates();
    assert_eq!(candidates.len(), 2);
    assert!(candidates.iter().all(|query| query.prefer_media_query));
    Ok(())
}
