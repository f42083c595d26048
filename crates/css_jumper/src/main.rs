//! Look up where a clicked element is styled in a local project and print a
//! `vscode://` link to the defining line.

use crate::args::Invocation;
use anyhow::{Context as _, Result, bail};
use css_orchestrator::{ElementSelection, resolve};
use jump_handler::{CorpusSource as _, EditorOpener as _, JumperConfig, ProjectDirCorpus, Settings, VscodeLinkWriter};
use log::{debug, info};
use std::env;
use std::io::stdout;

mod args;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let invocation = args::parse(env::args().skip(1))?;
    let config = JumperConfig::from_env();
    let settings = match &config.settings_path {
        Some(path) => Settings::load(path).await?,
        None => Settings::default(),
    };
    debug!("config: {config:?}");

    run(&invocation, &settings).await
}

async fn run(invocation: &Invocation, settings: &Settings) -> Result<()> {
    let viewport_width = invocation.viewport_width.unwrap_or(settings.target_viewport_width);
    let selection = ElementSelection::from_attributes(
        invocation.id.as_deref(),
        &invocation.classes.join(" "),
        viewport_width,
    );

    let corpus = ProjectDirCorpus::new(&invocation.project_dir)
        .load()
        .await
        .with_context(|| format!("Failed to scan {}", invocation.project_dir.display()))?;

    let Some(found) = resolve(&selection, &corpus)? else {
        bail!("no stylesheet under {} defines this element", invocation.project_dir.display());
    };
    info!("{} found at {}:{}", found.query, found.found.file_path, found.line_number());

    let mut opener = VscodeLinkWriter::new(stdout().lock());
    opener.open_at(&found.source_path, found.line_number())
}
