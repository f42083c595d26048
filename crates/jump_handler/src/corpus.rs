//! Sources of fresh stylesheet text for one lookup.

use crate::fetch::fetch_text;
use crate::settings::{Settings, TrackedCssFile};
use anyhow::{Context as _, Result, anyhow};
use css_orchestrator::CssCorpus;
use css_selector_locator::CssSourceFile;
use log::{debug, info, warn};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs::{canonicalize, read_dir, read_to_string};
use url::Url;

/// Directory assumed for tracked files without a relative path.
const DEFAULT_CSS_DIR: &str = "css";

/// Directories never scanned for stylesheets.
const SKIPPED_DIRS: [&str; 3] = ["node_modules", "target", "dist"];

/// Something that produces the current corpus for a lookup.
pub trait CorpusSource {
    /// # Errors
    /// Returns an error only when no corpus can be produced at all. A single
    /// unreadable file is not an error.
    fn load(&self) -> impl Future<Output = Result<CssCorpus>>;
}

/// Tracked files re-fetched from the dev server that serves the page.
///
/// A file that cannot be fetched keeps the content cached in the settings.
#[derive(Clone, Debug)]
pub struct LiveServerCorpus {
    client: Client,
    /// Root of the served site, e.g. `http://127.0.0.1:5500/`.
    origin: Url,
    project_path: Option<String>,
    tracked: Vec<TrackedCssFile>,
}

impl LiveServerCorpus {
    /// Build a source serving the files tracked in `settings` from the origin of `page_url`.
    ///
    /// # Errors
    /// Returns an error if `page_url` has no usable origin.
    pub fn new(page_url: &Url, settings: &Settings) -> Result<Self> {
        let origin = page_url
            .join("/")
            .with_context(|| format!("No origin for page {page_url}"))?;
        Ok(Self {
            client: Client::new(),
            origin,
            project_path: settings.project_path.clone(),
            tracked: settings.css_files.clone(),
        })
    }

    /// Served URL of a tracked file. Files without a relative path live in `css/`.
    fn file_url(&self, file: &TrackedCssFile) -> Result<Url> {
        let relative = if file.relative_path.trim().is_empty() {
            format!("{DEFAULT_CSS_DIR}/{}", file.name)
        } else {
            file.relative_path.replace('\\', "/")
        };
        let relative = relative.trim_start_matches('/');
        self.origin
            .join(relative)
            .with_context(|| format!("Bad relative path {relative}"))
    }

    async fn refresh(&self, file: &TrackedCssFile) -> CssSourceFile {
        let mut refreshed = file.clone();
        match self.file_url(file) {
            Ok(url) => match fetch_text(&self.client, &url).await {
                Ok(content) => {
                    debug!(target: "jump_handler", "refreshed {} ({} lines)", file.name, content.lines().count());
                    refreshed.content = content;
                }
                Err(err) => warn!(target: "jump_handler", "Using cached {}: {err:#}", file.name),
            },
            Err(err) => warn!(target: "jump_handler", "Using cached {}: {err:#}", file.name),
        }
        refreshed.into()
    }
}

impl CorpusSource for LiveServerCorpus {
    async fn load(&self) -> Result<CssCorpus> {
        let mut files = Vec::with_capacity(self.tracked.len());
        for file in &self.tracked {
            files.push(self.refresh(file).await);
        }
        info!(target: "jump_handler", "loaded {} stylesheet(s) from {}", files.len(), self.origin);
        Ok(CssCorpus {
            project_path: self.project_path.clone(),
            files,
        })
    }
}

/// Every `*.css` file under a local project directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectDirCorpus {
    root: PathBuf,
}

impl ProjectDirCorpus {
    #[inline]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn is_stylesheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("css"))
}

fn is_skipped_dir(name: &str) -> bool {
    name.starts_with('.') || SKIPPED_DIRS.contains(&name)
}

/// `path` relative to `root`, joined with `/`.
fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}

/// Editor-facing form of an absolute path, without the Windows verbatim prefix.
fn display_root(root: &Path) -> String {
    let lossy = root.to_string_lossy();
    lossy.strip_prefix(r"\\?\").unwrap_or(lossy.as_ref()).to_owned()
}

impl CorpusSource for ProjectDirCorpus {
    async fn load(&self) -> Result<CssCorpus> {
        let root = canonicalize(&self.root)
            .await
            .with_context(|| format!("Failed to resolve {}", self.root.display()))?;
        let mut pending = vec![root.clone()];
        let mut files = Vec::new();

        while let Some(dir) = pending.pop() {
            let mut entries = match read_dir(&dir).await {
                Ok(entries) => entries,
                Err(err) if dir == root => {
                    return Err(err).with_context(|| format!("Failed to list {}", root.display()));
                }
                Err(err) => {
                    warn!(target: "jump_handler", "Skipping directory {}: {err}", dir.display());
                    continue;
                }
            };
            loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break,
                    Err(err) => {
                        warn!(target: "jump_handler", "Stopped listing {}: {err}", dir.display());
                        break;
                    }
                };
                let path = entry.path();
                let file_type = match entry.file_type().await {
                    Ok(file_type) => file_type,
                    Err(err) => {
                        warn!(target: "jump_handler", "Skipping {}: {err}", path.display());
                        continue;
                    }
                };
                let name = entry.file_name();
                let Some(name) = name.to_str() else {
                    continue;
                };
                if file_type.is_dir() {
                    if !is_skipped_dir(name) {
                        pending.push(path);
                    }
                    continue;
                }
                if !is_stylesheet(&path) {
                    continue;
                }
                let relative = relative_slash_path(&root, &path)
                    .ok_or_else(|| anyhow!("{} is outside {}", path.display(), root.display()))?;
                match read_to_string(&path).await {
                    Ok(content) => files.push(CssSourceFile::new(name, relative, content)),
                    Err(err) => warn!(target: "jump_handler", "Skipping {}: {err}", path.display()),
                }
            }
        }

        files.sort_by(|left, right| left.relative_path.cmp(&right.relative_path));
        info!(target: "jump_handler", "found {} stylesheet(s) under {}", files.len(), root.display());
        Ok(CssCorpus {
            project_path: Some(display_root(&root)),
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_server(relative_path: &str) -> Result<(LiveServerCorpus, TrackedCssFile)> {
        let file = TrackedCssFile {
            name: "style.css".to_owned(),
            relative_path: relative_path.to_owned(),
            content: ".a{}".to_owned(),
        };
        let settings = Settings {
            css_files: vec![file.clone()],
            ..Settings::default()
        };
        let page = Url::parse("http://127.0.0.1:5500/pages/index.html")?;
        Ok((LiveServerCorpus::new(&page, &settings)?, file))
    }

    #[test]
    fn tracked_file_is_served_from_origin() -> Result<()> {
        let (corpus, file) = live_server("assets\\main/style.css")?;
        assert_eq!(corpus.file_url(&file)?.as_str(), "http://127.0.0.1:5500/assets/main/style.css");
        Ok(())
    }

    #[test]
    fn file_without_relative_path_is_served_from_css_dir() -> Result<()> {
        let (corpus, file) = live_server("")?;
        assert_eq!(corpus.file_url(&file)?.as_str(), "http://127.0.0.1:5500/css/style.css");
        Ok(())
    }

    #[test]
    fn verbatim_prefix_is_dropped() {
        assert_eq!(display_root(Path::new(r"\\?\C:\site")), r"C:\site");
        assert_eq!(display_root(Path::new("/srv/site")), "/srv/site");
    }
}
