//! Jump handler for CSS Jumper.
//!
//! Connects the selector resolution engine to its surroundings: configuration
//! and persisted settings, loading fresh stylesheet text, driving the window to
//! the configured viewport width, and handing the result to the editor.

pub mod config;
pub mod corpus;
pub mod editor;
/// Stylesheet fetching for http, https and file URLs
mod fetch;
pub mod session;
pub mod settings;

pub use config::JumperConfig;
pub use corpus::{CorpusSource, LiveServerCorpus, ProjectDirCorpus};
pub use editor::{EditorOpener, VscodeLinkWriter, vscode_url};
pub use fetch::fetch_text;
pub use session::{JumpError, JumpReport, JumpSession};
pub use settings::{QuickResizeTrigger, Settings, TrackedCssFile};
