//! User settings persisted by the extension UI and read here as-is.

use anyhow::{Context as _, Result};
use core::fmt;
use core::str::FromStr;
use css_selector_locator::CssSourceFile;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs::read_to_string;

/// Gesture that triggers a quick resize on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuickResizeTrigger {
    /// Middle mouse button.
    Wheel,
    /// Ctrl + right click.
    CtrlRight,
    #[default]
    Both,
}

impl FromStr for QuickResizeTrigger {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "wheel" => Ok(Self::Wheel),
            "ctrlRight" => Ok(Self::CtrlRight),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown quick resize trigger `{other}`")),
        }
    }
}

impl fmt::Display for QuickResizeTrigger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Wheel => "wheel",
            Self::CtrlRight => "ctrlRight",
            Self::Both => "both",
        })
    }
}

/// One stylesheet the user chose to track, with its last cached content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackedCssFile {
    pub name: String,
    pub relative_path: String,
    pub content: String,
}

impl From<TrackedCssFile> for CssSourceFile {
    fn from(file: TrackedCssFile) -> Self {
        Self::new(file.name, file.relative_path, file.content)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub project_path: Option<String>,
    pub css_files: Vec<TrackedCssFile>,
    /// Viewport width the window is settled at before a lookup.
    pub target_viewport_width: u32,
    /// Viewport width of the quick resize toggle.
    pub quick_resize_width: u32,
    pub quick_resize_trigger: QuickResizeTrigger,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_path: None,
            css_files: Vec::new(),
            target_viewport_width: 1280,
            quick_resize_width: 1400,
            quick_resize_trigger: QuickResizeTrigger::Both,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Missing keys take their defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid settings JSON.
    pub async fn load(path: &Path) -> Result<Self> {
        let text = read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() -> Result<()> {
        let settings: Settings = serde_json::from_str(r#"{"projectPath":"/srv/site"}"#)?;
        assert_eq!(settings.project_path.as_deref(), Some("/srv/site"));
        assert_eq!(settings.target_viewport_width, 1280);
        assert_eq!(settings.quick_resize_width, 1400);
        assert_eq!(settings.quick_resize_trigger, QuickResizeTrigger::Both);
        Ok(())
    }

    #[test]
    fn tracked_files_deserialize() -> Result<()> {
        let json = r#"{
            "cssFiles": [{"name": "style.css", "relativePath": "css/style.css", "content": ".a{}"}],
            "quickResizeTrigger": "ctrlRight"
        }"#;
        let settings: Settings = serde_json::from_str(json)?;
        assert_eq!(settings.quick_resize_trigger, QuickResizeTrigger::CtrlRight);
        let file = CssSourceFile::from(settings.css_files[0].clone());
        assert_eq!(file.relative_path, "css/style.css");
        assert!(!file.excluded);
        Ok(())
    }

    #[test]
    fn trigger_round_trips_through_text() {
        for trigger in [QuickResizeTrigger::Wheel, QuickResizeTrigger::CtrlRight, QuickResizeTrigger::Both] {
            assert_eq!(trigger.to_string().parse::<QuickResizeTrigger>(), Ok(trigger));
        }
        assert!("scroll".parse::<QuickResizeTrigger>().is_err());
    }
}
