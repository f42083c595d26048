//! The full jump: settle the window, reload the stylesheets, resolve, open.

use crate::corpus::CorpusSource;
use crate::editor::EditorOpener;
use anyhow::Error as AnyError;
use css_orchestrator::{ElementSelection, Resolution, ResolveError, resolve};
use log::{debug, info};
use thiserror::Error;
use viewport_control::{BrowserWindow, ResizeController, ResizeOutcome, ViewportProbe};

#[derive(Debug, Error)]
pub enum JumpError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("could not load stylesheets: {0:#}")]
    Corpus(AnyError),
    #[error("could not open the editor: {0:#}")]
    Editor(AnyError),
}

/// What a jump did. `resolution` is `None` when no stylesheet defines the element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumpReport {
    pub resize: ResizeOutcome,
    /// Viewport width the lookup was made for.
    pub viewport_width_px: u32,
    pub resolution: Option<Resolution>,
}

/// Runs jumps against one configured target viewport width.
#[derive(Clone, Debug)]
pub struct JumpSession {
    controller: ResizeController,
    target_viewport_px: u32,
}

impl JumpSession {
    #[inline]
    #[must_use]
    pub const fn new(controller: ResizeController, target_viewport_px: u32) -> Self {
        Self {
            controller,
            target_viewport_px,
        }
    }

    /// Jump from a clicked element to its definition.
    ///
    /// The media preference follows the viewport width measured after the
    /// resize; if the page cannot be measured the width from the click is used.
    ///
    /// # Errors
    /// Returns a [`JumpError`] for misconfiguration, an unloadable corpus or a
    /// failed editor hand-off. A missing definition is not an error.
    pub async fn jump<W, P, C, O>(
        &self,
        window: &W,
        probe: &P,
        source: &C,
        selection: &ElementSelection,
        opener: &mut O,
    ) -> Result<JumpReport, JumpError>
    where
        W: BrowserWindow,
        P: ViewportProbe,
        C: CorpusSource,
        O: EditorOpener,
    {
        if selection.is_empty() {
            return Err(ResolveError::NothingToResolve.into());
        }

        let resize = self
            .controller
            .resize_to_target(window, probe, self.target_viewport_px)
            .await;
        debug!(target: "jump_handler", "resize finished: {resize:?}");

        let viewport_width_px = match probe.viewport_width().await {
            Ok(measurement) => measurement.width_px(),
            Err(err) => {
                debug!(target: "jump_handler", "keeping clicked viewport width: {err}");
                selection.viewport_width
            }
        };

        let corpus = source.load().await.map_err(JumpError::Corpus)?;
        let current = ElementSelection {
            viewport_width: viewport_width_px,
            ..selection.clone()
        };
        let resolution = resolve(&current, &corpus)?;

        if let Some(found) = &resolution {
            opener
                .open_at(&found.source_path, found.line_number())
                .map_err(JumpError::Editor)?;
            info!(
                target: "jump_handler",
                "{} -> {}:{}",
                found.query,
                found.found.file_name,
                found.line_number()
            );
        }

        Ok(JumpReport {
            resize,
            viewport_width_px,
            resolution,
        })
    }
}
