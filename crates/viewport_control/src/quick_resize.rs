//! One-shot toggle between the user's viewport width and a preset width.
//!
//! Unlike [`crate::ResizeController`] this does a single analytic resize with
//! no correction rounds; it is bound to a mouse gesture and has to feel instant.

use crate::controller::clamp_outer_width;
use crate::probe::{ProbeError, ViewportProbe};
use crate::window::{BrowserWindow, WindowError};
use log::info;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QuickResizeError {
    #[error("viewport could not be measured: {0}")]
    Probe(#[from] ProbeError),
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// What a toggle did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuickResizeOutcome {
    /// Switched to the preset; `original_viewport_px` is remembered for the way back.
    Resized {
        original_viewport_px: u32,
        target_viewport_px: u32,
    },
    /// Switched back to the remembered width.
    Restored { viewport_px: u32 },
}

/// Toggle state. Active while an original width is remembered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuickResize {
    target_viewport_px: u32,
    min_window_width_px: u32,
    original_viewport_px: Option<u32>,
}

impl QuickResize {
    #[inline]
    #[must_use]
    pub const fn new(target_viewport_px: u32, min_window_width_px: u32) -> Self {
        Self {
            target_viewport_px,
            min_window_width_px,
            original_viewport_px: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.original_viewport_px.is_some()
    }

    /// Resize to the preset width, or back to the remembered width if active.
    ///
    /// # Errors
    /// Returns an error and leaves the toggle state untouched when the page or
    /// window cannot be reached.
    pub async fn toggle<W, P>(&mut self, window: &W, probe: &P) -> Result<QuickResizeOutcome, QuickResizeError>
    where
        W: BrowserWindow,
        P: ViewportProbe,
    {
        let viewport_px = probe.viewport_width().await?.width_px();
        let outer_px = window.outer_width().await?;
        let chrome_overhead = i64::from(outer_px) - i64::from(viewport_px);

        if let Some(original_viewport_px) = self.original_viewport_px {
            let new_outer = clamp_outer_width(
                i64::from(original_viewport_px) + chrome_overhead,
                self.min_window_width_px,
            );
            window.set_outer_width(new_outer).await?;
            self.original_viewport_px = None;
            info!(target: "viewport_control", "quick resize restored {original_viewport_px}px");
            return Ok(QuickResizeOutcome::Restored {
                viewport_px: original_viewport_px,
            });
        }

        let new_outer = clamp_outer_width(
            i64::from(self.target_viewport_px) + chrome_overhead,
            self.min_window_width_px,
        );
        window.set_outer_width(new_outer).await?;
        self.original_viewport_px = Some(viewport_px);
        info!(
            target: "viewport_control",
            "quick resize {viewport_px}px -> {}px (outer {new_outer}px)",
            self.target_viewport_px
        );
        Ok(QuickResizeOutcome::Resized {
            original_viewport_px: viewport_px,
            target_viewport_px: self.target_viewport_px,
        })
    }
}
