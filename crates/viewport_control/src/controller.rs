//! Drive a window's outer width until its viewport reaches a target width.
//!
//! The window chrome (borders, side panels, scrollbars) has an unknown width
//! that differs per platform, zoom level and monitor. The first attempt
//! estimates it from one measurement and sizes the window analytically. Later
//! attempts correct by the remaining pixel difference, which settles the
//! rounding error of the first step in one or two rounds.

use crate::probe::ViewportProbe;
use crate::window::{BrowserWindow, WindowError};
use core::time::Duration;
use log::{debug, info, warn};
use tokio::time::sleep;

/// Tunables for a resize session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizeSettings {
    /// Upper bound on window writes per session.
    pub max_attempts: u32,
    /// The window is never made narrower than this.
    pub min_window_width_px: u32,
    /// Chrome width assumed when the page cannot be probed.
    pub fallback_chrome_overhead_px: u32,
    /// Wait after each write before measuring again.
    pub settle_delay: Duration,
    /// Wait after the blind fallback write.
    pub fallback_settle_delay: Duration,
}

impl Default for ResizeSettings {
    #[inline]
    fn default() -> Self {
        Self {
            max_attempts: 5,
            min_window_width_px: 400,
            fallback_chrome_overhead_px: 87,
            settle_delay: Duration::from_millis(150),
            fallback_settle_delay: Duration::from_millis(300),
        }
    }
}

/// How a resize request ended. None of these are errors to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// The viewport already had the target width; nothing was written.
    AlreadyOnTarget,
    /// The viewport reached the target after `attempts` writes.
    Converged { attempts: u32 },
    /// Attempts ran out; `viewport_width_px` is the last measured width.
    BestEffort { attempts: u32, viewport_width_px: u32 },
    /// The page stopped answering after a write, so the result is unknown.
    Unverified { attempts: u32 },
    /// The page could not be probed; the window was sized from the default overhead.
    Fallback { outer_width_px: u32 },
    /// The window itself could not be read or written.
    Aborted { attempts: u32, reason: WindowError },
}

/// State of one convergence run. Not shared and not persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizeSession {
    target_viewport_px: u32,
    min_window_width_px: u32,
    attempt: u32,
    chrome_overhead_px: Option<i64>,
}

impl ResizeSession {
    #[inline]
    #[must_use]
    pub const fn new(target_viewport_px: u32, min_window_width_px: u32) -> Self {
        Self {
            target_viewport_px,
            min_window_width_px,
            attempt: 1,
            chrome_overhead_px: None,
        }
    }

    /// 1-based attempt counter.
    #[inline]
    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Chrome width estimated on the first attempt of this session.
    #[inline]
    #[must_use]
    pub const fn chrome_overhead_px(&self) -> Option<i64> {
        self.chrome_overhead_px
    }

    /// Outer width to apply for the current attempt, given fresh measurements.
    ///
    /// The first attempt estimates the chrome overhead and sizes analytically;
    /// later attempts shift the current outer width by the remaining difference.
    #[must_use]
    pub fn next_outer_width(&mut self, outer_width_px: u32, viewport_width_px: u32) -> u32 {
        let target = i64::from(self.target_viewport_px);
        let outer = i64::from(outer_width_px);
        let viewport = i64::from(viewport_width_px);

        let wanted = if self.attempt == 1 {
            let overhead = outer - viewport;
            self.chrome_overhead_px = Some(overhead);
            debug!(
                target: "viewport_control",
                "attempt 1: outer {outer}px, viewport {viewport}px, chrome {overhead}px, target {target}px"
            );
            target + overhead
        } else {
            let diff = viewport - target;
            debug!(
                target: "viewport_control",
                "attempt {}: viewport {viewport}px is {diff}px off target {target}px",
                self.attempt
            );
            outer - diff
        };
        clamp_outer_width(wanted, self.min_window_width_px)
    }

    #[inline]
    fn advance(&mut self) {
        self.attempt += 1;
    }
}

/// Apply the window width floor and fit the result into `u32`.
#[inline]
#[must_use]
pub fn clamp_outer_width(wanted_px: i64, min_window_width_px: u32) -> u32 {
    let floored = wanted_px.max(i64::from(min_window_width_px));
    u32::try_from(floored).unwrap_or(u32::MAX)
}

/// Runs resize sessions with fixed settings.
#[derive(Clone, Debug, Default)]
pub struct ResizeController {
    settings: ResizeSettings,
}

impl ResizeController {
    #[inline]
    #[must_use]
    pub const fn new(settings: ResizeSettings) -> Self {
        Self { settings }
    }

    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &ResizeSettings {
        &self.settings
    }

    /// Resize `window` so that `probe` reports `target_viewport_px`.
    ///
    /// Never fails: probe problems fall back to a blind resize and window
    /// problems end the session. Callers must not assume the viewport is
    /// exactly on target afterwards; inspect the returned outcome instead.
    pub async fn resize_to_target<W, P>(
        &self,
        window: &W,
        probe: &P,
        target_viewport_px: u32,
    ) -> ResizeOutcome
    where
        W: BrowserWindow,
        P: ViewportProbe,
    {
        let mut viewport_px = match probe.viewport_width().await {
            Ok(measurement) => measurement.width_px(),
            Err(err) => {
                warn!(target: "viewport_control", "Viewport probe failed ({err}); using fallback resize");
                return self.fallback(window, target_viewport_px).await;
            }
        };

        if viewport_px == target_viewport_px {
            debug!(target: "viewport_control", "viewport already at {target_viewport_px}px");
            return ResizeOutcome::AlreadyOnTarget;
        }

        let mut session = ResizeSession::new(target_viewport_px, self.settings.min_window_width_px);
        loop {
            let attempt = session.attempt();
            let outer_px = match window.outer_width().await {
                Ok(width) => width,
                Err(reason) => {
                    warn!(target: "viewport_control", "Cannot read window width: {reason}");
                    return ResizeOutcome::Aborted {
                        attempts: attempt - 1,
                        reason,
                    };
                }
            };

            let new_outer_px = session.next_outer_width(outer_px, viewport_px);
            if let Err(reason) = window.set_outer_width(new_outer_px).await {
                warn!(target: "viewport_control", "Cannot resize window to {new_outer_px}px: {reason}");
                return ResizeOutcome::Aborted {
                    attempts: attempt - 1,
                    reason,
                };
            }
            sleep(self.settings.settle_delay).await;

            viewport_px = match probe.viewport_width().await {
                Ok(measurement) => measurement.width_px(),
                Err(err) => {
                    warn!(target: "viewport_control", "Viewport probe failed after resize: {err}");
                    return ResizeOutcome::Unverified { attempts: attempt };
                }
            };

            if viewport_px == target_viewport_px {
                info!(target: "viewport_control", "viewport converged on {target_viewport_px}px after {attempt} attempt(s)");
                return ResizeOutcome::Converged { attempts: attempt };
            }
            if attempt >= self.settings.max_attempts {
                info!(
                    target: "viewport_control",
                    "viewport stopped at {viewport_px}px (target {target_viewport_px}px) after {attempt} attempts"
                );
                return ResizeOutcome::BestEffort {
                    attempts: attempt,
                    viewport_width_px: viewport_px,
                };
            }
            session.advance();
        }
    }

    async fn fallback<W: BrowserWindow>(&self, window: &W, target_viewport_px: u32) -> ResizeOutcome {
        let wanted = i64::from(target_viewport_px) + i64::from(self.settings.fallback_chrome_overhead_px);
        let outer_width_px = clamp_outer_width(wanted, self.settings.min_window_width_px);
        if let Err(reason) = window.set_outer_width(outer_width_px).await {
            warn!(target: "viewport_control", "Fallback resize to {outer_width_px}px failed: {reason}");
            return ResizeOutcome::Aborted {
                attempts: 0,
                reason,
            };
        }
        sleep(self.settings.fallback_settle_delay).await;
        ResizeOutcome::Fallback { outer_width_px }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_uses_chrome_overhead() {
        let mut session = ResizeSession::new(768, 400);
        assert_eq!(session.next_outer_width(1367, 1280), 855);
        assert_eq!(session.chrome_overhead_px(), Some(87));
    }

    #[test]
    fn later_attempts_correct_by_difference() {
        let mut session = ResizeSession::new(768, 400);
        assert_eq!(session.next_outer_width(1367, 1280), 855);
        session.advance();
        assert_eq!(session.next_outer_width(855, 769), 854);
        session.advance();
        assert_eq!(session.next_outer_width(854, 767), 855);
        assert_eq!(session.chrome_overhead_px(), Some(87));
    }

    #[test]
    fn floor_holds_for_pathological_inputs() {
        let mut session = ResizeSession::new(100, 400);
        assert_eq!(session.next_outer_width(500, 480), 400);
        session.advance();
        // Viewport far wider than the window: a huge positive diff.
        assert_eq!(session.next_outer_width(450, 4000), 400);

        let mut inverted = ResizeSession::new(1, 400);
        // Viewport reported wider than the outer window: negative overhead.
        assert_eq!(inverted.next_outer_width(300, 900), 400);
    }

    #[test]
    fn clamp_saturates() {
        assert_eq!(clamp_outer_width(-5_000, 400), 400);
        assert_eq!(clamp_outer_width(i64::MAX, 400), u32::MAX);
        assert_eq!(clamp_outer_width(1024, 400), 1024);
    }
}
