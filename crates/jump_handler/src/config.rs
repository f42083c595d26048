//! Runtime configuration for the jump pipeline.
//!
//! Window convergence tunables and the location of the settings file can be
//! loaded from environment variables or constructed programmatically. User
//! preferences (target width, tracked files) live in [`crate::settings`].

use core::str::FromStr;
use core::time::Duration;
use std::env;
use std::path::PathBuf;
use viewport_control::ResizeSettings;

/// Runtime configuration for window convergence and settings lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumperConfig {
    /// Wait after each window write before re-measuring, in milliseconds
    pub settle_delay_ms: u64,
    /// Wait after a blind fallback resize, in milliseconds
    pub fallback_settle_delay_ms: u64,
    /// Upper bound on window writes per resize session
    pub max_attempts: u32,
    /// Minimum outer window width in pixels
    pub min_window_width_px: u32,
    /// Chrome width assumed when the page cannot be probed
    pub fallback_chrome_overhead_px: u32,
    /// Optional JSON settings file
    pub settings_path: Option<PathBuf>,
}

impl Default for JumperConfig {
    #[inline]
    fn default() -> Self {
        let resize = ResizeSettings::default();
        Self {
            settle_delay_ms: duration_millis(resize.settle_delay),
            fallback_settle_delay_ms: duration_millis(resize.fallback_settle_delay),
            max_attempts: resize.max_attempts,
            min_window_width_px: resize.min_window_width_px,
            fallback_chrome_overhead_px: resize.fallback_chrome_overhead_px,
            settings_path: None,
        }
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn env_parsed<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|val| val.trim().parse::<T>().ok())
}

impl JumperConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `JUMPER_SETTLE_MS`: settle delay after a resize (default: 150)
    /// - `JUMPER_FALLBACK_SETTLE_MS`: settle delay after a fallback resize (default: 300)
    /// - `JUMPER_MAX_ATTEMPTS`: resize attempts per session, at least 1 (default: 5)
    /// - `JUMPER_MIN_WINDOW_WIDTH`: window width floor in pixels (default: 400)
    /// - `JUMPER_FALLBACK_CHROME_PX`: assumed chrome width (default: 87)
    /// - `JUMPER_SETTINGS`: path to a JSON settings file
    ///
    /// # Returns
    ///
    /// A new `JumperConfig` with unset or unparsable variables at their defaults
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            settle_delay_ms: env_parsed("JUMPER_SETTLE_MS").unwrap_or(defaults.settle_delay_ms),
            fallback_settle_delay_ms: env_parsed("JUMPER_FALLBACK_SETTLE_MS")
                .unwrap_or(defaults.fallback_settle_delay_ms),
            max_attempts: env_parsed::<u32>("JUMPER_MAX_ATTEMPTS")
                .unwrap_or(defaults.max_attempts)
                .max(1),
            min_window_width_px: env_parsed("JUMPER_MIN_WINDOW_WIDTH")
                .unwrap_or(defaults.min_window_width_px),
            fallback_chrome_overhead_px: env_parsed("JUMPER_FALLBACK_CHROME_PX")
                .unwrap_or(defaults.fallback_chrome_overhead_px),
            settings_path: env::var_os("JUMPER_SETTINGS")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Get the resize tunables for a [`viewport_control::ResizeController`].
    #[must_use]
    pub const fn resize_settings(&self) -> ResizeSettings {
        ResizeSettings {
            max_attempts: self.max_attempts,
            min_window_width_px: self.min_window_width_px,
            fallback_chrome_overhead_px: self.fallback_chrome_overhead_px,
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            fallback_settle_delay: Duration::from_millis(self.fallback_settle_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_resize_settings() {
        assert_eq!(JumperConfig::default().resize_settings(), ResizeSettings::default());
    }
}
