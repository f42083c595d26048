//! Host window geometry.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("window {0} no longer exists")]
    Closed(String),
    #[error("window manager rejected the request: {0}")]
    Rejected(String),
}

/// A browser window whose outer width (chrome included) can be read and set.
pub trait BrowserWindow {
    /// # Errors
    /// Returns a [`WindowError`] if the window cannot be queried.
    fn outer_width(&self) -> impl Future<Output = Result<u32, WindowError>>;

    /// # Errors
    /// Returns a [`WindowError`] if the window cannot be resized.
    fn set_outer_width(&self, width_px: u32) -> impl Future<Output = Result<(), WindowError>>;
}
