//! Viewport width control for a browser window.
//!
//! The controller and the page live in different tasks and only talk through
//! [`ViewportProbe`] requests. Window geometry is reached through
//! [`BrowserWindow`]. Both are traits so hosts (an extension bridge, a
//! webdriver session, a test double) can plug in their own transport.

pub mod controller;
pub mod probe;
pub mod quick_resize;
pub mod window;

pub use controller::{ResizeController, ResizeOutcome, ResizeSession, ResizeSettings, clamp_outer_width};
pub use probe::{
    ChannelProbe, ProbeError, ProbeRequest, ViewportMeasurement, ViewportProbe,
    serve_viewport_requests,
};
pub use quick_resize::{QuickResize, QuickResizeError, QuickResizeOutcome};
pub use window::{BrowserWindow, WindowError};
