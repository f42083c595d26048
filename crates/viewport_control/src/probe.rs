//! Viewport width probing across the controller/page boundary.
//!
//! The controller never reads page geometry directly. It sends a
//! [`ProbeRequest`] to the task that owns the page and awaits the reply. A page
//! that navigated away or never started its listener simply drops the channel,
//! which surfaces as an ordinary [`ProbeError`].

use log::{debug, trace};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

/// A single fresh reading of the rendering area width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportMeasurement {
    width_px: u32,
}

impl ViewportMeasurement {
    /// # Errors
    /// Returns [`ProbeError::InvalidWidth`] for a zero width.
    #[inline]
    pub const fn new(width_px: u32) -> Result<Self, ProbeError> {
        if width_px == 0 {
            return Err(ProbeError::InvalidWidth(width_px));
        }
        Ok(Self { width_px })
    }

    #[inline]
    #[must_use]
    pub const fn width_px(self) -> u32 {
        self.width_px
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("page listener is not connected")]
    Disconnected,
    #[error("page dropped the viewport request without answering")]
    NoResponse,
    #[error("page reported an invalid viewport width of {0}px")]
    InvalidWidth(u32),
}

/// Something that can report the current viewport width of one page.
pub trait ViewportProbe {
    /// Ask the page for its viewport width.
    ///
    /// # Errors
    /// Returns a [`ProbeError`] when the page cannot answer.
    fn viewport_width(&self) -> impl Future<Output = Result<ViewportMeasurement, ProbeError>>;
}

/// Request sent to the page task; answered through a one-shot reply.
#[derive(Debug)]
pub struct ProbeRequest {
    reply: oneshot::Sender<u32>,
}

impl ProbeRequest {
    /// Answer the request. A requester that gave up is not an error.
    #[inline]
    pub fn respond(self, width_px: u32) {
        if self.reply.send(width_px).is_err() {
            trace!(target: "viewport_control", "viewport reply discarded; requester is gone");
        }
    }
}

/// Controller-side probe talking to a page task over a channel.
#[derive(Clone, Debug)]
pub struct ChannelProbe {
    sender: mpsc::Sender<ProbeRequest>,
}

impl ChannelProbe {
    #[inline]
    #[must_use]
    pub const fn new(sender: mpsc::Sender<ProbeRequest>) -> Self {
        Self { sender }
    }

    /// Create a probe together with the receiver the page task should serve.
    #[inline]
    #[must_use]
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<ProbeRequest>) {
        let (sender, receiver) = mpsc::channel(buffer);
        (Self::new(sender), receiver)
    }
}

impl ViewportProbe for ChannelProbe {
    async fn viewport_width(&self) -> Result<ViewportMeasurement, ProbeError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(ProbeRequest { reply })
            .await
            .map_err(|_| ProbeError::Disconnected)?;
        let width_px = response.await.map_err(|_| ProbeError::NoResponse)?;
        ViewportMeasurement::new(width_px)
    }
}

/// Page-side loop: answer every request with the width reported by `viewport`.
///
/// Returns once every [`ChannelProbe`] for this page has been dropped.
pub async fn serve_viewport_requests<F>(mut requests: mpsc::Receiver<ProbeRequest>, viewport: F)
where
    F: Fn() -> u32,
{
    while let Some(request) = requests.recv().await {
        let width_px = viewport();
        debug!(target: "viewport_control", "page reports viewport width {width_px}px");
        request.respond(width_px);
    }
}
