//! Scoped display sessions
//!
//! A [`Session`] owns the only [`Link`] for its scope and guarantees the
//! sleep-and-close handshake runs exactly once on every exit path. Call
//! [`Session::close`] to end the session and observe a sleep failure; if the
//! session is dropped instead, the handshake still runs as a best effort and
//! any failure is logged rather than propagated. After a protocol failure
//! the link is already closed, so neither path touches the device again —
//! the first error always wins.
//!
//! ## Example
//!
//! ```rust,no_run
//! use epd1304::{Frame, Session, PANEL_COLS, PANEL_ROWS};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::open_device("/dev/ttyACM0")?;
//! session.send(&Frame::filled(PANEL_ROWS, PANEL_COLS, 255))?;
//! session.send(&Frame::filled(PANEL_ROWS, PANEL_COLS, 0))?;
//! session.close()?;
//! # Ok(())
//! # }
//! ```

use log::warn;

#[cfg(feature = "image")]
use std::path::Path;

use crate::error::Error;
use crate::frame::Frame;
use crate::layout::Layout;
use crate::protocol::{Link, LinkState};
use crate::transport::Transport;

#[cfg(feature = "serial")]
use crate::transport::SerialTransport;

/// A scoped display session over an awake link
///
/// Composes the frame encoder and the link protocol: [`send`](Self::send)
/// packs a raster and transmits it, blocking until the panel has displayed
/// it. The session exclusively owns the transport for its whole scope.
pub struct Session<T: Transport> {
    /// The one link of this session
    link: Link<T>,
    /// Geometry frames are packed against
    layout: Layout,
}

impl<T: Transport> Session<T> {
    /// Open a session over the given transport
    ///
    /// Blocks until the device reports ready.
    ///
    /// # Errors
    ///
    /// Propagates [`Link::open`] failures; the transport is closed before
    /// any error is returned.
    pub fn open(transport: T) -> Result<Self, Error<T>> {
        Ok(Self {
            link: Link::open(transport)?,
            layout: Layout::panel(),
        })
    }

    /// Pack a raster and transmit it, waiting until it is displayed
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] if the raster does not match the
    /// panel dimensions (the link is untouched and stays usable), or a
    /// protocol/transport error from the transmission (the link is closed).
    pub fn send(&mut self, frame: &Frame) -> Result<(), Error<T>> {
        let packed = frame.pack(&self.layout)?;
        self.link.transmit(packed.as_bytes())
    }

    /// Show an externally decoded raster
    ///
    /// Identical to [`send`](Self::send); this is the entry point for
    /// callers that decode image files themselves.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub fn show(&mut self, frame: &Frame) -> Result<(), Error<T>> {
        self.send(frame)
    }

    /// Decode an image file and show it
    ///
    /// Color images are converted to gray levels before quantization. The
    /// image must match the panel dimensions exactly; it is not resized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the file cannot be decoded, otherwise
    /// see [`send`](Self::send).
    #[cfg(feature = "image")]
    pub fn show_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error<T>> {
        let frame = crate::decode::decode_image(path)?;
        self.send(&frame)
    }

    /// End the session: sleep the display and release the transport
    ///
    /// # Errors
    ///
    /// Propagates [`Link::close`] failures. The transport is released in
    /// all cases.
    pub fn close(mut self) -> Result<(), Error<T>> {
        self.link.close()
    }

    /// Current link state
    pub fn state(&self) -> LinkState {
        self.link.state()
    }
}

impl<T: Transport> Drop for Session<T> {
    fn drop(&mut self) {
        if self.link.state() != LinkState::Closed {
            if let Err(e) = self.link.close() {
                warn!("session close failed: {e}");
            }
        }
    }
}

#[cfg(feature = "serial")]
impl Session<SerialTransport> {
    /// Open a session over a serial device path
    ///
    /// Opens the device at the panel baud rate with the default read
    /// timeout, then performs the wake handshake.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the device cannot be opened,
    /// otherwise see [`Session::open`].
    pub fn open_device(path: &str) -> Result<Self, Error<SerialTransport>> {
        let transport = SerialTransport::open(path).map_err(Error::Transport)?;
        Self::open(transport)
    }
}

/// Open a session, show a single raster, and close the session
///
/// For several frames on one wake, hold a [`Session`] instead; the wake and
/// sleep handshakes then run once rather than per frame.
///
/// # Errors
///
/// Propagates the first failure from open, send, or close.
pub fn show_once<T: Transport>(transport: T, frame: &Frame) -> Result<(), Error<T>> {
    let mut session = Session::open(transport)?;
    session.send(frame)?;
    session.close()
}

/// Open a serial device, show a single image file, and close the session
///
/// # Errors
///
/// Propagates the first failure from open, decode, send, or close.
#[cfg(all(feature = "serial", feature = "image"))]
pub fn show_file_once<P: AsRef<Path>>(
    device: &str,
    path: P,
) -> Result<(), Error<SerialTransport>> {
    let mut session = Session::open_device(device)?;
    session.show_file(path)?;
    session.close()
}
