//! Driver for a 1304×984 tri-color e-paper panel behind a serial bridge
//!
//! The panel is addressed through a microcontroller bridge that speaks a
//! one-byte request/acknowledge protocol over a 2 Mbaud serial link. This
//! crate packs 8-bit grayscale rasters into the panel's native wire format —
//! 2 bits per pixel, split into two bit planes and four controller quadrants
//! — and drives the wake/transmit/sleep handshake behind a scoped session
//! that always releases the device.
//!
//! ## Features
//!
//! - `serial` — [`SerialTransport`] over an OS serial device (via `serialport`)
//! - `image` — [`decode_image`] file loading (via `image`)
//! - `graphics` — `embedded-graphics` `DrawTarget` for [`Frame`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use epd1304::{Frame, Session, PANEL_COLS, PANEL_ROWS};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::open_device("/dev/ttyACM0")?;
//!
//! // Dark intensities ink black, light ones stay white, and the mid band
//! // is shown with red ink.
//! let mut frame = Frame::filled(PANEL_ROWS, PANEL_COLS, 255);
//! frame.set_pixel(492, 652, 0);
//! session.send(&frame)?;
//!
//! // Or decode an image file of the panel's exact dimensions.
//! session.show_file("example.png")?;
//!
//! session.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! One-shot callers can use [`show_once`] (or [`show_file_once`] with a
//! device path), which brackets a single frame with the wake and sleep
//! handshakes.
//!
//! ## Protocol
//!
//! See the [`protocol`] module for the byte-level handshake. Every protocol
//! deviation is fatal: nothing is retried, and the transport is closed
//! before the error reaches the caller.

/// Ink levels and gray-level quantization
pub mod color;
/// Error types for the driver
pub mod error;
/// Raster frames and the wire-format encoder
pub mod frame;
/// Panel geometry and wire-format layout
pub mod layout;
/// Link handshake state machine
pub mod protocol;
/// Scoped display sessions
pub mod session;
/// Byte transport abstraction
pub mod transport;

/// Image-file decoding (requires the `image` feature)
#[cfg(feature = "image")]
pub mod decode;

/// embedded-graphics integration (requires the `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use color::{BLACK_THRESHOLD, Color, WHITE_THRESHOLD};
pub use error::{Error, FrameError, LayoutError};
pub use frame::{Frame, PackedFrame};
pub use layout::{
    BitPlane, Layout, PANEL_COL_SPLIT, PANEL_COLS, PANEL_ROW_SPLIT, PANEL_ROWS, Quadrant,
};
pub use protocol::{Link, LinkState, READY, SLEEP};
pub use session::{Session, show_once};
pub use transport::Transport;

#[cfg(feature = "serial")]
pub use transport::{BAUD_RATE, DEFAULT_READ_TIMEOUT_MS, SerialError, SerialTransport};

#[cfg(feature = "image")]
pub use decode::{DecodeError, decode_image};

#[cfg(all(feature = "serial", feature = "image"))]
pub use session::show_file_once;
