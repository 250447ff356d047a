//! Byte transport abstraction
//!
//! This module provides the [`Transport`] trait the protocol layer is
//! written against, and the [`SerialTransport`] implementation over an OS
//! serial device (requires the `serial` feature).
//!
//! ## Link requirements
//!
//! The bridge expects a point-to-point, byte-oriented, blocking duplex link
//! at 2,000,000 baud. Exactly one transport handle exists per session; it is
//! owned by the [`Link`](crate::protocol::Link) for the session's whole
//! scope and is never shared.
//!
//! ## Implementing
//!
//! For real hardware, use [`SerialTransport`]. Implement the trait on your
//! own type to test protocol logic or to tunnel the link over something
//! other than a serial device.

use std::fmt::Debug;

#[cfg(feature = "serial")]
use std::io::{Read, Write};
#[cfg(feature = "serial")]
use std::time::Duration;

/// Trait for the byte transport carrying the link protocol
///
/// All operations block the calling thread. After [`close`](Self::close) the
/// transport must reject further reads and writes with an error; `close`
/// itself must be idempotent, since the protocol layer releases the
/// transport on every failure path.
pub trait Transport {
    /// Error type for transport operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Block until one byte is available and return it
    ///
    /// # Errors
    ///
    /// Returns an error if the link fails or the transport is closed.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Write the whole buffer to the link
    ///
    /// # Errors
    ///
    /// Returns an error if the link fails or the transport is closed.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Release the underlying device
    ///
    /// Closing an already-closed transport is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if releasing the device fails.
    fn close(&mut self) -> Result<(), Self::Error>;
}

/// Baud rate of the panel link
#[cfg(feature = "serial")]
pub const BAUD_RATE: u32 = 2_000_000;

/// Default read timeout in milliseconds
///
/// A full tri-color refresh takes well under a minute; a device that stays
/// silent longer than this is treated as gone rather than blocked on.
#[cfg(feature = "serial")]
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 60_000;

/// Errors that can occur at the serial transport level
#[cfg(feature = "serial")]
#[derive(Debug)]
pub enum SerialError {
    /// The device could not be opened
    Open(serialport::Error),
    /// I/O failure on the open port (including read timeouts)
    Io(std::io::Error),
    /// Operation on a transport that was already closed
    Closed,
}

#[cfg(feature = "serial")]
impl std::fmt::Display for SerialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(e) => write!(f, "failed to open serial device: {e}"),
            Self::Io(e) => write!(f, "serial I/O error: {e}"),
            Self::Closed => write!(f, "serial transport is closed"),
        }
    }
}

#[cfg(feature = "serial")]
impl std::error::Error for SerialError {}

/// [`Transport`] implementation over an OS serial device
///
/// Opens the device at the panel's fixed [`BAUD_RATE`] with a bounded read
/// timeout. The bridge firmware never legitimately goes silent mid-handshake,
/// so a timeout surfaces as an ordinary transport error and ends the session.
///
/// ## Example
///
/// ```rust,no_run
/// use epd1304::{SerialTransport, Transport};
///
/// # fn main() -> Result<(), epd1304::SerialError> {
/// let mut transport = SerialTransport::open("/dev/ttyACM0")?;
/// let ready = transport.read_byte()?;
/// # let _ = ready;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "serial")]
pub struct SerialTransport {
    /// The open device; `None` once closed
    port: Option<Box<dyn serialport::SerialPort>>,
}

#[cfg(feature = "serial")]
impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("open", &self.port.is_some())
            .finish()
    }
}

#[cfg(feature = "serial")]
impl SerialTransport {
    /// Open a serial device with the default read timeout
    ///
    /// # Errors
    ///
    /// Returns [`SerialError::Open`] if the device cannot be opened.
    pub fn open(path: &str) -> Result<Self, SerialError> {
        Self::open_with_timeout(path, Duration::from_millis(DEFAULT_READ_TIMEOUT_MS))
    }

    /// Open a serial device with a caller-chosen read timeout
    ///
    /// # Errors
    ///
    /// Returns [`SerialError::Open`] if the device cannot be opened.
    pub fn open_with_timeout(path: &str, timeout: Duration) -> Result<Self, SerialError> {
        let port = serialport::new(path, BAUD_RATE)
            .timeout(timeout)
            .open()
            .map_err(SerialError::Open)?;
        log::debug!("opened {path} at {BAUD_RATE} baud");
        Ok(Self { port: Some(port) })
    }
}

#[cfg(feature = "serial")]
impl Transport for SerialTransport {
    type Error = SerialError;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let port = self.port.as_mut().ok_or(SerialError::Closed)?;
        let mut byte = [0u8; 1];
        port.read_exact(&mut byte).map_err(SerialError::Io)?;
        Ok(byte[0])
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        let port = self.port.as_mut().ok_or(SerialError::Closed)?;
        port.write_all(bytes).map_err(SerialError::Io)?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        // Dropping the handle releases the device.
        self.port = None;
        Ok(())
    }
}
