//! Error types for the driver
//!
//! This module defines the runtime error type for link and session
//! operations ([`Error`]) and the construction-time error types for rasters
//! ([`FrameError`]) and layouts ([`LayoutError`]).
//!
//! [`Error`] is generic over the transport type to preserve the specific
//! transport error, so callers can match on the underlying I/O failure.
//!
//! ## Example
//!
//! ```
//! use epd1304::{Frame, FrameError};
//!
//! // Pixel vector shorter than rows * cols
//! let result = Frame::new(4, 16, vec![0u8; 10]);
//! assert!(matches!(
//!     result,
//!     Err(FrameError::LengthMismatch { expected: 64, provided: 10 })
//! ));
//! ```

use std::fmt;

use crate::transport::Transport;

/// Errors that can occur while driving the panel
///
/// Generic over the transport type to preserve the specific error type.
/// Protocol failures (the three acknowledge variants) are fatal to the
/// session: the transport has already been closed by the time one surfaces.
#[derive(Debug)]
pub enum Error<T: Transport> {
    /// Transport-level I/O failure
    ///
    /// Wraps the underlying error from the [`Transport`] implementation.
    Transport(T::Error),
    /// The raster cannot be encoded for the panel
    ///
    /// A caller bug; the link is left untouched and usable.
    InvalidFrame(FrameError),
    /// The device did not report ready on wake
    LinkInit {
        /// Byte the device sent instead of the ready acknowledgment
        response: u8,
    },
    /// The device did not acknowledge a transmitted frame
    FrameNotAcknowledged {
        /// Byte the device sent instead of the frame acknowledgment
        response: u8,
    },
    /// The device did not confirm entering sleep
    SleepNotAcknowledged {
        /// Byte the device sent instead of the sleep confirmation
        response: u8,
    },
    /// An image file could not be decoded into a raster
    #[cfg(feature = "image")]
    Decode(crate::decode::DecodeError),
}

impl<T: Transport> fmt::Display for Error<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(_) => write!(f, "transport error"),
            Self::InvalidFrame(e) => write!(f, "{e}"),
            Self::LinkInit { response } => {
                write!(f, "the link did not report ready (response 0x{response:02x})")
            }
            Self::FrameNotAcknowledged { response } => {
                write!(f, "the frame was not acknowledged (response 0x{response:02x})")
            }
            Self::SleepNotAcknowledged { response } => {
                write!(
                    f,
                    "the display did not enter sleep mode (response 0x{response:02x})"
                )
            }
            #[cfg(feature = "image")]
            Self::Decode(e) => write!(f, "{e}"),
        }
    }
}

impl<T: Transport + fmt::Debug> std::error::Error for Error<T> {}

impl<T: Transport> From<FrameError> for Error<T> {
    fn from(e: FrameError) -> Self {
        Self::InvalidFrame(e)
    }
}

#[cfg(feature = "image")]
impl<T: Transport> From<crate::decode::DecodeError> for Error<T> {
    fn from(e: crate::decode::DecodeError) -> Self {
        Self::Decode(e)
    }
}

/// Raster shape violations
///
/// These are caller bugs, detected before any byte reaches the wire; they
/// are never retried and never affect link state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FrameError {
    /// The pixel vector length does not match the stated dimensions
    LengthMismatch {
        /// `rows * cols` of the stated dimensions
        expected: usize,
        /// Length of the provided pixel vector
        provided: usize,
    },
    /// The frame's dimensions do not match the target layout
    DimensionMismatch {
        /// Frame height in pixels
        rows: usize,
        /// Frame width in pixels
        cols: usize,
        /// Layout height in pixels
        expected_rows: usize,
        /// Layout width in pixels
        expected_cols: usize,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, provided } => {
                write!(
                    f,
                    "invalid frame: expected {expected} pixels, got {provided}"
                )
            }
            Self::DimensionMismatch {
                rows,
                cols,
                expected_rows,
                expected_cols,
            } => {
                write!(
                    f,
                    "invalid frame: {rows}x{cols} does not match the {expected_rows}x{expected_cols} layout"
                )
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// Errors that can occur when constructing a [`Layout`](crate::Layout)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LayoutError {
    /// Zero-sized raster, or a width that is not a whole number of bytes
    InvalidDimensions {
        /// Number of rows (height) requested
        rows: usize,
        /// Number of columns (width) requested
        cols: usize,
    },
    /// A quadrant split outside the raster, or a split column that is not
    /// byte-aligned
    InvalidSplit {
        /// First row of the bottom quadrants
        row_split: usize,
        /// First column of the right quadrants
        col_split: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(
                    f,
                    "invalid layout dimensions {rows}x{cols} (cols must be a non-zero multiple of 8)"
                )
            }
            Self::InvalidSplit {
                row_split,
                col_split,
            } => {
                write!(
                    f,
                    "invalid quadrant split at row {row_split}, column {col_split}"
                )
            }
        }
    }
}

impl std::error::Error for LayoutError {}
