//! Image-file decoding
//!
//! File decoding is a convenience around the core: nothing in the encoder
//! or the protocol layer depends on it. [`decode_image`] loads any format
//! the `image` crate understands, converts color images to 8-bit gray
//! levels, and wraps the result as a [`Frame`] carrying the image's own
//! dimensions. Dimension enforcement stays where it belongs, in
//! [`Frame::pack`]: a wrong-sized image is rejected there, not resized here.

use std::fmt;
use std::path::Path;

use crate::error::FrameError;
use crate::frame::Frame;

/// Errors that can occur when decoding an image file
#[derive(Debug)]
pub enum DecodeError {
    /// The file could not be read or decoded
    Image(image::ImageError),
    /// The decoded pixels do not form a valid raster
    Frame(FrameError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image(e) => write!(f, "failed to decode image: {e}"),
            Self::Frame(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode an image file into a grayscale raster
///
/// Color images are converted to gray levels. The frame keeps the image's
/// dimensions; pass it to [`Session::send`](crate::Session::send) (or
/// [`Frame::pack`]) to have them checked against the panel.
///
/// # Errors
///
/// Returns [`DecodeError::Image`] if the file cannot be read or decoded.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<Frame, DecodeError> {
    let gray = image::open(path).map_err(DecodeError::Image)?.into_luma8();
    let (width, height) = gray.dimensions();
    log::debug!("decoded {width}x{height} image");
    Frame::new(height as usize, width as usize, gray.into_raw()).map_err(DecodeError::Frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_gray_png() {
        let mut img = image::GrayImage::new(6, 4);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = image::Luma([(x * 40 + y) as u8]);
        }
        let path = std::env::temp_dir().join(format!("epd1304-decode-{}.png", std::process::id()));
        img.save(&path).unwrap();

        let frame = decode_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(frame.rows(), 4);
        assert_eq!(frame.cols(), 6);
        assert_eq!(frame.pixel(1, 2), 81);
        assert_eq!(frame.pixel(3, 0), 3);
    }

    #[test]
    fn test_decode_missing_file() {
        let path = std::env::temp_dir().join("epd1304-does-not-exist.png");
        let result = decode_image(&path);
        assert!(matches!(result, Err(DecodeError::Image(_))));
    }
}
