//! Ink levels for the tri-color panel
//!
//! This module defines the [`Color`] enum for the three ink levels the panel
//! can show, the gray-level quantization rule that maps 8-bit intensities
//! onto them, and the bit pair each level contributes to the two wire-format
//! bit planes.
//!
//! ## Quantization
//!
//! | Intensity | Color |
//! |-----------|-------|
//! | 0–31      | Black |
//! | 32–222    | Red   |
//! | 223–255   | White |
//!
//! The black test is evaluated before the mid-band collapse to red; the
//! order matters, otherwise dark pixels would be swallowed by the red band.
//!
//! ## Bit planes
//!
//! Each pixel is represented by 1 bit in each of two planes:
//!
//! | Color | MSB plane | LSB plane |
//! |-------|-----------|-----------|
//! | Black | 0         | 0         |
//! | White | 1         | 0         |
//! | Red   | 1         | 1         |
//!
//! The fourth code point (0, 1) has no meaning to the panel firmware and is
//! never produced by quantization.
//!
//! ## Example
//!
//! ```
//! use epd1304::Color;
//!
//! assert_eq!(Color::from_gray(0), Color::Black);
//! assert_eq!(Color::from_gray(128), Color::Red);
//! assert_eq!(Color::from_gray(255), Color::White);
//! assert_eq!(Color::White.bits(), (1, 0));
//! ```

/// Intensities strictly below this value quantize to [`Color::Black`]
pub const BLACK_THRESHOLD: u8 = 32;

/// Intensities strictly above this value quantize to [`Color::White`]
pub const WHITE_THRESHOLD: u8 = 222;

/// Ink levels supported by the panel
///
/// Mid-band gray values are shown with red ink; only the extremes of the
/// intensity range map to black and white.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    /// Black ink
    Black,
    /// White (no ink)
    White,
    /// Red ink
    Red,
}

impl Color {
    /// Quantize an 8-bit gray intensity to an ink level
    ///
    /// ## Example
    ///
    /// ```
    /// use epd1304::Color;
    ///
    /// assert_eq!(Color::from_gray(31), Color::Black);
    /// assert_eq!(Color::from_gray(32), Color::Red);
    /// assert_eq!(Color::from_gray(222), Color::Red);
    /// assert_eq!(Color::from_gray(223), Color::White);
    /// ```
    pub fn from_gray(intensity: u8) -> Self {
        // Black must win before the mid-band collapse.
        if intensity < BLACK_THRESHOLD {
            Self::Black
        } else if intensity > WHITE_THRESHOLD {
            Self::White
        } else {
            Self::Red
        }
    }

    /// Bit this level contributes to the most-significant plane
    pub fn msb_bit(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::White | Self::Red => 1,
        }
    }

    /// Bit this level contributes to the least-significant plane
    pub fn lsb_bit(self) -> u8 {
        match self {
            Self::Black | Self::White => 0,
            Self::Red => 1,
        }
    }

    /// The (MSB, LSB) bit pair for this level
    pub fn bits(self) -> (u8, u8) {
        (self.msb_bit(), self.lsb_bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_thresholds() {
        assert_eq!(Color::from_gray(0), Color::Black);
        assert_eq!(Color::from_gray(31), Color::Black);
        assert_eq!(Color::from_gray(32), Color::Red);
        assert_eq!(Color::from_gray(128), Color::Red);
        assert_eq!(Color::from_gray(222), Color::Red);
        assert_eq!(Color::from_gray(223), Color::White);
        assert_eq!(Color::from_gray(255), Color::White);
    }

    #[test]
    fn test_bit_pairs() {
        assert_eq!(Color::Black.bits(), (0, 0));
        assert_eq!(Color::White.bits(), (1, 0));
        assert_eq!(Color::Red.bits(), (1, 1));
    }

    #[test]
    fn test_quantization_is_total() {
        let mut black = 0usize;
        let mut white = 0usize;
        let mut red = 0usize;
        for intensity in 0..=255u8 {
            match Color::from_gray(intensity) {
                Color::Black => black += 1,
                Color::White => white += 1,
                Color::Red => red += 1,
            }
        }
        assert_eq!(black, 32);
        assert_eq!(red, 191);
        assert_eq!(white, 33);
    }

    #[test]
    fn test_fourth_code_point_is_unreachable() {
        for intensity in 0..=255u8 {
            assert_ne!(Color::from_gray(intensity).bits(), (0, 1));
        }
    }
}
