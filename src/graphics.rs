//! Graphics support via embedded-graphics
//!
//! Implements [`DrawTarget`] for [`Frame`] with [`Gray8`] pixels, so text
//! and primitives from the embedded-graphics ecosystem can be composed
//! straight into a raster before it is packed and sent.
//!
//! Drawn intensities are stored as-is; quantization to the three ink levels
//! happens at pack time. Draw pure black (`Gray8::BLACK`), pure white
//! (`Gray8::WHITE`), or any mid-band gray for red ink.
//!
//! ## Example
//!
//! ```
//! use embedded_graphics::{
//!     pixelcolor::Gray8,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use epd1304::Frame;
//!
//! let mut frame = Frame::filled(epd1304::PANEL_ROWS, epd1304::PANEL_COLS, 255);
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(100, 50))
//!     .into_styled(PrimitiveStyle::with_fill(Gray8::BLACK))
//!     .draw(&mut frame);
//! ```

use core::convert::Infallible;

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::{Gray8, GrayColor},
    prelude::Pixel,
};

use crate::frame::Frame;

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(self.cols() as u32, self.rows() as u32)
    }
}

impl DrawTarget for Frame {
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                let (col, row) = (point.x as usize, point.y as usize);
                if row < self.rows() && col < self.cols() {
                    self.set_pixel(row, col, color.luma());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    };

    #[test]
    fn test_filled_rectangle_lands_in_pixels() {
        let mut frame = Frame::filled(16, 16, 255);
        Rectangle::new(Point::new(2, 3), Size::new(4, 2))
            .into_styled(PrimitiveStyle::with_fill(Gray8::BLACK))
            .draw(&mut frame)
            .unwrap();

        assert_eq!(frame.pixel(3, 2), 0);
        assert_eq!(frame.pixel(4, 5), 0);
        assert_eq!(frame.pixel(3, 6), 255);
        assert_eq!(frame.pixel(5, 2), 255);
        assert_eq!(frame.pixel(2, 2), 255);
    }

    #[test]
    fn test_out_of_bounds_pixels_are_clipped() {
        let mut frame = Frame::filled(8, 8, 255);
        Rectangle::new(Point::new(-2, -2), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(Gray8::BLACK))
            .draw(&mut frame)
            .unwrap();

        assert_eq!(frame.pixel(0, 0), 0);
        assert_eq!(frame.pixel(1, 1), 0);
        assert_eq!(frame.pixel(2, 2), 255);
    }

    #[test]
    fn test_size_reports_raster_dimensions() {
        let frame = Frame::filled(4, 16, 0);
        assert_eq!(frame.size(), Size::new(16, 4));
    }
}
