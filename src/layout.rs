//! Panel geometry and wire-format layout
//!
//! The panel is driven by four controller chips, each owning one rectangular
//! quadrant of the raster. The wire format is therefore partitioned twice:
//! by quadrant, and within each quadrant by bit plane. This module defines
//! the geometry types and the fixed physical order in which the resulting
//! eight segments appear in a packed frame.
//!
//! ## Panel partitioning
//!
//! The 984×1304 raster splits at row 492 and column 648. The split column is
//! not the raster midpoint, so the left quadrants are 648 columns wide
//! (81 packed bytes per row) and the right quadrants 656 (82 bytes per row).
//!
//! | Segment | Quadrant     | Plane | Bytes  |
//! |---------|--------------|-------|--------|
//! | 0       | bottom-left  | MSB   | 39,852 |
//! | 1       | bottom-left  | LSB   | 39,852 |
//! | 2       | bottom-right | MSB   | 40,344 |
//! | 3       | bottom-right | LSB   | 40,344 |
//! | 4       | top-right    | MSB   | 40,344 |
//! | 5       | top-right    | LSB   | 40,344 |
//! | 6       | top-left     | MSB   | 39,852 |
//! | 7       | top-left     | LSB   | 39,852 |
//!
//! ## Example
//!
//! ```
//! use epd1304::{Layout, Quadrant};
//!
//! let layout = Layout::panel();
//! assert_eq!(layout.packed_len(), 320_784);
//! assert_eq!(layout.segment_len(Quadrant::BottomLeft), 39_852);
//! assert_eq!(layout.segment_len(Quadrant::BottomRight), 40_344);
//! ```

use core::ops::Range;

use crate::error::LayoutError;

/// Panel height in pixels
pub const PANEL_ROWS: usize = 984;

/// Panel width in pixels
pub const PANEL_COLS: usize = 1304;

/// Row at which the top and bottom quadrant halves meet
pub const PANEL_ROW_SPLIT: usize = 492;

/// Column at which the left and right quadrant halves meet
pub const PANEL_COL_SPLIT: usize = 648;

/// One of the two bit planes that together encode an ink level
///
/// See [`Color::bits`](crate::Color::bits) for the per-level bit pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BitPlane {
    /// Most-significant plane (black vs inked)
    Msb,
    /// Least-significant plane (red selector)
    Lsb,
}

impl BitPlane {
    /// Order of the planes within each quadrant's pair of segments
    pub const ORDER: [Self; 2] = [Self::Msb, Self::Lsb];
}

/// One of the four controller-owned sub-regions of the raster
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Quadrant {
    /// Rows below the split, columns left of the split
    BottomLeft,
    /// Rows below the split, columns right of the split
    BottomRight,
    /// Rows above the split, columns right of the split
    TopRight,
    /// Rows above the split, columns left of the split
    TopLeft,
}

impl Quadrant {
    /// Fixed segment order, dictated by how the controller chips are wired
    pub const PHYSICAL_ORDER: [Self; 4] = [
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopRight,
        Self::TopLeft,
    ];

    /// Raster rows covered by this quadrant
    pub fn row_range(self, layout: &Layout) -> Range<usize> {
        match self {
            Self::TopLeft | Self::TopRight => 0..layout.row_split,
            Self::BottomLeft | Self::BottomRight => layout.row_split..layout.rows,
        }
    }

    /// Raster columns covered by this quadrant
    pub fn col_range(self, layout: &Layout) -> Range<usize> {
        match self {
            Self::TopLeft | Self::BottomLeft => 0..layout.col_split,
            Self::TopRight | Self::BottomRight => layout.col_split..layout.cols,
        }
    }
}

/// Raster geometry and quadrant partitioning
///
/// The panel's geometry is fixed ([`Layout::panel`]); the validated
/// constructor exists so the encoder can be exercised on small layouts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Layout {
    /// Raster height in pixels
    pub rows: usize,
    /// Raster width in pixels
    pub cols: usize,
    /// First row of the bottom quadrants
    pub row_split: usize,
    /// First column of the right quadrants
    pub col_split: usize,
}

impl Layout {
    /// The fixed 1304×984 panel layout, split at row 492 and column 648
    pub const fn panel() -> Self {
        Self {
            rows: PANEL_ROWS,
            cols: PANEL_COLS,
            row_split: PANEL_ROW_SPLIT,
            col_split: PANEL_COL_SPLIT,
        }
    }

    /// Create a layout with validation
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimensions`] if either dimension is zero
    /// or `cols` is not a multiple of 8, and [`LayoutError::InvalidSplit`] if
    /// either split falls outside the raster or `col_split` is not a
    /// multiple of 8 (packing works on whole bytes of 8 columns).
    pub fn new(
        rows: usize,
        cols: usize,
        row_split: usize,
        col_split: usize,
    ) -> Result<Self, LayoutError> {
        if rows == 0 || cols == 0 || !cols.is_multiple_of(8) {
            return Err(LayoutError::InvalidDimensions { rows, cols });
        }
        if row_split == 0 || row_split >= rows {
            return Err(LayoutError::InvalidSplit {
                row_split,
                col_split,
            });
        }
        if col_split == 0 || col_split >= cols || !col_split.is_multiple_of(8) {
            return Err(LayoutError::InvalidSplit {
                row_split,
                col_split,
            });
        }
        Ok(Self {
            rows,
            cols,
            row_split,
            col_split,
        })
    }

    /// Total packed frame size in bytes (2 bits per pixel)
    pub fn packed_len(&self) -> usize {
        self.rows * self.cols / 4
    }

    /// Byte length of one (quadrant, plane) segment
    ///
    /// Both of a quadrant's segments have the same length, so the plane is
    /// not a parameter.
    pub fn segment_len(&self, quadrant: Quadrant) -> usize {
        quadrant.row_range(self).len() * quadrant.col_range(self).len() / 8
    }
}
