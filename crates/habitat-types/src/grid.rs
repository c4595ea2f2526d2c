//! Power-of-two cell grid used for coarse spatial tests.
//!
//! Pixel coordinates map to cell coordinates by an arithmetic right shift,
//! so negative coordinates floor toward negative infinity. A pixel radius
//! maps to a cell radius rounded up to whole cells.

use serde::{Deserialize, Serialize};

/// Largest supported grid power of two.
pub const MAX_GRID_POWER_OF_2: u32 = 16;

/// A square grid whose cell width is `2^power_of_2` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellGrid {
    power_of_2: u32,
}

impl CellGrid {
    /// Create a grid with cells `2^power_of_2` pixels wide.
    ///
    /// Returns `None` above [`MAX_GRID_POWER_OF_2`].
    pub const fn new(power_of_2: u32) -> Option<Self> {
        if power_of_2 > MAX_GRID_POWER_OF_2 {
            return None;
        }
        Some(Self { power_of_2 })
    }

    /// The shift applied to pixel coordinates.
    pub const fn power_of_2(&self) -> u32 {
        self.power_of_2
    }

    /// Width of one cell in pixels.
    pub const fn cell_width(&self) -> u32 {
        1 << self.power_of_2
    }

    /// Cell coordinate containing `pixel`.
    pub const fn cell_of(&self, pixel: i32) -> i32 {
        pixel >> self.power_of_2
    }

    /// Number of cells a pixel radius spans, rounding partial cells up.
    ///
    /// Saturates at `i32::MAX` for radii too large to count in cells.
    pub fn cell_radius(&self, radius: u32) -> i32 {
        let whole = i32::try_from(radius >> self.power_of_2).unwrap_or(i32::MAX);
        let mask = self.cell_width().saturating_sub(1);
        if radius & mask == 0 {
            whole
        } else {
            whole.saturating_add(1)
        }
    }
}

impl Default for CellGrid {
    fn default() -> Self {
        Self { power_of_2: 3 }
    }
}
