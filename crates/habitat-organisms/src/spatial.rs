//! Cell-granular adjacency between organisms.
//!
//! The world is divided into square cells `2^power` pixels wide (see
//! [`CellGrid`]). Organisms are compared by the cells they cover, not by
//! exact geometry, so two organisms a few pixels apart may or may not be
//! "adjacent" depending on where the cell boundaries fall. The engine uses
//! this to decide who can interact with whom; it is intentionally coarse.

use habitat_types::CellGrid;

use crate::state::OrganismState;

/// An organism's position and radius in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellFootprint {
    /// Cell column of the centre.
    pub x: i32,
    /// Cell row of the centre.
    pub y: i32,
    /// Radius in cells, rounded up.
    pub radius: i32,
}

impl CellFootprint {
    /// Whether the gap between the two footprints, after widening their
    /// combined reach by `extra_radius` cells, is at most one cell on both
    /// axes.
    pub fn is_within_rect(self, extra_radius: i32, other: Self) -> bool {
        let reach = i64::from(self.radius)
            .saturating_add(i64::from(extra_radius))
            .saturating_add(i64::from(other.radius));
        let axis_fits = |a: i32, b: i32| {
            i64::from(a)
                .saturating_sub(i64::from(b))
                .saturating_abs()
                .saturating_sub(reach)
                <= 1
        };
        axis_fits(self.x, other.x) && axis_fits(self.y, other.y)
    }
}

impl OrganismState {
    /// This organism's footprint on `grid`.
    pub fn footprint_on(&self, grid: CellGrid) -> CellFootprint {
        let position = self.position();
        CellFootprint {
            x: grid.cell_of(position.x),
            y: grid.cell_of(position.y),
            radius: grid.cell_radius(self.radius()),
        }
    }

    /// This organism's footprint on its species grid.
    pub fn footprint(&self) -> CellFootprint {
        self.footprint_on(self.species().grid())
    }

    /// Cell column of the organism's centre.
    pub fn grid_x(&self) -> i32 {
        self.footprint().x
    }

    /// Cell row of the organism's centre.
    pub fn grid_y(&self) -> i32 {
        self.footprint().y
    }

    /// Radius in cells, rounded up.
    pub fn cell_radius(&self) -> i32 {
        self.footprint().radius
    }

    /// Whether `other` is within `extra_radius` cells of touching this
    /// organism. Both are measured on this organism's species grid.
    pub fn is_within_rect(&self, extra_radius: i32, other: &Self) -> bool {
        let grid = self.species().grid();
        self.footprint_on(grid)
            .is_within_rect(extra_radius, other.footprint_on(grid))
    }

    /// Whether `other` touches or overlaps this organism at cell granularity.
    pub fn is_adjacent_or_overlapping(&self, other: &Self) -> bool {
        self.is_within_rect(0, other)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use habitat_types::Point;

    use super::*;
    use crate::factory::spawn;
    use crate::test_support::grazer;

    fn at(x: i32, y: i32) -> OrganismState {
        spawn(grazer(), Point::new(x, y)).unwrap()
    }

    #[test]
    fn footprint_uses_species_grid() {
        let mut state = at(100, -17);
        // Default grid is 8 pixels per cell.
        assert_eq!(state.grid_x(), 12);
        assert_eq!(state.grid_y(), -3);
        // Radius 3 rounds up to one cell.
        assert_eq!(state.cell_radius(), 1);

        assert!(state.increase_radius_to(8).is_ok());
        assert_eq!(state.cell_radius(), 1);
        assert!(state.increase_radius_to(9).is_ok());
        assert_eq!(state.cell_radius(), 2);
    }

    #[test]
    fn far_apart_organisms_are_not_adjacent() {
        let a = at(0, 0);
        let b = at(100, 0);
        assert!(!a.is_adjacent_or_overlapping(&b));
        assert!(!b.is_adjacent_or_overlapping(&a));
    }

    #[test]
    fn nearby_organisms_are_adjacent() {
        let a = at(0, 0);
        let b = at(16, 0);
        assert!(a.is_adjacent_or_overlapping(&b));
        assert!(b.is_adjacent_or_overlapping(&a));
        assert!(a.is_adjacent_or_overlapping(&a));
    }

    #[test]
    fn both_axes_must_fit() {
        let a = at(0, 0);
        let b = at(16, 100);
        assert!(!a.is_adjacent_or_overlapping(&b));
    }

    #[test]
    fn extra_radius_widens_the_rect() {
        let a = at(0, 0);
        let b = at(100, 0);
        // Cells 0 and 12, radii 1 + 1: gap is 12 - 2 = 10 cells.
        assert!(!a.is_within_rect(8, &b));
        assert!(a.is_within_rect(9, &b));
    }

    #[test]
    fn radius_four_reaches_one_cell_each_way() {
        let grid = CellGrid::default();
        let origin = CellFootprint {
            x: grid.cell_of(0),
            y: 0,
            radius: grid.cell_radius(4),
        };
        let near = CellFootprint {
            x: grid.cell_of(16),
            ..origin
        };
        let far = CellFootprint {
            x: grid.cell_of(100),
            ..origin
        };
        assert_eq!(origin.radius, 1);
        assert!(origin.is_within_rect(0, near));
        assert!(near.is_within_rect(0, origin));
        assert!(!origin.is_within_rect(0, far));
        assert!(!far.is_within_rect(0, origin));

        let mut a = at(0, 0);
        let mut b = at(16, 0);
        let mut c = at(100, 0);
        for state in [&mut a, &mut b, &mut c] {
            assert!(state.increase_radius_to(4).is_ok());
            assert_eq!(state.cell_radius(), 1);
        }
        assert!(a.is_adjacent_or_overlapping(&b));
        assert!(!a.is_adjacent_or_overlapping(&c));
    }

    #[test]
    fn footprint_arithmetic_does_not_overflow() {
        let far = CellFootprint {
            x: i32::MIN,
            y: 0,
            radius: i32::MAX,
        };
        let other = CellFootprint {
            x: i32::MAX,
            y: 0,
            radius: i32::MAX,
        };
        assert!(far.is_within_rect(i32::MAX, other));
        assert!(!far.is_within_rect(i32::MIN, other));
    }
}
