use serde::{Deserialize, Serialize};

use super::shape::Offset;

/// Absolute cell coordinate on a grid.
///
/// # Coordinate System
///
/// - (0, 0) is the top-left cell
/// - Rows increase downward
/// - Columns increase rightward
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Deserialize,
    Serialize,
    derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Translates the coordinate by a relative offset.
    ///
    /// Returns `None` if the result would have a negative row or column.
    #[must_use]
    pub fn translated(self, offset: Offset) -> Option<Self> {
        let row = self.row.checked_add_signed(isize::from(offset.row()))?;
        let col = self.col.checked_add_signed(isize::from(offset.col()))?;
        Some(Self { row, col })
    }
}

/// Size of a level's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display)]
#[display("{rows}x{cols}")]
pub struct GridDimensions {
    rows: usize,
    cols: usize,
}

impl GridDimensions {
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(self) -> usize {
        self.cols
    }

    /// Returns `true` if the grid has no cells at all.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.rows * self.cols
    }

    #[must_use]
    pub const fn contains(self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Iterates over every cell in row-major order.
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coord::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_respects_bounds() {
        let dims = GridDimensions::new(4, 5);
        assert!(dims.contains(Coord::new(0, 0)));
        assert!(dims.contains(Coord::new(3, 4)));
        assert!(!dims.contains(Coord::new(4, 0)));
        assert!(!dims.contains(Coord::new(0, 5)));
    }

    #[test]
    fn test_coords_are_row_major() {
        let dims = GridDimensions::new(2, 3);
        let coords: Vec<_> = dims.coords().collect();
        assert_eq!(coords.len(), dims.cell_count());
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[2], Coord::new(0, 2));
        assert_eq!(coords[3], Coord::new(1, 0));
        assert!(coords.is_sorted());
    }

    #[test]
    fn test_translated_rejects_negative() {
        let coord = Coord::new(0, 2);
        assert_eq!(
            coord.translated(Offset::new(1, -2)),
            Some(Coord::new(1, 0))
        );
        assert_eq!(coord.translated(Offset::new(-1, 0)), None);
        assert_eq!(coord.translated(Offset::new(0, -3)), None);
    }

    #[test]
    fn test_empty_grid() {
        assert!(GridDimensions::new(0, 5).is_empty());
        assert!(GridDimensions::new(4, 0).is_empty());
        assert!(!GridDimensions::new(1, 1).is_empty());
        assert_eq!(GridDimensions::new(0, 5).coords().count(), 0);
    }
}
