use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::ShapeError;

/// Maximum number of cells a [`Shape`] can hold.
pub const MAX_SHAPE_CELLS: usize = 16;

/// Role of a shape cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::IsVariant)]
pub enum CellKind {
    /// The head. Finding it ends the round.
    Critical,
    /// Any other part of the shape (wings, body, tail).
    Ordinary,
}

/// Position of a shape cell relative to the head.
///
/// Offsets are limited to `-127..=127` on both axes so that rotation never
/// overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("({row}, {col})")]
pub struct Offset {
    row: i8,
    col: i8,
}

impl Offset {
    pub const ORIGIN: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(row: i8, col: i8) -> Self {
        assert!(row != i8::MIN);
        assert!(col != i8::MIN);
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> i8 {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> i8 {
        self.col
    }

    /// Rotates the offset 90° clockwise around the origin: `(r, c)` becomes `(c, -r)`.
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self {
            row: self.col,
            col: -self.row,
        }
    }

    /// Rotates the offset clockwise by the given orientation.
    #[must_use]
    pub const fn rotated(self, orientation: Orientation) -> Self {
        let mut offset = self;
        let mut i = 0;
        while i < orientation.steps() {
            offset = offset.rotated_right();
            i += 1;
        }
        offset
    }
}

/// Rotation state of the shape.
///
/// Each step is a 90° clockwise turn around the head. `Up` is the canonical
/// orientation in which the shape is defined.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum Orientation {
    /// 0°, head at the top.
    #[default]
    Up = 0,
    /// 90° clockwise, head at the right.
    Right = 1,
    /// 180°, head at the bottom.
    Down = 2,
    /// 270° clockwise, head at the left.
    Left = 3,
}

impl Distribution<Orientation> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        Orientation::from_steps(rng.random_range(0..4))
    }
}

impl Orientation {
    /// Number of orientations (4).
    pub const LEN: usize = 4;

    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the orientation reached after `steps` clockwise quarter turns from `Up`.
    #[must_use]
    pub const fn from_steps(steps: u8) -> Self {
        match steps % 4 {
            0 => Self::Up,
            1 => Self::Right,
            2 => Self::Down,
            _ => Self::Left,
        }
    }

    /// Number of clockwise quarter turns from `Up`.
    #[must_use]
    pub const fn steps(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self::from_steps(self.steps() + 1)
    }

    #[must_use]
    pub const fn rotated_left(self) -> Self {
        Self::from_steps(self.steps() + 3)
    }

    /// Returns the single character representation of this orientation.
    ///
    /// ```
    /// use planehunt_engine::Orientation;
    ///
    /// assert_eq!(Orientation::Up.as_char(), 'U');
    /// assert_eq!(Orientation::Left.as_char(), 'L');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Right => 'R',
            Self::Down => 'D',
            Self::Left => 'L',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'U' => Some(Self::Up),
            'R' => Some(Self::Right),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            _ => None,
        }
    }
}

/// A single cell of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeCell {
    offset: Offset,
    kind: CellKind,
}

impl ShapeCell {
    #[must_use]
    pub const fn new(row: i8, col: i8, kind: CellKind) -> Self {
        Self {
            offset: Offset::new(row, col),
            kind,
        }
    }

    #[must_use]
    pub const fn offset(self) -> Offset {
        self.offset
    }

    #[must_use]
    pub const fn kind(self) -> CellKind {
        self.kind
    }
}

/// The plane in its `Up` orientation, head at the origin.
///
/// ```text
///       H        row 0
///   W W B W W    row 1
///       B        row 2
///     T T T      row 3
/// ```
const PLANE_CELLS: [ShapeCell; 10] = {
    use CellKind::{Critical as H, Ordinary as O};
    [
        ShapeCell::new(0, 0, H),
        // Wings and fuselage
        ShapeCell::new(1, -2, O),
        ShapeCell::new(1, -1, O),
        ShapeCell::new(1, 0, O),
        ShapeCell::new(1, 1, O),
        ShapeCell::new(1, 2, O),
        ShapeCell::new(2, 0, O),
        // Tail
        ShapeCell::new(3, -1, O),
        ShapeCell::new(3, 0, O),
        ShapeCell::new(3, 1, O),
    ]
};

/// Orientation-independent definition of the hidden polyomino.
///
/// A shape is a set of cells with offsets relative to its head, the single
/// [`CellKind::Critical`] cell at offset (0, 0). Offsets are pairwise distinct,
/// so every rotation is a bijection on the cell set.
///
/// # Example
///
/// ```
/// use planehunt_engine::{Orientation, Shape};
///
/// let plane = Shape::plane();
/// let turned = plane.rotated(Orientation::Right);
/// assert_eq!(turned.rotated(Orientation::Left), plane);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    cells: ArrayVec<ShapeCell, MAX_SHAPE_CELLS>,
}

impl Default for Shape {
    fn default() -> Self {
        Self::plane()
    }
}

impl Shape {
    /// Builds a custom shape, checking the head and distinctness invariants.
    pub fn new<I>(cells: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = ShapeCell>,
    {
        let cells = cells.into_iter().collect::<Vec<_>>();
        if cells.len() > MAX_SHAPE_CELLS {
            return Err(ShapeError::TooManyCells { count: cells.len() });
        }

        let mut critical = cells.iter().filter(|cell| cell.kind.is_critical());
        let head = critical.next().ok_or(ShapeError::NoCriticalCell)?;
        if critical.next().is_some() {
            return Err(ShapeError::MultipleCriticalCells);
        }
        if head.offset != Offset::ORIGIN {
            return Err(ShapeError::CriticalCellNotAtOrigin {
                offset: head.offset,
            });
        }

        for (i, cell) in cells.iter().enumerate() {
            if cells[..i].iter().any(|other| other.offset == cell.offset) {
                return Err(ShapeError::DuplicateOffset {
                    offset: cell.offset,
                });
            }
        }

        Ok(Self {
            cells: cells.into_iter().collect(),
        })
    }

    /// The standard ten-cell plane spanning a 4×5 bounding box.
    #[must_use]
    pub fn plane() -> Self {
        Self {
            cells: PLANE_CELLS.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[ShapeCell] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the shape with every offset rotated clockwise by `orientation`.
    ///
    /// Cell order is preserved, so the head stays first for the plane.
    #[must_use]
    pub fn rotated(&self, orientation: Orientation) -> Self {
        let cells = self
            .cells
            .iter()
            .map(|cell| ShapeCell {
                offset: cell.offset.rotated(orientation),
                kind: cell.kind,
            })
            .collect();
        Self { cells }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn offset_set(shape: &Shape) -> HashSet<(Offset, CellKind)> {
        shape.cells().iter().map(|c| (c.offset(), c.kind())).collect()
    }

    #[test]
    fn test_plane_is_valid() {
        let plane = Shape::plane();
        assert_eq!(plane.len(), 10);
        assert_eq!(Shape::new(PLANE_CELLS), Ok(plane));
    }

    #[test]
    fn test_rotation_rule() {
        let offset = Offset::new(1, -2);
        assert_eq!(offset.rotated_right(), Offset::new(-2, -1));
        assert_eq!(offset.rotated(Orientation::Down), Offset::new(-1, 2));
        assert_eq!(offset.rotated(Orientation::Left), Offset::new(2, 1));
        assert_eq!(offset.rotated(Orientation::Up), offset);
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        let plane = Shape::plane();
        for orientation in Orientation::ALL {
            let start = plane.rotated(orientation);
            let mut shape = start.clone();
            for _ in 0..4 {
                shape = shape.rotated(Orientation::Right);
            }
            assert_eq!(shape, start);
        }
    }

    #[test]
    fn test_critical_offset_cycles_with_order_four() {
        let plane = Shape::plane();
        for orientation in Orientation::ALL {
            let mut head = Offset::ORIGIN.rotated(orientation);
            for _ in 0..4 {
                head = head.rotated_right();
            }
            assert_eq!(head, Offset::ORIGIN);

            let rotated = plane.rotated(orientation);
            let critical: Vec<_> = rotated
                .cells()
                .iter()
                .filter(|c| c.kind().is_critical())
                .collect();
            assert_eq!(critical.len(), 1);
            assert_eq!(critical[0].offset(), Offset::ORIGIN);
        }
    }

    #[test]
    fn test_rotation_is_bijection() {
        let plane = Shape::plane();
        for orientation in Orientation::ALL {
            let rotated = plane.rotated(orientation);
            assert_eq!(offset_set(&rotated).len(), plane.len());
        }
    }

    #[test]
    fn test_orientation_steps_wrap() {
        for orientation in Orientation::ALL {
            assert_eq!(orientation.rotated_right().rotated_left(), orientation);
            assert_eq!(Orientation::from_steps(orientation.steps()), orientation);
            assert_eq!(Orientation::from_char(orientation.as_char()), Some(orientation));
        }
        assert_eq!(Orientation::Left.rotated_right(), Orientation::Up);
        assert_eq!(Orientation::from_char('X'), None);
    }

    #[test]
    fn test_invalid_shapes() {
        use CellKind::{Critical as H, Ordinary as O};

        assert_eq!(
            Shape::new([ShapeCell::new(0, 1, O)]),
            Err(ShapeError::NoCriticalCell)
        );
        assert_eq!(
            Shape::new([ShapeCell::new(0, 0, H), ShapeCell::new(0, 1, H)]),
            Err(ShapeError::MultipleCriticalCells)
        );
        assert_eq!(
            Shape::new([ShapeCell::new(1, 0, H)]),
            Err(ShapeError::CriticalCellNotAtOrigin {
                offset: Offset::new(1, 0)
            })
        );
        assert_eq!(
            Shape::new([
                ShapeCell::new(0, 0, H),
                ShapeCell::new(0, 1, O),
                ShapeCell::new(0, 1, O),
            ]),
            Err(ShapeError::DuplicateOffset {
                offset: Offset::new(0, 1)
            })
        );

        let too_many = (0..17).map(|i| ShapeCell::new(0, i, if i == 0 { H } else { O }));
        assert_eq!(
            Shape::new(too_many),
            Err(ShapeError::TooManyCells { count: 17 })
        );
    }
}
