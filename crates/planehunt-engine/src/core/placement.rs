use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    grid::{Coord, GridDimensions},
    shape::{CellKind, MAX_SHAPE_CELLS, Orientation, Shape},
};

/// Classification returned for a single probe.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum ProbeResult {
    /// The cell is not part of the placement.
    #[display("miss")]
    Miss,
    /// The cell is part of the placement but is not the head.
    #[display("hit")]
    HitOrdinary,
    /// The cell is the head. Ends the round.
    #[display("head")]
    HitCritical,
}

impl ProbeResult {
    #[must_use]
    pub const fn from_kind(kind: Option<CellKind>) -> Self {
        match kind {
            None => Self::Miss,
            Some(CellKind::Ordinary) => Self::HitOrdinary,
            Some(CellKind::Critical) => Self::HitCritical,
        }
    }
}

/// A shape cell placed at an absolute coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedCell {
    coord: Coord,
    kind: CellKind,
}

impl PlacedCell {
    #[must_use]
    pub const fn coord(self) -> Coord {
        self.coord
    }

    #[must_use]
    pub const fn kind(self) -> CellKind {
        self.kind
    }
}

/// Orientation and head position identifying a placement of a known shape.
///
/// Serializes as `"<orientation>@<row>,<col>"`, e.g. `"U@0,2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementKey {
    pub orientation: Orientation,
    pub head: Coord,
}

impl fmt::Display for PlacementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{},{}",
            self.orientation.as_char(),
            self.head.row(),
            self.head.col()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("expected format 'orientation@row,col', got '{input}': {reason}")]
pub struct ParsePlacementKeyError {
    input: String,
    reason: &'static str,
}

impl FromStr for PlacementKey {
    type Err = ParsePlacementKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ParsePlacementKeyError {
            input: s.to_owned(),
            reason,
        };

        let (orientation_str, position_str) = s.split_once('@').ok_or_else(|| err("missing '@'"))?;
        let mut chars = orientation_str.chars();
        let orientation = match (chars.next(), chars.next()) {
            (Some(c), None) => Orientation::from_char(c).ok_or_else(|| err("invalid orientation"))?,
            _ => return Err(err("orientation must be a single character")),
        };

        let (row_str, col_str) = position_str
            .split_once(',')
            .ok_or_else(|| err("missing ','"))?;
        let row = row_str.parse().map_err(|_| err("invalid row"))?;
        let col = col_str.parse().map_err(|_| err("invalid column"))?;

        Ok(Self {
            orientation,
            head: Coord::new(row, col),
        })
    }
}

impl Serialize for PlacementKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlacementKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The hidden shape's concrete cells for one round.
///
/// A placement is the shape rotated by an [`Orientation`] and translated so
/// that its head lands on an absolute coordinate. Every cell is inside the
/// grid it was built for, and no two cells share a coordinate.
///
/// # Example
///
/// ```
/// use planehunt_engine::{Coord, GridDimensions, Orientation, Placement, ProbeResult, Shape};
///
/// let dims = GridDimensions::new(4, 5);
/// let placement =
///     Placement::try_new(dims, &Shape::plane(), Orientation::Up, Coord::new(0, 2)).unwrap();
///
/// assert_eq!(placement.classify(Coord::new(0, 2)), ProbeResult::HitCritical);
/// assert_eq!(placement.classify(Coord::new(1, 0)), ProbeResult::HitOrdinary);
/// assert_eq!(placement.classify(Coord::new(0, 0)), ProbeResult::Miss);
///
/// // The plane does not fit with its head on the bottom row.
/// assert!(Placement::try_new(dims, &Shape::plane(), Orientation::Up, Coord::new(3, 2)).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    key: PlacementKey,
    cells: ArrayVec<PlacedCell, MAX_SHAPE_CELLS>,
}

impl Serialize for Placement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.key.serialize(serializer)
    }
}

impl Placement {
    /// Places `shape` with the given orientation and head position.
    ///
    /// Returns `None` if any cell would fall outside `dimensions`.
    #[must_use]
    pub fn try_new(
        dimensions: GridDimensions,
        shape: &Shape,
        orientation: Orientation,
        head: Coord,
    ) -> Option<Self> {
        let cells = shape
            .cells()
            .iter()
            .map(|cell| {
                let coord = head
                    .translated(cell.offset().rotated(orientation))
                    .filter(|coord| dimensions.contains(*coord))?;
                Some(PlacedCell {
                    coord,
                    kind: cell.kind(),
                })
            })
            .collect::<Option<_>>()?;
        Some(Self {
            key: PlacementKey { orientation, head },
            cells,
        })
    }

    /// Rebuilds a placement from its key.
    #[must_use]
    pub fn from_key(dimensions: GridDimensions, shape: &Shape, key: PlacementKey) -> Option<Self> {
        Self::try_new(dimensions, shape, key.orientation, key.head)
    }

    #[must_use]
    pub fn key(&self) -> PlacementKey {
        self.key
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.key.orientation
    }

    /// Absolute coordinate of the critical cell.
    #[must_use]
    pub fn head(&self) -> Coord {
        self.key.head
    }

    #[must_use]
    pub fn cells(&self) -> &[PlacedCell] {
        &self.cells
    }

    #[must_use]
    pub fn kind_at(&self, coord: Coord) -> Option<CellKind> {
        self.cells
            .iter()
            .find(|cell| cell.coord == coord)
            .map(|cell| cell.kind)
    }

    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.kind_at(coord).is_some()
    }

    #[must_use]
    pub fn classify(&self, coord: Coord) -> ProbeResult {
        ProbeResult::from_kind(self.kind_at(coord))
    }
}

/// Iterates over every valid placement of `shape` on a grid.
///
/// Placements are yielded in (orientation, head row, head column) order.
pub fn enumerate_placements(
    dimensions: GridDimensions,
    shape: &Shape,
) -> impl Iterator<Item = Placement> + '_ {
    Orientation::ALL.into_iter().flat_map(move |orientation| {
        dimensions
            .coords()
            .filter_map(move |head| Placement::try_new(dimensions, shape, orientation, head))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_up_placement_cells() {
        let dims = GridDimensions::new(4, 5);
        let placement =
            Placement::try_new(dims, &Shape::plane(), Orientation::Up, Coord::new(0, 2)).unwrap();

        let coords: HashSet<_> = placement.cells().iter().map(|c| c.coord()).collect();
        let expected: HashSet<_> = [
            (0, 2),
            (1, 0),
            (1, 1),
            (1, 2),
            (1, 3),
            (1, 4),
            (2, 2),
            (3, 1),
            (3, 2),
            (3, 3),
        ]
        .into_iter()
        .map(|(r, c)| Coord::new(r, c))
        .collect();
        assert_eq!(coords, expected);
        assert_eq!(placement.head(), Coord::new(0, 2));
        assert_eq!(placement.classify(Coord::new(3, 3)), ProbeResult::HitOrdinary);
        assert_eq!(placement.classify(Coord::new(3, 4)), ProbeResult::Miss);
    }

    #[test]
    fn test_right_placement_points_head_right() {
        // Rotated once clockwise, the body extends to the left of the head.
        let dims = GridDimensions::new(5, 4);
        let placement =
            Placement::try_new(dims, &Shape::plane(), Orientation::Right, Coord::new(2, 3))
                .unwrap();
        assert_eq!(placement.classify(Coord::new(2, 3)), ProbeResult::HitCritical);
        assert_eq!(placement.classify(Coord::new(0, 2)), ProbeResult::HitOrdinary);
        assert_eq!(placement.classify(Coord::new(4, 2)), ProbeResult::HitOrdinary);
        assert_eq!(placement.classify(Coord::new(2, 0)), ProbeResult::HitOrdinary);
        assert!(
            Placement::try_new(dims, &Shape::plane(), Orientation::Up, Coord::new(0, 2)).is_none()
        );
    }

    #[test]
    fn test_enumerated_placements_are_in_bounds_and_distinct() {
        let dims = GridDimensions::new(6, 6);
        let placements: Vec<_> = enumerate_placements(dims, &Shape::plane()).collect();
        assert!(!placements.is_empty());
        for placement in &placements {
            let coords: HashSet<_> = placement.cells().iter().map(|c| c.coord()).collect();
            assert_eq!(coords.len(), 10);
            assert!(coords.iter().all(|c| dims.contains(*c)));
        }
        let keys: HashSet<_> = placements.iter().map(Placement::key).collect();
        assert_eq!(keys.len(), placements.len());
    }

    #[test]
    fn test_enumerate_counts() {
        // 4x5 only fits the upright and upside-down planes, one column of heads each.
        let placements: Vec<_> =
            enumerate_placements(GridDimensions::new(4, 5), &Shape::plane()).collect();
        let keys: Vec<_> = placements.iter().map(|p| p.key().to_string()).collect();
        assert_eq!(keys, ["U@0,2", "D@3,2"]);

        assert_eq!(
            enumerate_placements(GridDimensions::new(3, 3), &Shape::plane()).count(),
            0
        );
    }

    #[test]
    fn test_key_serialization() {
        let key = PlacementKey {
            orientation: Orientation::Down,
            head: Coord::new(3, 2),
        };
        let serialized = serde_json::to_string(&key).unwrap();
        assert_eq!(serialized, "\"D@3,2\"");
        let deserialized: PlacementKey = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, key);

        let placement = Placement::from_key(GridDimensions::new(4, 5), &Shape::plane(), key)
            .unwrap();
        assert_eq!(serde_json::to_string(&placement).unwrap(), serialized);
    }

    #[test]
    fn test_key_parse_errors() {
        assert!("U0,2".parse::<PlacementKey>().is_err());
        assert!("X@0,2".parse::<PlacementKey>().is_err());
        assert!("UR@0,2".parse::<PlacementKey>().is_err());
        assert!("U@0".parse::<PlacementKey>().is_err());
        assert!("U@a,2".parse::<PlacementKey>().is_err());
        assert!("U@0,-2".parse::<PlacementKey>().is_err());
    }
}
