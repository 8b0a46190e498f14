pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Errors raised when building a custom [`Shape`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("shape has {count} cells, at most {} are supported", MAX_SHAPE_CELLS)]
    TooManyCells { count: usize },
    #[display("shape has no critical cell")]
    NoCriticalCell,
    #[display("shape has more than one critical cell")]
    MultipleCriticalCells,
    #[display("critical cell must sit at offset (0, 0), found {offset}")]
    CriticalCellNotAtOrigin { offset: Offset },
    #[display("shape has more than one cell at offset {offset}")]
    DuplicateOffset { offset: Offset },
}

/// Errors raised by the placement generator.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("no valid placement on a {dimensions} grid after {attempts} attempts")]
    Exhausted {
        dimensions: GridDimensions,
        attempts: usize,
    },
}

/// Errors raised when probing a cell.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ProbeError {
    #[display("probe coordinate {coord} is outside the {dimensions} grid")]
    OutOfBounds {
        coord: Coord,
        dimensions: GridDimensions,
    },
}

/// Errors raised while validating level configuration.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LevelError {
    #[display("no levels configured")]
    NoLevels,
    #[display("level {id} has an empty grid ({dimensions})")]
    EmptyGrid { id: u32, dimensions: GridDimensions },
    #[display("level {id} has optimal probes {optimal_probes}, scoring needs at least 2")]
    DegenerateScoringConfig { id: u32, optimal_probes: u32 },
}

/// Errors raised by [`Session`] transitions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    #[display("invalid level configuration: {_0}")]
    #[from]
    Level(LevelError),
    #[display("failed to start round: {_0}")]
    #[from]
    Placement(PlacementError),
    #[display("cannot advance to next level while the round is {status}")]
    AdvanceNotAllowed { status: RoundStatus },
    #[display("round is still in progress")]
    RoundInProgress,
}
