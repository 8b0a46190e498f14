use serde::{Deserialize, Serialize};

use crate::{
    ProbeError,
    core::{
        grid::{Coord, GridDimensions},
        placement::{Placement, ProbeResult},
    },
};

use super::scoring::Grade;

/// Lifecycle of a round.
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
pub enum RoundStatus {
    #[display("in progress")]
    InProgress,
    #[display("passed")]
    Passed,
    #[display("failed")]
    Failed,
}

impl RoundStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Outcome of a call to [`Round::probe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Probe {
    /// A new cell was probed and counted.
    Fresh(ProbeResult),
    /// The cell had already been probed; its recorded result is reported again
    /// and nothing is counted.
    Repeated(ProbeResult),
    /// The round is over and the cell was never probed.
    Ignored,
}

impl Probe {
    /// Returns the classification of the probed cell, if it has one.
    #[must_use]
    pub const fn result(self) -> Option<ProbeResult> {
        match self {
            Self::Fresh(result) | Self::Repeated(result) => Some(result),
            Self::Ignored => None,
        }
    }
}

/// One entry of a round's probe history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProbeRecord {
    pub coord: Coord,
    pub result: ProbeResult,
}

/// Per-round state machine.
///
/// A round starts `InProgress` with a fresh placement and an empty history.
/// Every probe of a new in-bounds cell is classified, appended to the history
/// and counted; hitting the head grades the round and moves it to `Passed` or
/// `Failed`. Once terminal, no further probes are counted.
///
/// # Example
///
/// ```
/// use planehunt_engine::{
///     Coord, GridDimensions, Orientation, Placement, Probe, ProbeResult, Round, RoundStatus,
///     Shape,
/// };
///
/// let dims = GridDimensions::new(4, 5);
/// let placement =
///     Placement::try_new(dims, &Shape::plane(), Orientation::Up, Coord::new(0, 2)).unwrap();
/// let mut round = Round::new(dims, 2, placement);
///
/// assert_eq!(round.probe(Coord::new(3, 4)), Ok(Probe::Fresh(ProbeResult::Miss)));
/// assert_eq!(round.probe(Coord::new(0, 2)), Ok(Probe::Fresh(ProbeResult::HitCritical)));
/// assert_eq!(round.status(), RoundStatus::Passed);
/// assert_eq!(round.grade().map(|g| g.score()), Some(100));
/// ```
#[derive(Debug, Clone)]
pub struct Round {
    dimensions: GridDimensions,
    optimal_probes: u32,
    placement: Placement,
    history: Vec<ProbeRecord>,
    probe_count: u32,
    status: RoundStatus,
    grade: Option<Grade>,
}

impl Round {
    #[must_use]
    pub fn new(dimensions: GridDimensions, optimal_probes: u32, placement: Placement) -> Self {
        debug_assert!(
            placement
                .cells()
                .iter()
                .all(|cell| dimensions.contains(cell.coord()))
        );
        Self {
            dimensions,
            optimal_probes,
            placement,
            history: Vec::new(),
            probe_count: 0,
            status: RoundStatus::InProgress,
            grade: None,
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    #[must_use]
    pub fn optimal_probes(&self) -> u32 {
        self.optimal_probes
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Number of counted probes so far.
    #[must_use]
    pub fn probe_count(&self) -> u32 {
        self.probe_count
    }

    /// Probed cells in the order they were probed.
    #[must_use]
    pub fn history(&self) -> &[ProbeRecord] {
        &self.history
    }

    /// Returns the grade once the head has been found.
    #[must_use]
    pub fn grade(&self) -> Option<Grade> {
        self.grade
    }

    /// Returns the recorded result for a cell, if it has been probed.
    #[must_use]
    pub fn result_at(&self, coord: Coord) -> Option<ProbeResult> {
        self.history
            .iter()
            .find(|record| record.coord == coord)
            .map(|record| record.result)
    }

    /// Returns the full placement, available only once the round is over.
    #[must_use]
    pub fn revealed_placement(&self) -> Option<&Placement> {
        self.status.is_terminal().then_some(&self.placement)
    }

    /// Probes a cell.
    ///
    /// Out-of-bounds coordinates are rejected without touching the round.
    /// Re-probing a cell reports its recorded result as [`Probe::Repeated`];
    /// probing a new cell after the round has ended reports [`Probe::Ignored`].
    /// Neither counts as a probe.
    pub fn probe(&mut self, coord: Coord) -> Result<Probe, ProbeError> {
        if !self.dimensions.contains(coord) {
            return Err(ProbeError::OutOfBounds {
                coord,
                dimensions: self.dimensions,
            });
        }
        if let Some(result) = self.result_at(coord) {
            return Ok(Probe::Repeated(result));
        }
        if self.status.is_terminal() {
            return Ok(Probe::Ignored);
        }

        let result = self.placement.classify(coord);
        self.history.push(ProbeRecord { coord, result });
        self.probe_count += 1;

        if result.is_hit_critical() {
            let grade = Grade::from_probes(self.probe_count, self.optimal_probes);
            self.grade = Some(grade);
            self.status = if grade.is_passed() {
                RoundStatus::Passed
            } else {
                RoundStatus::Failed
            };
            tracing::debug!(
                probes = self.probe_count,
                optimal_probes = self.optimal_probes,
                score = grade.score(),
                status = %self.status,
                "head found"
            );
        }

        Ok(Probe::Fresh(result))
    }

    /// Test-only access to the hidden placement.
    #[cfg(test)]
    pub(crate) fn placement(&self) -> &Placement {
        &self.placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Orientation, Shape};

    fn scenario_round(optimal_probes: u32) -> Round {
        let dims = GridDimensions::new(4, 5);
        let placement =
            Placement::try_new(dims, &Shape::plane(), Orientation::Up, Coord::new(0, 2)).unwrap();
        Round::new(dims, optimal_probes, placement)
    }

    #[test]
    fn test_head_first_probe_passes() {
        let mut round = scenario_round(2);
        assert_eq!(
            round.probe(Coord::new(0, 2)),
            Ok(Probe::Fresh(ProbeResult::HitCritical))
        );
        assert_eq!(round.probe_count(), 1);
        assert_eq!(round.grade().map(Grade::score), Some(100));
        assert_eq!(round.status(), RoundStatus::Passed);
    }

    #[test]
    fn test_miss_then_head() {
        let mut round = scenario_round(2);
        assert_eq!(
            round.probe(Coord::new(3, 4)),
            Ok(Probe::Fresh(ProbeResult::Miss))
        );
        assert_eq!(round.probe_count(), 1);
        assert_eq!(round.status(), RoundStatus::InProgress);
        assert!(round.revealed_placement().is_none());

        assert_eq!(
            round.probe(Coord::new(0, 2)),
            Ok(Probe::Fresh(ProbeResult::HitCritical))
        );
        assert_eq!(round.probe_count(), 2);
        assert_eq!(round.grade(), Some(Grade::from_probes(2, 2)));
        assert_eq!(round.status(), RoundStatus::Passed);
    }

    #[test]
    fn test_late_head_fails() {
        let mut round = scenario_round(2);
        round.probe(Coord::new(3, 4)).unwrap();
        assert_eq!(
            round.probe(Coord::new(1, 2)),
            Ok(Probe::Fresh(ProbeResult::HitOrdinary))
        );
        round.probe(Coord::new(0, 2)).unwrap();
        assert_eq!(round.probe_count(), 3);
        assert_eq!(round.grade().map(Grade::score), Some(20));
        assert_eq!(round.status(), RoundStatus::Failed);
    }

    #[test]
    fn test_distinct_probes_are_counted_exactly() {
        let mut round = scenario_round(6);
        let cells = [
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(1, 1),
            Coord::new(2, 0),
            Coord::new(3, 3),
        ];
        for (k, coord) in cells.into_iter().enumerate() {
            assert!(round.probe(coord).unwrap().is_fresh());
            assert_eq!(round.probe_count() as usize, k + 1);
        }
        assert_eq!(round.history().len(), cells.len());
        assert_eq!(round.history()[2].coord, Coord::new(1, 1));
        assert_eq!(round.history()[2].result, ProbeResult::HitOrdinary);
    }

    #[test]
    fn test_repeat_probe_is_idempotent() {
        let mut round = scenario_round(2);
        let first = round.probe(Coord::new(1, 0)).unwrap();
        let second = round.probe(Coord::new(1, 0)).unwrap();
        assert_eq!(first, Probe::Fresh(ProbeResult::HitOrdinary));
        assert_eq!(second, Probe::Repeated(ProbeResult::HitOrdinary));
        assert_eq!(first.result(), second.result());
        assert_eq!(round.probe_count(), 1);
        assert_eq!(round.history().len(), 1);
    }

    #[test]
    fn test_repeat_head_after_terminal() {
        let mut round = scenario_round(2);
        round.probe(Coord::new(0, 2)).unwrap();
        assert_eq!(
            round.probe(Coord::new(0, 2)),
            Ok(Probe::Repeated(ProbeResult::HitCritical))
        );
        assert_eq!(round.probe_count(), 1);
    }

    #[test]
    fn test_probes_after_terminal_are_ignored() {
        let mut round = scenario_round(2);
        round.probe(Coord::new(0, 2)).unwrap();
        assert_eq!(round.probe(Coord::new(3, 4)), Ok(Probe::Ignored));
        assert_eq!(round.probe(Coord::new(1, 2)), Ok(Probe::Ignored));
        assert_eq!(round.probe_count(), 1);
        assert_eq!(round.status(), RoundStatus::Passed);
    }

    #[test]
    fn test_out_of_bounds_is_rejected_without_mutation() {
        let mut round = scenario_round(2);
        round.probe(Coord::new(3, 4)).unwrap();
        assert_eq!(
            round.probe(Coord::new(4, 0)),
            Err(ProbeError::OutOfBounds {
                coord: Coord::new(4, 0),
                dimensions: GridDimensions::new(4, 5)
            })
        );
        assert!(round.probe(Coord::new(0, 5)).is_err());
        assert_eq!(round.probe_count(), 1);
        assert_eq!(round.history().len(), 1);
    }

    #[test]
    fn test_reveal_after_terminal() {
        let mut round = scenario_round(2);
        round.probe(Coord::new(3, 3)).unwrap();
        assert!(round.revealed_placement().is_none());
        round.probe(Coord::new(0, 2)).unwrap();
        let placement = round.revealed_placement().unwrap();
        assert_eq!(placement, round.placement());
        assert_eq!(placement.cells().len(), 10);
        assert_eq!(placement.head(), Coord::new(0, 2));
    }
}
