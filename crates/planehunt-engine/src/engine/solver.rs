use crate::core::{
    grid::{Coord, GridDimensions},
    placement::{Placement, ProbeResult, enumerate_placements},
    shape::Shape,
};

use super::{
    round::{Probe, Round},
    scoring::Grade,
};

/// Reference probing strategy.
///
/// Tracks every placement still consistent with the results seen so far and
/// picks probes that shrink that set the fastest. It only ever sees probe
/// results, never the hidden placement.
///
/// # Strategy
///
/// 1. If all remaining candidates share the same head, probe it.
/// 2. Otherwise probe the unprobed cell with the smallest expected number of
///    candidates left after a non-head answer. Finding the head counts as zero
///    candidates left.
/// 3. Ties go to the cell that is the head in more candidates, then to the
///    first cell in row-major order.
///
/// # Example
///
/// ```
/// use planehunt_engine::{GridDimensions, PlacementGenerator, Round, Shape, Solver};
///
/// let dims = GridDimensions::new(6, 6);
/// let placement = PlacementGenerator::new().generate(dims, &Shape::plane()).unwrap();
/// let mut round = Round::new(dims, 6, placement);
///
/// let grade = Solver::new(dims, &Shape::plane()).solve(&mut round).unwrap();
/// assert!(round.status().is_terminal());
/// assert!(grade.score() <= 100);
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    dimensions: GridDimensions,
    candidates: Vec<Placement>,
    probed: Vec<Coord>,
}

impl Solver {
    #[must_use]
    pub fn new(dimensions: GridDimensions, shape: &Shape) -> Self {
        Self {
            dimensions,
            candidates: enumerate_placements(dimensions, shape).collect(),
            probed: Vec::new(),
        }
    }

    /// Placements still consistent with every observed result.
    #[must_use]
    pub fn candidates(&self) -> &[Placement] {
        &self.candidates
    }

    /// Narrows the candidates with the result of a probe.
    pub fn observe(&mut self, coord: Coord, result: ProbeResult) {
        self.candidates
            .retain(|placement| placement.classify(coord) == result);
        if !self.probed.contains(&coord) {
            self.probed.push(coord);
        }
    }

    /// Chooses the next cell to probe.
    ///
    /// Returns `None` when no candidate is left, which means the observed
    /// results contradict each other.
    #[must_use]
    pub fn next_probe(&self) -> Option<Coord> {
        let first = self.candidates.first()?;
        if self
            .candidates
            .iter()
            .all(|placement| placement.head() == first.head())
            && !self.probed.contains(&first.head())
        {
            return Some(first.head());
        }

        let mut best: Option<(usize, usize, Coord)> = None;
        for coord in self.dimensions.coords() {
            if self.probed.contains(&coord) {
                continue;
            }
            let mut misses = 0;
            let mut hits = 0;
            let mut heads = 0;
            for placement in &self.candidates {
                match placement.classify(coord) {
                    ProbeResult::Miss => misses += 1,
                    ProbeResult::HitOrdinary => hits += 1,
                    ProbeResult::HitCritical => heads += 1,
                }
            }
            // Proportional to the expected number of candidates left.
            let remaining = misses * misses + hits * hits;
            let better = match best {
                None => true,
                Some((best_remaining, best_heads, _)) => {
                    remaining < best_remaining
                        || (remaining == best_remaining && heads > best_heads)
                }
            };
            if better {
                best = Some((remaining, heads, coord));
            }
        }
        best.map(|(_, _, coord)| coord)
    }

    /// Plays `round` to the end and returns its grade.
    ///
    /// Returns `None` if the solver runs out of candidates or cells, which
    /// only happens when the round was built for a different shape.
    pub fn solve(mut self, round: &mut Round) -> Option<Grade> {
        while !round.status().is_terminal() {
            let coord = self.next_probe()?;
            match round.probe(coord).ok()? {
                Probe::Fresh(result) | Probe::Repeated(result) => self.observe(coord, result),
                Probe::Ignored => break,
            }
        }
        round.grade()
    }
}
