use serde::{Deserialize, Serialize};

use crate::{
    PlacementError, ProbeError, SessionError,
    core::{
        grid::{Coord, GridDimensions},
        placement::Placement,
        shape::Shape,
    },
};

use super::{
    level::{LevelSpec, validate_levels},
    placement_generator::{PlacementGenerator, PlacementSeed},
    round::{Probe, ProbeRecord, Round, RoundStatus},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant,
)]
pub enum SessionStatus {
    Running,
    AllLevelsCleared,
}

/// Progress through the level list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionState {
    current_level_index: usize,
    last_score: Option<u8>,
    status: SessionStatus,
}

impl SessionState {
    /// Index of the level being played. Stays on the last level once all
    /// levels are cleared.
    #[must_use]
    pub const fn current_level_index(&self) -> usize {
        self.current_level_index
    }

    /// Score of the most recently finished round.
    #[must_use]
    pub const fn last_score(&self) -> Option<u8> {
        self.last_score
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }
}

/// What a probe did to the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    pub probe: Probe,
    pub round_status: RoundStatus,
    /// Score of the round, once the head has been found.
    pub score: Option<u8>,
}

/// Sequences rounds over an ordered list of levels.
///
/// The session never moves on by itself: after a round ends the placement
/// stays revealed until the caller restarts the level or advances.
///
/// # Example
///
/// ```
/// use planehunt_engine::{PlacementSeed, Session, SessionStatus, default_levels};
/// use rand::Rng as _;
///
/// let seed: PlacementSeed = rand::rng().random();
/// let mut session = Session::with_seed(default_levels(), seed).unwrap();
/// assert_eq!(session.state().current_level_index(), 0);
///
/// // Probe every cell in order until the head is found.
/// for coord in session.dimensions().coords() {
///     let report = session.probe(coord).unwrap();
///     if report.round_status.is_terminal() {
///         break;
///     }
/// }
/// assert!(session.revealed_placement().is_some());
/// assert_eq!(session.state().status(), SessionStatus::Running);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    levels: Vec<LevelSpec>,
    shape: Shape,
    generator: PlacementGenerator,
    state: SessionState,
    round: Round,
}

impl Session {
    /// Starts a session with the standard plane and a random seed.
    pub fn start(levels: Vec<LevelSpec>) -> Result<Self, SessionError> {
        Self::new(levels, Shape::plane(), PlacementGenerator::new())
    }

    /// Like [`Self::start`], but with a specific seed for reproducible placements.
    pub fn with_seed(levels: Vec<LevelSpec>, seed: PlacementSeed) -> Result<Self, SessionError> {
        Self::new(levels, Shape::plane(), PlacementGenerator::with_seed(seed))
    }

    /// Validates the levels and starts the first one.
    pub fn new(
        levels: Vec<LevelSpec>,
        shape: Shape,
        mut generator: PlacementGenerator,
    ) -> Result<Self, SessionError> {
        validate_levels(&levels)?;
        let round = start_round(&levels[0], &shape, &mut generator)?;
        tracing::info!(
            levels = levels.len(),
            seed = %generator.seed(),
            "session started"
        );
        Ok(Self {
            levels,
            shape,
            generator,
            state: SessionState {
                current_level_index: 0,
                last_score: None,
                status: SessionStatus::Running,
            },
            round,
        })
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn levels(&self) -> &[LevelSpec] {
        &self.levels
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn seed(&self) -> PlacementSeed {
        self.generator.seed()
    }

    #[must_use]
    pub fn current_level(&self) -> &LevelSpec {
        &self.levels[self.state.current_level_index]
    }

    #[must_use]
    pub fn dimensions(&self) -> GridDimensions {
        self.round.dimensions()
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[must_use]
    pub fn history(&self) -> &[ProbeRecord] {
        self.round.history()
    }

    /// Returns the current round's placement once that round is over.
    #[must_use]
    pub fn revealed_placement(&self) -> Option<&Placement> {
        self.round.revealed_placement()
    }

    /// Probes a cell of the current round.
    pub fn probe(&mut self, coord: Coord) -> Result<ProbeReport, ProbeError> {
        let probe = self.round.probe(coord)?;
        let score = self.round.grade().map(|grade| grade.score());
        if probe.is_fresh() && self.round.status().is_terminal() {
            self.state.last_score = score;
            tracing::info!(
                level = self.current_level().id(),
                probes = self.round.probe_count(),
                score = ?score,
                status = %self.round.status(),
                "round finished"
            );
        }
        Ok(ProbeReport {
            probe,
            round_status: self.round.status(),
            score,
        })
    }

    /// Replaces the current round with a freshly placed one on the same level.
    ///
    /// Does nothing once every level is cleared.
    pub fn restart_current_level(&mut self) -> Result<(), PlacementError> {
        if self.state.status.is_all_levels_cleared() {
            return Ok(());
        }
        let level = &self.levels[self.state.current_level_index];
        self.round = start_round(level, &self.shape, &mut self.generator)?;
        tracing::debug!(level = level.id(), "level restarted");
        Ok(())
    }

    /// Moves past a passed round.
    ///
    /// Starts the next level, or marks the session as cleared after the last
    /// one. Does nothing once every level is cleared. Fails with
    /// [`SessionError::AdvanceNotAllowed`] unless the current round passed.
    pub fn advance_to_next_level(&mut self) -> Result<&SessionState, SessionError> {
        if self.state.status.is_all_levels_cleared() {
            return Ok(&self.state);
        }
        let status = self.round.status();
        if !status.is_passed() {
            return Err(SessionError::AdvanceNotAllowed { status });
        }

        let next_index = self.state.current_level_index + 1;
        match self.levels.get(next_index) {
            Some(level) => {
                self.round = start_round(level, &self.shape, &mut self.generator)?;
                self.state.current_level_index = next_index;
                tracing::info!(level = level.id(), "advanced to next level");
            }
            None => {
                self.state.status = SessionStatus::AllLevelsCleared;
                tracing::info!("all levels cleared");
            }
        }
        Ok(&self.state)
    }

    /// Applies the transition for a finished round: advance on pass, replay
    /// the same level on fail.
    pub fn next_round(&mut self) -> Result<&SessionState, SessionError> {
        if self.state.status.is_all_levels_cleared() {
            return Ok(&self.state);
        }
        match self.round.status() {
            RoundStatus::InProgress => Err(SessionError::RoundInProgress),
            RoundStatus::Passed => self.advance_to_next_level(),
            RoundStatus::Failed => {
                self.restart_current_level()?;
                Ok(&self.state)
            }
        }
    }
}

fn start_round(
    level: &LevelSpec,
    shape: &Shape,
    generator: &mut PlacementGenerator,
) -> Result<Round, PlacementError> {
    let placement = generator.generate(level.dimensions(), shape)?;
    Ok(Round::new(
        level.dimensions(),
        level.optimal_probes(),
        placement,
    ))
}
