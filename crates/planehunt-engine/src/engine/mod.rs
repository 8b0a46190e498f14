//! Game logic built on top of the core geometry.
//!
//! - [`LevelSpec`] - Static level configuration (grid size and par)
//! - [`PlacementGenerator`] - Seeded rejection sampling of hidden placements
//! - [`Round`] - Single-round state machine (probes, history, grade)
//! - [`Session`] - Level progression across rounds
//! - [`Solver`] - Reference probing strategy used for simulation
//! - [`score`] / [`Grade`] - Probe-count scoring and the pass threshold
//!
//! # Game Flow
//!
//! 1. Start a [`Session`] with an ordered level list
//! 2. Probe cells until the head is found
//! 3. The round is graded: passed at 60 or more, failed otherwise
//! 4. Call [`Session::next_round`] to advance on a pass or retry on a fail
//! 5. Passing the last level clears the session
//!
//! # Example
//!
//! ```
//! use planehunt_engine::{Session, SessionStatus, default_levels};
//!
//! let mut session = Session::start(default_levels()).unwrap();
//! let dims = session.dimensions();
//!
//! for coord in dims.coords() {
//!     let report = session.probe(coord).unwrap();
//!     if report.round_status.is_terminal() {
//!         break;
//!     }
//! }
//!
//! assert!(session.round().status().is_terminal());
//! assert!(session.revealed_placement().is_some());
//! assert_eq!(session.state().status(), SessionStatus::Running);
//! ```

pub use self::{
    level::*, placement_generator::*, round::*, scoring::*, session::*, solver::*,
};

mod level;
mod placement_generator;
mod round;
mod scoring;
mod session;
mod solver;
