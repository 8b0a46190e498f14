use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    PlacementError,
    core::{
        grid::{Coord, GridDimensions},
        placement::Placement,
        shape::{Orientation, Shape},
    },
};

/// Attempt budget used when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: usize = 2000;

/// Draws random placements by rejection sampling.
///
/// Each attempt picks a uniformly random [`Orientation`] and a uniformly random
/// head cell in `[0, rows) × [0, cols)`, then keeps the first candidate whose
/// cells all lie inside the grid. No preference is given among valid
/// placements.
///
/// Gives up with [`PlacementError::Exhausted`] after `max_attempts` rejected
/// candidates, which indicates a grid too small for the shape.
pub fn generate_placement<R>(
    rng: &mut R,
    dimensions: GridDimensions,
    shape: &Shape,
    max_attempts: usize,
) -> Result<Placement, PlacementError>
where
    R: Rng + ?Sized,
{
    if !dimensions.is_empty() {
        for attempt in 1..=max_attempts {
            let orientation: Orientation = rng.random();
            let head = Coord::new(
                rng.random_range(0..dimensions.rows()),
                rng.random_range(0..dimensions.cols()),
            );
            if let Some(placement) = Placement::try_new(dimensions, shape, orientation, head) {
                tracing::debug!(
                    %dimensions,
                    placement = %placement.key(),
                    attempt,
                    "placement generated"
                );
                return Ok(placement);
            }
        }
    }

    tracing::warn!(%dimensions, max_attempts, "placement attempts exhausted");
    Err(PlacementError::Exhausted {
        dimensions,
        attempts: max_attempts,
    })
}

/// Seed for deterministic placement generation.
///
/// A 128-bit (16-byte) seed for the generator's random source. The same seed
/// produces the same sequence of placements, which makes rounds reproducible
/// for debugging and testing.
///
/// Serializes as a 32-character lowercase hex string; parsing accepts either
/// case.
///
/// # Example
///
/// ```
/// use planehunt_engine::{GridDimensions, PlacementGenerator, PlacementSeed, Shape};
/// use rand::Rng as _;
///
/// let seed: PlacementSeed = rand::rng().random();
/// let dims = GridDimensions::new(6, 6);
///
/// let mut first = PlacementGenerator::with_seed(seed);
/// let mut second = PlacementGenerator::with_seed(seed);
/// assert_eq!(
///     first.generate(dims, &Shape::plane()).unwrap(),
///     second.generate(dims, &Shape::plane()).unwrap(),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementSeed([u8; 16]);

impl PlacementSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PlacementSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    Length { len: usize },
    #[display("invalid hex: {input}")]
    Digits { input: String },
}

impl FromStr for PlacementSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::Length { len: s.len() });
        }
        // `from_str_radix` accepts a leading '+', which is not valid here.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError::Digits {
                input: s.to_owned(),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::Digits {
            input: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PlacementSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlacementSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<PlacementSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PlacementSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PlacementSeed(seed)
    }
}

/// Seeded source of random placements.
///
/// Owns the random number generator so that a whole session's sequence of
/// placements is determined by a single [`PlacementSeed`].
#[derive(Debug, Clone)]
pub struct PlacementGenerator {
    seed: PlacementSeed,
    rng: Pcg32,
    max_attempts: usize,
}

impl Default for PlacementGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacementGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic generation.
    #[must_use]
    pub fn with_seed(seed: PlacementSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the attempt budget.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn seed(&self) -> PlacementSeed {
        self.seed
    }

    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Draws the next placement of `shape` on a grid of the given size.
    pub fn generate(
        &mut self,
        dimensions: GridDimensions,
        shape: &Shape,
    ) -> Result<Placement, PlacementError> {
        generate_placement(&mut self.rng, dimensions, shape, self.max_attempts)
    }
}
