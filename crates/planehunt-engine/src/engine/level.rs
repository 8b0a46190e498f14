use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{LevelError, core::grid::GridDimensions};

/// Static configuration of one level.
///
/// Deserializes from a flat JSON object:
///
/// ```
/// use planehunt_engine::LevelSpec;
///
/// let level: LevelSpec =
///     serde_json::from_str(r#"{"id": 1, "rows": 4, "cols": 5, "optimal_probes": 2}"#).unwrap();
/// assert_eq!(level.dimensions().rows(), 4);
/// assert_eq!(level.to_string(), "Level 1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LevelSpec {
    id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(flatten)]
    dimensions: GridDimensions,
    optimal_probes: u32,
}

impl fmt::Display for LevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => f.write_str(label),
            None => write!(f, "Level {}", self.id),
        }
    }
}

impl LevelSpec {
    #[must_use]
    pub const fn new(id: u32, dimensions: GridDimensions, optimal_probes: u32) -> Self {
        Self {
            id,
            label: None,
            dimensions,
            optimal_probes,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Par probe count used as the scoring baseline.
    #[must_use]
    pub const fn optimal_probes(&self) -> u32 {
        self.optimal_probes
    }

    /// Checks that the level can be played and scored.
    ///
    /// A par of one (or zero) leaves the scoring formula undefined for any
    /// round that misses on the first probe, so it is rejected here rather than
    /// when the round ends.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.dimensions.is_empty() {
            return Err(LevelError::EmptyGrid {
                id: self.id,
                dimensions: self.dimensions,
            });
        }
        if self.optimal_probes <= 1 {
            return Err(LevelError::DegenerateScoringConfig {
                id: self.id,
                optimal_probes: self.optimal_probes,
            });
        }
        Ok(())
    }
}

/// Validates an ordered level list.
pub fn validate_levels(levels: &[LevelSpec]) -> Result<(), LevelError> {
    if levels.is_empty() {
        return Err(LevelError::NoLevels);
    }
    levels.iter().try_for_each(LevelSpec::validate)
}

/// The built-in difficulty curve.
#[must_use]
pub fn default_levels() -> Vec<LevelSpec> {
    vec![
        LevelSpec::new(1, GridDimensions::new(4, 5), 2),
        LevelSpec::new(2, GridDimensions::new(5, 5), 4),
        LevelSpec::new(3, GridDimensions::new(6, 6), 6),
    ]
}
