use serde::{Deserialize, Serialize};

/// Best possible score.
pub const MAX_SCORE: u8 = 100;

/// Minimum score that passes a round.
pub const PASS_THRESHOLD: u8 = 60;

/// Points lost between the first probe and the par probe count.
const DECAY_SPAN: f64 = 40.0;

/// Computes the score for finding the head in `probes_used` probes on a level
/// whose par is `optimal_probes`.
///
/// # Scoring
///
/// - Hitting par exactly scores [`MAX_SCORE`].
/// - Otherwise the score decays linearly from 100 at one probe, losing
///   40 points by the time `probes_used - 1` reaches `optimal_probes - 1`:
///   `100 - 40 * (probes_used - 1) / (optimal_probes - 1)`.
/// - The result is rounded half-up and clamped to `0..=100`.
///
/// A par of one leaves the formula undefined for any other probe count; those
/// inputs score 0. Level validation rejects such pars before a round starts.
///
/// # Example
///
/// ```
/// use planehunt_engine::score;
///
/// assert_eq!(score(2, 2), 100);
/// assert_eq!(score(3, 2), 20);
/// assert_eq!(score(4, 2), 0);
/// assert_eq!(score(2, 3), 80);
/// ```
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn score(probes_used: u32, optimal_probes: u32) -> u8 {
    if probes_used == optimal_probes {
        return MAX_SCORE;
    }
    if optimal_probes <= 1 {
        return 0;
    }

    let raw = f64::from(MAX_SCORE)
        - DECAY_SPAN * (f64::from(probes_used) - 1.0) / (f64::from(optimal_probes) - 1.0);
    (raw + 0.5).floor().clamp(0.0, f64::from(MAX_SCORE)) as u8
}

/// Final score of a round and whether it clears the pass threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Grade {
    score: u8,
    passed: bool,
}

impl Grade {
    #[must_use]
    pub const fn new(score: u8) -> Self {
        Self {
            score,
            passed: score >= PASS_THRESHOLD,
        }
    }

    /// Grades a round that found the head after `probes_used` probes.
    #[must_use]
    pub fn from_probes(probes_used: u32, optimal_probes: u32) -> Self {
        Self::new(score(probes_used, optimal_probes))
    }

    #[must_use]
    pub const fn score(self) -> u8 {
        self.score
    }

    #[must_use]
    pub const fn is_passed(self) -> bool {
        self.passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_par_scores_full() {
        assert_eq!(score(1, 1), 100);
        for optimal in 1..=20 {
            assert_eq!(score(optimal, optimal), 100);
        }
    }

    #[test]
    fn test_linear_decay_and_floor() {
        assert_eq!(score(3, 2), 20);
        assert_eq!(score(4, 2), 0);
        assert_eq!(score(100, 2), 0);
        assert_eq!(score(5, 4), 47);
        assert_eq!(score(7, 6), 52);
        assert_eq!(score(8, 6), 44);
    }

    #[test]
    fn test_fewer_than_par() {
        assert_eq!(score(1, 4), 100);
        assert_eq!(score(2, 4), 87);
        assert_eq!(score(3, 4), 73);
        assert_eq!(score(2, 3), 80);
    }

    #[test]
    fn test_rounds_half_up() {
        // 100 - 40 * 1 / 80 = 99.5
        assert_eq!(score(2, 81), 100);
        // 100 - 40 * 81 / 80 = 59.5
        assert_eq!(score(82, 81), 60);
    }

    #[test]
    fn test_degenerate_par_scores_zero() {
        assert_eq!(score(2, 1), 0);
        assert_eq!(score(5, 1), 0);
        assert_eq!(score(3, 0), 0);
    }

    #[test]
    fn test_score_is_monotonic() {
        for optimal in 2..=10 {
            let scores: Vec<_> = (optimal + 1..optimal + 20)
                .map(|probes| score(probes, optimal))
                .collect();
            assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn test_pass_threshold() {
        assert!(Grade::new(60).is_passed());
        assert!(!Grade::new(59).is_passed());
        assert!(Grade::new(100).is_passed());
        assert!(Grade::from_probes(2, 2).is_passed());
        assert!(!Grade::from_probes(3, 2).is_passed());
        assert_eq!(Grade::from_probes(3, 2).score(), 20);
    }
}
