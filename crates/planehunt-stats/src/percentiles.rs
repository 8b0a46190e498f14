/// Returns the nearest-rank percentile of sorted values.
///
/// The `p`-th percentile of `n` values is the value at index
/// `ceil(n * p / 100) - 1`, so the 100th percentile is the maximum and small
/// percentiles never go below the minimum. Returns `None` for an empty
/// sample.
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order or if `p` is
/// outside `0.0..=100.0`.
///
/// # Examples
///
/// ```
/// use planehunt_stats::percentiles::percentile;
///
/// let values = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
/// assert_eq!(percentile(&values, 50.0), Some(5));
/// assert_eq!(percentile(&values, 90.0), Some(9));
/// assert_eq!(percentile(&values, 100.0), Some(10));
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn percentile(sorted_values: &[u32], p: f64) -> Option<u32> {
    assert!(
        sorted_values.is_sorted(),
        "values must be sorted in ascending order"
    );
    assert!((0.0..=100.0).contains(&p), "percentile out of range: {p}");

    let n = sorted_values.len();
    if n == 0 {
        return None;
    }
    let rank = ((n as f64 * p) / 100.0).ceil() as usize;
    Some(sorted_values[rank.clamp(1, n) - 1])
}

/// Fraction of `passed` out of `total`, or `None` when `total` is zero.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn rate(passed: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| passed as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample() {
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(rate(0, 0), None);
    }

    #[test]
    fn test_single_value() {
        for p in [0.0, 25.0, 50.0, 100.0] {
            assert_eq!(percentile(&[7], p), Some(7));
        }
    }

    #[test]
    fn test_nearest_rank() {
        let values = [1, 2, 3, 4];
        assert_eq!(percentile(&values, 0.0), Some(1));
        assert_eq!(percentile(&values, 25.0), Some(1));
        assert_eq!(percentile(&values, 26.0), Some(2));
        assert_eq!(percentile(&values, 75.0), Some(3));
        assert_eq!(percentile(&values, 100.0), Some(4));
    }

    #[test]
    fn test_rate() {
        assert_eq!(rate(3, 4), Some(0.75));
        assert_eq!(rate(0, 5), Some(0.0));
        assert_eq!(rate(5, 5), Some(1.0));
    }

    #[test]
    #[should_panic(expected = "sorted")]
    fn test_unsorted_panics() {
        let _ = percentile(&[3, 1, 2], 50.0);
    }
}
