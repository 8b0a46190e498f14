/// Descriptive statistics over a sample of counts.
///
/// Used to summarise how many probes rounds took. Mean, median and spread
/// are fractional even though the samples are whole numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of values in the sample.
    pub count: usize,
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    /// Middle value, or the average of the two middle values for an even
    /// sample.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes statistics from unsorted values.
    ///
    /// Returns `None` if the sample is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use planehunt_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([4, 1, 3, 2]).unwrap();
    /// assert_eq!(stats.count, 4);
    /// assert_eq!(stats.mean, 2.5);
    /// assert_eq!(stats.median, 2.5);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_unstable();
        Self::from_sorted(&values)
    }

    /// Computes statistics from values already sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[u32]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted(),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            f64::midpoint(f64::from(sorted_values[mid - 1]), f64::from(sorted_values[mid]))
        } else {
            f64::from(sorted_values[mid])
        };
        let variance = sorted_values
            .iter()
            .map(|&v| (f64::from(v) - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}
