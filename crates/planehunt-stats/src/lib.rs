//! Summary statistics for simulated rounds.
//!
//! - **Descriptive statistics**: min, max, mean, median and spread of a sample
//! - **Percentiles**: nearest-rank percentiles over sorted samples
//!
//! # Example
//!
//! ```
//! use planehunt_stats::descriptive::DescriptiveStats;
//!
//! let probes = [2, 3, 2, 5, 4];
//! let stats = DescriptiveStats::new(probes).unwrap();
//! assert_eq!(stats.min, 2);
//! assert_eq!(stats.max, 5);
//! assert_eq!(stats.median, 3.0);
//! ```

pub mod descriptive;
pub mod percentiles;
