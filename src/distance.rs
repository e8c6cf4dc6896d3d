//! Point-to-point distance functions

use crate::error::{ClusterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A symmetric, non-negative distance between two equal-length profiles.
///
/// Implemented for every `Fn(&[f64], &[f64]) -> f64 + Sync`, so plain
/// functions and closures plug straight into the engine.
pub trait Distance: Sync {
    /// Distance between `a` and `b`
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<F> Distance for F
where
    F: Fn(&[f64], &[f64]) -> f64 + Sync,
{
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// Euclidean (L2) distance
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Manhattan (L1) distance
pub fn manhattan_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Chebyshev (L-infinity) distance
pub fn chebyshev_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Evaluate `distance` after checking both profiles have the same length.
///
/// A mismatch is reported against `b` as profile 1 of the pair.
pub fn checked_distance<D: Distance + ?Sized>(a: &[f64], b: &[f64], distance: &D) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ClusterError::DimensionMismatch {
            index: 1,
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(distance.distance(a, b))
}

/// Built-in metrics selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Square root of summed squared differences
    Euclidean,
    /// Sum of absolute differences
    Manhattan,
    /// Largest absolute difference
    Chebyshev,
}

impl Distance for Metric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Metric::Euclidean => euclidean_distance(a, b),
            Metric::Manhattan => manhattan_distance(a, b),
            Metric::Chebyshev => chebyshev_distance(a, b),
        }
    }
}

impl FromStr for Metric {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Metric::Euclidean),
            "manhattan" => Ok(Metric::Manhattan),
            "chebyshev" => Ok(Metric::Chebyshev),
            other => Err(ClusterError::invalid_configuration(format!(
                "unknown distance metric '{}' (expected euclidean, manhattan or chebyshev)",
                other
            ))),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
            Metric::Chebyshev => "chebyshev",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_euclidean_pair() {
        assert_relative_eq!(euclidean_distance(&[4.0, 2.0], &[-2.0, -6.0]), 10.0);
    }

    #[test]
    fn test_manhattan_pair() {
        assert_relative_eq!(manhattan_distance(&[4.0, 2.0], &[-2.0, -6.0]), 14.0);
    }

    #[test]
    fn test_chebyshev_pair() {
        assert_relative_eq!(chebyshev_distance(&[4.0, 2.0], &[-2.0, -6.0]), 8.0);
    }

    #[test]
    fn test_metrics_are_symmetric_and_zero_on_identity() {
        let a = [1.5, -2.0, 0.25];
        let b = [0.0, 3.0, -1.0];
        for metric in [Metric::Euclidean, Metric::Manhattan, Metric::Chebyshev] {
            assert_eq!(metric.distance(&a, &b), metric.distance(&b, &a));
            assert_eq!(metric.distance(&a, &a), 0.0);
            assert!(metric.distance(&a, &b) > 0.0);
        }
    }

    #[test]
    fn test_closures_are_distances() {
        let scaled = |a: &[f64], b: &[f64]| 2.0 * manhattan_distance(a, b);
        assert_relative_eq!(scaled.distance(&[0.0], &[3.0]), 6.0);
    }

    #[test]
    fn test_checked_distance_rejects_mismatched_lengths() {
        let err = checked_distance(&[1.0, 2.0], &[1.0], &Metric::Euclidean).unwrap_err();
        assert_eq!(
            err,
            ClusterError::DimensionMismatch {
                index: 1,
                expected: 2,
                found: 1
            }
        );
        assert_relative_eq!(
            checked_distance(&[0.0, 0.0], &[3.0, 4.0], &Metric::Euclidean).unwrap(),
            5.0
        );
    }

    #[test]
    fn test_metric_names() {
        assert_eq!("Manhattan".parse::<Metric>().unwrap(), Metric::Manhattan);
        assert_eq!(Metric::Chebyshev.to_string(), "chebyshev");
        assert!(matches!(
            "cosine".parse::<Metric>(),
            Err(ClusterError::InvalidConfiguration { .. })
        ));
    }
}
