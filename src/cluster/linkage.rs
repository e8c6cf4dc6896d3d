//! Cluster-to-cluster distance under a linkage rule

use crate::distance::Distance;
use crate::error::{ClusterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How pairwise point distances between two clusters are reduced to one value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Minimum pairwise distance
    #[default]
    Single,
    /// Maximum pairwise distance
    Complete,
    /// Mean of all pairwise distances
    Average,
}

impl FromStr for Linkage {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Linkage::Single),
            "complete" => Ok(Linkage::Complete),
            "average" => Ok(Linkage::Average),
            other => Err(ClusterError::invalid_configuration(format!(
                "unknown linkage '{}' (expected single, complete or average)",
                other
            ))),
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Linkage::Single => "single",
            Linkage::Complete => "complete",
            Linkage::Average => "average",
        };
        f.write_str(name)
    }
}

/// Distance between two clusters given their member profiles.
///
/// All `|a| * |b|` point distances are evaluated once, `a` in the outer loop.
/// A NaN point distance makes the result NaN under every linkage.
pub fn cluster_distance<P, D>(a: &[P], b: &[P], linkage: Linkage, distance: &D) -> Result<f64>
where
    P: AsRef<[f64]>,
    D: Distance + ?Sized,
{
    if a.is_empty() || b.is_empty() {
        return Err(ClusterError::EmptyInput);
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;

    for pa in a {
        for pb in b {
            let d = distance.distance(pa.as_ref(), pb.as_ref());
            if d.is_nan() {
                return Ok(f64::NAN);
            }
            sum += d;
            if d < min {
                min = d;
            }
            if d > max {
                max = d;
            }
        }
    }

    Ok(match linkage {
        Linkage::Single => min,
        Linkage::Complete => max,
        Linkage::Average => sum / (a.len() * b.len()) as f64,
    })
}
