//! Configuration management for the profile clusterer

use crate::cluster::Linkage;
use crate::distance::Metric;
use serde::{Deserialize, Serialize};

/// Settings for one clustering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Linkage rule used to compare clusters
    pub linkage: Linkage,

    /// Point-to-point distance metric
    pub metric: Metric,

    /// Canonically order children before writing the tree
    pub sort_descendants: bool,

    /// Compute pair distances on the rayon pool
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            linkage: Linkage::Single,
            metric: Metric::Euclidean,
            sort_descendants: true,
            parallel: false,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(linkage: Linkage, metric: Metric, sort_descendants: bool, parallel: bool) -> Self {
        Self {
            linkage,
            metric,
            sort_descendants,
            parallel,
        }
    }

    /// Build a configuration from textual linkage and metric names
    pub fn from_names(linkage: &str, metric: &str) -> crate::error::Result<Self> {
        Ok(Self {
            linkage: linkage.parse()?,
            metric: metric.parse()?,
            ..Self::default()
        })
    }
}
