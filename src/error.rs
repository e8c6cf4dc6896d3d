//! Error types for the clustering core

use thiserror::Error;

/// Result alias used by the clustering core
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Precondition failures detected before or during the merge loop
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// Unknown linkage or metric name
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// What was rejected
        message: String,
    },

    /// A profile's length differs from the first profile's
    #[error("dimension mismatch at profile {index}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Position of the offending profile
        index: usize,
        /// Dimensionality of the first profile
        expected: usize,
        /// Dimensionality found
        found: usize,
    },

    /// No profiles (or an empty member list) were supplied
    #[error("empty input provided")]
    EmptyInput,

    /// Names and profiles are not parallel sequences
    #[error("got {profiles} profiles but {names} names")]
    NameCountMismatch {
        /// Number of profiles
        profiles: usize,
        /// Number of names
        names: usize,
    },

    /// The same leaf name appears twice
    #[error("duplicate profile name '{name}'")]
    DuplicateName {
        /// The repeated name
        name: String,
    },

    /// A linkage evaluation produced NaN
    #[error("distance between clusters {left} and {right} is not a number")]
    NonFiniteDistance {
        /// Cluster id on the left of the pair
        left: usize,
        /// Cluster id on the right of the pair
        right: usize,
    },
}

impl ClusterError {
    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        ClusterError::InvalidConfiguration {
            message: message.into(),
        }
    }
}
