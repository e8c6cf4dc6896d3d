//! Core library functions for hierarchical clustering of numeric profiles

pub mod cluster;
pub mod config;
pub mod data;
pub mod distance;
pub mod error;
pub mod storage;
pub mod tree;

pub use cluster::{cluster_bottom_up, Agglomerator, Linkage};
pub use distance::{chebyshev_distance, euclidean_distance, manhattan_distance, Distance, Metric};
pub use error::{ClusterError, Result};
pub use tree::TreeNode;
