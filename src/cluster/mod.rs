//! Hierarchical clustering module

pub mod agglomerative;
pub mod linkage;
pub mod metrics;

pub use agglomerative::{cluster_bottom_up, Agglomerator, ClusterRun, DistanceCache, MergeStep};
pub use linkage::{cluster_distance, Linkage};
pub use metrics::{summarize, TreeSummary};
