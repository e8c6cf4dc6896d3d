//! Results persistence module

use crate::cluster::{MergeStep, TreeSummary};
use crate::config::Config;
use crate::tree::TreeNode;
use anyhow::{Context, Result};
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the Newick output
pub const TREE_FILE: &str = "tree.nwk";

/// File name of the JSON summary
pub const SUMMARY_FILE: &str = "summary.json";

/// Save the tree and its summary to the specified directory.
///
/// Returns the path of the written Newick file.
pub fn save_results(
    tree: &TreeNode,
    summary: &TreeSummary,
    merges: &[MergeStep],
    config: &Config,
    output_dir: &str,
) -> Result<PathBuf> {
    log::info!("Saving clustering of {} profiles to {}", summary.leaf_count, output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir))?;

    let tree_path = save_tree(tree, output_dir)?;
    save_summary(summary, merges, config, output_dir)?;

    log::info!("Results saved successfully");

    Ok(tree_path)
}

/// Write the Newick string followed by a newline
fn save_tree(tree: &TreeNode, output_dir: &str) -> Result<PathBuf> {
    let path = Path::new(output_dir).join(TREE_FILE);
    let mut file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    writeln!(file, "{}", tree.to_newick())?;
    Ok(path)
}

/// Write run configuration, tree statistics and merge history
fn save_summary(
    summary: &TreeSummary,
    merges: &[MergeStep],
    config: &Config,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join(SUMMARY_FILE);
    let mut file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;

    let summary_json = json!({
        "config": config,
        "tree_stats": summary,
        "merge_count": merges.len(),
        "merges": merges,
    });

    file.write_all(to_string_pretty(&summary_json)?.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{summarize, Agglomerator, Linkage};
    use crate::distance::Metric;

    #[test]
    fn test_save_results_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("out");
        let output_dir = output_dir.to_str().unwrap();

        let config = Config::new(Linkage::Single, Metric::Euclidean, true, false);
        let run = Agglomerator::new(config.linkage, config.metric)
            .run(&[[4.0, 2.0], [-2.0, -6.0]], &["A", "B"])
            .unwrap();
        let summary = summarize(&run.root);

        let tree_path = save_results(&run.root, &summary, &run.merges, &config, output_dir).unwrap();
        assert_eq!(fs::read_to_string(tree_path).unwrap(), "(A:5,B:5);\n");

        let written: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(Path::new(output_dir).join(SUMMARY_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(written["config"]["linkage"], "single");
        assert_eq!(written["tree_stats"]["leaf_count"], 2);
        assert_eq!(written["merge_count"], 1);
        assert_eq!(written["merges"][0]["distance"], 10.0);
    }
}
