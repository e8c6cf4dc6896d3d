use anyhow::Result;
use clap::Parser;

use profile_dendrogram::cluster::{summarize, Agglomerator};
use profile_dendrogram::config::Config;
use profile_dendrogram::{data, storage};

#[derive(Parser, Debug)]
#[clap(
    name = "profile-dendrogram",
    about = "Bottom-up hierarchical clustering of numeric profiles"
)]
struct Cli {
    /// Path to a tab-separated profile table (names in the first row)
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "cluster_results")]
    output_dir: String,

    /// Linkage rule: single, complete or average
    #[clap(long, default_value = "single")]
    linkage: String,

    /// Distance metric: euclidean, manhattan or chebyshev
    #[clap(long, default_value = "euclidean")]
    metric: String,

    /// File listing the profile names to keep, one per line
    #[clap(long)]
    subset: Option<String>,

    /// Compute cluster distances in parallel
    #[clap(long)]
    parallel: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Keep children in merge order instead of sorting them by name
    #[clap(long)]
    no_sort: bool,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let mut config = Config::from_names(&args.linkage, &args.metric)?;
    config.parallel = args.parallel;
    config.sort_descendants = !args.no_sort;

    if config.parallel {
        // If threads = 0, use all available cores
        let num_threads = if args.threads > 0 {
            args.threads
        } else {
            num_cpus::get()
        };

        log::info!("Using {} worker threads", num_threads);
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;
    }

    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load profiles
    let mut table = data::read_expression_profiles(&args.input)?;

    if let Some(subset) = &args.subset {
        let wanted = data::read_name_list(subset)?;
        table = data::select_profiles(&table, &wanted)?;
        log::info!("Kept {} profiles listed in {}", table.len(), subset);
    }

    // 2. Cluster
    let run = Agglomerator::new(config.linkage, config.metric)
        .with_parallel(config.parallel)
        .run(&table.profiles, &table.names)?;

    let mut tree = run.root;
    if config.sort_descendants {
        tree.sort_descendants();
    }

    // 3. Save results
    let summary = summarize(&tree);
    log::info!(
        "Tree has {} leaves, root height {}",
        summary.leaf_count,
        summary.root_height
    );
    storage::save_results(&tree, &summary, &run.merges, &config, &args.output_dir)?;

    println!("{}", tree.to_newick());

    log::info!("Clustering complete. Results saved to {}", args.output_dir);

    Ok(())
}
