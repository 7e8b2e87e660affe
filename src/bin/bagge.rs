//! Command-line entry point for the house-prices pipeline.
//!
//! ```bash
//! bagge --train train.csv --test test.csv --out submission.csv \
//!       --ntree 500 --mtry 12 --seed 42
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use bagge_rs::clean::ImputeStrategy;
use bagge_rs::pipeline::{self, PipelineConfig};
use bagge_rs::training::{ForestParams, Verbosity};

#[derive(Debug, Parser)]
#[command(name = "bagge", about = "Bagged regression forest for the house-prices competition")]
struct Args {
    /// Training CSV (Id, predictors, SalePrice).
    #[arg(long)]
    train: PathBuf,

    /// Test CSV (Id, predictors).
    #[arg(long)]
    test: PathBuf,

    /// Output submission CSV (Id, SalePrice).
    #[arg(long, default_value = "submission.csv")]
    out: PathBuf,

    /// Number of trees in the ensemble.
    #[arg(long, default_value_t = 500)]
    ntree: u32,

    /// Split candidates drawn per node.
    #[arg(long, default_value_t = 12)]
    mtry: usize,

    /// Nodes with at most this many rows become leaves.
    #[arg(long, default_value_t = 5)]
    min_node_size: usize,

    /// Seed for all resampling and candidate draws.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Threads for tree growth (0 = all cores, 1 = sequential).
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Where imputation statistics come from.
    #[arg(long, value_enum, default_value_t = ImputeArg::TrainStats)]
    impute: ImputeArg,

    /// Suppress training progress output.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ImputeArg {
    /// Column means from the training table, applied to both tables.
    TrainStats,
    /// Each table imputed from its own column means.
    TableLocal,
}

impl From<ImputeArg> for ImputeStrategy {
    fn from(arg: ImputeArg) -> Self {
        match arg {
            ImputeArg::TrainStats => ImputeStrategy::TrainStatistics,
            ImputeArg::TableLocal => ImputeStrategy::TableLocal,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PipelineConfig {
        params: ForestParams {
            n_trees: args.ntree,
            mtry: args.mtry,
            min_node_size: args.min_node_size,
            seed: args.seed,
            n_threads: args.threads,
            verbosity: if args.quiet {
                Verbosity::Silent
            } else {
                Verbosity::Info
            },
            ..Default::default()
        },
        impute: args.impute.into(),
    };

    let summary = pipeline::run(&args.train, &args.test, &args.out, &config)
        .with_context(|| format!("pipeline failed for {}", args.train.display()))?;

    println!(
        "wrote {} predictions from {} trees to {}",
        summary.n_test_rows,
        summary.n_trees,
        args.out.display()
    );
    if let Some(rmse) = summary.oob_rmse {
        println!("out-of-bag rmse (log target): {rmse:.5}");
    }

    Ok(())
}
