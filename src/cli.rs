use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{TransferMode, DEFAULT_SEED};

#[derive(Parser)]
#[command(name = "prepare-gesture-dataset")]
#[command(about = "Partition a raw gesture image corpus into train/val/test splits")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan the raw corpus, split it and materialize the output tree
    Prepare {
        /// JSON configuration file; explicit flags override its values
        #[arg(long)]
        config: Option<PathBuf>,

        /// Root directory of the raw labeled corpus
        #[arg(long)]
        raw_root: Option<PathBuf>,

        /// Root directory for the prepared output tree
        #[arg(long)]
        out_root: Option<PathBuf>,

        /// Seed controlling shuffle order, collision suffixes and sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Training fraction
        #[arg(long)]
        train_ratio: Option<f64>,

        /// Validation fraction
        #[arg(long)]
        val_ratio: Option<f64>,

        /// Test fraction
        #[arg(long)]
        test_ratio: Option<f64>,

        /// Copy preserves sources, move consumes them
        #[arg(long, value_enum)]
        mode: Option<TransferMode>,
    },

    /// Cap a class directory at a maximum sample count by random deletion
    Balance {
        /// Class directory to trim, e.g. data/train/Invalid
        #[arg(long)]
        class_dir: PathBuf,

        /// Maximum number of images to keep
        #[arg(long)]
        max_count: usize,

        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },

    /// Re-scan an output tree and print observed per split/class counts
    Verify {
        #[arg(long)]
        out_root: PathBuf,
    },

    /// Validate the structural layout of a prepared dataset
    Check {
        #[arg(long)]
        data_root: PathBuf,
    },
}
