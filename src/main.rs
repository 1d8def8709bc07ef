use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

mod cli;
mod config;
mod core;
mod logging;

use cli::{Cli, Command};
use config::{PipelineConfig, SplitRatios, TransferMode, DEFAULT_SEED};
use crate::core::dataset::{DatasetSplit, OutputLayout};
use crate::core::error::{PipelineError, PipelineResult};
use crate::core::{balancer, materializer, scanner, splitter, verifier};

fn main() {
    let cli = Cli::parse();
    logging::setup_logging();

    let result = match cli.command {
        Command::Prepare {
            config,
            raw_root,
            out_root,
            seed,
            train_ratio,
            val_ratio,
            test_ratio,
            mode,
        } => resolve_prepare_config(
            config, raw_root, out_root, seed, train_ratio, val_ratio, test_ratio, mode,
        )
        .and_then(|config| run_prepare(&config)),
        Command::Balance {
            class_dir,
            max_count,
            seed,
        } => run_balance(&class_dir, max_count, seed),
        Command::Verify { out_root } => run_verify(&out_root),
        Command::Check { data_root } => run_check(&data_root),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Merge an optional config file with explicit CLI flags (flags win) and
/// validate the result before any filesystem work happens.
#[allow(clippy::too_many_arguments)]
fn resolve_prepare_config(
    config_path: Option<PathBuf>,
    raw_root: Option<PathBuf>,
    out_root: Option<PathBuf>,
    seed: Option<u64>,
    train_ratio: Option<f64>,
    val_ratio: Option<f64>,
    test_ratio: Option<f64>,
    mode: Option<TransferMode>,
) -> PipelineResult<PipelineConfig> {
    let base = match config_path {
        Some(path) => Some(PipelineConfig::load(&path)?),
        None => None,
    };

    let raw_root = raw_root
        .or_else(|| base.as_ref().map(|c| c.raw_root.clone()))
        .ok_or_else(|| {
            PipelineError::InvalidConfiguration(
                "--raw-root is required (flag or config file)".to_string(),
            )
        })?;
    let out_root = out_root
        .or_else(|| base.as_ref().map(|c| c.out_root.clone()))
        .ok_or_else(|| {
            PipelineError::InvalidConfiguration(
                "--out-root is required (flag or config file)".to_string(),
            )
        })?;

    let base_ratios = base
        .as_ref()
        .map(|c| c.ratios)
        .unwrap_or_else(SplitRatios::default);
    let ratios = SplitRatios {
        train: train_ratio.unwrap_or(base_ratios.train),
        val: val_ratio.unwrap_or(base_ratios.val),
        test: test_ratio.unwrap_or(base_ratios.test),
    };

    let seed = seed
        .or_else(|| base.as_ref().map(|c| c.seed))
        .unwrap_or(DEFAULT_SEED);
    let mode = mode
        .or_else(|| base.as_ref().map(|c| c.mode))
        .unwrap_or_default();

    PipelineConfig::new(raw_root, out_root, seed, ratios, mode)
}

/// Full pipeline: scan -> split -> materialize -> verify. Succeeds only if
/// the scanned file count equals the materialized file count.
fn run_prepare(config: &PipelineConfig) -> PipelineResult<()> {
    info!("Source: {:?}", config.raw_root);
    info!("Destination: {:?}", config.out_root);
    info!(
        "Mode: {}, seed: {}, ratios: {}/{}/{}",
        config.mode.as_str(),
        config.seed,
        config.ratios.train,
        config.ratios.val,
        config.ratios.test
    );

    let layout = OutputLayout::new(config.out_root.clone());
    layout.ensure_dirs()?;

    let bucket = scanner::scan(&config.raw_root)?;
    scanner::ensure_non_empty(&bucket, &config.raw_root)?;
    let scanned = scanner::total_files(&bucket);

    let plan = splitter::split_bucket(&bucket, &config.ratios, config.seed);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let report = materializer::materialize(&plan, &layout, config.mode, &mut rng)?;

    if report.grand_total != scanned {
        return Err(PipelineError::PartialTransfer {
            expected: scanned,
            transferred: report.grand_total,
        });
    }

    let observed = verifier::verify(&layout);
    for split in DatasetSplit::all() {
        info!(
            "  {}: {} images",
            split.as_str(),
            report.split_total(split)
        );
    }
    info!(
        "Dataset prepared successfully: {} images on disk under {:?}",
        verifier::observed_total(&observed),
        config.out_root
    );

    Ok(())
}

fn run_balance(class_dir: &PathBuf, max_count: usize, seed: u64) -> PipelineResult<()> {
    let (before, after) = balancer::balance(class_dir, max_count, seed)?;
    info!("Before: {}", before);
    info!("After: {}", after);
    Ok(())
}

fn run_verify(out_root: &PathBuf) -> PipelineResult<()> {
    let layout = OutputLayout::new(out_root.clone());
    let counts = verifier::verify(&layout);

    for (key, count) in &counts {
        info!("  {}: {} images", key, count);
    }
    for split in DatasetSplit::all() {
        let prefix = format!("{}/", split.as_str());
        let split_total: usize = counts
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(_, v)| v)
            .sum();
        info!("{}: {} images", split.as_str(), split_total);
    }
    info!("Total images: {}", verifier::observed_total(&counts));

    Ok(())
}

fn run_check(data_root: &PathBuf) -> PipelineResult<()> {
    let report = verifier::check_structure(data_root)?;

    info!("Classes in train: {:?}", report.train_classes);
    if report.missing.is_empty() {
        info!("Dataset structure is consistent");
    } else {
        for key in &report.missing {
            error!("Missing class directory: {}", key);
        }
        return Err(PipelineError::SourceNotFound(
            data_root.join(&report.missing[0]),
        ));
    }

    Ok(())
}
