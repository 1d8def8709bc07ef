use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::info;

use crate::config::TransferMode;
use crate::core::dataset::{DatasetSplit, OutputLayout};
use crate::core::error::{PipelineError, PipelineResult};
use crate::core::operations::{copy_file, move_file};
use crate::core::splitter::{plan_total, SplitPlan};
use crate::core::taxonomy::TargetClass;

/// Random suffixes for collision renames are drawn from 0..100000
const COLLISION_SUFFIX_SPACE: u32 = 100_000;
/// Repeated collisions within the suffix space are a reportable error,
/// not something to loop on forever
const COLLISION_RETRY_LIMIT: usize = 16;

/// Per-(split, class) counts of successfully transferred files
#[derive(Debug, Clone, Default)]
pub struct CountsReport {
    counts: BTreeMap<(DatasetSplit, TargetClass), usize>,
    pub grand_total: usize,
}

impl CountsReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, split: DatasetSplit, class: TargetClass) {
        *self.counts.entry((split, class)).or_insert(0) += 1;
        self.grand_total += 1;
    }

    pub fn get(&self, split: DatasetSplit, class: TargetClass) -> usize {
        self.counts.get(&(split, class)).copied().unwrap_or(0)
    }

    pub fn split_total(&self, split: DatasetSplit) -> usize {
        self.counts
            .iter()
            .filter(|((s, _), _)| *s == split)
            .map(|(_, count)| count)
            .sum()
    }
}

/// Pick a destination path inside `dest_dir` for `src`, resolving basename
/// collisions by appending `_<suffix>` before the extension. Suffixes come
/// from the pipeline's seeded rng so runs stay reproducible.
fn resolve_destination(
    dest_dir: &Path,
    src: &Path,
    split: DatasetSplit,
    class: TargetClass,
    rng: &mut impl Rng,
) -> PipelineResult<PathBuf> {
    let filename = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| PipelineError::TransferFailed {
            source: src.to_path_buf(),
            dest: dest_dir.to_path_buf(),
            split,
            class,
            error: std::io::Error::new(std::io::ErrorKind::InvalidInput, "source has no filename"),
        })?;

    let default_dest = dest_dir.join(&filename);
    if !default_dest.exists() {
        return Ok(default_dest);
    }

    let stem = src
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| filename.clone());
    let ext = src
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    for _ in 0..COLLISION_RETRY_LIMIT {
        let suffix = rng.gen_range(0..COLLISION_SUFFIX_SPACE);
        let candidate = dest_dir.join(format!("{}_{}{}", stem, suffix, ext));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(PipelineError::CollisionExhausted {
        source: src.to_path_buf(),
        dest: default_dest,
        split,
        class,
    })
}

/// Transfer every planned file into the output layout.
///
/// Pre-condition: the layout directories already exist (`ensure_dirs`).
/// Returns the per-(split, class) counts so the caller can assert
/// input/output conservation.
pub fn materialize(
    plan: &SplitPlan,
    layout: &OutputLayout,
    mode: TransferMode,
    rng: &mut impl Rng,
) -> PipelineResult<CountsReport> {
    let mut report = CountsReport::new();
    let total_planned = plan_total(plan);

    info!(
        "Materializing {} images into {:?} ({} mode)",
        total_planned,
        layout.root(),
        mode.as_str()
    );

    for (class, class_split) in plan {
        for split in DatasetSplit::all() {
            let files = class_split.get(split);
            if files.is_empty() {
                continue;
            }
            let dest_dir = layout.class_dir(split, *class);
            info!(
                "  {}/{}: {} images",
                split.as_str(),
                class.as_str(),
                files.len()
            );

            for (idx, src) in files.iter().enumerate() {
                let dest = resolve_destination(&dest_dir, src, split, *class, rng)?;

                let result = match mode {
                    TransferMode::Copy => copy_file(src, &dest),
                    TransferMode::Move => move_file(src, &dest),
                };
                result.map_err(|error| PipelineError::TransferFailed {
                    source: src.clone(),
                    dest: dest.clone(),
                    split,
                    class: *class,
                    error,
                })?;

                report.record(split, *class);
                if (idx + 1) % 100 == 0 {
                    info!(
                        "    {}/{} images ({} of {} overall)",
                        idx + 1,
                        files.len(),
                        report.grand_total,
                        total_planned
                    );
                }
            }
        }
    }

    info!(
        "Materialization complete: {} of {} images transferred",
        report.grand_total, total_planned
    );

    Ok(report)
}
