use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core::dataset::{is_image_file, DatasetSplit, OutputLayout};
use crate::core::error::{PipelineError, PipelineResult};
use crate::core::taxonomy::TargetClass;

/// Count image files directly inside a directory; 0 if it cannot be read
fn count_images(dir: &Path) -> usize {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_image_file(p))
            .count(),
        Err(_) => 0,
    }
}

/// Re-scan the output tree and report observed per-(split, class) counts,
/// keyed `"{split}/{class}"`. Read-only; used to audit the materializer's
/// own report against what is actually on disk.
pub fn verify(layout: &OutputLayout) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();

    for split in DatasetSplit::all() {
        let split_dir = layout.split_dir(split);
        if !split_dir.is_dir() {
            warn!("Split directory not found: {:?}", split_dir);
            continue;
        }
        for class in TargetClass::all() {
            let class_dir = layout.class_dir(split, class);
            if class_dir.is_dir() {
                let count = count_images(&class_dir);
                counts.insert(format!("{}/{}", split.as_str(), class.as_str()), count);
            }
        }
    }

    counts
}

/// Sum of all observed counts
pub fn observed_total(counts: &BTreeMap<String, usize>) -> usize {
    counts.values().sum()
}

/// Structural report of an output tree: per-split per-class counts, the
/// class set discovered in train, and any `{split}/{class}` directories a
/// downstream training run would expect but which are missing.
#[derive(Debug, Clone, Default)]
pub struct StructureReport {
    pub split_counts: BTreeMap<String, BTreeMap<String, usize>>,
    pub train_classes: Vec<String>,
    pub missing: Vec<String>,
}

/// Validate the structural layout of a prepared dataset.
///
/// `train` and `val` are required; `test` is optional. Every class directory
/// present in train must also exist (possibly empty) in the other splits for
/// class naming to be consistent downstream.
pub fn check_structure(data_root: &Path) -> PipelineResult<StructureReport> {
    if !data_root.is_dir() {
        return Err(PipelineError::SourceNotFound(data_root.to_path_buf()));
    }

    info!("Checking dataset structure at: {:?}", data_root);
    let mut report = StructureReport::default();

    let list_classes = |split_dir: &Path| -> PipelineResult<Vec<String>> {
        let mut classes: Vec<String> = fs::read_dir(split_dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        classes.sort();
        Ok(classes)
    };

    for split in DatasetSplit::all() {
        let split_dir = data_root.join(split.as_str());
        if !split_dir.is_dir() {
            if split == DatasetSplit::Test {
                info!("Optional split 'test' not present");
                continue;
            }
            return Err(PipelineError::SourceNotFound(split_dir));
        }

        let mut class_counts = BTreeMap::new();
        for class in list_classes(&split_dir)? {
            let count = count_images(&split_dir.join(&class));
            info!("  {}/{}: {} images", split.as_str(), class, count);
            class_counts.insert(class, count);
        }

        if split == DatasetSplit::Train {
            report.train_classes = class_counts.keys().cloned().collect();
        }
        report
            .split_counts
            .insert(split.as_str().to_string(), class_counts);
    }

    // Every train class must have a directory in each split that exists
    for (split_name, class_counts) in &report.split_counts {
        for class in &report.train_classes {
            if !class_counts.contains_key(class) {
                let key = format!("{}/{}", split_name, class);
                warn!("Missing class directory: {}", key);
                report.missing.push(key);
            }
        }
    }

    info!(
        "Structure check complete: {} train classes, {} missing directories",
        report.train_classes.len(),
        report.missing.len()
    );

    Ok(report)
}
