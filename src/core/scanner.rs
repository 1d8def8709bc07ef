use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::dataset::is_image_file;
use crate::core::error::{PipelineError, PipelineResult};
use crate::core::taxonomy::TargetClass;

/// Image paths grouped by mapped target class, in discovery order
pub type ClassBucket = BTreeMap<TargetClass, Vec<PathBuf>>;

/// Total number of files held across all classes of a bucket
pub fn total_files(bucket: &ClassBucket) -> usize {
    bucket.values().map(|files| files.len()).sum()
}

/// A scan that matched zero images across all classes aborts the pipeline;
/// there is nothing meaningful to split.
pub fn ensure_non_empty(bucket: &ClassBucket, raw_root: &Path) -> PipelineResult<()> {
    if total_files(bucket) == 0 {
        return Err(PipelineError::EmptyCorpus(raw_root.to_path_buf()));
    }
    Ok(())
}

/// Walk the immediate subdirectories of `raw_root` and group the image files
/// they contain by mapped target class.
///
/// Each subdirectory name is a raw label fed through the taxonomy mapping;
/// nested directories are not descended into. A label directory with zero
/// matching images still contributes an (empty) entry for its class.
pub fn scan(raw_root: &Path) -> PipelineResult<ClassBucket> {
    if !raw_root.is_dir() {
        return Err(PipelineError::SourceNotFound(raw_root.to_path_buf()));
    }

    info!("Scanning source directory: {:?}", raw_root);

    let mut label_dirs: Vec<PathBuf> = fs::read_dir(raw_root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    label_dirs.sort();

    info!("Found {} label directories to scan", label_dirs.len());

    let mut bucket = ClassBucket::new();
    let mut total = 0usize;

    for (idx, dir) in label_dirs.iter().enumerate() {
        let raw_label = match dir.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => {
                warn!("Skipping directory with unreadable name: {:?}", dir);
                continue;
            }
        };

        let class = TargetClass::from_raw_label(&raw_label);
        let files = bucket.entry(class).or_default();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_image_file(&path) {
                files.push(path);
                total += 1;
            }
        }

        if (idx + 1) % 10 == 0 {
            info!(
                "Scanned {}/{} directories, {} images so far",
                idx + 1,
                label_dirs.len(),
                total
            );
        }
    }

    info!(
        "Scan complete: {} images in {} directories",
        total,
        label_dirs.len()
    );
    for (class, files) in &bucket {
        info!("  {}: {} images", class.as_str(), files.len());
    }

    Ok(bucket)
}
