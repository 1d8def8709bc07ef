use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::error::PipelineResult;
use crate::core::taxonomy::TargetClass;

/// Extensions recognized as images, compared case-insensitively
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatasetSplit {
    Train,
    Val,
    Test,
}

impl DatasetSplit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetSplit::Train => "train",
            DatasetSplit::Val => "val",
            DatasetSplit::Test => "test",
        }
    }

    pub fn all() -> [DatasetSplit; 3] {
        [DatasetSplit::Train, DatasetSplit::Val, DatasetSplit::Test]
    }
}

/// Check whether a path carries one of the recognized image extensions
pub fn is_image_file(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// List image files directly inside a directory, sorted for stable ordering.
/// Nested directories and non-image entries are ignored.
pub fn list_image_files(dir: &Path) -> PipelineResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// The two-level `{split}/{class}` output tree rooted at a single path
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn split_dir(&self, split: DatasetSplit) -> PathBuf {
        self.root.join(split.as_str())
    }

    pub fn class_dir(&self, split: DatasetSplit, class: TargetClass) -> PathBuf {
        self.split_dir(split).join(class.as_str())
    }

    /// Create every `{split}/{class}` directory. Creating an already existing
    /// directory is a no-op, so this is safe to call on partial output.
    pub fn ensure_dirs(&self) -> PipelineResult<()> {
        for split in DatasetSplit::all() {
            for class in TargetClass::all() {
                fs::create_dir_all(self.class_dir(split, class))?;
            }
        }
        info!("Output directory structure ready at {:?}", self.root);
        Ok(())
    }
}
