use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::core::dataset::list_image_files;
use crate::core::error::{PipelineError, PipelineResult};

/// Trim a class directory down to at most `max_count` image files by
/// deleting a uniform random sample of the excess.
///
/// The surviving files are untouched, so running this twice with the same
/// limit is a no-op the second time. Returns (before, after) counts.
pub fn balance(class_dir: &Path, max_count: usize, seed: u64) -> PipelineResult<(usize, usize)> {
    if !class_dir.is_dir() {
        return Err(PipelineError::TargetNotFound(class_dir.to_path_buf()));
    }

    let files = list_image_files(class_dir)?;
    let before = files.len();
    info!("Balancing {:?}: {} images, limit {}", class_dir, before, max_count);

    if before <= max_count {
        info!("Already within limit, nothing to delete");
        return Ok((before, before));
    }

    let excess = before - max_count;
    let mut rng = StdRng::seed_from_u64(seed);
    let doomed = rand::seq::index::sample(&mut rng, before, excess);

    for idx in doomed.iter() {
        fs::remove_file(&files[idx])?;
    }

    let after = list_image_files(class_dir)?.len();
    info!("Deleted {} images, {} remain", excess, after);

    Ok((before, after))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("pgd_balancer_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn fill(dir: &Path, count: usize) -> BTreeSet<PathBuf> {
        (0..count)
            .map(|i| {
                let p = dir.join(format!("img_{:04}.jpg", i));
                fs::write(&p, b"x").unwrap();
                p
            })
            .collect()
    }

    fn listed(dir: &Path) -> BTreeSet<PathBuf> {
        list_image_files(dir).unwrap().into_iter().collect()
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let missing = std::env::temp_dir().join("pgd_balancer_does_not_exist");
        assert!(matches!(
            balance(&missing, 10, 42),
            Err(PipelineError::TargetNotFound(_))
        ));
    }

    #[test]
    fn test_under_limit_is_a_noop() {
        let dir = scratch_dir("noop");
        let original = fill(&dir, 5);

        let (before, after) = balance(&dir, 10, 42).unwrap();

        assert_eq!((before, after), (5, 5));
        assert_eq!(listed(&dir), original);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_trims_excess_to_exact_limit() {
        let dir = scratch_dir("trim");
        let original = fill(&dir, 25);

        let (before, after) = balance(&dir, 10, 42).unwrap();

        assert_eq!(before, 25);
        assert_eq!(after, 10);
        let survivors = listed(&dir);
        assert_eq!(survivors.len(), 10);
        assert!(survivors.is_subset(&original));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let dir = scratch_dir("idempotent");
        fill(&dir, 25);

        balance(&dir, 10, 42).unwrap();
        let survivors = listed(&dir);

        let (before, after) = balance(&dir, 10, 42).unwrap();

        assert_eq!((before, after), (10, 10));
        assert_eq!(listed(&dir), survivors);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_same_seed_deletes_same_files() {
        let dir_a = scratch_dir("seed_a");
        let dir_b = scratch_dir("seed_b");
        fill(&dir_a, 20);
        fill(&dir_b, 20);

        balance(&dir_a, 12, 7).unwrap();
        balance(&dir_b, 12, 7).unwrap();

        let names = |dir: &Path| -> BTreeSet<String> {
            listed(dir)
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
                .collect()
        };
        assert_eq!(names(&dir_a), names(&dir_b));

        let _ = fs::remove_dir_all(&dir_a);
        let _ = fs::remove_dir_all(&dir_b);
    }

    #[test]
    fn test_non_image_files_are_ignored() {
        let dir = scratch_dir("non_image");
        fill(&dir, 12);
        fs::write(dir.join("labels.txt"), b"meta").unwrap();

        let (before, after) = balance(&dir, 10, 42).unwrap();

        assert_eq!((before, after), (12, 10));
        assert!(dir.join("labels.txt").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
