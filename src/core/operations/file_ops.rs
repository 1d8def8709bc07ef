use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Staging name used while a copy is in flight. Lives in the destination
/// directory so the final step is a same-filesystem rename.
fn staging_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "staged".to_string());
    dest.with_file_name(format!(".{}.part", name))
}

/// Copy `src` to `dest` via a temporary name, renaming into place only once
/// the copy is complete. A failure mid-copy never leaves a truncated file at
/// the final destination path.
pub fn copy_file(src: &Path, dest: &Path) -> io::Result<()> {
    let staged = staging_path(dest);
    if let Err(e) = fs::copy(src, &staged) {
        let _ = fs::remove_file(&staged);
        return Err(e);
    }
    if let Err(e) = fs::rename(&staged, dest) {
        let _ = fs::remove_file(&staged);
        return Err(e);
    }
    debug!("Copied {:?} -> {:?}", src, dest);
    Ok(())
}

/// Move `src` to `dest` using copy + remove for cross-device compatibility.
/// The source is removed only after the destination rename has succeeded;
/// if the removal itself fails the destination is cleaned up so the file
/// exists exactly once either way.
pub fn move_file(src: &Path, dest: &Path) -> io::Result<()> {
    copy_file(src, dest)?;
    if let Err(e) = fs::remove_file(src) {
        let _ = fs::remove_file(dest);
        return Err(e);
    }
    debug!("Moved {:?} -> {:?}", src, dest);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("pgd_file_ops_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_copy_preserves_source_and_content() {
        let dir = scratch_dir("copy");
        let src = dir.join("a.jpg");
        let dest = dir.join("b.jpg");
        fs::write(&src, b"pixels").unwrap();

        copy_file(&src, &dest).unwrap();

        assert!(src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"pixels");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_move_removes_source() {
        let dir = scratch_dir("move");
        let src = dir.join("a.jpg");
        let dest = dir.join("b.jpg");
        fs::write(&src, b"pixels").unwrap();

        move_file(&src, &dest).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"pixels");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_no_staging_leftovers() {
        let dir = scratch_dir("staging");
        let src = dir.join("a.jpg");
        let dest = dir.join("b.jpg");
        fs::write(&src, b"pixels").unwrap();

        copy_file(&src, &dest).unwrap();

        let leftovers: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .collect();
        assert!(leftovers.is_empty());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let dir = scratch_dir("missing");
        let result = copy_file(&dir.join("absent.jpg"), &dir.join("b.jpg"));
        assert!(result.is_err());
        assert!(!dir.join("b.jpg").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
