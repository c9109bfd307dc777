//! Working tree staging onto the shared volume.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::AppError;

/// Counts reported after staging a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageSummary {
    pub files: usize,
    pub directories: usize,
    pub ignored: usize,
    pub dangling_links: usize,
    /// FIFOs, sockets and device nodes, which are never copied.
    pub special_files: usize,
}

/// Recursively copy `source` into `destination`.
///
/// Entries whose name is in `ignore` are skipped at every depth. Symlinks are
/// followed; dangling ones are skipped, as are FIFOs, sockets and device
/// nodes. Existing destination content is merged, with files overwritten.
pub fn stage_tree(
    source: &Path,
    destination: &Path,
    ignore: &[String],
) -> Result<StageSummary, AppError> {
    let mut summary = StageSummary::default();
    copy_dir(source, destination, ignore, &mut summary)?;
    Ok(summary)
}

fn is_ignored(name: &OsStr, ignore: &[String]) -> bool {
    name.to_str().is_some_and(|name| ignore.iter().any(|candidate| candidate == name))
}

fn copy_dir(
    source: &Path,
    destination: &Path,
    ignore: &[String],
    summary: &mut StageSummary,
) -> Result<(), AppError> {
    fs::create_dir_all(destination)?;
    summary.directories += 1;

    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let name = entry.file_name();
        if is_ignored(&name, ignore) {
            summary.ignored += 1;
            continue;
        }

        let source_path = entry.path();
        let destination_path = destination.join(&name);

        let metadata = match fs::metadata(&source_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound && entry.file_type()?.is_symlink() => {
                debug!(path = %source_path.display(), "skipping dangling symlink");
                summary.dangling_links += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if metadata.is_dir() {
            copy_dir(&source_path, &destination_path, ignore, summary)?;
        } else if metadata.is_file() {
            fs::copy(&source_path, &destination_path)?;
            summary.files += 1;
        } else {
            warn!(path = %source_path.display(), "skipping special file");
            summary.special_files += 1;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ignore_list() -> Vec<String> {
        ["work", ".nextflow", "results"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn copies_tree_and_skips_ignored_names_at_any_depth() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("main.nf"), "workflow {}").unwrap();
        fs::create_dir_all(src.path().join("modules/local/work")).unwrap();
        fs::write(src.path().join("modules/local/tool.nf"), "process X {}").unwrap();
        fs::write(src.path().join("modules/local/work/stale"), "x").unwrap();
        fs::create_dir_all(src.path().join("results")).unwrap();
        fs::write(src.path().join(".nextflow"), "cache").unwrap();

        let summary = stage_tree(src.path(), dst.path(), &ignore_list()).unwrap();

        assert!(dst.path().join("main.nf").exists());
        assert!(dst.path().join("modules/local/tool.nf").exists());
        assert!(!dst.path().join("modules/local/work").exists());
        assert!(!dst.path().join("results").exists());
        assert!(!dst.path().join(".nextflow").exists());
        assert_eq!(summary.files, 2);
        assert_eq!(summary.ignored, 3);
    }

    #[test]
    fn merges_into_existing_destination() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("latch.config"), "new").unwrap();
        fs::write(dst.path().join("latch.config"), "old").unwrap();
        fs::write(dst.path().join("keep.txt"), "kept").unwrap();

        stage_tree(src.path(), dst.path(), &[]).unwrap();

        assert_eq!(fs::read_to_string(dst.path().join("latch.config")).unwrap(), "new");
        assert_eq!(fs::read_to_string(dst.path().join("keep.txt")).unwrap(), "kept");
    }

    #[cfg(unix)]
    #[test]
    fn tolerates_dangling_symlinks_and_follows_valid_ones() {
        use std::os::unix::fs::symlink;

        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("real.txt"), "data").unwrap();
        symlink(src.path().join("real.txt"), src.path().join("link.txt")).unwrap();
        symlink(src.path().join("missing"), src.path().join("broken")).unwrap();

        let summary = stage_tree(src.path(), dst.path(), &[]).unwrap();

        assert_eq!(fs::read_to_string(dst.path().join("link.txt")).unwrap(), "data");
        assert!(!dst.path().join("broken").exists());
        assert_eq!(summary.dangling_links, 1);
    }

    #[cfg(unix)]
    #[test]
    fn skips_fifo_without_blocking() {
        use std::process::Command;
        use std::sync::mpsc;
        use std::time::Duration;

        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("main.nf"), "workflow {}").unwrap();
        let status = Command::new("mkfifo").arg(src.path().join("pipe")).status().unwrap();
        assert!(status.success());

        let (source, destination) = (src.path().to_path_buf(), dst.path().to_path_buf());
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(stage_tree(&source, &destination, &[]));
        });

        let summary = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("staging should not block on a FIFO")
            .unwrap();
        assert_eq!(summary.files, 1);
        assert_eq!(summary.special_files, 1);
        assert!(!dst.path().join("pipe").exists());
        assert!(dst.path().join("main.nf").is_file());
    }

    #[test]
    fn missing_source_is_io_error() {
        let dst = TempDir::new().unwrap();
        let err = stage_tree(&dst.path().join("absent"), &dst.path().join("out"), &[]).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
