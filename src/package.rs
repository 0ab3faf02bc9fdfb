//! Site archive packaging.
//!
//! Stage 3 of the mdblog pipeline. Rolls the generated output tree into a
//! single `site.tar.gz` whose internal top-level directory carries the
//! configured alias instead of the literal output directory name, so the
//! remote side unpacks to a stable path no matter what the local output
//! directory is called.
//!
//! Archiving shells out to GNU `tar` (`--transform` does the root rename);
//! the archive lands next to the output directory.

use crate::exec::{Cmd, ExecError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("output directory does not exist: {0} (run build first)")]
    MissingOutput(PathBuf),
    #[error("output directory has no file name: {0}")]
    BadOutputPath(PathBuf),
    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Result of a packaging run, for CLI reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSummary {
    pub archive: PathBuf,
    /// Files packed into the archive.
    pub files: usize,
}

/// Where the archive for an output tree lives: next to the output root.
pub fn archive_path(output_root: &Path) -> PathBuf {
    parent_dir(output_root).join("site.tar.gz")
}

/// The `tar` invocation that archives `output_root` with its internal
/// root renamed to `alias`. Pure; the runner is [`package`].
pub fn tar_argv(output_root: &Path, alias: &str, archive: &Path) -> Option<Vec<String>> {
    let dir_name = output_root.file_name()?.to_string_lossy().into_owned();
    Some(vec![
        "tar".to_string(),
        "--transform".to_string(),
        format!("s,^{dir_name},{alias},"),
        "-czf".to_string(),
        archive.to_string_lossy().into_owned(),
        "-C".to_string(),
        parent_dir(output_root).to_string_lossy().into_owned(),
        dir_name,
    ])
}

/// Archive the generated output tree.
pub fn package(output_root: &Path, alias: &str) -> Result<PackageSummary, PackageError> {
    if !output_root.is_dir() {
        return Err(PackageError::MissingOutput(output_root.to_path_buf()));
    }
    let archive = archive_path(output_root);
    let argv = tar_argv(output_root, alias, &archive)
        .ok_or_else(|| PackageError::BadOutputPath(output_root.to_path_buf()))?;
    Cmd::from_argv(&argv).run()?;

    let files = WalkDir::new(output_root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .count();

    Ok(PackageSummary { archive, files })
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => Path::new("."),
    }
}
