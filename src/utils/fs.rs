use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use walkdir::WalkDir;

use crate::utils::error::SiteError;

/// Create a directory and any parent directories if they don't exist
pub fn create_directory<P: AsRef<Path>>(path: P) -> Result<(), SiteError> {
    fs::create_dir_all(path.as_ref()).map_err(|e| SiteError::write(path.as_ref(), e))
}

/// Write a string to a file. The parent directory must already exist.
pub fn write_file<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), SiteError> {
    fs::write(path.as_ref(), contents).map_err(|e| SiteError::write(path.as_ref(), e))
}

/// Local calendar date of a file's last modification, if it can be read
pub fn modified_date<P: AsRef<Path>>(path: P) -> Option<NaiveDate> {
    let mtime = fs::metadata(path.as_ref()).ok()?.modified().ok()?;
    let local: DateTime<Local> = mtime.into();
    Some(local.date_naive())
}

/// Recursively collect files with the given extension, sorted by path
pub fn files_with_extension<P: AsRef<Path>>(dir: P, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir.as_ref())
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().map_or(false, |ext| ext == extension))
        .collect();
    files.sort();
    files
}
