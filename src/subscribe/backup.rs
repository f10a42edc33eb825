use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use csv::WriterBuilder;

use crate::utils::error::SiteError;

/// Append-only CSV backup of every accepted address
#[derive(Debug, Clone)]
pub struct SubscriberLog {
    path: PathBuf,
}

impl SubscriberLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        SubscriberLog { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `[timestamp, email]`, creating the file and its directory if needed
    pub fn append(&self, email: &str, at: DateTime<Utc>) -> Result<(), SiteError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SiteError::write(parent, e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SiteError::write(&self.path, e))?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        let timestamp = at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        writer
            .write_record([timestamp.as_str(), email])
            .map_err(|e| SiteError::Generic(format!("Failed to record subscriber: {}", e)))?;
        writer.flush().map_err(|e| SiteError::write(&self.path, e))?;
        Ok(())
    }
}
