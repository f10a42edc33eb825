use std::error::Error;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Common result type for command glue
pub type BoxResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Error types for sitepress operations
#[derive(Debug, Error)]
pub enum SiteError {
    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No template is registered under the page's template id
    #[error("Template not found for page '{page}': {template}")]
    TemplateNotFound { page: String, template: String },

    /// Template failed to parse or render
    #[error("Failed to render page '{page}': {message}")]
    Render { page: String, message: String },

    /// An output file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Image processing error
    #[error("Image error ({}): {message}", path.display())]
    Image { path: PathBuf, message: String },

    /// Server error
    #[error("Server error: {0}")]
    Server(String),

    /// Generic error message
    #[error("{0}")]
    Generic(String),
}

impl SiteError {
    /// Wrap an IO failure on an output path
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SiteError::Write { path: path.into(), source }
    }
}

impl From<String> for SiteError {
    fn from(msg: String) -> Self {
        SiteError::Generic(msg)
    }
}

impl From<&str> for SiteError {
    fn from(msg: &str) -> Self {
        SiteError::Generic(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_not_found_names_page() {
        let err = SiteError::TemplateNotFound {
            page: "pricing".to_string(),
            template: "pricing.html".to_string(),
        };
        assert!(err.to_string().contains("'pricing'"));
    }

    #[test]
    fn test_write_error_names_path() {
        let err = SiteError::write(
            "missing/dir/index.html",
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );
        assert!(err.to_string().contains("missing/dir/index.html"));
    }
}
