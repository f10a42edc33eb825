use std::path::PathBuf;

use crate::pages::{site, PageEntry};

/// Default absolute site URL
pub fn default_base_url() -> String {
    "https://example.com".to_string()
}

/// Default site name used in titles and `og:site_name`
pub fn default_site_name() -> String {
    "Sitepress".to_string()
}

/// Default templates directory
pub fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

/// Rendered pages land at the project root so the repo can be served as-is
pub fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Default static assets directory (images, bundles, sitemap)
pub fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

/// Default subscriber backup log
pub fn default_subscriber_log() -> PathBuf {
    PathBuf::from("subscribers.csv")
}

/// Default page list
pub fn default_pages() -> Vec<PageEntry> {
    site::default_pages()
}

/// Default bind address for `serve`
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default port for `serve`
pub fn default_port() -> u16 {
    5000
}
