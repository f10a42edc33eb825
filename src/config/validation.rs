use log::{info, warn};

use crate::config::SiteConfig;
use crate::utils::error::SiteError;

/// Validate the configuration
pub fn validate_config(config: &SiteConfig) -> Result<(), SiteError> {
    validate_base_url(config)?;
    validate_templates_directory(config);
    validate_pages(config)?;
    validate_mailing_list(config);
    Ok(())
}

/// The base URL must be absolute so sitemap entries are absolute
fn validate_base_url(config: &SiteConfig) -> Result<(), SiteError> {
    let url = config.base_url();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(SiteError::Config(format!(
            "Base URL must start with http:// or https://: {}", config.base_url
        )));
    }
    Ok(())
}

/// A missing templates directory only matters once a page is rendered
fn validate_templates_directory(config: &SiteConfig) {
    let templates = config.templates_path();
    if !templates.is_dir() {
        warn!("Templates directory does not exist: {}", templates.display());
    } else {
        info!("Templates directory: {}", templates.display());
    }
}

fn validate_pages(config: &SiteConfig) -> Result<(), SiteError> {
    let pages = config.page_map()?;
    if pages.is_empty() {
        warn!("No pages configured; the build will only write an empty sitemap");
    }
    Ok(())
}

fn validate_mailing_list(config: &SiteConfig) {
    let ml = &config.mailing_list;
    if ml.api_key.is_some() != ml.list_id.is_some() {
        warn!("Mailing list needs both an API key and a list id; subscriptions will only be logged");
    }
    if config.tracking_code().is_none() {
        info!("No tracking code configured; analytics snippet disabled");
    }
}
