use std::path::PathBuf;

use log::info;

use crate::builder::{self, SystemClock};
use crate::config::{validation, SiteConfig};
use crate::utils::error::BoxResult;

/// Handle the build command
pub fn handle_build_command(
    mut config: SiteConfig,
    output: Option<&PathBuf>,
    base_url: Option<&String>,
) -> BoxResult<()> {
    if let Some(output) = output {
        config.output_dir = output.clone();
    }
    if let Some(base) = base_url {
        config.base_url = base.clone();
        validation::validate_config(&config)?;
    }

    info!("Building site...");
    let result = builder::build_site(&config, &SystemClock)?;
    info!(
        "Site built successfully: {} pages, {} sitemap urls in {}",
        result.pages.len(),
        result.sitemap_urls.len(),
        config.output_path().display()
    );
    Ok(())
}
