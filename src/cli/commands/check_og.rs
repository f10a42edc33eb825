use std::path::PathBuf;

use log::{info, warn};

use crate::config::SiteConfig;
use crate::seo;
use crate::utils::error::{BoxResult, SiteError};

/// Request paths of every configured page
fn default_pages(config: &SiteConfig) -> Result<Vec<String>, SiteError> {
    Ok(config.page_map()?.iter().map(|p| p.request_path()).collect())
}

/// Handle the check-og command
pub async fn handle_check_og_command(
    config: &SiteConfig,
    dir: Option<&PathBuf>,
    url: Option<&str>,
    pages: &[String],
    verbose: bool,
) -> BoxResult<()> {
    let pages = if pages.is_empty() { default_pages(config)? } else { pages.to_vec() };

    let reports = match url {
        Some(url) => seo::check_url(url, &pages).await?,
        None => {
            let dir = dir.cloned().unwrap_or_else(|| config.output_path());
            info!("Checking Open Graph tags in {}", dir.display());
            seo::check_dir(&dir, &pages)?
        }
    };

    println!("{}", seo::generate_console_report(&reports, verbose));

    let failed = reports.iter().filter(|r| !r.passed()).count();
    if failed > 0 {
        warn!("{} of {} pages failed the Open Graph check", failed, reports.len());
        return Err(SiteError::Generic(format!("{} page(s) failed the Open Graph check", failed)).into());
    }
    Ok(())
}
