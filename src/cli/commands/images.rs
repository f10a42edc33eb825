use log::info;

use crate::cli::types::ImageCommands;
use crate::config::SiteConfig;
use crate::images;
use crate::utils::error::BoxResult;

/// Handle the images subcommands
pub fn handle_images_command(config: &SiteConfig, action: &ImageCommands) -> BoxResult<()> {
    match action {
        ImageCommands::Webp { dir, force } => {
            let dir = dir.clone().unwrap_or_else(|| config.static_path());
            let created = images::convert_directory(&dir, *force)?;
            info!("Created {} WebP image(s)", created.len());
        }
        ImageCommands::Placeholders => {
            let created = images::create_missing(&config.static_path())?;
            info!("Created {} placeholder image(s)", created.len());
        }
        ImageCommands::Favicons { source, out } => {
            let out = out
                .clone()
                .unwrap_or_else(|| config.static_path().join("img").join("icons"));
            let written = images::generate_favicons(source, &out, &config.site_name)?;
            info!("Favicon generation complete: {} files in {}", written.len(), out.display());
        }
        ImageCommands::Dimensions { dir, base } => {
            let dir = dir.clone().unwrap_or_else(|| config.output_path());
            let base = base.clone().unwrap_or_else(|| config.root.clone());
            let changed = images::process_directory(&dir, &base)?;
            info!("Added image dimensions to {} file(s)", changed);
        }
    }
    Ok(())
}
