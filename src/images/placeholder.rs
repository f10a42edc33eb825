use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use log::{debug, info};

use crate::images::webp::convert_to_webp;
use crate::utils::error::SiteError;
use crate::utils::fs::create_directory;

const FILL: Rgb<u8> = Rgb([240, 240, 240]);
const BORDER: Rgb<u8> = Rgb([200, 200, 200]);

/// An image the templates reference that may not exist yet
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Path relative to the static directory
    pub path: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Images referenced by the default templates and metadata
pub const DEFAULT_PLACEHOLDERS: &[Placeholder] = &[
    Placeholder { path: "img/video-thumbnail.jpg", width: 800, height: 450 },
    Placeholder { path: "img/og-cover.png", width: 1200, height: 630 },
    Placeholder { path: "img/og-thanks.png", width: 1200, height: 630 },
];

/// Grey image with a one pixel border
pub fn placeholder_image(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, FILL);
    if width == 0 || height == 0 {
        return img;
    }
    for x in 0..width {
        img.put_pixel(x, 0, BORDER);
        img.put_pixel(x, height - 1, BORDER);
    }
    for y in 0..height {
        img.put_pixel(0, y, BORDER);
        img.put_pixel(width - 1, y, BORDER);
    }
    img
}

/// Write a placeholder at `path` plus its WebP sibling. Returns `false`
/// without touching anything when `path` already exists.
pub fn create_placeholder(path: &Path, width: u32, height: u32) -> Result<bool, SiteError> {
    if path.exists() {
        debug!("{} exists, leaving it alone", path.display());
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        create_directory(parent)?;
    }

    placeholder_image(width, height)
        .save(path)
        .map_err(|e| SiteError::Image { path: path.to_path_buf(), message: e.to_string() })?;
    info!(" ✔  {} ({}x{})", path.display(), width, height);

    convert_to_webp(path)?;
    Ok(true)
}

/// Create every missing default placeholder under `static_dir`
pub fn create_missing(static_dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut created = Vec::new();
    for placeholder in DEFAULT_PLACEHOLDERS {
        let path = static_dir.join(placeholder.path);
        if create_placeholder(&path, placeholder.width, placeholder.height)? {
            created.push(path);
        }
    }
    Ok(created)
}
