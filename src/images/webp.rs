use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::{debug, info};
use walkdir::WalkDir;

use crate::utils::error::SiteError;

const SOURCE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

fn image_error(path: &Path, err: impl std::fmt::Display) -> SiteError {
    SiteError::Image {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// `photo.png` -> `photo.webp`
pub fn webp_path(path: &Path) -> PathBuf {
    path.with_extension("webp")
}

/// Encode `path` as a sibling `.webp` file and return its path.
///
/// The encoder is lossless, so the WebP is exact but not always smaller
/// than a JPEG source.
pub fn convert_to_webp(path: &Path) -> Result<PathBuf, SiteError> {
    let img = image::open(path).map_err(|e| image_error(path, e))?;
    let target = webp_path(path);

    let encoded = if img.color().has_alpha() {
        image::DynamicImage::ImageRgba8(img.to_rgba8())
    } else {
        image::DynamicImage::ImageRgb8(img.to_rgb8())
    };
    encoded
        .save_with_format(&target, ImageFormat::WebP)
        .map_err(|e| image_error(&target, e))?;

    info!(" ✔  {}", target.display());
    Ok(target)
}

/// Create WebP siblings for every PNG/JPEG under `dir` that lacks one, or
/// for every image when `force` is set
pub fn convert_directory(dir: &Path, force: bool) -> Result<Vec<PathBuf>, SiteError> {
    if !dir.is_dir() {
        return Err(SiteError::Config(format!("Directory does not exist: {}", dir.display())));
    }

    let mut sources: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map_or(false, |e| SOURCE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        })
        .collect();
    sources.sort();

    let mut created = Vec::new();
    for source in sources {
        if !force && webp_path(&source).exists() {
            debug!("WebP already exists for {}", source.display());
            continue;
        }
        created.push(convert_to_webp(&source)?);
    }
    Ok(created)
}
