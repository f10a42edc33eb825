use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageFormat};
use log::info;
use serde_json::json;

use crate::utils::error::SiteError;
use crate::utils::fs::{create_directory, write_file};

/// Square PNG icons: (file stem, edge length)
const SQUARE_ICONS: &[(&str, u32)] = &[
    ("favicon", 16),
    ("favicon", 32),
    ("favicon", 48),
    ("favicon", 96),
    ("apple-touch-icon", 57),
    ("apple-touch-icon", 60),
    ("apple-touch-icon", 72),
    ("apple-touch-icon", 76),
    ("apple-touch-icon", 114),
    ("apple-touch-icon", 120),
    ("apple-touch-icon", 144),
    ("apple-touch-icon", 152),
    ("apple-touch-icon", 180),
    ("android-chrome", 192),
    ("android-chrome", 512),
];

const TILES: &[(u32, u32)] = &[(70, 70), (150, 150), (310, 310), (310, 150)];

const ICO_SIZES: &[u32] = &[16, 32, 48];

/// URL prefix the generated icons are served from
pub const ICON_URL_PREFIX: &str = "/static/img/icons";

fn image_error(path: &Path, err: impl std::fmt::Display) -> SiteError {
    SiteError::Image {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn save_png(img: &DynamicImage, path: &Path) -> Result<(), SiteError> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| image_error(path, e))
}

fn write_ico(source: &DynamicImage, path: &Path) -> Result<(), SiteError> {
    let mut frames = Vec::with_capacity(ICO_SIZES.len());
    for &size in ICO_SIZES {
        let rgba = source.resize_exact(size, size, FilterType::Lanczos3).to_rgba8();
        let frame = IcoFrame::as_png(rgba.as_raw(), size, size, ExtendedColorType::Rgba8)
            .map_err(|e| image_error(path, e))?;
        frames.push(frame);
    }

    let file = File::create(path).map_err(|e| SiteError::write(path, e))?;
    IcoEncoder::new(BufWriter::new(file))
        .encode_images(&frames)
        .map_err(|e| image_error(path, e))
}

fn web_manifest(site_name: &str) -> String {
    let icons: Vec<serde_json::Value> = [192, 512]
        .iter()
        .map(|size| {
            json!({
                "src": format!("{}/android-chrome-{size}x{size}.png", ICON_URL_PREFIX),
                "sizes": format!("{size}x{size}"),
                "type": "image/png",
            })
        })
        .collect();
    let manifest = json!({
        "name": site_name,
        "short_name": site_name,
        "icons": icons,
        "theme_color": "#3949ab",
        "background_color": "#ffffff",
        "display": "standalone",
    });
    serde_json::to_string_pretty(&manifest).unwrap_or_default()
}

fn browser_config() -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<browserconfig>\n    <msapplication>\n        <tile>\n");
    for &(w, h) in TILES {
        let element = if w == h { format!("square{w}x{h}logo") } else { format!("wide{w}x{h}logo") };
        xml.push_str(&format!(
            "            <{element} src=\"{}/mstile-{w}x{h}.png\"/>\n",
            ICON_URL_PREFIX
        ));
    }
    xml.push_str("            <TileColor>#3949ab</TileColor>\n        </tile>\n    </msapplication>\n</browserconfig>\n");
    xml
}

/// Generate favicons, touch icons, Windows tiles, `favicon.ico`,
/// `site.webmanifest` and `browserconfig.xml` from one source image
pub fn generate_favicons(source: &Path, out_dir: &Path, site_name: &str) -> Result<Vec<PathBuf>, SiteError> {
    let img = image::open(source).map_err(|e| image_error(source, e))?;
    create_directory(out_dir)?;
    let mut written = Vec::new();

    for &(stem, size) in SQUARE_ICONS {
        let path = out_dir.join(format!("{stem}-{size}x{size}.png"));
        save_png(&img.resize_exact(size, size, FilterType::Lanczos3), &path)?;
        written.push(path);
    }

    let apple = out_dir.join("apple-touch-icon.png");
    save_png(&img.resize_exact(180, 180, FilterType::Lanczos3), &apple)?;
    written.push(apple);

    for &(w, h) in TILES {
        let path = out_dir.join(format!("mstile-{w}x{h}.png"));
        save_png(&img.resize_exact(w, h, FilterType::Lanczos3), &path)?;
        written.push(path);
    }

    let ico = out_dir.join("favicon.ico");
    write_ico(&img, &ico)?;
    written.push(ico);

    let manifest = out_dir.join("site.webmanifest");
    write_file(&manifest, &web_manifest(site_name))?;
    written.push(manifest);

    let browserconfig = out_dir.join("browserconfig.xml");
    write_file(&browserconfig, &browser_config())?;
    written.push(browserconfig);

    for path in &written {
        info!(" ✔  {}", path.display());
    }
    Ok(written)
}
