use std::fs;
use std::path::Path;

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::utils::error::SiteError;
use crate::utils::fs::{files_with_extension, write_file};

static IMG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img\s+([^>]*?)src=["']([^"']*)["']([^>]*)>"#).unwrap());
static WIDTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bwidth=["']\d+["']"#).unwrap());
static HEIGHT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bheight=["']\d+["']"#).unwrap());

/// Sources whose size can't be read from disk
pub fn is_external(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://") || src.starts_with("data:")
}

/// Add missing `width`/`height` attributes to `<img>` tags.
///
/// `resolve` maps a local `src` to pixel dimensions; tags it can't resolve,
/// external sources and tags that already carry both attributes are left
/// untouched.
pub fn add_dimensions_to_html<F>(html: &str, resolve: F) -> String
where
    F: Fn(&str) -> Option<(u32, u32)>,
{
    IMG_RE
        .replace_all(html, |cap: &Captures<'_>| {
            let original = cap[0].to_string();
            let before = &cap[1];
            let src = &cap[2];
            let after = &cap[3];
            let attrs = format!("{}{}", before, after);

            let has_width = WIDTH_RE.is_match(&attrs);
            let has_height = HEIGHT_RE.is_match(&attrs);
            if (has_width && has_height) || is_external(src) {
                return original;
            }
            let Some((width, height)) = resolve(src) else {
                debug!("No dimensions for {}", src);
                return original;
            };

            let trimmed = after.trim_end();
            let (body, closing) = match trimmed.strip_suffix('/') {
                Some(rest) => (rest.trim_end(), " /"),
                None => (trimmed, ""),
            };
            let mut rebuilt = format!("<img {}src=\"{}\"{}", before, src, body);
            if !has_width {
                rebuilt.push_str(&format!(" width=\"{}\"", width));
            }
            if !has_height {
                rebuilt.push_str(&format!(" height=\"{}\"", height));
            }
            rebuilt.push_str(closing);
            rebuilt.push('>');
            rebuilt
        })
        .into_owned()
}

/// Rewrite one HTML file in place. Root-relative sources resolve against
/// `base`, others against the file's directory. Returns whether the file
/// changed.
pub fn process_file(html_path: &Path, base: &Path) -> Result<bool, SiteError> {
    let content = fs::read_to_string(html_path)?;
    let parent = html_path.parent().unwrap_or_else(|| Path::new("."));

    let updated = add_dimensions_to_html(&content, |src| {
        let path = match src.strip_prefix('/') {
            Some(rooted) => base.join(rooted),
            None => parent.join(src),
        };
        image::image_dimensions(&path).ok()
    });

    if updated == content {
        return Ok(false);
    }
    write_file(html_path, &updated)?;
    info!(" ✔  Updated {}", html_path.display());
    Ok(true)
}

/// Process every `.html` file under `dir`; returns the number of files changed
pub fn process_directory(dir: &Path, base: &Path) -> Result<usize, SiteError> {
    if !dir.is_dir() {
        return Err(SiteError::Config(format!("Directory does not exist: {}", dir.display())));
    }

    let mut changed = 0;
    for file in files_with_extension(dir, "html") {
        if process_file(&file, base)? {
            changed += 1;
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn fixed(_: &str) -> Option<(u32, u32)> {
        Some((640, 360))
    }

    #[test]
    fn test_adds_missing_attributes() {
        let html = r#"<p><img class="hero" src='/static/img/a.png' alt="A"></p>"#;
        assert_eq!(
            add_dimensions_to_html(html, fixed),
            r#"<p><img class="hero" src="/static/img/a.png" alt="A" width="640" height="360"></p>"#
        );
    }

    #[test]
    fn test_keeps_existing_and_self_closing() {
        let html = r#"<img src="a.png" width="10" />"#;
        assert_eq!(add_dimensions_to_html(html, fixed), r#"<img src="a.png" width="10" height="360" />"#);

        let complete = r#"<img src="a.png" width="1" height="2">"#;
        assert_eq!(add_dimensions_to_html(complete, fixed), complete);
    }

    #[test]
    fn test_external_sources_untouched() {
        let html = r#"<img src="https://cdn.example.com/a.png"><img src="data:image/png;base64,AAAA">"#;
        assert_eq!(add_dimensions_to_html(html, fixed), html);
    }

    #[test]
    fn test_unresolved_untouched() {
        let html = r#"<img src="missing.png">"#;
        assert_eq!(add_dimensions_to_html(html, |_| None), html);
    }

    #[test]
    fn test_process_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("static/img")).unwrap();
        RgbImage::from_pixel(12, 7, Rgb([1, 2, 3]))
            .save(dir.path().join("static/img/a.png"))
            .unwrap();
        std::fs::write(dir.path().join("index.html"), r#"<img src="/static/img/a.png" alt="">"#).unwrap();
        std::fs::write(dir.path().join("other.html"), "<p>no images</p>").unwrap();

        assert_eq!(process_directory(dir.path(), dir.path()).unwrap(), 1);
        let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert_eq!(html, r#"<img src="/static/img/a.png" alt="" width="12" height="7">"#);

        assert_eq!(process_directory(dir.path(), dir.path()).unwrap(), 0);
    }
}
