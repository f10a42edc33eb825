use html_escape::encode_double_quoted_attribute;

/// Attributes for a responsive `<picture>` element
#[derive(Debug, Clone)]
pub struct ResponsiveImageOptions {
    pub alt: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub sizes: Option<String>,
    pub class_name: Option<String>,
    pub lazy: bool,
}

impl Default for ResponsiveImageOptions {
    fn default() -> Self {
        ResponsiveImageOptions {
            alt: String::new(),
            width: None,
            height: None,
            sizes: None,
            class_name: None,
            lazy: true,
        }
    }
}

/// Sibling `.webp` path for an image URL or path
pub fn webp_variant(src: &str) -> String {
    let (dir, file) = match src.rfind('/') {
        Some(idx) => src.split_at(idx + 1),
        None => ("", src),
    };
    let stem = match file.rfind('.') {
        Some(idx) if idx > 0 => &file[..idx],
        _ => file,
    };
    format!("{}{}.webp", dir, stem)
}

/// `<picture>` markup with a WebP source and the original as fallback
pub fn responsive_image(src: &str, options: &ResponsiveImageOptions) -> String {
    let mut attrs = Vec::new();
    if let Some(width) = options.width {
        attrs.push(format!("width=\"{}\"", width));
    }
    if let Some(height) = options.height {
        attrs.push(format!("height=\"{}\"", height));
    }
    if let Some(class_name) = &options.class_name {
        attrs.push(format!("class=\"{}\"", encode_double_quoted_attribute(class_name)));
    }
    if options.lazy {
        attrs.push("loading=\"lazy\" decoding=\"async\"".to_string());
    }
    if let Some(sizes) = &options.sizes {
        attrs.push(format!("sizes=\"{}\"", encode_double_quoted_attribute(sizes)));
    }

    let mut img = format!(
        "<img src=\"{}\" alt=\"{}\"",
        encode_double_quoted_attribute(src),
        encode_double_quoted_attribute(&options.alt)
    );
    for attr in attrs {
        img.push(' ');
        img.push_str(&attr);
    }
    img.push('>');

    format!(
        "<picture>\n  <source srcset=\"{}\" type=\"image/webp\">\n  {}\n</picture>",
        encode_double_quoted_attribute(&webp_variant(src)),
        img
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webp_variant() {
        assert_eq!(webp_variant("/static/img/hero.jpg"), "/static/img/hero.webp");
        assert_eq!(webp_variant("cover.final.png"), "cover.final.webp");
        assert_eq!(webp_variant("/static/img/noext"), "/static/img/noext.webp");
    }

    #[test]
    fn test_responsive_image_markup() {
        let options = ResponsiveImageOptions {
            alt: "Team \"photo\"".to_string(),
            width: Some(800),
            height: Some(450),
            class_name: Some("img-fluid".to_string()),
            ..Default::default()
        };
        let html = responsive_image("/static/img/team.jpg", &options);
        assert!(html.starts_with("<picture>\n  <source srcset=\"/static/img/team.webp\""));
        assert!(html.contains("alt=\"Team &quot;photo&quot;\""));
        assert!(html.contains("width=\"800\" height=\"450\" class=\"img-fluid\" loading=\"lazy\""));
        assert!(html.ends_with("</picture>"));
    }

    #[test]
    fn test_eager_image_has_no_loading_attr() {
        let options = ResponsiveImageOptions { lazy: false, ..Default::default() };
        let html = responsive_image("hero.png", &options);
        assert!(!html.contains("loading="));
    }
}
