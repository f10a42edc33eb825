use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Tags every shareable page must carry
pub const REQUIRED_TAGS: &[&str] = &[
    "og:title",
    "og:description",
    "og:image",
    "og:url",
    "og:type",
    "og:site_name",
    "twitter:card",
    "twitter:title",
    "twitter:description",
    "twitter:image",
];

/// Tags that improve previews but are not required
pub const RECOMMENDED_TAGS: &[&str] = &[
    "og:image:width",
    "og:image:height",
    "og:locale",
    "twitter:site",
    "twitter:creator",
];

static META_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<meta\b[^>]*>").unwrap());

static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Result of the HEAD request made against a page's `og:image`
#[derive(Debug, Clone, PartialEq)]
pub enum ImageCheck {
    Reachable { url: String },
    Status { url: String, status: u16 },
    Failed { url: String, error: String },
}

impl ImageCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, ImageCheck::Reachable { .. })
    }
}

/// Open Graph / Twitter card findings for one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OgReport {
    /// File path or URL the HTML came from
    pub target: String,
    pub found: BTreeMap<String, String>,
    pub missing_required: Vec<&'static str>,
    pub missing_recommended: Vec<&'static str>,
    /// General on-page problems (title, description, headings)
    pub issues: Vec<String>,
    pub image: Option<ImageCheck>,
}

impl OgReport {
    /// A page passes when nothing required is missing and its image, if
    /// checked, resolved
    pub fn passed(&self) -> bool {
        self.missing_required.is_empty() && self.image.as_ref().map_or(true, ImageCheck::is_ok)
    }

    pub fn og_image(&self) -> Option<&str> {
        self.found.get("og:image").map(|s| s.as_str())
    }
}

/// Every `<meta>` tag keyed by `property` (or `name` when there is no
/// `property`), with HTML entities in `content` decoded. The first
/// occurrence of a key wins.
pub fn extract_meta_tags(html: &str) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();

    for tag in META_RE.find_iter(html) {
        let mut attrs: BTreeMap<String, String> = BTreeMap::new();
        for cap in ATTR_RE.captures_iter(tag.as_str()) {
            let value = cap.get(2).or_else(|| cap.get(3)).map_or("", |m| m.as_str());
            attrs
                .entry(cap[1].to_ascii_lowercase())
                .or_insert_with(|| html_escape::decode_html_entities(value).into_owned());
        }

        let key = attrs.get("property").or_else(|| attrs.get("name"));
        if let Some(key) = key {
            let content = attrs.get("content").cloned().unwrap_or_default();
            tags.entry(key.clone()).or_insert(content);
        }
    }

    tags
}

/// Check one HTML document for Open Graph and Twitter card tags
pub fn check_html(target: &str, html: &str) -> OgReport {
    let all = extract_meta_tags(html);
    let found: BTreeMap<String, String> = all
        .into_iter()
        .filter(|(k, _)| REQUIRED_TAGS.contains(&k.as_str()) || RECOMMENDED_TAGS.contains(&k.as_str()))
        .collect();

    let missing = |list: &[&'static str]| -> Vec<&'static str> {
        list.iter().copied().filter(|t| !found.contains_key(*t)).collect()
    };

    OgReport {
        target: target.to_string(),
        missing_required: missing(REQUIRED_TAGS),
        missing_recommended: missing(RECOMMENDED_TAGS),
        issues: super::page::basic_issues(html),
        found,
        image: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"<html><head>
<title>Acme waitlist for teams</title>
<meta name="description" content="Join the Acme waitlist">
<meta property="og:title" content="Acme &amp; Co">
<meta property="og:description" content="Join">
<meta content="https://example.com/static/images/og-cover.png" property="og:image">
<meta property="og:url" content="https://example.com/">
<meta property="og:type" content="website">
<meta property='og:site_name' content='Acme'>
<meta name="twitter:card" content="summary_large_image">
<meta name="twitter:title" content="Acme">
<meta name="twitter:description" content="Join">
<meta name="twitter:image" content="https://example.com/static/images/og-cover.png">
<meta property="og:image:width" content="1200">
</head><body><h1>Acme</h1></body></html>"#;

    #[test]
    fn test_extract_either_attribute_order() {
        let tags = extract_meta_tags(FULL);
        assert_eq!(tags["og:image"], "https://example.com/static/images/og-cover.png");
        assert_eq!(tags["og:site_name"], "Acme");
        assert_eq!(tags["og:title"], "Acme & Co");
        assert_eq!(tags["description"], "Join the Acme waitlist");
    }

    #[test]
    fn test_complete_page_passes() {
        let report = check_html("index.html", FULL);
        assert!(report.missing_required.is_empty());
        assert!(report.passed());
        assert_eq!(
            report.missing_recommended,
            vec!["og:image:height", "og:locale", "twitter:site", "twitter:creator"]
        );
        assert!(!report.found.contains_key("description"));
    }

    #[test]
    fn test_missing_required_tags() {
        let html = r#"<head><meta property="og:title" content="Only a title"></head>"#;
        let report = check_html("thanks.html", html);
        assert!(!report.passed());
        assert_eq!(report.missing_required.len(), REQUIRED_TAGS.len() - 1);
        assert!(!report.missing_required.contains(&"og:title"));
    }

    #[test]
    fn test_failed_image_fails_report() {
        let mut report = check_html("index.html", FULL);
        report.image = Some(ImageCheck::Status { url: "https://example.com/x.png".into(), status: 404 });
        assert!(!report.passed());
    }
}
