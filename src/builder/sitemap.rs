use chrono::NaiveDate;
use html_escape::encode_text;

use crate::pages::{ChangeFrequency, PageEntry, PageMap};

/// Sitemap protocol namespace
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Filename of the generated sitemap
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// One `<url>` record
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

/// Absolute sitemap URL for a site
pub fn sitemap_url(base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), SITEMAP_FILE)
}

/// Records for every indexable page, in page order
pub fn sitemap_entries<F>(pages: &PageMap, base_url: &str, lastmod: F) -> Vec<SitemapEntry>
where
    F: Fn(&PageEntry) -> NaiveDate,
{
    let base = base_url.trim_end_matches('/');
    pages
        .indexable()
        .map(|page| SitemapEntry {
            loc: format!("{}{}", base, page.request_path()),
            lastmod: lastmod(page),
            changefreq: page.changefreq,
            priority: page.priority,
        })
        .collect()
}

/// Serialize records as a sitemap XML document
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut lines = vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        format!(r#"<urlset xmlns="{}">"#, SITEMAP_NAMESPACE),
    ];

    for entry in entries {
        lines.push("  <url>".to_string());
        lines.push(format!("    <loc>{}</loc>", encode_text(&entry.loc)));
        lines.push(format!("    <lastmod>{}</lastmod>", entry.lastmod.format("%Y-%m-%d")));
        lines.push(format!("    <changefreq>{}</changefreq>", entry.changefreq));
        lines.push(format!("    <priority>{:.1}</priority>", entry.priority));
        lines.push("  </url>".to_string());
    }

    lines.push("</urlset>".to_string());
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn example_pages() -> PageMap {
        PageMap::new(vec![
            PageEntry::new("landing", "index.html", true, ChangeFrequency::Weekly, 1.0),
            PageEntry::new("thanks", "thanks.html", false, ChangeFrequency::Monthly, 0.3),
        ]).unwrap()
    }

    #[test]
    fn test_only_indexable_pages() {
        let entries = sitemap_entries(&example_pages(), "https://example.com", |_| date());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].loc, "https://example.com/");

        let xml = render_sitemap(&entries);
        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(xml.contains("<url>\n    <loc>https://example.com/</loc>"));
        assert!(!xml.contains("thanks.html"));
    }

    #[test]
    fn test_record_format() {
        let entries = sitemap_entries(&example_pages(), "https://example.com/", |_| date());
        let xml = render_sitemap(&entries);
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
            "  <url>\n",
            "    <loc>https://example.com/</loc>\n",
            "    <lastmod>2026-03-14</lastmod>\n",
            "    <changefreq>weekly</changefreq>\n",
            "    <priority>1.0</priority>\n",
            "  </url>\n",
            "</urlset>\n",
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_empty_sitemap() {
        let xml = render_sitemap(&[]);
        assert!(xml.contains("<urlset"));
        assert!(xml.ends_with("</urlset>\n"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_loc_is_escaped() {
        let entries = vec![SitemapEntry {
            loc: "https://example.com/?a=1&b=2".to_string(),
            lastmod: date(),
            changefreq: ChangeFrequency::Daily,
            priority: 0.5,
        }];
        assert!(render_sitemap(&entries).contains("a=1&amp;b=2"));
    }

    #[test]
    fn test_sitemap_url() {
        assert_eq!(sitemap_url("https://example.com/"), "https://example.com/sitemap.xml");
    }
}
