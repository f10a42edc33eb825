use crate::builder::sitemap::sitemap_url;
use crate::pages::PageMap;

/// Filename of the generated crawler directives
pub const ROBOTS_FILE: &str = "robots.txt";

/// Crawler directives: disallow non-indexable pages and point at the sitemap
pub fn render_robots(pages: &PageMap, base_url: &str) -> String {
    let mut out = String::from("User-agent: *\n");
    for page in pages.non_indexable() {
        out.push_str(&format!("Disallow: {}\n", page.request_path()));
    }
    out.push('\n');
    out.push_str(&format!("Sitemap: {}\n", sitemap_url(base_url)));
    out
}
