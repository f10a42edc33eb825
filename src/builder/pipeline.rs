use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::builder::clock::Clock;
use crate::builder::robots::{render_robots, ROBOTS_FILE};
use crate::builder::sitemap::{render_sitemap, sitemap_entries, SitemapEntry, SITEMAP_FILE};
use crate::liquid::{RenderContext, TemplateEngine};
use crate::pages::{MetadataMap, PageEntry, PageMap};
use crate::utils::error::SiteError;
use crate::utils::fs;

/// Everything a build needs besides the page list and metadata
pub struct BuildContext<'a> {
    pub site_name: &'a str,
    pub base_url: &'a str,
    pub tracking_code: Option<&'a str>,
    pub output_dir: &'a Path,
    pub templates: &'a TemplateEngine,
    pub clock: &'a dyn Clock,
}

/// A page written by the build
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub page_name: String,
    pub request_path: String,
    pub output_path: PathBuf,
}

/// Files produced by one build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildResult {
    pub pages: Vec<RenderedPage>,
    pub sitemap_path: PathBuf,
    pub sitemap_urls: Vec<String>,
    pub robots_path: PathBuf,
}

/// Render one page to HTML without touching the filesystem
pub fn render_page(
    page: &PageEntry,
    metadata: &MetadataMap,
    ctx: &BuildContext<'_>,
) -> Result<String, SiteError> {
    let page_meta = metadata.get(page.page_name());
    let render_ctx = RenderContext {
        site_name: ctx.site_name,
        base_url: ctx.base_url,
        tracking_code: ctx.tracking_code,
        year: ctx.clock.year(),
        page,
        page_meta: &page_meta,
    };
    ctx.templates.render(page.page_name(), &page.template, &render_ctx.to_liquid())
}

/// Sitemap records dated by each template's modification time, or today
/// when the template has no readable source file
pub fn sitemap_for(pages: &PageMap, ctx: &BuildContext<'_>) -> Vec<SitemapEntry> {
    let today = ctx.clock.today();
    sitemap_entries(pages, ctx.base_url, |page| {
        ctx.templates
            .source_path(&page.template)
            .and_then(fs::modified_date)
            .unwrap_or_else(|| {
                debug!("No modification time for {}, using today", page.template);
                today
            })
    })
}

/// Render every page, then write the sitemap and robots files.
///
/// Pages are processed in order and the first failure aborts the build;
/// files written before the failure are left in place.
pub fn run_build(
    pages: &PageMap,
    metadata: &MetadataMap,
    ctx: &BuildContext<'_>,
) -> Result<BuildResult, SiteError> {
    info!("▸ Rendering static HTML …");
    let mut rendered = Vec::with_capacity(pages.len());

    for page in pages {
        let request_path = page.request_path();
        let html = render_page(page, metadata, ctx)?;

        let output_path = ctx.output_dir.join(&page.output);
        fs::write_file(&output_path, &html)?;
        info!(" ✔  {} → {}", page.output, request_path);

        rendered.push(RenderedPage {
            page_name: page.page_name().to_string(),
            request_path,
            output_path,
        });
    }

    info!("▸ Generating sitemap.xml & robots.txt …");
    let entries = sitemap_for(pages, ctx);

    let sitemap_path = ctx.output_dir.join(SITEMAP_FILE);
    fs::write_file(&sitemap_path, &render_sitemap(&entries))?;
    info!(" ✔  {} ({} urls)", SITEMAP_FILE, entries.len());

    let robots_path = ctx.output_dir.join(ROBOTS_FILE);
    fs::write_file(&robots_path, &render_robots(pages, ctx.base_url))?;
    info!(" ✔  {}", ROBOTS_FILE);

    Ok(BuildResult {
        pages: rendered,
        sitemap_path,
        sitemap_urls: entries.into_iter().map(|e| e.loc).collect(),
        robots_path,
    })
}
