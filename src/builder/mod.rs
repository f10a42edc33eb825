pub mod clock;
pub mod pipeline;
pub mod robots;
pub mod sitemap;

use log::info;

use crate::config::SiteConfig;
use crate::liquid::TemplateEngine;
use crate::utils::error::SiteError;

pub use clock::{Clock, SystemClock};
pub use pipeline::{render_page, run_build, sitemap_for, BuildContext, BuildResult};

/// Build the configured site into its output directory
pub fn build_site(config: &SiteConfig, clock: &dyn Clock) -> Result<BuildResult, SiteError> {
    let pages = config.page_map()?;
    let metadata = config.metadata_map();
    let templates = TemplateEngine::load(config.templates_path(), config.base_url())?;
    let output_dir = config.output_path();

    info!("Templates: {}", config.templates_path().display());
    info!("Output: {}", output_dir.display());

    let ctx = BuildContext {
        site_name: &config.site_name,
        base_url: config.base_url(),
        tracking_code: config.tracking_code(),
        output_dir: &output_dir,
        templates: &templates,
        clock,
    };

    run_build(&pages, &metadata, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::clock::FixedClock;
    use crate::seo;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[test]
    fn test_bundled_templates_build_and_pass_og_check() {
        let out = tempfile::tempdir().unwrap();
        let config = SiteConfig {
            root: PathBuf::from(env!("CARGO_MANIFEST_DIR")),
            output_dir: out.path().to_path_buf(),
            tracking_code: Some("G-TEST123".to_string()),
            ..Default::default()
        };
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());

        let result = build_site(&config, &clock).unwrap();
        assert_eq!(result.pages.len(), 5);

        let pages: Vec<String> = config.page_map().unwrap().iter().map(|p| p.request_path()).collect();
        let reports = seo::check_dir(out.path(), &pages).unwrap();
        for report in &reports {
            assert!(report.passed(), "{} missing {:?}", report.target, report.missing_required);
        }

        let index = std::fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(index.contains("gtag('config', 'G-TEST123'"));
        assert!(index.contains("&copy; 2026"));
        assert!(index.contains("<source srcset=\"/static/img/video-thumbnail.webp\" type=\"image/webp\">"));

        let thanks = std::fs::read_to_string(out.path().join("thanks.html")).unwrap();
        assert!(thanks.contains("noindex"));
    }
}
