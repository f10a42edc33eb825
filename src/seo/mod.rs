//! Social preview and on-page SEO checks for rendered pages, either from a
//! build output directory or a running site.

pub mod og;
mod page;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use reqwest::Url;

use crate::utils::error::SiteError;

use og::{check_html, ImageCheck, OgReport};

const PAGE_TIMEOUT: Duration = Duration::from_secs(10);
const IMAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Build output file for a request path: `/` is `index.html`, extensionless
/// paths get `.html`
pub fn page_file(dir: &Path, request_path: &str) -> PathBuf {
    let rel = request_path.trim_start_matches('/');
    if rel.is_empty() {
        return dir.join("index.html");
    }
    if Path::new(rel).extension().is_some() {
        dir.join(rel)
    } else {
        dir.join(format!("{}.html", rel))
    }
}

/// Check pages from a build output directory. Images are not fetched.
pub fn check_dir(dir: &Path, request_paths: &[String]) -> Result<Vec<OgReport>, SiteError> {
    if !dir.is_dir() {
        return Err(SiteError::Config(format!("Directory does not exist: {}", dir.display())));
    }

    let mut reports = Vec::with_capacity(request_paths.len());
    for path in request_paths {
        let file = page_file(dir, path);
        debug!("Checking {}", file.display());
        let html = fs::read_to_string(&file)?;
        reports.push(check_html(&file.display().to_string(), &html));
    }
    Ok(reports)
}

/// Fetch and check pages of a running site, then HEAD-check each page's
/// `og:image`
pub async fn check_url(base_url: &str, request_paths: &[String]) -> Result<Vec<OgReport>, SiteError> {
    let base = Url::parse(base_url)
        .map_err(|e| SiteError::Config(format!("Invalid URL {}: {}", base_url, e)))?;
    let client = reqwest::Client::new();

    let mut reports = Vec::with_capacity(request_paths.len());
    for path in request_paths {
        let url = base
            .join(path)
            .map_err(|e| SiteError::Config(format!("Invalid page path {}: {}", path, e)))?;
        reports.push(check_page_url(&client, &url).await);
    }
    Ok(reports)
}

async fn check_page_url(client: &reqwest::Client, url: &Url) -> OgReport {
    info!("Testing Open Graph tags for: {}", url);

    let html = match fetch_page(client, url).await {
        Ok(html) => html,
        Err(e) => {
            return OgReport {
                target: url.to_string(),
                missing_required: og::REQUIRED_TAGS.to_vec(),
                issues: vec![format!("Error fetching page: {}", e)],
                ..Default::default()
            };
        }
    };

    let mut report = check_html(url.as_str(), &html);
    if let Some(image) = report.og_image().map(str::to_string) {
        report.image = Some(check_image(client, url, &image).await);
    }
    report
}

async fn fetch_page(client: &reqwest::Client, url: &Url) -> Result<String, reqwest::Error> {
    client
        .get(url.clone())
        .timeout(PAGE_TIMEOUT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

async fn check_image(client: &reqwest::Client, page: &Url, image: &str) -> ImageCheck {
    let resolved = match page.join(image) {
        Ok(url) => url,
        Err(e) => {
            return ImageCheck::Failed { url: image.to_string(), error: e.to_string() };
        }
    };
    let url = resolved.to_string();

    match client.head(resolved).timeout(IMAGE_TIMEOUT).send().await {
        Ok(response) if response.status() == reqwest::StatusCode::OK => ImageCheck::Reachable { url },
        Ok(response) => ImageCheck::Status { url, status: response.status().as_u16() },
        Err(e) => ImageCheck::Failed { url, error: e.to_string() },
    }
}

/// Console summary of a set of reports
pub fn generate_console_report(reports: &[OgReport], verbose: bool) -> String {
    let mut out = String::new();

    for report in reports {
        out.push_str(&format!("\nTesting Open Graph tags for: {}\n", report.target));

        if report.missing_required.is_empty() {
            out.push_str("  All required tags present!\n");
        } else {
            out.push_str(&format!("  Missing required tags: {}\n", report.missing_required.join(", ")));
        }
        if report.missing_recommended.is_empty() {
            out.push_str("  All recommended tags present!\n");
        } else {
            out.push_str(&format!(
                "  Missing recommended tags: {}\n",
                report.missing_recommended.join(", ")
            ));
        }

        if let Some(image) = report.og_image() {
            if !image.starts_with("http://") && !image.starts_with("https://") {
                out.push_str(&format!("  Warning: og:image URL is not absolute: {}\n", image));
            }
        }
        match &report.image {
            Some(ImageCheck::Reachable { url }) => {
                out.push_str(&format!("  Image URL is valid: {}\n", url));
            }
            Some(ImageCheck::Status { url, status }) => {
                out.push_str(&format!("  Image URL returns status code {}: {}\n", status, url));
            }
            Some(ImageCheck::Failed { url, error }) => {
                out.push_str(&format!("  Error checking image URL {}: {}\n", url, error));
            }
            None => {}
        }

        for issue in &report.issues {
            out.push_str(&format!("  - {}\n", issue));
        }

        if verbose {
            out.push_str("  Found tags:\n");
            for (tag, content) in &report.found {
                out.push_str(&format!("    {}: {}\n", tag, content));
            }
        }
    }

    let failed = reports.iter().filter(|r| !r.passed()).count();
    if failed == 0 {
        out.push_str("\nAll tests passed!\n");
    } else {
        out.push_str(&format!("\nSome tests failed! ({} of {} pages)\n", failed, reports.len()));
    }
    out
}
