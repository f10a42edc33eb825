mod filters;
mod context;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use liquid::partials::{EagerCompiler, InMemorySource};
use liquid::{Object, Parser, ParserBuilder};
use log::{debug, warn};
use walkdir::WalkDir;

use crate::utils::error::SiteError;

pub use context::RenderContext;
pub use filters::STATIC_PREFIX;

type Partials = EagerCompiler<InMemorySource>;

/// Liquid templates for the site's pages.
///
/// Top-level `*.html` files of the templates directory are page templates,
/// addressed by filename. Every file under the directory is also registered
/// as a partial, so `{% include 'partials/head.html' %}` works from any page.
pub struct TemplateEngine {
    parser: Parser,
    templates: BTreeMap<String, String>,
    dir: Option<PathBuf>,
}

impl TemplateEngine {
    /// Load templates and partials from `dir`
    pub fn load<P: AsRef<Path>>(dir: P, site_url: &str) -> Result<Self, SiteError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(SiteError::Config(format!(
                "Templates directory does not exist: {}", dir.display()
            )));
        }

        let mut templates = BTreeMap::new();
        let mut partials = BTreeMap::new();

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable template entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let rel = match path.strip_prefix(dir) {
                Ok(rel) => rel.to_string_lossy().replace('\\', "/"),
                Err(_) => continue,
            };
            let source = fs::read_to_string(path)?;

            if entry.depth() == 1 && rel.ends_with(".html") {
                debug!("Loaded template {}", rel);
                templates.insert(rel.clone(), source.clone());
            }
            partials.insert(rel, source);
        }

        let mut engine = Self::from_sources(templates, partials, site_url)?;
        engine.dir = Some(dir.to_path_buf());
        Ok(engine)
    }

    /// Build an engine from in-memory sources
    pub fn from_sources(
        templates: BTreeMap<String, String>,
        partials: BTreeMap<String, String>,
        site_url: &str,
    ) -> Result<Self, SiteError> {
        let mut compiled = Partials::empty();
        for (name, source) in partials {
            compiled.add(name, source);
        }

        let parser = filters::register_filters(ParserBuilder::with_stdlib(), site_url)
            .partials(compiled)
            .build()
            .map_err(|e| SiteError::Config(format!("Failed to build template parser: {}", e)))?;

        Ok(TemplateEngine { parser, templates, dir: None })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// On-disk source of a template, used for sitemap modification dates
    pub fn source_path(&self, name: &str) -> Option<PathBuf> {
        match &self.dir {
            Some(dir) if self.has_template(name) => Some(dir.join(name)),
            _ => None,
        }
    }

    /// Render `template` for the logical page `page` with `globals`
    pub fn render(&self, page: &str, template: &str, globals: &Object) -> Result<String, SiteError> {
        let source = self.templates.get(template).ok_or_else(|| SiteError::TemplateNotFound {
            page: page.to_string(),
            template: template.to_string(),
        })?;

        let parsed = self.parser.parse(source).map_err(|e| SiteError::Render {
            page: page.to_string(),
            message: e.to_string(),
        })?;

        parsed.render(globals).map_err(|e| {
            debug!("Available globals for {}:", page);
            for key in globals.keys() {
                debug!("- {}", key);
            }
            SiteError::Render {
                page: page.to_string(),
                message: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liquid::model::Value;

    fn engine(pages: &[(&str, &str)], partials: &[(&str, &str)]) -> TemplateEngine {
        let pages = pages.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        let partials = partials.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        TemplateEngine::from_sources(pages, partials, "https://example.com").unwrap()
    }

    #[test]
    fn test_render_with_filters_and_partials() {
        let engine = engine(
            &[("landing.html", "{% include 'partials/head.html' %}|{{ '/terms.html' | absolute_url }}|{{ 'img/a.png' | static_url }}")],
            &[("partials/head.html", "<title>{{ page_type }}</title>")],
        );
        let mut globals = Object::new();
        globals.insert("page_type".into(), Value::scalar("home"));

        let html = engine.render("landing", "landing.html", &globals).unwrap();
        assert_eq!(html, "<title>home</title>|https://example.com/terms.html|/static/img/a.png");
    }

    #[test]
    fn test_responsive_image_filter() {
        let engine = engine(
            &[("p.html", "{{ '/static/img/hero.jpg' | responsive_image: 'Hero', 800, 450, class: 'wide', lazy: false }}")],
            &[],
        );
        let html = engine.render("p", "p.html", &Object::new()).unwrap();
        assert!(html.contains("srcset=\"/static/img/hero.webp\""));
        assert!(html.contains("width=\"800\" height=\"450\" class=\"wide\">"));
    }

    #[test]
    fn test_unknown_template_names_page() {
        let engine = engine(&[], &[]);
        let err = engine.render("pricing", "pricing.html", &Object::new()).unwrap_err();
        match err {
            SiteError::TemplateNotFound { page, .. } => assert_eq!(page, "pricing"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_render_error_is_reported() {
        let engine = engine(&[("bad.html", "{% if %}")], &[]);
        let err = engine.render("bad", "bad.html", &Object::new()).unwrap_err();
        assert!(matches!(err, SiteError::Render { .. }));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("partials")).unwrap();
        fs::write(dir.path().join("landing.html"), "{% include 'partials/foot.html' %}").unwrap();
        fs::write(dir.path().join("partials").join("foot.html"), "(c) {{ year }}").unwrap();

        let engine = TemplateEngine::load(dir.path(), "https://example.com").unwrap();
        assert!(engine.has_template("landing.html"));
        assert!(!engine.has_template("partials/foot.html"));
        assert_eq!(engine.source_path("landing.html").unwrap(), dir.path().join("landing.html"));

        let mut globals = Object::new();
        globals.insert("year".into(), Value::scalar(2026i64));
        assert_eq!(engine.render("landing", "landing.html", &globals).unwrap(), "(c) 2026");
    }

    #[cfg(unix)]
    #[test]
    fn test_load_skips_broken_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("partials")).unwrap();
        fs::write(dir.path().join("landing.html"), "{% include 'partials/foot.html' %}").unwrap();
        fs::write(dir.path().join("partials").join("foot.html"), "foot").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.html"), dir.path().join("partials").join("old.html")).unwrap();

        let engine = TemplateEngine::load(dir.path(), "https://example.com").unwrap();
        assert!(engine.has_template("landing.html"));
        assert_eq!(engine.render("landing", "landing.html", &Object::new()).unwrap(), "foot");
    }
}
