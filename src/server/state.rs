use std::path::PathBuf;
use std::sync::Arc;

use crate::builder::{BuildContext, Clock};
use crate::config::SiteConfig;
use crate::liquid::TemplateEngine;
use crate::pages::{MetadataMap, PageMap};
use crate::subscribe::SubscriptionService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub pages: Arc<PageMap>,
    pub metadata: Arc<MetadataMap>,
    pub templates: Arc<TemplateEngine>,
    pub subscriptions: SubscriptionService,
    pub clock: Arc<dyn Clock>,
    output_dir: PathBuf,
}

impl AppState {
    pub fn new(
        config: SiteConfig,
        pages: PageMap,
        templates: TemplateEngine,
        subscriptions: SubscriptionService,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let metadata = config.metadata_map();
        let output_dir = config.output_path();
        AppState {
            config: Arc::new(config),
            pages: Arc::new(pages),
            metadata: Arc::new(metadata),
            templates: Arc::new(templates),
            subscriptions,
            clock,
            output_dir,
        }
    }

    /// The same render context a static build would use
    pub fn build_context(&self) -> BuildContext<'_> {
        BuildContext {
            site_name: &self.config.site_name,
            base_url: self.config.base_url(),
            tracking_code: self.config.tracking_code(),
            output_dir: &self.output_dir,
            templates: &self.templates,
            clock: self.clock.as_ref(),
        }
    }
}
