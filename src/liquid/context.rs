use liquid::model::Value;
use liquid::Object;

use crate::pages::{PageEntry, PageMetadata};

/// Per-render variables shared by the static build and the live server
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub site_name: &'a str,
    pub base_url: &'a str,
    pub tracking_code: Option<&'a str>,
    pub year: i32,
    pub page: &'a PageEntry,
    pub page_meta: &'a PageMetadata,
}

fn crumb(name: &str, url: String) -> Value {
    let mut obj = Object::new();
    obj.insert("name".into(), Value::scalar(name.to_string()));
    obj.insert("url".into(), Value::scalar(url));
    Value::Object(obj)
}

fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl<'a> RenderContext<'a> {
    /// Home first, then the page itself unless it is the home page
    pub fn breadcrumbs(&self) -> Vec<Value> {
        let base = self.base_url.trim_end_matches('/');
        let mut crumbs = vec![crumb("Home", format!("{}/", base))];
        if !self.page.is_index() {
            crumbs.push(crumb(
                &title_case(self.page.page_type()),
                format!("{}{}", base, self.page.request_path()),
            ));
        }
        crumbs
    }

    /// Template globals for this page
    pub fn to_liquid(&self) -> Object {
        let mut globals = Object::new();

        // An empty string keeps `{% if GA_TRACKING_CODE != "" %}` guards false
        globals.insert(
            "GA_TRACKING_CODE".into(),
            Value::scalar(self.tracking_code.unwrap_or("").to_string()),
        );
        globals.insert("year".into(), Value::scalar(self.year as i64));
        globals.insert("page_meta".into(), Value::Object(self.page_meta.to_liquid()));
        globals.insert("page_type".into(), Value::scalar(self.page.page_type().to_string()));
        globals.insert("request_path".into(), Value::scalar(self.page.request_path()));
        globals.insert("breadcrumbs".into(), Value::Array(self.breadcrumbs()));

        let mut site = Object::new();
        site.insert("name".into(), Value::scalar(self.site_name.to_string()));
        site.insert("base_url".into(), Value::scalar(self.base_url.trim_end_matches('/').to_string()));
        globals.insert("site".into(), Value::Object(site));

        globals
    }
}
