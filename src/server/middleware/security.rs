//! Security headers attached to every response

use axum::http::{header, HeaderValue};
use tower::ServiceBuilder;
use tower::layer::util::{Identity, Stack};
use tower_http::set_header::SetResponseHeaderLayer;

/// Content Security Policy for the marketing pages.
///
/// Analytics and embedded video are the only third-party origins the
/// templates load from.
#[derive(Debug, Clone)]
pub struct ContentSecurityPolicy {
    pub default_src: Vec<String>,
    pub script_src: Vec<String>,
    pub style_src: Vec<String>,
    pub img_src: Vec<String>,
    pub connect_src: Vec<String>,
    pub frame_src: Vec<String>,
    pub form_action: Vec<String>,
}

fn sources(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ContentSecurityPolicy {
    fn default() -> Self {
        Self {
            default_src: sources(&["'self'"]),
            script_src: sources(&[
                "'self'",
                "'unsafe-inline'",
                "https://www.googletagmanager.com",
                "https://www.google-analytics.com",
            ]),
            style_src: sources(&["'self'", "'unsafe-inline'"]),
            img_src: sources(&["'self'", "data:", "https:"]),
            connect_src: sources(&[
                "'self'",
                "https://www.google-analytics.com",
                "https://*.analytics.google.com",
            ]),
            frame_src: sources(&["https://www.youtube.com", "https://www.youtube-nocookie.com"]),
            form_action: sources(&["'self'"]),
        }
    }
}

impl ContentSecurityPolicy {
    pub fn to_header_value(&self) -> String {
        [
            ("default-src", &self.default_src),
            ("script-src", &self.script_src),
            ("style-src", &self.style_src),
            ("img-src", &self.img_src),
            ("connect-src", &self.connect_src),
            ("frame-src", &self.frame_src),
            ("form-action", &self.form_action),
        ]
        .iter()
        .filter(|(_, list)| !list.is_empty())
        .map(|(name, list)| format!("{} {}", name, list.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
    }
}

type HeaderLayer = SetResponseHeaderLayer<HeaderValue>;
type SecurityLayers = Stack<HeaderLayer, Stack<HeaderLayer, Stack<HeaderLayer, Stack<HeaderLayer, Identity>>>>;

/// All security header layers, each applied only when a handler has not
/// set the header itself
pub fn security_headers_layer(csp: &ContentSecurityPolicy) -> ServiceBuilder<SecurityLayers> {
    let csp_value = HeaderValue::from_str(&csp.to_header_value())
        .unwrap_or_else(|_| HeaderValue::from_static("default-src 'self'"));

    ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(header::CONTENT_SECURITY_POLICY, csp_value))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
}
