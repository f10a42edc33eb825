use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::liquid::STATIC_PREFIX;
use crate::server::config::ServerConfig;
use crate::server::handlers::{handle_page, handle_robots, handle_sitemap, handle_subscribe};
use crate::server::middleware::{security_headers_layer, ContentSecurityPolicy};
use crate::server::state::AppState;

/// Router for the live site: pages rendered per request, the sign-up
/// endpoint, generated sitemap/robots and the static asset directory
pub fn build_router(state: AppState, server_config: &ServerConfig) -> Router {
    Router::new()
        .route("/subscribe", post(handle_subscribe))
        .route("/sitemap.xml", get(handle_sitemap))
        .route("/robots.txt", get(handle_robots))
        .nest_service(STATIC_PREFIX, ServeDir::new(&server_config.static_dir))
        .fallback(handle_page)
        .layer(security_headers_layer(&ContentSecurityPolicy::default()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::clock::FixedClock;
    use crate::config::SiteConfig;
    use crate::liquid::TemplateEngine;
    use crate::pages::site::default_pages;
    use crate::pages::PageMap;
    use crate::server::handlers::SubscribeReply;
    use crate::subscribe::{
        LogOnlyProvider, MailingListProvider, ProviderError, ProviderOutcome, SubscriberLog,
        SubscriptionService,
    };
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use std::path::Path;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct FailingProvider;

    #[async_trait]
    impl MailingListProvider for FailingProvider {
        async fn add_subscriber(&self, _email: &str) -> Result<ProviderOutcome, ProviderError> {
            Err(ProviderError::Rejected { status: 400, detail: "Invalid Resource".into() })
        }
    }

    fn templates() -> TemplateEngine {
        let templates: BTreeMap<String, String> = default_pages()
            .iter()
            .map(|p| (p.template.clone(), format!("<h1>{{{{ page_type }}}}</h1><p>{}</p>", p.template)))
            .collect();
        TemplateEngine::from_sources(templates, BTreeMap::new(), "https://example.com").unwrap()
    }

    fn router_with(root: &Path, provider: Arc<dyn MailingListProvider>) -> Router {
        let static_dir = root.join("static");
        std::fs::create_dir_all(&static_dir).unwrap();
        std::fs::write(static_dir.join("app.css"), "body{}").unwrap();

        let config = SiteConfig::default();
        let subscriptions = SubscriptionService::new(
            SubscriberLog::new(root.join("subscribers.csv")),
            provider,
        );
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()));
        let state = AppState::new(
            config,
            PageMap::new(default_pages()).unwrap(),
            templates(),
            subscriptions,
            clock,
        );
        build_router(state, &ServerConfig::new("127.0.0.1", 0, static_dir))
    }

    fn router(root: &Path) -> Router {
        router_with(root, Arc::new(LogOnlyProvider))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_subscribe(app: Router, body: &str, ajax: bool) -> Response {
        post_body(app, Some("application/x-www-form-urlencoded"), body, ajax).await
    }

    async fn post_body(app: Router, content_type: Option<&str>, body: &str, ajax: bool) -> Response {
        let mut request = Request::builder().method("POST").uri("/subscribe");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        if ajax {
            request = request.header("X-Requested-With", "XMLHttpRequest");
        }
        app.oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_pages_are_rendered() {
        let dir = tempfile::tempdir().unwrap();

        let response = get(router(dir.path()), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "<h1>home</h1><p>landing.html</p>");

        let response = get(router(dir.path()), "/privacy").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("privacy.html"));

        let response = get(router(dir.path()), "/terms.html").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let response = get(router(dir.path()), "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_security_headers() {
        let dir = tempfile::tempdir().unwrap();
        let response = get(router(dir.path()), "/").await;
        let headers = response.headers();
        assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[tokio::test]
    async fn test_static_assets() {
        let dir = tempfile::tempdir().unwrap();
        let response = get(router(dir.path()), "/static/app.css").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "body{}");
    }

    #[tokio::test]
    async fn test_sitemap_and_robots() {
        let dir = tempfile::tempdir().unwrap();

        let response = get(router(dir.path()), "/sitemap.xml").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("application/xml"));
        let sitemap = body_string(response).await;
        assert!(sitemap.contains("<loc>https://example.com/</loc>"));
        assert!(!sitemap.contains("thanks.html"));

        let robots = body_string(get(router(dir.path()), "/robots.txt").await).await;
        assert!(robots.contains("Disallow: /thanks.html"));
        assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));
    }

    #[tokio::test]
    async fn test_subscribe_redirects_browsers() {
        let dir = tempfile::tempdir().unwrap();

        let response = post_subscribe(router(dir.path()), "email=jane%40example.com", false).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/thanks");

        let log = std::fs::read_to_string(dir.path().join("subscribers.csv")).unwrap();
        assert!(log.trim_end().ends_with(",jane@example.com"));

        let response = post_subscribe(router(dir.path()), "email=nope", false).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/?error=1#cta");
    }

    #[tokio::test]
    async fn test_subscribe_json_replies() {
        let dir = tempfile::tempdir().unwrap();

        let response = post_subscribe(router(dir.path()), "email=+Jane%40Example.com+", true).await;
        assert_eq!(response.status(), StatusCode::OK);
        let reply: SubscribeReply = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(reply.success);

        let log = std::fs::read_to_string(dir.path().join("subscribers.csv")).unwrap();
        assert!(log.contains(",jane@example.com"));
    }

    #[tokio::test]
    async fn test_invalid_email_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        for body in ["email=not-an-email", "email=", ""] {
            let response = post_subscribe(router(dir.path()), body, true).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let reply: SubscribeReply = serde_json::from_str(&body_string(response).await).unwrap();
            assert!(!reply.success);
        }
        assert!(!dir.path().join("subscribers.csv").exists());
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_backup() {
        let dir = tempfile::tempdir().unwrap();

        let response = post_subscribe(
            router_with(dir.path(), Arc::new(FailingProvider)),
            "email=jane%40example.com",
            true,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let log = std::fs::read_to_string(dir.path().join("subscribers.csv")).unwrap();
        assert!(log.contains("jane@example.com"));
    }

    #[tokio::test]
    async fn test_multipart_subscribe_gets_json() {
        let dir = tempfile::tempdir().unwrap();
        let body = "--XX\r\n\
Content-Disposition: form-data; name=\"email\"\r\n\r\n\
jane@example.com\r\n\
--XX--\r\n";

        let response = post_body(router(dir.path()), Some("multipart/form-data; boundary=XX"), body, true).await;
        assert_eq!(response.status(), StatusCode::OK);
        let reply: SubscribeReply = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(reply.success);

        let log = std::fs::read_to_string(dir.path().join("subscribers.csv")).unwrap();
        assert!(log.contains(",jane@example.com"));
    }

    #[tokio::test]
    async fn test_unreadable_body_still_answers_json() {
        let dir = tempfile::tempdir().unwrap();

        for content_type in [None, Some("text/plain"), Some("multipart/form-data; boundary=XX")] {
            let response = post_body(router(dir.path()), content_type, "email=jane%40example.com", true).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let reply: SubscribeReply = serde_json::from_str(&body_string(response).await).unwrap();
            assert!(!reply.success);
        }
        assert!(!dir.path().join("subscribers.csv").exists());

        let response = post_body(router(dir.path()), None, "", false).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/?error=1#cta");
    }
}
