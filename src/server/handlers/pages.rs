use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use log::{debug, error};

use crate::builder::robots::render_robots;
use crate::builder::sitemap::render_sitemap;
use crate::builder::{render_page, sitemap_for};
use crate::server::state::AppState;

/// Render the page whose request path matches the URI
pub async fn handle_page(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path = uri.path();
    let Some(page) = state.pages.find_by_path(path) else {
        debug!("No page for {}", path);
        return handle_not_found();
    };

    match render_page(page, &state.metadata, &state.build_context()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Sitemap generated from the live page list
pub async fn handle_sitemap(State(state): State<AppState>) -> Response {
    let entries = sitemap_for(&state.pages, &state.build_context());
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render_sitemap(&entries),
    )
        .into_response()
}

/// Crawler directives generated from the live page list
pub async fn handle_robots(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots(&state.pages, state.config.base_url()),
    )
        .into_response()
}

pub fn handle_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html("<!DOCTYPE html><html><head><title>404 Not Found</title></head><body><h1>404 Not Found</h1><p><a href=\"/\">Back to the home page</a></p></body></html>"),
    )
        .into_response()
}
