//! Marketing page and dashboard shell handlers.

use axum::extract::{OriginalUri, Path};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use regime_core::Locale;
use regime_site::{render_not_found, render_page, Page};

use crate::error::ApiError;

fn page_response(slug: &str, locale: Locale) -> Response {
    match Page::from_slug(slug) {
        Ok(page) => Html(render_page(page, locale)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, Html(render_not_found(locale))).into_response(),
    }
}

/// GET /
pub async fn home_en() -> Html<String> {
    Html(render_page(Page::Home, Locale::En))
}

/// GET /{page}
pub async fn page_en(Path(slug): Path<String>) -> Response {
    page_response(&slug, Locale::En)
}

/// GET /ja
pub async fn home_ja() -> Html<String> {
    Html(render_page(Page::Home, Locale::Ja))
}

/// GET /ja/{page}
pub async fn page_ja(Path(slug): Path<String>) -> Response {
    page_response(&slug, Locale::Ja)
}

/// GET /dashboard
pub async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Fallback: JSON 404 under `/api`, the localized HTML 404 elsewhere.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    let path = uri.path();
    if path == "/api" || path.starts_with("/api/") {
        return ApiError::not_found("route_not_found", format!("No API route for {path}"))
            .into_response();
    }
    let locale = if path == "/ja" || path.starts_with("/ja/") {
        Locale::Ja
    } else {
        Locale::En
    };
    (StatusCode::NOT_FOUND, Html(render_not_found(locale))).into_response()
}
