//! HTTP layer: request rewriting in front of the page renderer.
//!
//! Every page request resolves to a `{locale, file_path}` pair. Rendering the
//! template is the page layer's job; this server answers with the resolution
//! as JSON so the renderer (or a test) can act on it.

use crate::config::Config;
use crate::error::RouteTableError;
use crate::i18n::Locale;
use crate::routing::{
    alternate_links_for, normalize_request_path, AlternateLink, LocaleCookie, LocaleDetector,
    LocaleRequest, MetricsReport, Navigator, PathResolution, PathResolver, RouteKey, RouteTable,
    RoutingMetrics,
};
use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<PathResolver>,
    pub detector: Arc<LocaleDetector>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the state around the site's route table.
    pub fn new(config: Config) -> Result<Self, RouteTableError> {
        let table = Arc::new(RouteTable::site()?);
        Ok(Self {
            resolver: Arc::new(PathResolver::new(table)),
            detector: Arc::new(LocaleDetector::new()),
            config: Arc::new(config),
        })
    }

    fn cookie(&self, locale: Locale) -> LocaleCookie {
        LocaleCookie::new(locale).secure(self.config.locale_cookie_secure)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/routes", get(routes_handler))
        .route("/api/switch-language", get(switch_language_handler))
        .route("/api/alternates", get(alternates_handler))
        .route("/api/metrics", get(metrics_handler))
        .fallback(page_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process stops.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_address();
    let state = AppState::new(config).context("Route table is invalid")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Resolved page, handed to the renderer.
#[derive(Debug, Serialize)]
struct PageResponse {
    locale: Locale,
    route_key: RouteKey,
    file_path: &'static str,
    /// Internal template path, e.g. `/en/tours`
    rewrite: String,
    /// Public URL of this page in this locale
    canonical_path: &'static str,
    alternates: Vec<AlternateLink>,
}

#[derive(Debug, Serialize)]
struct NotFoundResponse {
    error: String,
    locale: Locale,
}

async fn health() -> &'static str {
    "ok"
}

async fn page_handler(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let path = normalize_request_path(uri.path());
    let request = LocaleRequest {
        path: &path,
        cookie_header: header_str(&headers, header::COOKIE),
        accept_language: header_str(&headers, header::ACCEPT_LANGUAGE),
    };

    if let Some(root) = state.detector.detect_root(&request) {
        RoutingMetrics::global().record_root_rewrite();
        info!(
            "Root request -> {} (from {:?})",
            root.rewrite, root.detection.source
        );
        let home = PathResolution {
            locale: root.detection.locale,
            route_key: Some(RouteKey::Home),
            file_path: Some(state.resolver.table().file_path(RouteKey::Home)),
        };
        let mut response = page_response(&state, home);
        let cookie = state.cookie(root.cookie.locale).header_value();
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        return response;
    }

    match state.resolver.resolve_prefixed(&path) {
        Ok(Some(resolution)) => return page_response(&state, resolution),
        Ok(None) => {}
        Err(err) => {
            warn!("{} ({})", err, path);
            let locale = state.detector.detect(&request).locale;
            return not_found(err.to_string(), locale);
        }
    }

    let mut resolution = state.resolver.locale_from_path(&path);
    if !resolution.is_match() {
        let locale = state.detector.detect(&request).locale;
        return not_found(format!("No page at '{}'", path), locale);
    }

    // A slug shared by several locales says nothing about the language
    let shared = state
        .resolver
        .index()
        .get(path.as_str())
        .map_or(false, |found| found.shared);
    if shared {
        resolution.locale = state.detector.detect(&request).locale;
    }

    page_response(&state, resolution)
}

fn page_response(state: &AppState, resolution: PathResolution) -> Response {
    let (Some(route_key), Some(file_path), Some(rewrite)) = (
        resolution.route_key,
        resolution.file_path,
        resolution.rewrite_target(),
    ) else {
        return not_found("No page".to_string(), resolution.locale);
    };

    let body = PageResponse {
        locale: resolution.locale,
        route_key,
        file_path,
        rewrite,
        canonical_path: state
            .resolver
            .table()
            .localized_path(route_key, resolution.locale),
        alternates: alternate_links_for(&state.resolver, route_key, &state.config.public_base_url),
    };

    (
        [(header::CONTENT_LANGUAGE, resolution.locale.code())],
        Json(body),
    )
        .into_response()
}

fn not_found(error: String, locale: Locale) -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_LANGUAGE, locale.code())],
        Json(NotFoundResponse { error, locale }),
    )
        .into_response()
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[derive(Debug, Deserialize)]
struct RoutesQuery {
    locale: Option<String>,
}

#[derive(Debug, Serialize)]
struct RoutesResponse {
    locale: Locale,
    routes: BTreeMap<RouteKey, &'static str>,
}

async fn routes_handler(
    State(state): State<AppState>,
    Query(query): Query<RoutesQuery>,
) -> Json<RoutesResponse> {
    let locale = query
        .locale
        .as_deref()
        .map(Locale::from_code_or_default)
        .unwrap_or_default();

    Json(RoutesResponse {
        locale,
        routes: state.resolver.table().all_localized_paths(locale),
    })
}

#[derive(Debug, Deserialize)]
struct SwitchQuery {
    path: Option<String>,
    to: String,
}

async fn switch_language_handler(
    State(state): State<AppState>,
    Query(query): Query<SwitchQuery>,
) -> Response {
    let target = Locale::from_code_or_default(&query.to);
    let path = normalize_request_path(query.path.as_deref().unwrap_or("/"));

    let switch = Navigator::new(state.resolver.clone(), None, &path).switch_language(target);
    info!("Language switch {} -> {} ({})", path, switch.href, target);

    (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, switch.href.to_string()),
            (header::SET_COOKIE, state.cookie(target).header_value()),
        ],
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
struct AlternatesQuery {
    path: String,
}

#[derive(Debug, Serialize)]
struct AlternatesResponse {
    path: String,
    route_key: Option<RouteKey>,
    alternates: Vec<AlternateLink>,
}

async fn alternates_handler(
    State(state): State<AppState>,
    Query(query): Query<AlternatesQuery>,
) -> Json<AlternatesResponse> {
    let path = normalize_request_path(&query.path);
    let nav = Navigator::new(state.resolver.clone(), None, &path);

    Json(AlternatesResponse {
        route_key: nav.current_route(),
        alternates: nav.alternate_links(&state.config.public_base_url),
        path,
    })
}

async fn metrics_handler() -> Json<MetricsReport> {
    Json(RoutingMetrics::global().report())
}
