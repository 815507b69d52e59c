//! Local hive and catch-all static file serving.
//!
//! Built on tower-http's `ServeDir`, which handles conditional GET
//! (ETag/Last-Modified), serves pre-compressed `.gz` variants, and cleans
//! the request path before touching the filesystem so traversal outside the
//! root is rejected. On-the-fly gzip comes from `CompressionLayer` wrapped
//! around the per-request service.

use std::path::Path;

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request, Response, Uri};
use axum::response::IntoResponse;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::config::schema::RuntimeFlags;
use crate::http::middleware::cache_control_value;
use crate::observability::verbose;

const SERVICE_WORKER_ALLOWED: HeaderName = HeaderName::from_static("service-worker-allowed");

/// Serve a request from a local hive directory, stripping the matched
/// (lower-cased) prefix first. Always scopes service workers to the root
/// and stamps the process-wide cache policy.
pub async fn serve_local(
    dir: &Path,
    prefix: &str,
    flags: RuntimeFlags,
    req: Request<Body>,
) -> Response<Body> {
    // File serving never reads the body, so buffering it for the dump is
    // free of forwarding concerns.
    let req = if flags.verbose {
        let (parts, body) = req.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX)
            .await
            .unwrap_or_default();
        verbose::dump_request(&parts.method, &parts.uri, &parts.headers, None, &bytes);
        Request::from_parts(parts, Body::from(bytes))
    } else {
        req
    };

    let req = strip_prefix(req, prefix);
    let mut response = serve_dir(dir, req).await;

    let headers = response.headers_mut();
    headers.insert(
        axum::http::header::CACHE_CONTROL,
        cache_control_value(flags.caching),
    );
    headers.insert(SERVICE_WORKER_ALLOWED, HeaderValue::from_static("/"));
    response
}

/// Serve the catch-all route from the process base directory, without
/// prefix stripping.
pub async fn serve_fallback(dir: &Path, caching: bool, req: Request<Body>) -> Response<Body> {
    let mut response = serve_dir(dir, req).await;
    response.headers_mut().insert(
        axum::http::header::CACHE_CONTROL,
        cache_control_value(caching),
    );
    response
}

async fn serve_dir(dir: &Path, req: Request<Body>) -> Response<Body> {
    let service = ServiceBuilder::new()
        .layer(CompressionLayer::new())
        .service(ServeDir::new(dir).precompressed_gzip());

    match service.oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(infallible) => match infallible {},
    }
}

/// Remove the matched route prefix from the request path, keeping the query
/// string. A request for exactly the prefix maps to the directory root.
fn strip_prefix(req: Request<Body>, prefix: &str) -> Request<Body> {
    let path = req.uri().path();
    let stripped = path.strip_prefix(prefix).unwrap_or(path);
    let stripped = if stripped.starts_with('/') {
        stripped.to_string()
    } else {
        format!("/{stripped}")
    };
    let path_and_query = match req.uri().query() {
        Some(query) => format!("{stripped}?{query}"),
        None => stripped,
    };

    let (mut parts, body) = req.into_parts();
    if let Ok(uri) = path_and_query.parse::<Uri>() {
        parts.uri = uri;
    }
    Request::from_parts(parts, body)
}
