//! The header middleware chain.
//!
//! Four decorators wrap the whole router, outermost first: path case
//! folding (optional), security header injection (TLS mode only, wired in
//! server.rs as a layer), access logging, and JavaScript MIME correction.
//! Every decorator calls through unconditionally; only the leaf handlers
//! short-circuit.

use axum::body::Body;
use axum::http::uri::PathAndQuery;
use axum::http::{header, HeaderValue, Request, Uri};
use axum::middleware::Next;
use axum::response::Response;

/// `Cache-Control` value applied when caching is enabled.
pub const CACHE_MAX_AGE: &str = "max-age=3600";

/// Pick the response cache policy for the process-wide caching flag.
pub fn cache_control_value(caching: bool) -> HeaderValue {
    if caching {
        HeaderValue::from_static(CACHE_MAX_AGE)
    } else {
        HeaderValue::from_static("no-store")
    }
}

/// Lower-case the request path before routing. Registered prefixes are
/// folded at compile time, so `/Foo` and `/foo` resolve to the same route.
/// The query string passes through untouched.
pub async fn fold_path_case(mut req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path();
    if path.bytes().any(|b| b.is_ascii_uppercase()) {
        let folded = path.to_lowercase();
        let path_and_query = match req.uri().query() {
            Some(query) => format!("{folded}?{query}"),
            None => folded,
        };
        if let Ok(pq) = path_and_query.parse::<PathAndQuery>() {
            let mut parts = req.uri().clone().into_parts();
            parts.path_and_query = Some(pq);
            if let Ok(uri) = Uri::from_parts(parts) {
                *req.uri_mut() = uri;
            }
        }
    }
    next.run(req).await
}

/// One access-log line per request: `METHOD URI`.
pub async fn access_log(req: Request<Body>, next: Next) -> Response {
    tracing::info!("{} {}", req.method(), req.uri());
    next.run(req).await
}

/// Force the JavaScript content type whenever the request path contains
/// `.js` anywhere, overwriting whatever the inner handler set. Some
/// clients refuse module scripts served with a generic type.
pub async fn correct_javascript_mime(req: Request<Body>, next: Next) -> Response {
    let force = req.uri().path().contains(".js");
    let mut response = next.run(req).await;
    if force {
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/javascript;charset=utf-8"),
        );
    }
    response
}
