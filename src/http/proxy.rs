//! Streaming reverse proxy for remote and critical hives.
//!
//! The upstream response body is passed through as-is; only headers are
//! touched. A destination that fails to parse at request time answers 502
//! for that request alone — compile-time template validation makes that
//! path unreachable for well-formed configuration.

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, Response, StatusCode};
use axum::response::IntoResponse;
use hyper::body::Incoming;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;

use crate::config::schema::Hive;
use crate::http::middleware::cache_control_value;
use crate::observability::verbose;
use crate::routing::rewrite;
use crate::RuntimeFlags;

pub type HttpClient = Client<HttpConnector, Body>;

/// Forward one request to the hive's upstream and stream the response back.
pub async fn forward(
    client: &HttpClient,
    hive: &Hive,
    server_host: &str,
    flags: RuntimeFlags,
    req: Request<Body>,
) -> Response<Body> {
    let request_uri = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| req.uri().path());
    let original_query = req.uri().query().map(str::to_owned);

    let target = match rewrite::destination_url(hive, server_host, request_uri) {
        Ok(url) => url,
        Err(error) => {
            tracing::error!(%error, prefix = %hive.path, "destination URL does not parse");
            return bad_gateway();
        }
    };
    let uri = match rewrite::forward_uri(&target, original_query.as_deref()) {
        Ok(uri) => uri,
        Err(error) => {
            tracing::error!(%error, destination = %target, "cannot assemble forward URI");
            return bad_gateway();
        }
    };

    let (mut parts, body) = req.into_parts();
    parts.uri = uri;

    // The upstream must see the target host, not whatever the client sent.
    let authority = rewrite::target_authority(&target);
    match HeaderValue::from_str(&authority) {
        Ok(value) => {
            parts.headers.insert(header::HOST, value);
        }
        Err(error) => {
            tracing::error!(%error, %authority, "target authority is not a valid header value");
            return bad_gateway();
        }
    }

    // An absent User-Agent stays absent; without the empty value the client
    // library would inject its own default.
    if !parts.headers.contains_key(header::USER_AGENT) {
        parts
            .headers
            .insert(header::USER_AGENT, HeaderValue::from_static(""));
    }

    // Verbose mode buffers the request body so the dump can show it; the
    // response body stays streaming either way.
    let body = if flags.verbose {
        match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => {
                verbose::dump_request(
                    &parts.method,
                    &parts.uri,
                    &parts.headers,
                    Some(target.scheme()),
                    &bytes,
                );
                Body::from(bytes)
            }
            Err(error) => {
                tracing::error!(%error, prefix = %hive.path, "failed to read request body");
                return bad_gateway();
            }
        }
    } else {
        body
    };

    match client.request(Request::from_parts(parts, body)).await {
        Ok(response) => relay(response, flags.caching),
        Err(error) => {
            tracing::error!(%error, prefix = %hive.path, "upstream request failed");
            bad_gateway()
        }
    }
}

/// Stream the upstream response back, stamping the process cache policy
/// over whatever the upstream set.
fn relay(response: Response<Incoming>, caching: bool) -> Response<Body> {
    let (mut parts, body) = response.into_parts();
    parts
        .headers
        .insert(header::CACHE_CONTROL, cache_control_value(caching));
    Response::from_parts(parts, Body::new(body))
}

fn bad_gateway() -> Response<Body> {
    (StatusCode::BAD_GATEWAY, "upstream request failed").into_response()
}
