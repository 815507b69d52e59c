//! Shared helpers for integration tests: ephemeral upstreams and a
//! ready-to-dial hive gate built from an in-memory server definition.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderValue, Request};
use axum::response::IntoResponse;
use axum::Router;

use hive_gate::routing::compiler;
use hive_gate::{Hive, RuntimeFlags, ServerConfig};

/// Serve an axum app on an ephemeral port, returning the bound address.
/// The listener is bound before the task is spawned, so the address is
/// dialable as soon as this returns.
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

/// An upstream that echoes the request line, the Host and User-Agent
/// headers, and any body it received, so tests can assert on the
/// rewritten request.
pub fn echo_upstream() -> Router {
    async fn echo(req: Request<Body>) -> String {
        let (parts, body) = req.into_parts();
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .map(|v| format!("{:?}", v.to_str().unwrap_or("<binary>")))
            .unwrap_or_else(|| "none".to_string());
        let bytes = axum::body::to_bytes(body, 64 * 1024).await.unwrap_or_default();
        let mut out = format!("{} {} host={} ua={}", parts.method, parts.uri, host, user_agent);
        if !bytes.is_empty() {
            out.push_str(" body=");
            out.push_str(&String::from_utf8_lossy(&bytes));
        }
        out
    }
    Router::new().fallback(echo)
}

/// An upstream that answers every request with a fixed response header.
pub fn upstream_with_header(name: &'static str, value: &'static str) -> Router {
    let handler = move || async move {
        let mut response = "ok".into_response();
        response
            .headers_mut()
            .insert(name, HeaderValue::from_static(value));
        response
    };
    Router::new().fallback(handler)
}

/// Compile and serve a hive gate for the given server definition. The gate
/// always runs plaintext here; `server.https` only toggles the TLS-mode
/// middleware so tests can observe it without certificates.
pub async fn spawn_gate(server: &ServerConfig, base_dir: &Path, flags: RuntimeFlags) -> SocketAddr {
    let table = compiler::compile(server, base_dir, !flags.preserve_case, false)
        .expect("route compilation");
    let app = hive_gate::build_app(Arc::new(table), server.host.clone(), flags, server.https);
    spawn(app).await
}

pub fn remote_hive(path: &str, host: &str, route: &str) -> Hive {
    Hive {
        path: path.to_string(),
        host: host.to_string(),
        route: route.to_string(),
        ..Hive::default()
    }
}

pub fn local_hive(path: &str, prefix: &str) -> Hive {
    Hive {
        path: path.to_string(),
        hive: prefix.to_string(),
        ..Hive::default()
    }
}

/// A reqwest client that ignores environment proxies and pools nothing.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .expect("client")
}

/// Flags with case folding enabled and caching off, the default boot shape.
pub fn default_flags() -> RuntimeFlags {
    RuntimeFlags::default()
}
