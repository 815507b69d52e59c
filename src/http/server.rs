//! App assembly and the HTTP/HTTPS listener.
//!
//! # Responsibilities
//! - Build the axum app: one dispatch route under the middleware chain
//! - Share the compiled route table, client and flags with every handler
//! - Bind plaintext or TLS and serve forever
//!
//! Two terminal modes, chosen once at startup. There is no runtime
//! transition between them and no graceful shutdown path: termination is a
//! fatal listener error or an external process signal.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use thiserror::Error;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::paths;
use crate::config::schema::RuntimeFlags;
use crate::http::middleware as mw;
use crate::http::proxy::{self, HttpClient};
use crate::http::files;
use crate::routing::table::{RouteKind, RouteTable};

/// Shared state injected into the dispatch handler. Everything here is
/// read-only for the process lifetime; handlers need no synchronization.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub client: HttpClient,
    pub server_host: String,
    pub flags: RuntimeFlags,
}

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("TLS certificate not found at {0}")]
    MissingCertificate(PathBuf),

    #[error("TLS private key not found at {0}")]
    MissingKey(PathBuf),

    #[error("failed to load TLS assets: {0}")]
    Tls(#[source] std::io::Error),

    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Assemble the dispatch router and middleware chain for one compiled
/// server.
///
/// Layer order, outermost first: path case folding (skipped when casing is
/// preserved), security header injection (TLS mode only), access logging,
/// JavaScript MIME correction.
pub fn build_app(
    routes: Arc<RouteTable>,
    server_host: String,
    flags: RuntimeFlags,
    tls: bool,
) -> Router {
    let state = AppState {
        routes,
        client: Client::builder(TokioExecutor::new()).build(HttpConnector::new()),
        server_host,
        flags,
    };

    let mut app = Router::new()
        .route("/", any(dispatch))
        .route("/{*path}", any(dispatch))
        .with_state(state)
        .layer(from_fn(mw::correct_javascript_mime))
        .layer(from_fn(mw::access_log));

    if tls {
        app = app.layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("upgrade-insecure-requests"),
        ));
    }
    if !flags.preserve_case {
        app = app.layer(from_fn(mw::fold_path_case));
    }
    app
}

/// Route lookup and dispatch to the matching leaf handler.
async fn dispatch(State(state): State<AppState>, req: Request<Body>) -> Response {
    let route = match state.routes.lookup(req.uri().path()) {
        Some(route) => route,
        // Unreachable while the catch-all is registered; explicit no-match
        // beats a silent default.
        None => return (StatusCode::NOT_FOUND, "no matching route").into_response(),
    };

    match &route.kind {
        RouteKind::Proxy { hive } => {
            proxy::forward(&state.client, hive, &state.server_host, state.flags, req).await
        }
        RouteKind::Local { dir } => {
            files::serve_local(dir, &route.prefix, state.flags, req).await
        }
        RouteKind::Fallback { dir } => {
            files::serve_fallback(dir, state.flags.caching, req).await
        }
    }
}

/// Bind the app on the effective port and serve forever.
pub async fn run(app: Router, port: u16, https: bool) -> Result<(), ServeError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    if https {
        let (cert, key) = paths::tls_asset_paths();
        if !cert.exists() {
            return Err(ServeError::MissingCertificate(cert));
        }
        if !key.exists() {
            return Err(ServeError::MissingKey(key));
        }
        let tls_config = RustlsConfig::from_pem_file(&cert, &key)
            .await
            .map_err(ServeError::Tls)?;

        println!("Running server at https://localhost:{port}");
        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await?;
    } else {
        println!("Running server at http://localhost:{port}");
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;
    }

    Ok(())
}
