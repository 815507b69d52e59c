//! Destination URL construction for proxied hives.
//!
//! Pure functions, kept separate from the forwarding I/O so the rewrite
//! rules can be tested without a running upstream.

use axum::http::Uri;
use url::Url;

use crate::config::schema::Hive;

/// Build the destination string for one request: the upstream origin (the
/// hive's host, or the server's when the hive declares none) concatenated
/// with the raw request URI. When the hive declares a non-empty `route`,
/// only the **first** textual occurrence of `hive.path` in the whole string
/// is replaced; later occurrences (for example inside a query parameter)
/// stay untouched.
pub fn destination_string(hive: &Hive, server_host: &str, request_uri: &str) -> String {
    let base = if hive.host.is_empty() {
        server_host
    } else {
        hive.host.as_str()
    };
    let destination = format!("{base}{request_uri}");
    if hive.route.is_empty() {
        destination
    } else {
        destination.replacen(&hive.path, &hive.route, 1)
    }
}

/// Build and parse the destination for one request.
pub fn destination_url(
    hive: &Hive,
    server_host: &str,
    request_uri: &str,
) -> Result<Url, url::ParseError> {
    Url::parse(&destination_string(hive, server_host, request_uri))
}

/// Merge the target's query string with the original request's: when both
/// are non-empty the target's wins, otherwise whichever one is non-empty.
pub fn merge_queries(target: Option<&str>, original: Option<&str>) -> Option<String> {
    match (target.unwrap_or(""), original.unwrap_or("")) {
        ("", "") => None,
        (target, _) if !target.is_empty() => Some(target.to_string()),
        (_, original) => Some(original.to_string()),
    }
}

/// Authority (`host[:port]`) of a parsed destination, also used to overwrite
/// the forwarded `Host` header.
pub fn target_authority(target: &Url) -> String {
    match (target.host_str(), target.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

/// Assemble the URI the upstream request is sent to: scheme, authority and
/// path from the parsed target, query per [`merge_queries`].
pub fn forward_uri(target: &Url, original_query: Option<&str>) -> Result<Uri, axum::http::Error> {
    let path_and_query = match merge_queries(target.query(), original_query) {
        Some(query) => format!("{}?{}", target.path(), query),
        None => target.path().to_string(),
    };

    Uri::builder()
        .scheme(target.scheme())
        .authority(target_authority(target))
        .path_and_query(path_and_query)
        .build()
}
