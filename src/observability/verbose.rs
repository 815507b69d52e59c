//! Verbose console dumps.
//!
//! Each dump is assembled into a single string and printed with one call,
//! so blocks from concurrent requests never interleave line-by-line inside
//! a separator bracket.

use std::fmt::Write as _;
use std::path::Path;

use axum::http::{HeaderMap, Method, Uri};

use crate::config::schema::Hive;

const SEPARATOR: &str =
    "--------------------------------------------------------------------";

/// Dump a full outgoing request: scheme (when forwarding), request line,
/// headers, the buffered body, and for GET requests the parsed query
/// parameters. Callers pass an empty slice when there is no body.
pub fn dump_request(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    scheme: Option<&str>,
    body: &[u8],
) {
    println!("{}", format_request(method, uri, headers, scheme, body));
}

fn format_request(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    scheme: Option<&str>,
    body: &[u8],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{SEPARATOR}");
    let _ = writeln!(out, "Request: ");
    if let Some(scheme) = scheme {
        let _ = writeln!(out, "Schema: {scheme}");
    }
    let _ = writeln!(out, "{method} {uri}");
    for (name, value) in headers {
        let _ = writeln!(out, "{name}: {}", value.to_str().unwrap_or("<binary>"));
    }
    if !body.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", String::from_utf8_lossy(body));
    }

    if method == Method::GET {
        if let Some(query) = uri.query() {
            let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect();
            if !pairs.is_empty() {
                let _ = writeln!(out, "Params: ");
                for (key, value) in pairs {
                    let _ = writeln!(out, "Key: {key}\t Value: {value} ");
                }
            }
        }
    }

    out.push_str(SEPARATOR);
    out
}

/// Dump a local hive's declared and resolved locations at compile time.
pub fn dump_local_hive(hive: &Hive, resolved: &Path) {
    let mut out = String::new();
    let _ = writeln!(out, "{SEPARATOR}");
    let _ = writeln!(out, "HIVE: {}", hive.hive);
    let _ = writeln!(out, "PATH: {}", hive.path);
    let _ = writeln!(out, "FORMATTED: {}", resolved.display());
    out.push_str(SEPARATOR);
    println!("{out}");
}
