//! End-to-end tests for the header middleware chain: MIME correction and
//! the TLS-only security header.

use std::fs;

use hive_gate::{Hives, ServerConfig};

mod common;

fn base_with_files() -> tempfile::TempDir {
    let base = tempfile::tempdir().expect("tempdir");
    fs::write(base.path().join("app.js"), b"console.log(1)").unwrap();
    fs::write(base.path().join("app.json"), b"{}").unwrap();
    fs::write(base.path().join("hello.txt"), b"hello").unwrap();
    base
}

fn server(https: bool) -> ServerConfig {
    ServerConfig {
        name: "web".to_string(),
        host: "http://upstream.example".to_string(),
        port: "0".to_string(),
        https,
        hives: Hives::default(),
    }
}

#[tokio::test]
async fn test_js_paths_get_forced_content_type() {
    let base = base_with_files();
    let gate = common::spawn_gate(&server(false), base.path(), common::default_flags()).await;
    let client = common::client();

    let response = client
        .get(format!("http://{gate}/app.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/javascript;charset=utf-8"
    );

    // The match is a substring check on the whole path, so `.json` files
    // are rewritten too.
    let response = client
        .get(format!("http://{gate}/app.json"))
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/javascript;charset=utf-8"
    );
}

#[tokio::test]
async fn test_other_paths_keep_their_content_type() {
    let base = base_with_files();
    let gate = common::spawn_gate(&server(false), base.path(), common::default_flags()).await;

    let response = common::client()
        .get(format!("http://{gate}/hello.txt"))
        .send()
        .await
        .unwrap();
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"), "{content_type}");
}

#[tokio::test]
async fn test_security_header_only_in_tls_mode() {
    let base = base_with_files();
    let client = common::client();

    // spawn_gate serves plaintext either way; `https` toggles the TLS-mode
    // middleware, which is what this asserts on.
    let tls_gate = common::spawn_gate(&server(true), base.path(), common::default_flags()).await;
    let response = client
        .get(format!("http://{tls_gate}/hello.txt"))
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("content-security-policy").unwrap(),
        "upgrade-insecure-requests"
    );

    let plain_gate = common::spawn_gate(&server(false), base.path(), common::default_flags()).await;
    let response = client
        .get(format!("http://{plain_gate}/hello.txt"))
        .send()
        .await
        .unwrap();
    assert!(response.headers().get("content-security-policy").is_none());
}
