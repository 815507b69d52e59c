//! Configuration schema definitions.
//!
//! The JSON field names follow the established `go.json` layout
//! (`localhives`, `remotehives`, `criticalhives`), so existing configuration
//! files load unchanged.

use serde::{Deserialize, Serialize};

/// One content source, reachable under a path prefix.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct Hive {
    /// Route prefix to match. For local hives this is the on-disk location
    /// instead; the prefix then comes from `hive`.
    pub path: String,

    /// Alternate prefix used for local serving, lower-cased at registration.
    pub hive: String,

    /// Upstream origin override. Empty means inherit the server's host.
    pub host: String,

    /// Substring-replacement target applied to the request path before
    /// forwarding. Empty means forward the path verbatim.
    pub route: String,

    /// Legacy flag carried through for config compatibility, never consumed.
    pub java: bool,
}

/// The three independent hive lists of one server definition.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct Hives {
    #[serde(rename = "localhives")]
    pub local: Vec<Hive>,

    #[serde(rename = "remotehives")]
    pub remote: Vec<Hive>,

    #[serde(rename = "criticalhives")]
    pub critical: Vec<Hive>,
}

/// One deployable server definition.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Serve TLS instead of plaintext.
    pub https: bool,

    /// Selection key, matched exactly against the `-s` flag.
    pub name: String,

    /// Default upstream origin for hives that do not declare their own.
    pub host: String,

    /// Declared listen port; the `-p` flag overrides it.
    pub port: String,

    pub hives: Hives,
}

/// The full configuration: every server definition the process can boot.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Servers {
    #[serde(default)]
    pub servers: Vec<ServerConfig>,
}

impl Servers {
    /// Look up a server definition by exact name.
    pub fn find(&self, name: &str) -> Option<&ServerConfig> {
        self.servers.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.servers.iter().map(|s| s.name.as_str())
    }
}

/// Per-process flags threaded read-only into every handler and middleware.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeFlags {
    /// Dump outgoing requests and hive resolution details to the console.
    pub verbose: bool,

    /// Respond with a fixed `max-age` instead of `no-store`.
    pub caching: bool,

    /// Keep request path casing; when false, paths are lower-cased before
    /// routing and prefixes are folded at registration.
    pub preserve_case: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let raw = r#"{
            "servers": [
                {
                    "https": true,
                    "name": "api",
                    "host": "http://upstream.example",
                    "port": "8443",
                    "hives": {
                        "localhives": [
                            { "path": "./static", "hive": "/assets" }
                        ],
                        "remotehives": [
                            { "path": "/v1", "route": "/internal/v1" }
                        ],
                        "criticalhives": [
                            { "path": "/auth", "host": "http://auth.example", "java": true }
                        ]
                    }
                }
            ]
        }"#;

        let servers: Servers = serde_json::from_str(raw).unwrap();
        let server = servers.find("api").unwrap();
        assert!(server.https);
        assert_eq!(server.host, "http://upstream.example");
        assert_eq!(server.port, "8443");

        assert_eq!(server.hives.local.len(), 1);
        assert_eq!(server.hives.local[0].path, "./static");
        assert_eq!(server.hives.local[0].hive, "/assets");

        assert_eq!(server.hives.remote[0].route, "/internal/v1");
        assert_eq!(server.hives.remote[0].host, "");

        assert_eq!(server.hives.critical[0].host, "http://auth.example");
        assert!(server.hives.critical[0].java);
    }

    #[test]
    fn test_missing_fields_default() {
        let servers: Servers =
            serde_json::from_str(r#"{ "servers": [ { "name": "bare" } ] }"#).unwrap();
        let server = servers.find("bare").unwrap();
        assert!(!server.https);
        assert!(server.hives.local.is_empty());
        assert!(server.hives.remote.is_empty());
        assert!(server.hives.critical.is_empty());
    }

    #[test]
    fn test_find_is_exact_match() {
        let servers: Servers =
            serde_json::from_str(r#"{ "servers": [ { "name": "api" } ] }"#).unwrap();
        assert!(servers.find("api").is_some());
        assert!(servers.find("API").is_none());
        assert!(servers.find("ap").is_none());
    }
}
