//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that proxy hives can resolve an upstream origin
//! - Validate value ranges (ports, non-empty prefixes)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: `Servers → Result<(), Vec<ValidationError>>`
//! - Runs before any server is selected or compiled

use thiserror::Error;

use crate::config::schema::{Hive, ServerConfig, Servers};

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("server entry {index} has an empty name")]
    EmptyServerName { index: usize },

    #[error("server {server}: declared port {port:?} is not a valid port number")]
    InvalidPort { server: String, port: String },

    #[error("server {server}: {kind} hive {index} has an empty path prefix")]
    EmptyHivePath {
        server: String,
        kind: &'static str,
        index: usize,
    },

    #[error("server {server}: {kind} hive {index} declares no host and the server has none to inherit")]
    MissingHost {
        server: String,
        kind: &'static str,
        index: usize,
    },

    #[error("server {server}: local hive {index} has an empty hive prefix")]
    EmptyLocalPrefix { server: String, index: usize },
}

/// Check every server definition, collecting all errors.
pub fn validate(servers: &Servers) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, server) in servers.servers.iter().enumerate() {
        if server.name.is_empty() {
            errors.push(ValidationError::EmptyServerName { index });
        }
        if !server.port.is_empty() && server.port.parse::<u16>().is_err() {
            errors.push(ValidationError::InvalidPort {
                server: server.name.clone(),
                port: server.port.clone(),
            });
        }

        validate_proxy_hives(server, &server.hives.critical, "critical", &mut errors);
        validate_proxy_hives(server, &server.hives.remote, "remote", &mut errors);

        for (index, hive) in server.hives.local.iter().enumerate() {
            if hive.hive.is_empty() {
                errors.push(ValidationError::EmptyLocalPrefix {
                    server: server.name.clone(),
                    index,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_proxy_hives(
    server: &ServerConfig,
    hives: &[Hive],
    kind: &'static str,
    errors: &mut Vec<ValidationError>,
) {
    for (index, hive) in hives.iter().enumerate() {
        if hive.path.is_empty() {
            errors.push(ValidationError::EmptyHivePath {
                server: server.name.clone(),
                kind,
                index,
            });
        }
        if hive.host.is_empty() && server.host.is_empty() {
            errors.push(ValidationError::MissingHost {
                server: server.name.clone(),
                kind,
                index,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Hives;

    fn server(name: &str) -> ServerConfig {
        ServerConfig {
            name: name.to_string(),
            host: "http://upstream.example".to_string(),
            port: "8080".to_string(),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let servers = Servers {
            servers: vec![ServerConfig {
                hives: Hives {
                    remote: vec![Hive {
                        path: "/v1".into(),
                        ..Hive::default()
                    }],
                    ..Hives::default()
                },
                ..server("api")
            }],
        };
        assert!(validate(&servers).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let servers = Servers {
            servers: vec![ServerConfig {
                name: String::new(),
                port: "eighty".to_string(),
                ..ServerConfig::default()
            }],
        };
        let errors = validate(&servers).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::EmptyServerName { index: 0 }));
    }

    #[test]
    fn test_proxy_hive_without_any_host() {
        let servers = Servers {
            servers: vec![ServerConfig {
                host: String::new(),
                hives: Hives {
                    critical: vec![Hive {
                        path: "/auth".into(),
                        ..Hive::default()
                    }],
                    ..Hives::default()
                },
                ..server("api")
            }],
        };
        let errors = validate(&servers).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::MissingHost {
                server: "api".into(),
                kind: "critical",
                index: 0
            }]
        );
    }

    #[test]
    fn test_local_hive_needs_prefix() {
        let servers = Servers {
            servers: vec![ServerConfig {
                hives: Hives {
                    local: vec![Hive {
                        path: "./static".into(),
                        ..Hive::default()
                    }],
                    ..Hives::default()
                },
                ..server("web")
            }],
        };
        let errors = validate(&servers).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::EmptyLocalPrefix {
                server: "web".into(),
                index: 0
            }]
        );
    }
}
