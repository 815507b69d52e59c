//! Path resolution helpers: environment expansion, hive directory
//! resolution, and the fixed TLS asset locations.

use std::env;
use std::path::{Path, PathBuf};

/// Expand `$VAR` and `${VAR}` references using the process environment.
///
/// Unset variables expand to the empty string, matching the behavior the
/// existing configuration files rely on. A `$` not followed by a valid
/// variable name is kept literally.
pub fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&(_, '{')) => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if closed {
                    out.push_str(&env::var(&name).unwrap_or_default());
                } else {
                    out.push_str("${");
                    out.push_str(&name);
                }
            }
            Some(&(_, c)) if c == '_' || c.is_ascii_alphanumeric() => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c == '_' || c.is_ascii_alphanumeric() {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(&env::var(&name).unwrap_or_default());
            }
            _ => out.push('$'),
        }
    }
    out
}

/// Resolve a local hive's declared path to a directory on disk.
///
/// Paths starting with a relative marker are resolved against the process
/// base directory; anything else is taken as already absolute. Environment
/// variables are expanded in both cases.
pub fn resolve_hive_dir(declared: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand_env(declared);
    if expanded.is_empty() {
        base_dir.to_path_buf()
    } else if expanded.starts_with('.') {
        let trimmed = expanded.trim_start_matches("./");
        base_dir.join(trimmed)
    } else {
        PathBuf::from(expanded)
    }
}

/// Make a path absolute relative to the current working directory without
/// requiring it to exist.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// TLS certificate and key locations, fixed relative to `$POPATH`.
///
/// Resolution happens at startup; a missing asset is fatal before the
/// listener binds, not at first handshake.
pub fn tls_asset_paths() -> (PathBuf, PathBuf) {
    let cert = absolutize(Path::new(&expand_env("$POPATH/../ssl/server.cert")));
    let key = absolutize(Path::new(&expand_env("$POPATH/../ssl/server.key")));
    (cert, key)
}
