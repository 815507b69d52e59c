//! Route compilation: turn a selected server's hives into a route table.
//!
//! Registration order is fixed: critical hives, then local hives, then
//! remote hives, then the catch-all serving the base directory. The table's
//! tie-breaking rule (earlier registration wins on equal-length prefixes)
//! makes critical hives shadow local and remote ones and keeps the
//! catch-all as last resort.
//!
//! Every proxy hive's destination template is parsed here, once, so a
//! malformed host or route fails the boot before the listener binds instead
//! of surfacing on the first matching request.

use std::path::Path;

use thiserror::Error;
use url::Url;

use crate::config::paths::resolve_hive_dir;
use crate::config::schema::{Hive, ServerConfig};
use crate::observability::verbose;
use crate::routing::rewrite;
use crate::routing::table::{Route, RouteKind, RouteTable};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{kind} hive {prefix:?}: destination template {template:?} does not parse: {source}")]
    InvalidTemplate {
        kind: &'static str,
        prefix: String,
        template: String,
        #[source]
        source: url::ParseError,
    },
}

/// Compile the selected server's hives into an immutable route table.
///
/// `fold_case` must mirror the path case-folding middleware: when incoming
/// paths are lower-cased before routing, registered prefixes are folded
/// here too, so `/Foo` and `/foo` land on the same route.
pub fn compile(
    server: &ServerConfig,
    base_dir: &Path,
    fold_case: bool,
    verbose: bool,
) -> Result<RouteTable, CompileError> {
    let hives = &server.hives;
    let mut routes =
        Vec::with_capacity(hives.critical.len() + hives.local.len() + hives.remote.len() + 1);

    for hive in &hives.critical {
        routes.push(proxy_route(hive, server, fold_case, "critical")?);
    }

    for hive in &hives.local {
        let dir = resolve_hive_dir(&hive.path, base_dir);
        if verbose {
            verbose::dump_local_hive(hive, &dir);
        }
        routes.push(Route {
            prefix: hive.hive.to_lowercase(),
            kind: RouteKind::Local { dir },
        });
    }

    for hive in &hives.remote {
        routes.push(proxy_route(hive, server, fold_case, "remote")?);
    }

    routes.push(Route {
        prefix: "/".to_string(),
        kind: RouteKind::Fallback {
            dir: base_dir.to_path_buf(),
        },
    });

    Ok(RouteTable::new(routes))
}

/// One proxy route, owning its own copy of the hive so no two routes share
/// mutable or aliased registration state.
fn proxy_route(
    hive: &Hive,
    server: &ServerConfig,
    fold_case: bool,
    kind: &'static str,
) -> Result<Route, CompileError> {
    let template = rewrite::destination_string(hive, &server.host, &hive.path);
    if let Err(source) = Url::parse(&template) {
        return Err(CompileError::InvalidTemplate {
            kind,
            prefix: hive.path.clone(),
            template,
            source,
        });
    }

    let mut hive = hive.clone();
    if fold_case {
        hive.path = hive.path.to_lowercase();
    }

    Ok(Route {
        prefix: hive.path.clone(),
        kind: RouteKind::Proxy { hive },
    })
}
