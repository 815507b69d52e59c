//! The compiled route table and its matching rules.
//!
//! Longest matching prefix wins. When two prefixes are equally specific the
//! earlier registration wins, which is what gives critical hives priority
//! over local and remote ones and keeps the catch-all as last resort.

use std::path::PathBuf;

use crate::config::schema::Hive;

/// What a matched route dispatches to.
#[derive(Debug, Clone)]
pub enum RouteKind {
    /// Reverse-proxy to an upstream origin derived from the hive.
    Proxy { hive: Hive },

    /// Serve files from a local directory, stripping the matched prefix.
    Local { dir: PathBuf },

    /// Serve the process base directory without prefix stripping.
    Fallback { dir: PathBuf },
}

/// One registered prefix route.
#[derive(Debug, Clone)]
pub struct Route {
    pub prefix: String,
    pub kind: RouteKind,
}

/// Immutable prefix-route table, safe to share across request handlers.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Find the route for a request path: longest prefix wins, exact-length
    /// ties go to the earlier registration. Returns `None` only when no
    /// route matches at all.
    pub fn lookup(&self, path: &str) -> Option<&Route> {
        let mut best: Option<&Route> = None;
        for route in &self.routes {
            if !path.starts_with(&route.prefix) {
                continue;
            }
            match best {
                Some(current) if current.prefix.len() >= route.prefix.len() => {}
                _ => best = Some(route),
            }
        }
        best
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}
