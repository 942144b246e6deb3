//! Route table module
//!
//! Maps request paths to route targets. Registration happens once at startup
//! from configuration; lookup is an exact-path match over a small table, so
//! no pattern syntax or framework is involved.

use crate::config::RoutesConfig;

/// What a matched path dispatches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// The home page handler
    Home,
    /// Liveness probe
    Liveness,
    /// Readiness probe
    Readiness,
}

/// Exact-path route table
pub struct Router {
    routes: Vec<(String, RouteTarget)>,
}

impl Router {
    /// Build the table: the home handler at the root path, plus the health
    /// probes when enabled.
    pub fn from_config(routes: &RoutesConfig) -> Self {
        let mut table = vec![("/".to_string(), RouteTarget::Home)];

        if routes.health.enabled {
            table.push((routes.health.liveness_path.clone(), RouteTarget::Liveness));
            table.push((routes.health.readiness_path.clone(), RouteTarget::Readiness));
        }

        Self { routes: table }
    }

    /// Look up the target for a request path (exact match)
    pub fn lookup(&self, path: &str) -> Option<RouteTarget> {
        self.routes
            .iter()
            .find(|(route, _)| route == path)
            .map(|&(_, target)| target)
    }
}
