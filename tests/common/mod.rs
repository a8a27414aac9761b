//! Shared utilities for integration and load testing.

use std::path::PathBuf;

use route_dispatch::config::{DispatchConfig, RouteConfig};
use route_dispatch::routing::{MacroFlavor, Router};

/// Build a route entry with no alias.
pub fn route(pattern: &str, verb: Option<&str>, handler: &str) -> RouteConfig {
    RouteConfig {
        pattern: pattern.to_string(),
        verb: verb.map(str::to_string),
        handler: handler.to_string(),
        alias: None,
    }
}

/// Build a router over `routes`, registered in order.
pub fn router(flavor: MacroFlavor, routes: &[(&str, &str)]) -> Router {
    let mut config = DispatchConfig::default();
    config.router.macro_flavor = flavor;
    config.routes = routes.iter().map(|(p, h)| route(p, None, h)).collect();
    Router::from_config(&config).unwrap()
}

/// Handler selected for `path` with no verb, if any.
#[allow(dead_code)]
pub fn handler(router: &Router, path: &str) -> Option<String> {
    router.lookup(path, None).map(|r| r.handler)
}

/// Write `content` to a config file inside a fresh temp directory.
///
/// The directory is returned so it lives as long as the test needs the file.
#[allow(dead_code)]
pub fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.toml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
