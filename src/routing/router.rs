//! Route lookup over a swappable table snapshot.
//!
//! # Responsibilities
//! - Build a route table from validated configuration
//! - Serve lookups against the current snapshot
//! - Publish a rebuilt table atomically on reload
//! - Render concrete paths from route aliases
//!
//! # Design Decisions
//! - Each table is immutable once published (thread-safe without locks)
//! - A reload builds the complete new table first; on failure the current
//!   snapshot keeps serving
//! - In-flight lookups finish against the snapshot they started on
//! - Lookup results are owned so they outlive any snapshot swap

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::config::{load_config, ConfigError, DispatchConfig};
use crate::observability::metrics;
use crate::routing::error::{RegisterError, RenderError};
use crate::routing::macros::MacroSyntax;
use crate::routing::matcher::MacroBindings;
use crate::routing::table::{RouteTable, Verb};

/// Handler references in configuration are plain strings.
pub type HandlerRef = String;

/// An owned lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    pub pattern: String,
    pub verb: String,
    pub handler: HandlerRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub bindings: MacroBindings,
}

/// Config-driven dispatcher holding the current route table.
pub struct Router {
    inner: ArcSwap<RouteTable<HandlerRef>>,
}

impl Router {
    pub fn new(table: RouteTable<HandlerRef>) -> Self {
        metrics::record_route_count(table.route_count());
        Self {
            inner: ArcSwap::from_pointee(table),
        }
    }

    /// Build a router from a validated configuration.
    pub fn from_config(config: &DispatchConfig) -> Result<Self, RegisterError> {
        Ok(Self::new(build_table(config)?))
    }

    /// Load, validate and build from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = load_config(path)?;
        Ok(Self::from_config(&config)?)
    }

    /// The table currently serving lookups.
    pub fn snapshot(&self) -> Arc<RouteTable<HandlerRef>> {
        self.inner.load_full()
    }

    /// Resolve `path` and `verb` against the current table.
    pub fn lookup(&self, path: &str, verb: Option<&str>) -> Option<Resolved> {
        let start = Instant::now();
        let table = self.inner.load();

        let resolved = table.lookup(path, verb).map(|m| Resolved {
            pattern: m.route.pattern().to_string(),
            verb: m.route.verb().to_string(),
            handler: m.handler().clone(),
            alias: m.route.alias().map(str::to_string),
            bindings: m.bindings,
        });

        metrics::record_lookup(verb, resolved.is_some(), start);
        resolved
    }

    /// Replace the current table with one built from `config`.
    ///
    /// Returns the new route count. On error nothing is replaced.
    pub fn reload(&self, config: &DispatchConfig) -> Result<usize, RegisterError> {
        match build_table(config) {
            Ok(table) => {
                let count = table.route_count();
                let previous = self.inner.swap(Arc::new(table));
                metrics::record_reload(true);
                metrics::record_route_count(count);
                tracing::info!(
                    previous_routes = previous.route_count(),
                    routes = count,
                    "Route table reloaded"
                );
                Ok(count)
            }
            Err(e) => {
                metrics::record_reload(false);
                tracing::error!(error = %e, "Route table reload failed, keeping current routes");
                Err(e)
            }
        }
    }

    pub fn route_count(&self) -> usize {
        self.inner.load().route_count()
    }

    /// Render the path of the route registered under `alias`.
    pub fn reverse(&self, alias: &str, values: &MacroBindings) -> Result<String, RenderError> {
        let table = self.inner.load();
        let route = table
            .by_alias(alias)
            .ok_or_else(|| RenderError::UnknownAlias(alias.to_string()))?;
        route.template().render(values)
    }
}

/// Register every configured route, in file order, into a fresh table.
pub fn build_table(config: &DispatchConfig) -> Result<RouteTable<HandlerRef>, RegisterError> {
    let mut table = RouteTable::with_options(
        config.router.macro_flavor,
        MacroSyntax::from(&config.router.syntax),
        config.router.missing_verb,
    );

    for route in &config.routes {
        let verb = Verb::from(route.verb.as_deref());
        match &route.alias {
            Some(alias) => {
                table.register_with_alias(&route.pattern, verb, route.handler.clone(), alias.clone())?
            }
            None => table.register(&route.pattern, verb, route.handler.clone())?,
        };
    }

    tracing::info!(
        routes = table.route_count(),
        flavor = %table.flavor(),
        "Route table built"
    );
    Ok(table)
}
