//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dispatcher.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::{MacroFlavor, MacroSyntax, MissingVerbPolicy};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DispatchConfig {
    /// Table-wide matching options.
    pub router: RouterConfig,

    /// Route definitions, registered in file order.
    pub routes: Vec<RouteConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Options fixed for the lifetime of a route table.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// How macro constraints are interpreted (simple, wildcard, regex).
    pub macro_flavor: MacroFlavor,

    /// Whether a lookup without a verb may match verb-specific routes.
    pub missing_verb: MissingVerbPolicy,

    /// Macro delimiters.
    pub syntax: SyntaxConfig,
}

/// Macro delimiter characters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SyntaxConfig {
    pub open: char,
    pub separator: char,
    pub close: char,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        let syntax = MacroSyntax::default();
        Self {
            open: syntax.open,
            separator: syntax.separator,
            close: syntax.close,
        }
    }
}

impl From<&SyntaxConfig> for MacroSyntax {
    fn from(config: &SyntaxConfig) -> Self {
        MacroSyntax {
            open: config.open,
            separator: config.separator,
            close: config.close,
        }
    }
}

/// A single route mapping a pattern and verb to a handler reference.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/users/{id}`.
    pub pattern: String,

    /// Verb restriction; omitted, `""`, `"*"` or `"ANY"` match every verb.
    #[serde(default)]
    pub verb: Option<String>,

    /// Opaque handler reference handed back on a match.
    pub handler: String,

    /// Optional unique name for reverse routing.
    #[serde(default)]
    pub alias: Option<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), overridden by `RUST_LOG`.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
