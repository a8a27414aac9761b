//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check delimiter and address sanity
//! - Compile every route and detect conflicting routes before a table is built
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DispatchConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::DispatchConfig;
use crate::routing::{MacroSyntax, RegisterError, RouteTable, Verb};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index}: pattern `{pattern}` must start with `/`")]
    UnrootedPattern { index: usize, pattern: String },

    #[error("route #{index} (`{pattern}`): handler must not be empty")]
    EmptyHandler { index: usize, pattern: String },

    #[error("route #{index} (`{pattern}`): alias must not be empty")]
    EmptyAlias { index: usize, pattern: String },

    #[error("route #{index}: {source}")]
    Route {
        index: usize,
        #[source]
        source: RegisterError,
    },

    #[error("macro delimiters must be three distinct characters other than `/`")]
    InvalidSyntax,

    #[error("metrics address `{0}` is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Validate `config`, returning every problem found.
pub fn validate_config(config: &DispatchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let syntax = MacroSyntax::from(&config.router.syntax);
    let delimiters: HashSet<char> = [syntax.open, syntax.separator, syntax.close].into();
    let syntax_ok = delimiters.len() == 3 && !delimiters.contains(&'/');
    if !syntax_ok {
        errors.push(ValidationError::InvalidSyntax);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    // Dry-run registration into a throwaway table surfaces malformed patterns,
    // conflicts and duplicate aliases exactly as a real build would.
    let mut table = RouteTable::with_options(
        config.router.macro_flavor,
        syntax,
        config.router.missing_verb,
    );

    for (index, route) in config.routes.iter().enumerate() {
        if !route.pattern.starts_with('/') {
            errors.push(ValidationError::UnrootedPattern {
                index,
                pattern: route.pattern.clone(),
            });
        }
        if route.handler.trim().is_empty() {
            errors.push(ValidationError::EmptyHandler {
                index,
                pattern: route.pattern.clone(),
            });
        }

        if !syntax_ok {
            continue;
        }

        let verb = Verb::from(route.verb.as_deref());
        let registered = match route.alias.as_deref() {
            Some(alias) if alias.trim().is_empty() => {
                errors.push(ValidationError::EmptyAlias {
                    index,
                    pattern: route.pattern.clone(),
                });
                table.register(&route.pattern, verb, ())
            }
            Some(alias) => table.register_with_alias(&route.pattern, verb, (), alias),
            None => table.register(&route.pattern, verb, ()),
        };
        if let Err(source) = registered {
            errors.push(ValidationError::Route { index, source });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
