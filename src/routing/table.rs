//! Route table: registration and lookup.
//!
//! # Responsibilities
//! - Compile and store routes in insertion order
//! - Reject structurally identical `(template, verb)` registrations
//! - Resolve a `(path, verb)` pair to the single most specific route
//!
//! # Design Decisions
//! - `register` takes `&mut self`, `lookup` takes `&self`: population ends
//!   before concurrent reads begin, no locks on the read path
//! - Routes are never mutated, reordered or removed after insertion
//! - Candidates are indexed by segment count; this does not change results
//! - A missing verb matches only `ANY` routes unless configured otherwise

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::routing::error::RegisterError;
use crate::routing::macros::{MacroFlavor, MacroSyntax};
use crate::routing::matcher::{match_into, MacroBindings};
use crate::routing::specificity::Specificity;
use crate::routing::template::{split_path, PathTemplate, TemplateShape};

/// Request-method discriminator of a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Matches every verb.
    Any,
    Method(String),
}

impl Verb {
    pub const GET: &'static str = "GET";
    pub const HEAD: &'static str = "HEAD";
    pub const POST: &'static str = "POST";
    pub const PUT: &'static str = "PUT";
    pub const DELETE: &'static str = "DELETE";
    pub const TRACE: &'static str = "TRACE";
    pub const OPTIONS: &'static str = "OPTIONS";
    pub const CONNECT: &'static str = "CONNECT";
    pub const PATCH: &'static str = "PATCH";

    /// Returns true if a request carrying `requested` may use this route.
    pub fn accepts(&self, requested: Option<&str>, policy: MissingVerbPolicy) -> bool {
        match (self, requested) {
            (Verb::Any, _) => true,
            (Verb::Method(method), Some(requested)) => method == requested,
            (Verb::Method(_), None) => policy == MissingVerbPolicy::MatchAll,
        }
    }
}

impl FromStr for Verb {
    type Err = Infallible;

    /// `""`, `"*"` and `"ANY"` (any case) parse as [`Verb::Any`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "*" || s.eq_ignore_ascii_case("ANY") {
            Ok(Verb::Any)
        } else {
            Ok(Verb::Method(s.to_string()))
        }
    }
}

impl From<&str> for Verb {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(verb) => verb,
            Err(never) => match never {},
        }
    }
}

impl From<Option<&str>> for Verb {
    fn from(s: Option<&str>) -> Self {
        s.map_or(Verb::Any, Verb::from)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Any => f.pad("ANY"),
            Verb::Method(method) => f.pad(method),
        }
    }
}

/// Treatment of lookups that carry no verb.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingVerbPolicy {
    /// Only `ANY` routes are candidates.
    #[default]
    AnyOnly,
    /// Every route is a candidate regardless of its verb.
    MatchAll,
}

/// A registered mapping from template and verb to a handler.
#[derive(Debug, Clone)]
pub struct Route<H> {
    template: PathTemplate,
    verb: Verb,
    handler: H,
    index: usize,
    alias: Option<String>,
}

impl<H> Route<H> {
    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    pub fn pattern(&self) -> &str {
        self.template.raw_pattern()
    }

    pub fn verb(&self) -> &Verb {
        &self.verb
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Position in registration order, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

/// The winning route of a lookup together with its captures.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a, H> {
    pub route: &'a Route<H>,
    pub bindings: MacroBindings,
}

impl<'a, H> RouteMatch<'a, H> {
    pub fn handler(&self) -> &'a H {
        &self.route.handler
    }
}

/// Insertion-ordered collection of compiled routes.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    flavor: MacroFlavor,
    syntax: MacroSyntax,
    missing_verb: MissingVerbPolicy,
    routes: Vec<Route<H>>,
    by_segment_count: HashMap<usize, Vec<usize>>,
    signatures: HashMap<(TemplateShape, Verb), usize>,
    aliases: HashMap<String, usize>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new(MacroFlavor::default())
    }
}

impl<H> RouteTable<H> {
    /// Create an empty table with default delimiters and missing-verb policy.
    pub fn new(flavor: MacroFlavor) -> Self {
        Self::with_options(flavor, MacroSyntax::default(), MissingVerbPolicy::default())
    }

    pub fn with_options(
        flavor: MacroFlavor,
        syntax: MacroSyntax,
        missing_verb: MissingVerbPolicy,
    ) -> Self {
        Self {
            flavor,
            syntax,
            missing_verb,
            routes: Vec::new(),
            by_segment_count: HashMap::new(),
            signatures: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    pub fn flavor(&self) -> MacroFlavor {
        self.flavor
    }

    pub fn syntax(&self) -> MacroSyntax {
        self.syntax
    }

    pub fn missing_verb_policy(&self) -> MissingVerbPolicy {
        self.missing_verb
    }

    /// Compile `pattern` and append it as a new route.
    ///
    /// Fails without touching the table if the pattern is malformed or a
    /// structurally identical route with the same verb already exists.
    pub fn register(
        &mut self,
        pattern: &str,
        verb: impl Into<Verb>,
        handler: H,
    ) -> Result<&Route<H>, RegisterError> {
        self.insert(pattern, verb.into(), handler, None)
    }

    /// Like [`register`](Self::register), also binding a unique alias.
    pub fn register_with_alias(
        &mut self,
        pattern: &str,
        verb: impl Into<Verb>,
        handler: H,
        alias: impl Into<String>,
    ) -> Result<&Route<H>, RegisterError> {
        self.insert(pattern, verb.into(), handler, Some(alias.into()))
    }

    fn insert(
        &mut self,
        pattern: &str,
        verb: Verb,
        handler: H,
        alias: Option<String>,
    ) -> Result<&Route<H>, RegisterError> {
        let template = PathTemplate::compile(pattern, self.flavor, self.syntax).map_err(|e| {
            tracing::warn!(pattern, error = %e, "Rejected malformed pattern");
            e
        })?;

        let signature = (template.shape(), verb.clone());
        if let Some(&existing) = self.signatures.get(&signature) {
            let existing = self.routes[existing].pattern().to_string();
            tracing::warn!(pattern, existing = %existing, verb = %verb, "Rejected conflicting route");
            return Err(RegisterError::Conflict {
                pattern: pattern.to_string(),
                existing,
                verb: verb.to_string(),
            });
        }

        if let Some(alias) = &alias {
            if let Some(&existing) = self.aliases.get(alias) {
                return Err(RegisterError::AliasConflict {
                    alias: alias.clone(),
                    pattern: pattern.to_string(),
                    existing: self.routes[existing].pattern().to_string(),
                });
            }
        }

        let index = self.routes.len();
        self.signatures.insert(signature, index);
        self.by_segment_count
            .entry(template.segments().len())
            .or_default()
            .push(index);
        if let Some(alias) = &alias {
            self.aliases.insert(alias.clone(), index);
        }

        tracing::debug!(
            pattern,
            verb = %verb,
            index,
            alias = alias.as_deref().unwrap_or(""),
            "Route registered"
        );

        self.routes.push(Route {
            template,
            verb,
            handler,
            index,
            alias,
        });
        Ok(&self.routes[index])
    }

    /// Find the most specific route for `path` and `verb`.
    pub fn lookup(&self, path: &str, verb: Option<&str>) -> Option<RouteMatch<'_, H>> {
        let segments = split_path(path);
        let candidates = self.by_segment_count.get(&segments.len())?;

        let mut best: Option<(Specificity<'_>, &Route<H>, MacroBindings)> = None;
        for &index in candidates {
            let route = &self.routes[index];
            if !route.verb.accepts(verb, self.missing_verb) {
                continue;
            }

            let mut bindings = MacroBindings::default();
            let matched = route
                .template
                .segments()
                .iter()
                .zip(&segments)
                .all(|(template, concrete)| match_into(template, concrete, &mut bindings));
            if !matched {
                continue;
            }

            let rank = Specificity::new(&route.template, route.index);
            if best.as_ref().map_or(true, |(current, _, _)| rank > *current) {
                best = Some((rank, route, bindings));
            }
        }

        match best {
            Some((_, route, bindings)) => {
                tracing::trace!(path, pattern = route.pattern(), "Route matched");
                Some(RouteMatch { route, bindings })
            }
            None => {
                tracing::trace!(path, "No route matched");
                None
            }
        }
    }

    /// Number of registered routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Routes in registration order.
    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    pub fn by_alias(&self, alias: &str) -> Option<&Route<H>> {
        self.aliases.get(alias).map(|&index| &self.routes[index])
    }
}
