//! Macro flavors and constraint compilation.
//!
//! # Responsibilities
//! - Define the macro delimiters used by the template compiler
//! - Turn a macro's raw constraint text into a compiled [`Constraint`]
//! - Decide whether a captured value satisfies a constraint
//!
//! # Design Decisions
//! - The flavor is table-wide configuration, a tagged enum rather than a trait object
//! - Wildcards are translated to an anchored regex once, at compile time
//! - Both constrained flavors share a single `Constraint::is_match` contract
//! - Constraints compare by source text; two routes with the same constraint
//!   source are structurally indistinguishable

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::routing::error::PatternError;

/// Compiled regex size cap for one constraint.
const MAX_CONSTRAINT_REGEX_SIZE: usize = 1 << 20;

/// How macro constraints are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroFlavor {
    /// `{name}` captures any non-empty run; constraints are rejected.
    #[default]
    Simple,
    /// `{name:glob}` where `*` matches any run and `?` one character.
    Wildcard,
    /// `{name:regex}`, matched against the whole capture.
    Regex,
}

impl MacroFlavor {
    /// Compile the constraint text of macro `name` found in `pattern`.
    ///
    /// An absent or empty constraint yields `None` (match anything non-empty).
    pub fn compile_constraint(
        &self,
        pattern: &str,
        name: &str,
        raw: Option<&str>,
    ) -> Result<Option<Constraint>, PatternError> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        let invalid = |reason: String| PatternError::InvalidConstraint {
            pattern: pattern.to_string(),
            name: name.to_string(),
            constraint: raw.to_string(),
            reason,
        };
        let build = |expression: &str| {
            RegexBuilder::new(expression)
                .size_limit(MAX_CONSTRAINT_REGEX_SIZE)
                .build()
                .map_err(|e| invalid(e.to_string()))
        };

        let expression = match self {
            MacroFlavor::Simple => {
                return Err(PatternError::ConstraintNotSupported {
                    pattern: pattern.to_string(),
                    name: name.to_string(),
                })
            }
            MacroFlavor::Wildcard => glob_to_regex(raw).map_err(invalid)?,
            MacroFlavor::Regex => {
                // Compile alone first so the expression cannot escape the anchoring group.
                build(raw)?;
                format!(r"\A(?:{})\z", raw)
            }
        };
        let regex = build(&expression)?;

        Ok(Some(Constraint {
            source: raw.to_string(),
            regex,
        }))
    }
}

impl fmt::Display for MacroFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacroFlavor::Simple => write!(f, "simple"),
            MacroFlavor::Wildcard => write!(f, "wildcard"),
            MacroFlavor::Regex => write!(f, "regex"),
        }
    }
}

/// Delimiters recognised by the template compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroSyntax {
    pub open: char,
    pub separator: char,
    pub close: char,
}

impl Default for MacroSyntax {
    fn default() -> Self {
        Self {
            open: '{',
            separator: ':',
            close: '}',
        }
    }
}

/// A compiled macro constraint.
#[derive(Debug, Clone)]
pub struct Constraint {
    source: String,
    regex: Regex,
}

impl Constraint {
    /// The constraint exactly as written in the pattern.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if the whole `value` satisfies the constraint.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Constraint {}

/// Translate a glob into an anchored regex.
fn glob_to_regex(glob: &str) -> Result<String, String> {
    let mut out = String::with_capacity(glob.len() * 2 + 8);
    out.push_str("^(?s:");

    let mut chars = glob.chars();
    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '\\' => match chars.next() {
                Some(escaped) => out.push_str(&regex::escape(&escaped.to_string())),
                None => return Err("dangling escape at end of wildcard".to_string()),
            },
            other => out.push_str(&regex::escape(&other.to_string())),
        }
    }

    out.push_str(")$");
    Ok(out)
}
