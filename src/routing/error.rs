//! Routing error types.
//!
//! # Design Decisions
//! - Every error is a configuration mistake: local, synchronous, non-retryable
//! - Lookup has no error type; a missing route is `None`
//! - Errors carry the offending pattern text for diagnostics

use thiserror::Error;

/// A pattern failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unterminated macro in segment `{segment}` of pattern `{pattern}`")]
    UnterminatedMacro { pattern: String, segment: String },

    #[error("empty macro name in pattern `{pattern}`")]
    EmptyMacroName { pattern: String },

    #[error("macro `{name}` is declared twice in pattern `{pattern}`")]
    DuplicateMacroName { pattern: String, name: String },

    #[error("adjacent macros in segment `{segment}` of pattern `{pattern}` need a literal between them")]
    AdjacentMacros { pattern: String, segment: String },

    #[error("macro `{name}` in pattern `{pattern}` has a constraint, but the simple flavor does not support constraints")]
    ConstraintNotSupported { pattern: String, name: String },

    #[error("invalid constraint `{constraint}` for macro `{name}` in pattern `{pattern}`: {reason}")]
    InvalidConstraint {
        pattern: String,
        name: String,
        constraint: String,
        reason: String,
    },
}

/// A route could not be added to the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error(transparent)]
    Malformed(#[from] PatternError),

    #[error("route `{pattern}` ({verb}) conflicts with previously registered route `{existing}`")]
    Conflict {
        pattern: String,
        existing: String,
        verb: String,
    },

    #[error("alias `{alias}` for route `{pattern}` is already bound to route `{existing}`")]
    AliasConflict {
        alias: String,
        pattern: String,
        existing: String,
    },
}

/// A concrete path could not be rendered from a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("no route is registered under alias `{0}`")]
    UnknownAlias(String),

    #[error("missing value for macro `{name}` in pattern `{pattern}`")]
    MissingValue { pattern: String, name: String },

    #[error("value `{value}` for macro `{name}` in pattern `{pattern}` is not a valid segment")]
    InvalidValue {
        pattern: String,
        name: String,
        value: String,
    },
}
