//! Path-template compiler.
//!
//! # Responsibilities
//! - Split a pattern into `/`-delimited segments
//! - Decompose each segment into literal runs and macro tokens
//! - Provide the structural shape used for conflict detection
//! - Render a concrete path back from a template (reverse routing)
//!
//! # Design Decisions
//! - Leading and trailing separators are dropped; `/` is the zero-segment root
//! - Decomposition is flavor-independent; the flavor only compiles constraints
//! - Delimiters nested inside a macro body are balanced, so `{id:\d{3}}` works
//! - Two macros with no literal between them are rejected, capture boundaries
//!   would be underdetermined

use std::collections::HashSet;
use std::fmt;

use crate::routing::error::{PatternError, RenderError};
use crate::routing::macros::{Constraint, MacroFlavor, MacroSyntax};
use crate::routing::matcher::MacroBindings;

/// Split a path or pattern into its segments.
pub fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

/// A named placeholder inside a segment.
#[derive(Debug, Clone)]
pub struct MacroToken {
    name: String,
    constraint: Option<Constraint>,
}

impl MacroToken {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    /// Returns true if `value` is an acceptable capture for this macro.
    pub fn accepts(&self, value: &str) -> bool {
        !value.is_empty()
            && self
                .constraint
                .as_ref()
                .map_or(true, |constraint| constraint.is_match(value))
    }
}

/// One piece of a segment template.
#[derive(Debug, Clone)]
pub enum Part {
    Literal(String),
    Macro(MacroToken),
}

/// Template for a single path segment.
#[derive(Debug, Clone)]
pub struct SegmentTemplate {
    parts: Vec<Part>,
    literal_char_count: usize,
}

impl SegmentTemplate {
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Number of literal characters; feeds specificity only.
    pub fn literal_char_count(&self) -> usize {
        self.literal_char_count
    }

    /// The exact text of a segment without macros.
    pub fn literal_text(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [] => Some(""),
            [Part::Literal(text)] => Some(text),
            _ => None,
        }
    }

    fn shape(&self) -> Vec<ShapePart> {
        self.parts
            .iter()
            .map(|part| match part {
                Part::Literal(text) => ShapePart::Literal(text.clone()),
                Part::Macro(token) => {
                    ShapePart::Macro(token.constraint().map(|c| c.source().to_string()))
                }
            })
            .collect()
    }
}

/// Structural identity of a template: literal text and constraint sources,
/// with macro names erased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateShape(Vec<Vec<ShapePart>>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ShapePart {
    Literal(String),
    Macro(Option<String>),
}

/// A compiled pattern.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    raw_pattern: String,
    segments: Vec<SegmentTemplate>,
}

impl PathTemplate {
    /// Compile `pattern` using the given flavor and delimiters.
    pub fn compile(
        pattern: &str,
        flavor: MacroFlavor,
        syntax: MacroSyntax,
    ) -> Result<Self, PatternError> {
        let mut seen = HashSet::new();
        let segments = split_path(pattern)
            .into_iter()
            .map(|component| compile_segment(pattern, component, flavor, syntax, &mut seen))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw_pattern: pattern.to_string(),
            segments,
        })
    }

    pub fn raw_pattern(&self) -> &str {
        &self.raw_pattern
    }

    pub fn segments(&self) -> &[SegmentTemplate] {
        &self.segments
    }

    pub fn has_macros(&self) -> bool {
        self.segments.iter().any(|s| s.literal_text().is_none())
    }

    pub fn shape(&self) -> TemplateShape {
        TemplateShape(self.segments.iter().map(SegmentTemplate::shape).collect())
    }

    /// Build a concrete path by substituting `values` for each macro.
    ///
    /// Every value must be non-empty, free of `/`, and satisfy its constraint.
    pub fn render(&self, values: &MacroBindings) -> Result<String, RenderError> {
        let mut path = String::with_capacity(self.raw_pattern.len());

        for segment in &self.segments {
            path.push('/');
            for part in &segment.parts {
                match part {
                    Part::Literal(text) => path.push_str(text),
                    Part::Macro(token) => {
                        let value = values.get(token.name()).ok_or_else(|| {
                            RenderError::MissingValue {
                                pattern: self.raw_pattern.clone(),
                                name: token.name().to_string(),
                            }
                        })?;
                        if value.contains('/') || !token.accepts(value) {
                            return Err(RenderError::InvalidValue {
                                pattern: self.raw_pattern.clone(),
                                name: token.name().to_string(),
                                value: value.to_string(),
                            });
                        }
                        path.push_str(value);
                    }
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_pattern)
    }
}

fn compile_segment(
    pattern: &str,
    component: &str,
    flavor: MacroFlavor,
    syntax: MacroSyntax,
    seen: &mut HashSet<String>,
) -> Result<SegmentTemplate, PatternError> {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut literal_char_count = 0;
    let mut chars = component.chars();

    while let Some(c) = chars.next() {
        if c != syntax.open {
            literal.push(c);
            literal_char_count += 1;
            continue;
        }

        let mut body = String::new();
        let mut depth = 1usize;
        let mut closed = false;
        for c in chars.by_ref() {
            if c == syntax.open {
                depth += 1;
            } else if c == syntax.close {
                depth -= 1;
                if depth == 0 {
                    closed = true;
                    break;
                }
            }
            body.push(c);
        }

        if !closed {
            return Err(PatternError::UnterminatedMacro {
                pattern: pattern.to_string(),
                segment: component.to_string(),
            });
        }

        if !literal.is_empty() {
            parts.push(Part::Literal(std::mem::take(&mut literal)));
        } else if matches!(parts.last(), Some(Part::Macro(_))) {
            return Err(PatternError::AdjacentMacros {
                pattern: pattern.to_string(),
                segment: component.to_string(),
            });
        }

        let (name, raw_constraint) = match body.split_once(syntax.separator) {
            Some((name, constraint)) => (name, Some(constraint)),
            None => (body.as_str(), None),
        };

        if name.is_empty() {
            return Err(PatternError::EmptyMacroName {
                pattern: pattern.to_string(),
            });
        }
        if !seen.insert(name.to_string()) {
            return Err(PatternError::DuplicateMacroName {
                pattern: pattern.to_string(),
                name: name.to_string(),
            });
        }

        let constraint = flavor.compile_constraint(pattern, name, raw_constraint)?;
        parts.push(Part::Macro(MacroToken {
            name: name.to_string(),
            constraint,
        }));
    }

    if !literal.is_empty() {
        parts.push(Part::Literal(literal));
    }

    Ok(SegmentTemplate {
        parts,
        literal_char_count,
    })
}
