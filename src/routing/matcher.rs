//! Segment matching.
//!
//! # Responsibilities
//! - Compare one segment template against one concrete path segment
//! - Extract macro captures on success
//!
//! # Design Decisions
//! - Pure literal segments match by exact, case-sensitive equality
//! - Literal runs are anchored: first at the start, last at the end, interior
//!   ones as the separators between captures
//! - Captures are never empty
//! - When an interior literal occurs more than once, occurrences are tried
//!   leftmost first and the first complete assignment wins, so a constraint
//!   rejecting a short capture falls back to a longer one

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::routing::template::{MacroToken, Part, SegmentTemplate};

/// Macro captures of a match, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroBindings(Vec<(String, String)>);

impl MacroBindings {
    /// Value captured for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, name: &str, value: &str) {
        self.0.push((name.to_string(), value.to_string()));
    }
}

impl<K, V> FromIterator<(K, V)> for MacroBindings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for MacroBindings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Match `concrete` against `template`, returning the captures on success.
pub fn match_segment(template: &SegmentTemplate, concrete: &str) -> Option<MacroBindings> {
    let mut bindings = MacroBindings::default();
    match_into(template, concrete, &mut bindings).then_some(bindings)
}

/// Like [`match_segment`], appending captures to `bindings`.
///
/// On failure `bindings` is left as it was.
pub(crate) fn match_into(
    template: &SegmentTemplate,
    concrete: &str,
    bindings: &mut MacroBindings,
) -> bool {
    if let Some(text) = template.literal_text() {
        return text == concrete;
    }

    let mark = bindings.len();
    if match_parts(template.parts(), concrete, bindings) {
        true
    } else {
        bindings.0.truncate(mark);
        false
    }
}

fn match_parts(parts: &[Part], input: &str, bindings: &mut MacroBindings) -> bool {
    match parts.split_first() {
        None => input.is_empty(),
        Some((Part::Literal(text), rest)) => input
            .strip_prefix(text.as_str())
            .is_some_and(|remaining| match_parts(rest, remaining, bindings)),
        Some((Part::Macro(token), rest)) => match_macro(token, rest, input, bindings),
    }
}

fn match_macro(
    token: &MacroToken,
    rest: &[Part],
    input: &str,
    bindings: &mut MacroBindings,
) -> bool {
    let next = match rest.first() {
        None => {
            if token.accepts(input) {
                bindings.push(token.name(), input);
                return true;
            }
            return false;
        }
        Some(Part::Literal(next)) => next.as_str(),
        // Compiler rejects adjacent macros.
        Some(Part::Macro(_)) => return false,
    };

    // Trailing literal: anchored at the end.
    if rest.len() == 1 {
        return match input.strip_suffix(next) {
            Some(value) if token.accepts(value) => {
                bindings.push(token.name(), value);
                true
            }
            _ => false,
        };
    }

    let Some(first) = input.chars().next() else {
        return false;
    };
    let mut start = first.len_utf8();

    while let Some(found) = input[start..].find(next) {
        let at = start + found;
        let value = &input[..at];
        if token.accepts(value) {
            let mark = bindings.len();
            bindings.push(token.name(), value);
            if match_parts(rest, &input[at..], bindings) {
                return true;
            }
            bindings.0.truncate(mark);
        }
        start = at + input[at..].chars().next().map_or(1, char::len_utf8);
    }

    false
}
