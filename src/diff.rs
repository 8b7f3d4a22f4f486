//! Recursive structural diff of a value against a [`Shape`].
//!
//! The result is `None` when the value conforms, otherwise a tree mirroring
//! where things went wrong:
//!
//! - `Mismatch`: present but wrong (`{ actual, expected, value }`)
//! - `Unexpected`: an extra key in strict mode (`{ unexpected, value }`)
//! - `Nested`: per property / per array index children
//!
//! Rules are tried in a fixed order and the first one that applies decides:
//! identity, `Any`, literals, `Null`/`Undefined`, modifiers, primitive
//! markers, class markers, array patterns, object patterns. The order is
//! load-bearing (e.g. `Any` must win before any structural handling).
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::depth::{Bounded, Guard, Unbounded};
use crate::error::Result;
use crate::registry;
use crate::shape::{Literal, Shape};
use crate::value::{preview, Record, Value, UNDEFINED};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Per-call configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Tolerate value keys the object pattern does not declare.
    pub subset: bool,
    /// Fail with `Error::DepthExceeded` past this many nested levels.
    pub max_depth: Option<usize>,
}

/// Either side of a mismatch: a type name or a literal value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Label {
    Type(String),
    Literal(Value),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Mismatch {
    /// Left out of the JSON when a literal met a missing value.
    #[serde(skip_serializing_if = "Label::is_undefined")]
    pub actual: Label,
    pub expected: Label,
    /// Offending value; literal mismatches carry it in `actual` instead.
    #[serde(skip_serializing_if = "is_absent")]
    pub value: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Diff {
    Mismatch(Mismatch),
    Unexpected { unexpected: String, value: Value },
    /// Never empty. Equality ignores key order.
    Nested(IndexMap<String, Diff>),
}

// ————————————————————————————————————————————————————————————————————————————
// FRONT API
// ————————————————————————————————————————————————————————————————————————————

/// Strict diff with no depth limit. Never fails.
pub fn diff(shape: &Shape, value: &Value) -> Option<Diff> {
    let Ok(result) = Walker::new(false, Unbounded).visit(shape, value);
    result
}

/// Diff with explicit options; only a depth limit can make this fail.
pub fn diff_with(shape: &Shape, value: &Value, options: &Options) -> Result<Option<Diff>> {
    match options.max_depth {
        None => {
            let Ok(result) = Walker::new(options.subset, Unbounded).visit(shape, value);
            Ok(result)
        }
        Some(limit) => Walker::new(options.subset, Bounded::new(limit)).visit(shape, value),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// WALKER
// ————————————————————————————————————————————————————————————————————————————

struct Walker<G> {
    subset: bool,
    guard: G,
}

impl<G: Guard> Walker<G> {
    fn new(subset: bool, guard: G) -> Self {
        Self { subset, guard }
    }

    fn visit(&mut self, shape: &Shape, value: &Value) -> Result<Option<Diff>, G::Error> {
        if shape.is_identical(value) {
            return Ok(None);
        }
        let out = match shape {
            Shape::Any => value
                .is_undefined()
                .then(|| Diff::mismatch(value, "Any")),
            Shape::Literal(lit) => Some(Diff::literal(lit, value)),
            Shape::Null => Some(Diff::mismatch(value, "Null")),
            Shape::Undefined => Some(Diff::mismatch(value, "Undefined")),
            Shape::Wrapped(modifier, inner) => {
                if modifier.admits(value) {
                    None
                } else {
                    return self.visit(inner, value);
                }
            }
            Shape::Primitive(marker) => {
                (!registry::check(*marker, value)).then(|| Diff::mismatch(value, marker.name()))
            }
            Shape::Class(class) => {
                let is_instance = matches!(value, Value::Instance(inst) if inst.is_instance_of(class));
                // Loose on purpose: an unrelated class with the same name passes too.
                let same_name = value.type_name() == class.name();
                (!is_instance && !same_name).then(|| Diff::mismatch(value, class.name()))
            }
            Shape::Array(element) => return self.visit_array(element, value),
            Shape::Object(pattern) => return self.visit_object(pattern, value),
        };
        Ok(out)
    }

    fn visit_array(&mut self, element: &Shape, value: &Value) -> Result<Option<Diff>, G::Error> {
        let Value::Array(items) = value else {
            return Ok(Some(Diff::mismatch(value, "Array")));
        };
        let mut nested = IndexMap::new();
        for (index, item) in items.iter().enumerate() {
            let key = index.to_string();
            if let Some(d) = self.child(&key, element, item)? {
                nested.insert(key, d);
            }
        }
        Ok(Diff::nested(nested))
    }

    fn visit_object(
        &mut self,
        pattern: &IndexMap<String, Shape>,
        value: &Value,
    ) -> Result<Option<Diff>, G::Error> {
        let Some(fields) = value.fields() else {
            return Ok(Some(Diff::mismatch(value, "Object")));
        };
        let mut nested = IndexMap::new();

        // extra keys first; they can never collide with pattern keys below
        if !self.subset {
            for (key, extra) in extra_keys(pattern, fields) {
                nested.insert(key.clone(), Diff::unexpected(extra));
            }
        }

        for (key, sub) in pattern {
            let prop = fields.get(key).unwrap_or(&UNDEFINED);
            if let Some(d) = self.child(key, sub, prop)? {
                nested.insert(key.clone(), d);
            }
        }
        Ok(Diff::nested(nested))
    }

    fn child(&mut self, key: &str, shape: &Shape, value: &Value) -> Result<Option<Diff>, G::Error> {
        self.guard.enter(key)?;
        let out = self.visit(shape, value)?;
        self.guard.leave();
        Ok(out)
    }
}

/// Own keys of the value that the pattern does not declare, in value order.
pub(crate) fn extra_keys<'a>(
    pattern: &'a IndexMap<String, Shape>,
    fields: &'a Record,
) -> impl Iterator<Item = (&'a String, &'a Value)> {
    fields.iter().filter(|(key, _)| !pattern.contains_key(key.as_str()))
}

impl Label {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Label::Literal(Value::Undefined))
    }
}

fn is_absent(value: &Option<Value>) -> bool {
    matches!(value, None | Some(Value::Undefined))
}

// ————————————————————————————————————————————————————————————————————————————
// DIFF
// ————————————————————————————————————————————————————————————————————————————

impl Diff {
    /// Type mismatch: `actual` is the value's runtime type name.
    pub fn mismatch(value: &Value, expected: impl Into<String>) -> Self {
        Diff::Mismatch(Mismatch {
            actual: Label::Type(value.type_name().to_string()),
            expected: Label::Type(expected.into()),
            value: Some(value.clone()),
        })
    }

    /// Literal mismatch: both sides are the raw values, no `value` slot.
    pub fn literal(expected: &Literal, actual: &Value) -> Self {
        Diff::Mismatch(Mismatch {
            actual: Label::Literal(actual.clone()),
            expected: Label::Literal(expected.to_value()),
            value: None,
        })
    }

    pub fn unexpected(value: &Value) -> Self {
        Diff::Unexpected {
            unexpected: value.type_name().to_string(),
            value: value.clone(),
        }
    }

    /// `None` for an empty map, so an empty composite never escapes.
    pub fn nested(children: IndexMap<String, Diff>) -> Option<Self> {
        (!children.is_empty()).then_some(Diff::Nested(children))
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Diff::Nested(_))
    }

    /// Child at `key` of a nested diff.
    pub fn get(&self, key: &str) -> Option<&Diff> {
        match self {
            Diff::Nested(children) => children.get(key),
            _ => None,
        }
    }

    /// Leaves with their dotted key paths, depth first in report order.
    /// A leaf at the root has the empty path.
    pub fn paths(&self) -> Vec<(String, &Diff)> {
        fn walk<'a>(diff: &'a Diff, prefix: &str, out: &mut Vec<(String, &'a Diff)>) {
            match diff {
                Diff::Nested(children) => {
                    for (key, child) in children {
                        let path = if prefix.is_empty() {
                            key.clone()
                        } else {
                            format!("{prefix}.{key}")
                        };
                        walk(child, &path, out);
                    }
                }
                leaf => out.push((prefix.to_string(), leaf)),
            }
        }
        let mut out = Vec::new();
        walk(self, "", &mut out);
        out
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Diff::Nested(children) => children.values().map(Diff::leaf_count).sum(),
            _ => 1,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Type(name) => f.write_str(name),
            Label::Literal(value) => f.write_str(&preview(value)),
        }
    }
}

/// One-line description of a leaf; nested diffs list their leaf count.
impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diff::Mismatch(Mismatch { actual, expected, value: Some(value) }) => {
                write!(f, "expected {expected}, got {actual} ({})", preview(value))
            }
            Diff::Mismatch(Mismatch { actual, expected, value: None }) => {
                write!(f, "expected {expected}, got {actual}")
            }
            Diff::Unexpected { unexpected, value } => {
                write!(f, "unexpected {unexpected} ({})", preview(value))
            }
            Diff::Nested(_) => write!(f, "{} mismatches", self.leaf_count()),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
