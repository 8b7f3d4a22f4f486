//! Assertion helper: turns a non-empty diff into an error with a readable report.
use colored::Colorize;
use thiserror::Error;

use crate::diff::{diff, diff_with, Diff, Options};
use crate::error::Result;
use crate::shape::Shape;
use crate::value::Value;

/// How an [`AssertionError`] renders its message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssertOptions {
    /// ANSI colors in the path listing.
    pub color: bool,
}

/// The value did not conform. `Display` gives the headline, the JSON report,
/// then one line per mismatch.
#[derive(Debug, Error)]
#[error("Interface not as expected:\n{report}\n\n{listing}")]
pub struct AssertionError {
    pub diff: Diff,
    report: String,
    listing: String,
}

impl AssertionError {
    pub fn new(diff: Diff) -> Self {
        Self::with_options(diff, &AssertOptions::default())
    }

    pub fn with_options(diff: Diff, options: &AssertOptions) -> Self {
        let report = render_report(&diff);
        let listing = render_paths(&diff, options.color).trim_end().to_string();
        Self { diff, report, listing }
    }

    /// Pretty JSON rendering of the diff tree.
    pub fn report(&self) -> &str {
        &self.report
    }

    /// `path: expected X, got Y` lines.
    pub fn listing(&self) -> &str {
        &self.listing
    }
}

pub fn assert_conforms(shape: &Shape, value: &Value) -> Result<(), AssertionError> {
    match diff(shape, value) {
        None => Ok(()),
        Some(d) => Err(fail(d, &AssertOptions::default())),
    }
}

/// Like [`assert_conforms`] but with explicit options; depth errors pass through.
pub fn assert_conforms_with(
    shape: &Shape,
    value: &Value,
    options: &Options,
    render: &AssertOptions,
) -> Result<()> {
    match diff_with(shape, value, options)? {
        None => Ok(()),
        Some(d) => Err(fail(d, render).into()),
    }
}

fn fail(d: Diff, render: &AssertOptions) -> AssertionError {
    tracing::debug!(mismatches = d.leaf_count(), "value does not conform to shape");
    AssertionError::with_options(d, render)
}

/// Serialized key-path structure, pretty-printed.
pub fn render_report(d: &Diff) -> String {
    serde_json::to_string_pretty(d).unwrap_or_else(|error| format!("<unrenderable diff: {error}>"))
}

/// One line per leaf: `path: expected X, got Y (value)`.
pub fn render_paths(d: &Diff, color: bool) -> String {
    let mut out = String::new();
    for (path, leaf) in d.paths() {
        let path = if path.is_empty() { "<root>".to_string() } else { path };
        let line = match leaf {
            Diff::Unexpected { .. } if color => format!("{}: {}", path.bold(), leaf.to_string().yellow()),
            _ if color => format!("{}: {}", path.bold(), leaf.to_string().red()),
            _ => format!("{path}: {leaf}"),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Panic unless `$value` conforms to `$shape`; the panic message is the full report.
#[macro_export]
macro_rules! assert_shape {
    ($shape:expr, $value:expr $(,)?) => {
        if let Err(error) = $crate::assert::assert_conforms(&$shape, &$value) {
            panic!("{error}");
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::*;
    use serde_json::json;

    #[test]
    fn conforming_values_pass() {
        let shape = object([("id", NUMBER), ("name", STRING)]);
        assert!(assert_conforms(&shape, &json!({"id": 1, "name": "x"}).into()).is_ok());
        crate::assert_shape!(shape, Value::from(json!({"id": 2, "name": "y"})));
    }

    #[test]
    fn failure_message_carries_json_report_and_paths() {
        let shape = object([("id", NUMBER)]);
        let err = assert_conforms(&shape, &json!({"id": "1"}).into()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Interface not as expected:\n"), "{message}");
        let body = message.trim_start_matches("Interface not as expected:\n");
        let (json_part, listing) = body.split_once("\n\n").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(json_part).unwrap();
        assert_eq!(parsed, json!({"id": {"actual": "String", "expected": "Number", "value": "1"}}));
        assert_eq!(err.report(), json_part);
        assert_eq!(listing, "id: expected Number, got String (\"1\")");
        assert_eq!(err.listing(), listing);
    }

    #[test]
    fn color_only_touches_the_listing() {
        colored::control::set_override(true);
        let shape = object([("id", NUMBER)]);
        let value: Value = json!({"id": "1"}).into();
        let colored = AssertOptions { color: true };
        let Err(crate::Error::Assertion(err)) =
            assert_conforms_with(&shape, &value, &Options::default(), &colored)
        else {
            panic!("expected an assertion error");
        };
        assert!(err.listing().contains('\u{1b}'), "{:?}", err.listing());
        assert!(!err.report().contains('\u{1b}'));
        let plain = assert_conforms(&shape, &value).unwrap_err();
        assert!(!plain.to_string().contains('\u{1b}'));
        assert_eq!(plain.report(), err.report());
    }

    #[test]
    #[should_panic(expected = "Interface not as expected")]
    fn macro_panics_on_mismatch() {
        crate::assert_shape!(array(BOOLEAN), Value::from(json!([1])));
    }

    #[test]
    fn options_flow_through() {
        let shape = object([("id", NUMBER)]);
        let value: Value = json!({"id": 1, "extra": true}).into();
        assert!(matches!(
            assert_conforms_with(&shape, &value, &Options::default(), &AssertOptions::default()),
            Err(crate::Error::Assertion(_))
        ));
        let subset = Options { subset: true, ..Options::default() };
        assert!(assert_conforms_with(&shape, &value, &subset, &AssertOptions::default()).is_ok());
        let shallow = Options { max_depth: Some(0), ..Options::default() };
        assert!(matches!(
            assert_conforms_with(&shape, &value, &shallow, &AssertOptions::default()),
            Err(crate::Error::DepthExceeded { .. })
        ));
    }

    #[test]
    fn path_listing_is_plain_without_color() {
        let pet = object([("name", STRING), ("weight", NUMBER)]);
        let shape = object([("name", STRING), ("pets", array(pet))]);
        let value = json!({"name": "John", "pets": [{"name": "Odie", "weight": "17", "age": 3}]}).into();
        let d = diff(&shape, &value).unwrap();
        assert_eq!(
            render_paths(&d, false),
            "pets.0.age: unexpected Number (3)\npets.0.weight: expected Number, got String (\"17\")\n"
        );
        let root = diff(&NUMBER, &Value::Null).unwrap();
        assert_eq!(render_paths(&root, false), "<root>: expected Number, got Null (null)\n");
    }
}
