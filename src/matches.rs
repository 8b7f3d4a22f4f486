//! Boolean conformance check.
//!
//! Same decision policy as [`crate::diff`], walked independently so it can
//! stop at the first failing key or element instead of building a report.
//! For every input: `matches(d, v) == diff(d, v).is_none()`.
use indexmap::IndexMap;

use crate::depth::{Bounded, Guard, Unbounded};
use crate::diff::{extra_keys, Options};
use crate::error::Result;
use crate::registry;
use crate::shape::Shape;
use crate::value::{Value, UNDEFINED};

/// Strict check with no depth limit.
pub fn matches(shape: &Shape, value: &Value) -> bool {
    let Ok(ok) = Matcher::new(false, Unbounded).check(shape, value);
    ok
}

pub fn matches_with(shape: &Shape, value: &Value, options: &Options) -> Result<bool> {
    match options.max_depth {
        None => {
            let Ok(ok) = Matcher::new(options.subset, Unbounded).check(shape, value);
            Ok(ok)
        }
        Some(limit) => Matcher::new(options.subset, Bounded::new(limit)).check(shape, value),
    }
}

struct Matcher<G> {
    subset: bool,
    guard: G,
}

impl<G: Guard> Matcher<G> {
    fn new(subset: bool, guard: G) -> Self {
        Self { subset, guard }
    }

    fn check(&mut self, shape: &Shape, value: &Value) -> Result<bool, G::Error> {
        if shape.is_identical(value) {
            return Ok(true);
        }
        let ok = match shape {
            Shape::Any => !value.is_undefined(),
            Shape::Literal(_) | Shape::Null | Shape::Undefined => false,
            Shape::Wrapped(modifier, inner) => {
                modifier.admits(value) || self.check(inner, value)?
            }
            Shape::Primitive(marker) => registry::check(*marker, value),
            Shape::Class(class) => {
                matches!(value, Value::Instance(inst) if inst.is_instance_of(class))
                    || value.type_name() == class.name()
            }
            Shape::Array(element) => match value {
                Value::Array(items) => {
                    for (index, item) in items.iter().enumerate() {
                        if !self.child(&index.to_string(), element, item)? {
                            return Ok(false);
                        }
                    }
                    true
                }
                _ => false,
            },
            Shape::Object(pattern) => return self.check_object(pattern, value),
        };
        Ok(ok)
    }

    fn check_object(&mut self, pattern: &IndexMap<String, Shape>, value: &Value) -> Result<bool, G::Error> {
        let Some(fields) = value.fields() else {
            return Ok(false);
        };
        if !self.subset && extra_keys(pattern, fields).next().is_some() {
            return Ok(false);
        }
        for (key, sub) in pattern {
            let prop = fields.get(key).unwrap_or(&UNDEFINED);
            if !self.child(key, sub, prop)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn child(&mut self, key: &str, shape: &Shape, value: &Value) -> Result<bool, G::Error> {
        self.guard.enter(key)?;
        let ok = self.check(shape, value)?;
        self.guard.leave();
        Ok(ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{diff, diff_with};
    use crate::shape::*;
    use crate::value::{ClassRef, Symbol};
    use serde_json::json;

    fn shapes() -> Vec<Shape> {
        let money = ClassRef::new("Money");
        let pet = object([("name", STRING), ("weight", NUMBER)]);
        vec![
            Shape::Any,
            Shape::Null,
            Shape::Undefined,
            BOOLEAN,
            NUMBER,
            STRING,
            OBJECT,
            ARRAY,
            DATE,
            FUNCTION,
            literal(1),
            literal("John Doe"),
            literal(true),
            Shape::Class(money),
            array(BOOLEAN),
            array(pet.clone()),
            object([("name", STRING), ("pets", array(pet))]),
            object([("id", NUMBER), ("tag", optional(STRING)), ("parent", nullable(NUMBER))]),
            optional(Shape::Any),
            nullable(array(NUMBER)),
            object::<&str, Shape, _>([]),
        ]
    }

    fn values() -> Vec<Value> {
        let money = ClassRef::new("Money");
        let mut out: Vec<Value> = [
            json!(null),
            json!(true),
            json!(1),
            json!("John Doe"),
            json!([]),
            json!([true, false, null, 1]),
            json!([1, 2, 3]),
            json!({}),
            json!({"id": 1}),
            json!({"id": 1, "tag": "x", "parent": null}),
            json!({"id": "1", "extra": 2}),
            json!({"name": "John Arbuckle", "pets": [{"name": "Odie", "weight": 17}]}),
            json!({"name": "John Arbuckle", "pets": [{"name": "Odie", "weight": "17", "age": 3}]}),
            json!({"name": "John Arbuckle", "pets": "Garfield & Odie"}),
            json!([{"name": "Garfield", "weight": 40}, {"weight": 1}]),
        ]
        .into_iter()
        .map(Value::from)
        .collect();
        out.push(Value::Undefined);
        out.push(Symbol::new("s").into());
        out.push(chrono::Utc::now().into());
        out.push(money.instantiate([("cents", 5)]));
        out.push(money.into());
        out
    }

    #[test]
    fn agrees_with_diff_everywhere() {
        for shape in shapes() {
            for value in values() {
                assert_eq!(
                    matches(&shape, &value),
                    diff(&shape, &value).is_none(),
                    "{shape:?} vs {value:?}"
                );
                for subset in [false, true] {
                    let options = Options { subset, max_depth: Some(16) };
                    assert_eq!(
                        matches_with(&shape, &value, &options).unwrap(),
                        diff_with(&shape, &value, &options).unwrap().is_none(),
                        "{shape:?} vs {value:?} (subset: {subset})"
                    );
                }
            }
        }
    }

    #[test]
    fn strict_by_default() {
        let shape = object([("name", STRING)]);
        let value = Value::from(json!({"id": 1, "name": "John Doe"}));
        assert!(!matches(&shape, &value));
        let subset = Options { subset: true, ..Options::default() };
        assert!(matches_with(&shape, &value, &subset).unwrap());
    }

    #[test]
    fn depth_errors_match_diff() {
        let shape = array(array(array(NUMBER)));
        let value = Value::from(json!([[[1]]]));
        let limited = Options { max_depth: Some(2), ..Options::default() };
        assert!(matches_with(&shape, &value, &limited).is_err());
        assert!(diff_with(&shape, &value, &limited).is_err());
        assert!(matches(&shape, &value));
    }

    #[test]
    fn wrappers_admit_their_sentinel() {
        assert!(matches(&optional(NUMBER), &Value::Undefined));
        assert!(!matches(&optional(NUMBER), &Value::Null));
        assert!(matches(&nullable(NUMBER), &Value::Null));
        assert!(!matches(&nullable(NUMBER), &Value::Undefined));
        assert!(!matches(&Shape::Any, &Value::Undefined));
        assert!(matches(&Shape::Any, &Value::Null));
    }
}
