//! Runtime values checked against a [`Shape`](crate::shape::Shape).
//!
//! `Value` is a superset of JSON: on top of the six JSON kinds it carries
//! `Undefined` (an absent property), big integers, symbols, dates, functions,
//! classes and class instances. Symbols, functions and classes are identities:
//! two of them are equal only when they are the same allocation.
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Own properties of a record or class instance, in insertion order.
pub type Record = IndexMap<String, Value>;

/// What a missing property reads as.
pub static UNDEFINED: Value = Value::Undefined;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    /// IEEE-754 double, same semantics as a JS number (`NaN != NaN`).
    Number(f64),
    BigInt(i128),
    String(String),
    Symbol(Symbol),
    Array(Vec<Value>),
    /// Plain record (`{ .. }`).
    Object(Record),
    Instance(Instance),
    Date(DateTime<Utc>),
    Function(FunctionRef),
    Class(ClassRef),
}

/// A unique symbol. Clones share identity; `Symbol::new` always makes a fresh one.
#[derive(Clone)]
pub struct Symbol(Arc<str>);

/// A named function value, compared by identity.
#[derive(Clone)]
pub struct FunctionRef(Arc<str>);

/// A class (constructor) identity with an optional superclass.
#[derive(Clone)]
pub struct ClassRef(Arc<ClassInfo>);

struct ClassInfo {
    name: String,
    parent: Option<ClassRef>,
}

/// An object constructed by some class.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub class: ClassRef,
    pub fields: Record,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Value {
    /// Runtime type name, as reported in `actual` / `unexpected` slots.
    ///
    /// Class instances report their class name, which is also what the loose
    /// class-name fallback in the diff engine compares against.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::BigInt(_) => "BigInt",
            Value::String(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Instance(inst) => inst.class.name(),
            Value::Date(_) => "Date",
            Value::Function(_) | Value::Class(_) => "Function",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Own properties of a record-like value (plain record or class instance).
    pub fn fields(&self) -> Option<&Record> {
        match self {
            Value::Object(map) => Some(map),
            Value::Instance(inst) => Some(&inst.fields),
            _ => None,
        }
    }

    /// Property lookup; absent keys (and non-record values) read as `Undefined`.
    pub fn get(&self, key: &str) -> &Value {
        self.fields().and_then(|map| map.get(key)).unwrap_or(&UNDEFINED)
    }

    /// Build a plain record from key/value pairs.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Symbol {
    pub fn new(description: impl Into<String>) -> Self {
        Self(Arc::from(description.into()))
    }
    pub fn description(&self) -> &str {
        &self.0
    }
}

impl FunctionRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::from(name.into()))
    }
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl ClassRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(ClassInfo { name: name.into(), parent: None }))
    }

    /// Declare a subclass of `self`.
    pub fn extend(&self, name: impl Into<String>) -> Self {
        Self(Arc::new(ClassInfo { name: name.into(), parent: Some(self.clone()) }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parent(&self) -> Option<&ClassRef> {
        self.0.parent.as_ref()
    }

    /// `self`, then its superclass chain.
    pub fn ancestry(&self) -> impl Iterator<Item = &ClassRef> {
        std::iter::successors(Some(self), |class| class.parent())
    }

    /// Construct an instance value with the given fields.
    pub fn instantiate<K, V, I>(&self, fields: I) -> Value
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Instance(Instance {
            class: self.clone(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        })
    }
}

impl Instance {
    /// `instanceof`: true when `class` is the instance's class or one of its ancestors.
    pub fn is_instance_of(&self, class: &ClassRef) -> bool {
        self.class.ancestry().any(|c| c == class)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for FunctionRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description())
    }
}

impl fmt::Debug for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.name())
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[class {}]", self.name())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONVERSIONS
// ————————————————————————————————————————————————————————————————————————————

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(xs) => Value::Array(xs.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(m) => {
                Value::Object(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self { Value::Number(n as f64) }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self { Value::Number(f64::from(n)) }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::String(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::String(s) }
}

impl From<Vec<Value>> for Value {
    fn from(xs: Vec<Value>) -> Self { Value::Array(xs) }
}

impl From<Record> for Value {
    fn from(map: Record) -> Self { Value::Object(map) }
}

impl From<DateTime<Utc>> for Value {
    fn from(at: DateTime<Utc>) -> Self { Value::Date(at) }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self { Value::Symbol(sym) }
}

impl From<FunctionRef> for Value {
    fn from(fun: FunctionRef) -> Self { Value::Function(fun) }
}

impl From<ClassRef> for Value {
    fn from(class: ClassRef) -> Self { Value::Class(class) }
}

// ————————————————————————————————————————————————————————————————————————————
// RENDERING
// ————————————————————————————————————————————————————————————————————————————

/// JSON rendering used by diff reports. Non-JSON kinds degrade to strings
/// (`"Symbol(x)"`, `"[Function: f]"`, big integers as decimal text, dates as
/// RFC 3339); `Undefined` renders as `null`.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serialize_number(*n, serializer),
            Value::BigInt(n) => serializer.collect_str(n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Symbol(sym) => serializer.collect_str(&format_args!("{sym:?}")),
            Value::Array(xs) => {
                let mut seq = serializer.serialize_seq(Some(xs.len()))?;
                for x in xs {
                    seq.serialize_element(x)?;
                }
                seq.end()
            }
            Value::Object(map) => serialize_record(map, serializer),
            Value::Instance(inst) => serialize_record(&inst.fields, serializer),
            Value::Date(at) => serializer.serialize_str(&at.to_rfc3339()),
            Value::Function(fun) => serializer.collect_str(&format_args!("{fun:?}")),
            Value::Class(class) => serializer.collect_str(&format_args!("{class:?}")),
        }
    }
}

// Helper: prefer emitting integers when exact
fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}

fn serialize_record<S: Serializer>(map: &Record, serializer: S) -> Result<S::Ok, S::Error> {
    // JSON.stringify drops undefined properties
    let present = map.iter().filter(|(_, v)| !v.is_undefined());
    let mut out = serializer.serialize_map(None)?;
    for (k, v) in present {
        out.serialize_entry(k, v)?;
    }
    out.end()
}

/// Short single-line preview of a value, for path listings.
pub fn preview(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        other => serde_json::to_string(other).unwrap_or_else(|_| format!("{other:?}")),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_names_follow_runtime_kinds() {
        let person = ClassRef::new("Person");
        let cases: Vec<(Value, &str)> = vec![
            (Value::Undefined, "Undefined"),
            (Value::Null, "Null"),
            (true.into(), "Boolean"),
            (1.5.into(), "Number"),
            (Value::BigInt(10), "BigInt"),
            ("x".into(), "String"),
            (Symbol::new("s").into(), "Symbol"),
            (json!([1]).into(), "Array"),
            (json!({}).into(), "Object"),
            (person.instantiate([("name", "Ada")]), "Person"),
            (Utc::now().into(), "Date"),
            (FunctionRef::new("f").into(), "Function"),
            (person.clone().into(), "Function"),
        ];
        for (value, name) in cases {
            assert_eq!(value.type_name(), name, "{value:?}");
        }
    }

    #[test]
    fn json_conversion_keeps_key_order() {
        let v = Value::from(json!({"b": 1, "a": [true, null], "c": "s"}));
        let keys: Vec<&str> = v.fields().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(v.get("a"), &Value::Array(vec![Value::Bool(true), Value::Null]));
        assert!(v.get("missing").is_undefined());
    }

    #[test]
    fn identities_compare_by_allocation() {
        let a = Symbol::new("tag");
        let b = Symbol::new("tag");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);

        let base = ClassRef::new("Base");
        let derived = base.extend("Derived");
        assert_ne!(base, ClassRef::new("Base"));
        let Value::Instance(inst) = derived.instantiate::<&str, Value, _>([]) else { unreachable!() };
        assert!(inst.is_instance_of(&derived));
        assert!(inst.is_instance_of(&base));
        assert!(!inst.is_instance_of(&ClassRef::new("Base")));
    }

    #[test]
    fn serializes_like_json_stringify() {
        let v = Value::object([
            ("n", Value::Number(3.0)),
            ("f", Value::Number(0.5)),
            ("gone", Value::Undefined),
            ("big", Value::BigInt(12345678901234567890)),
            ("sym", Symbol::new("k").into()),
        ]);
        let out = serde_json::to_value(&v).unwrap();
        assert_eq!(out, json!({"n": 3, "f": 0.5, "big": "12345678901234567890", "sym": "Symbol(k)"}));
    }

    #[test]
    fn preview_marks_undefined() {
        assert_eq!(preview(&Value::Undefined), "undefined");
        assert_eq!(preview(&"17".into()), "\"17\"");
    }
}
