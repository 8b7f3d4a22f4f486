// Type descriptions: the closed vocabulary the diff engine understands.
//
// Shapes are plain data. They are built once (usually as statics or in a
// constructor function), cloned freely and shared across threads.

use indexmap::IndexMap;

use crate::value::{ClassRef, Symbol, Value};

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Any present value; rejects only `Undefined`.
    Any,
    Undefined,
    Null,
    Literal(Literal),
    Primitive(Primitive),
    /// Custom class marker (see `diff` for the name fallback).
    Class(ClassRef),
    /// `[D]`: every element must match `D`.
    Array(Box<Shape>),
    /// Required keys, each with its own shape.
    Object(IndexMap<String, Shape>),
    /// `Optional(D)` / `Nullable(D)`.
    Wrapped(Modifier, Box<Shape>),
}

/// Built-in type markers, each backed by a predicate in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Boolean,
    Number,
    String,
    Object,
    Array,
    Date,
    BigInt,
    Symbol,
    Function,
}

/// A concrete primitive that matches only an identical value.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    Symbol(Symbol),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// also admits `Undefined`
    Optional,
    /// also admits `Null`
    Nullable,
}

pub const BOOLEAN: Shape = Shape::Primitive(Primitive::Boolean);
pub const NUMBER: Shape = Shape::Primitive(Primitive::Number);
pub const STRING: Shape = Shape::Primitive(Primitive::String);
pub const OBJECT: Shape = Shape::Primitive(Primitive::Object);
pub const ARRAY: Shape = Shape::Primitive(Primitive::Array);
pub const DATE: Shape = Shape::Primitive(Primitive::Date);
pub const BIGINT: Shape = Shape::Primitive(Primitive::BigInt);
pub const SYMBOL: Shape = Shape::Primitive(Primitive::Symbol);
pub const FUNCTION: Shape = Shape::Primitive(Primitive::Function);

// ————————————————————————————————————————————————————————————————————————————
// CONSTRUCTORS
// ————————————————————————————————————————————————————————————————————————————

/// Object pattern from `(key, shape)` pairs; key order is kept.
pub fn object<K, S, I>(fields: I) -> Shape
where
    K: Into<String>,
    S: Into<Shape>,
    I: IntoIterator<Item = (K, S)>,
{
    Shape::Object(fields.into_iter().map(|(k, s)| (k.into(), s.into())).collect())
}

/// Array pattern `[element]`.
pub fn array(element: impl Into<Shape>) -> Shape {
    Shape::Array(Box::new(element.into()))
}

pub fn optional(inner: impl Into<Shape>) -> Shape {
    Shape::Wrapped(Modifier::Optional, Box::new(inner.into()))
}

pub fn nullable(inner: impl Into<Shape>) -> Shape {
    Shape::Wrapped(Modifier::Nullable, Box::new(inner.into()))
}

pub fn literal(lit: impl Into<Literal>) -> Shape {
    Shape::Literal(lit.into())
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Shape {
    /// Strict identity between the description itself and a value
    /// (`value === description`).
    pub fn is_identical(&self, value: &Value) -> bool {
        match (self, value) {
            (Shape::Literal(lit), _) => lit.is_identical(value),
            (Shape::Undefined, Value::Undefined) | (Shape::Null, Value::Null) => true,
            (Shape::Class(class), Value::Class(other)) => class == other,
            _ => false,
        }
    }
}

impl Primitive {
    pub const ALL: [Primitive; 9] = [
        Primitive::Boolean,
        Primitive::Number,
        Primitive::String,
        Primitive::Object,
        Primitive::Array,
        Primitive::Date,
        Primitive::BigInt,
        Primitive::Symbol,
        Primitive::Function,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "Boolean",
            Primitive::Number => "Number",
            Primitive::String => "String",
            Primitive::Object => "Object",
            Primitive::Array => "Array",
            Primitive::Date => "Date",
            Primitive::BigInt => "BigInt",
            Primitive::Symbol => "Symbol",
            Primitive::Function => "Function",
        }
    }
}

impl Literal {
    /// `===` against a runtime value: numbers by IEEE equality, symbols by identity.
    pub fn is_identical(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::Bool(a), Value::Bool(b)) => a == b,
            (Literal::Number(a), Value::Number(b)) => a == b,
            (Literal::BigInt(a), Value::BigInt(b)) => a == b,
            (Literal::String(a), Value::String(b)) => a == b,
            (Literal::Symbol(a), Value::Symbol(b)) => a == b,
            _ => false,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::BigInt(n) => Value::BigInt(*n),
            Literal::String(s) => Value::String(s.clone()),
            Literal::Symbol(sym) => Value::Symbol(sym.clone()),
        }
    }
}

impl Modifier {
    /// The guard: the extra value this modifier lets through.
    pub fn admits(self, value: &Value) -> bool {
        match self {
            Modifier::Optional => value.is_undefined(),
            Modifier::Nullable => value.is_null(),
        }
    }
}

impl From<Primitive> for Shape {
    fn from(p: Primitive) -> Self { Shape::Primitive(p) }
}

impl From<Literal> for Shape {
    fn from(lit: Literal) -> Self { Shape::Literal(lit) }
}

impl From<ClassRef> for Shape {
    fn from(class: ClassRef) -> Self { Shape::Class(class) }
}

impl From<bool> for Shape {
    fn from(b: bool) -> Self { Shape::Literal(Literal::Bool(b)) }
}

impl From<f64> for Shape {
    fn from(n: f64) -> Self { Shape::Literal(Literal::Number(n)) }
}

impl From<i64> for Shape {
    fn from(n: i64) -> Self { Shape::Literal(Literal::Number(n as f64)) }
}

impl From<i32> for Shape {
    fn from(n: i32) -> Self { Shape::Literal(Literal::Number(f64::from(n))) }
}

impl From<&str> for Shape {
    fn from(s: &str) -> Self { Shape::Literal(Literal::String(s.to_string())) }
}

impl From<String> for Shape {
    fn from(s: String) -> Self { Shape::Literal(Literal::String(s)) }
}

impl From<Symbol> for Shape {
    fn from(sym: Symbol) -> Self { Shape::Literal(Literal::Symbol(sym)) }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self { Literal::Bool(b) }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self { Literal::Number(n) }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self { Literal::Number(n as f64) }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self { Literal::Number(f64::from(n)) }
}

impl From<i128> for Literal {
    fn from(n: i128) -> Self { Literal::BigInt(n) }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self { Literal::String(s.to_string()) }
}

impl From<Symbol> for Literal {
    fn from(sym: Symbol) -> Self { Literal::Symbol(sym) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_build_expected_variants() {
        let pet = object([("name", STRING), ("weight", NUMBER)]);
        let owner = object([("name", STRING), ("pets", array(pet.clone()))]);
        let Shape::Object(fields) = &owner else { panic!("object pattern") };
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["name", "pets"]);
        assert_eq!(fields["pets"], Shape::Array(Box::new(pet)));
        assert_eq!(optional(NUMBER), Shape::Wrapped(Modifier::Optional, Box::new(NUMBER)));
    }

    #[test]
    fn identity_is_strict() {
        assert!(literal(1).is_identical(&Value::Number(1.0)));
        assert!(!literal(f64::NAN).is_identical(&Value::Number(f64::NAN)));
        assert!(!literal("1").is_identical(&Value::Number(1.0)));
        assert!(Shape::Undefined.is_identical(&Value::Undefined));
        assert!(!Shape::Null.is_identical(&Value::Undefined));

        let sym = Symbol::new("id");
        assert!(literal(sym.clone()).is_identical(&Value::Symbol(sym)));
        assert!(!literal(Symbol::new("id")).is_identical(&Value::Symbol(Symbol::new("id"))));
    }

    #[test]
    fn modifier_guards() {
        assert!(Modifier::Optional.admits(&Value::Undefined));
        assert!(!Modifier::Optional.admits(&Value::Null));
        assert!(Modifier::Nullable.admits(&Value::Null));
        assert!(!Modifier::Nullable.admits(&Value::Undefined));
    }

    #[test]
    fn primitive_names_match_variants() {
        for p in Primitive::ALL {
            assert_eq!(p.name(), format!("{p:?}"));
        }
    }
}
