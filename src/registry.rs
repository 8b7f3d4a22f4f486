//! Primitive marker → runtime predicate.
//!
//! Populated once on first use and read-only afterwards, so every `diff` /
//! `matches` call on every thread shares the same table without locking.
use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::shape::Primitive;
use crate::value::Value;

pub type Predicate = fn(&Value) -> bool;

static REGISTRY: Lazy<BTreeMap<Primitive, Predicate>> = Lazy::new(|| {
    let mut table: BTreeMap<Primitive, Predicate> = BTreeMap::new();
    table.insert(Primitive::Boolean, is_boolean);
    table.insert(Primitive::Number, is_number);
    table.insert(Primitive::String, is_string);
    table.insert(Primitive::Object, is_plain_object);
    table.insert(Primitive::Array, is_array);
    table.insert(Primitive::Date, is_date);
    table.insert(Primitive::BigInt, is_bigint);
    table.insert(Primitive::Symbol, is_symbol);
    table.insert(Primitive::Function, is_function);
    table
});

/// Does `value` satisfy the marker? Unregistered markers match nothing.
pub fn check(marker: Primitive, value: &Value) -> bool {
    REGISTRY.get(&marker).is_some_and(|pred| pred(value))
}

/// Every registered marker with its predicate, in marker order.
pub fn entries() -> impl Iterator<Item = (Primitive, Predicate)> {
    REGISTRY.iter().map(|(marker, pred)| (*marker, *pred))
}

pub fn is_boolean(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

/// Includes `NaN` and the infinities.
pub fn is_number(value: &Value) -> bool {
    matches!(value, Value::Number(_))
}

pub fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// Plain records only: arrays, class instances and dates are not plain objects.
pub fn is_plain_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

pub fn is_array(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

pub fn is_date(value: &Value) -> bool {
    matches!(value, Value::Date(_))
}

pub fn is_bigint(value: &Value) -> bool {
    matches!(value, Value::BigInt(_))
}

pub fn is_symbol(value: &Value) -> bool {
    matches!(value, Value::Symbol(_))
}

/// Classes are functions too.
pub fn is_function(value: &Value) -> bool {
    matches!(value, Value::Function(_) | Value::Class(_))
}
