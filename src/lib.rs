//! Structural type matching for runtime values.
//!
//! Describe the expected shape of some data with a [`Shape`] (primitive
//! markers, literals, nested object/array patterns, `Optional` / `Nullable` /
//! `Any`), then either ask whether a [`Value`] conforms ([`matches`]) or get
//! a structured report of every mismatch ([`diff`]).
//!
//! ```
//! use serde_json::json;
//! use shape_diff::shape::{array, object, NUMBER, STRING};
//! use shape_diff::{diff, Value};
//!
//! let pet = object([("name", STRING), ("weight", NUMBER)]);
//! let owner = object([("name", STRING), ("pets", array(pet))]);
//!
//! let value = Value::from(json!({"name": "John Arbuckle", "pets": "Garfield & Odie"}));
//! let report = serde_json::to_value(diff(&owner, &value)).unwrap();
//! assert_eq!(
//!     report,
//!     json!({"pets": {"actual": "String", "expected": "Array", "value": "Garfield & Odie"}})
//! );
//! ```
pub mod assert;
pub mod depth;
pub mod diff;
pub mod error;
pub mod matches;
pub mod path_de;
pub mod registry;
pub mod shape;
pub mod value;

pub use assert::{assert_conforms, assert_conforms_with, AssertOptions, AssertionError};
pub use diff::{diff, diff_with, Diff, Label, Mismatch, Options};
pub use error::{Error, Result};
pub use matches::{matches, matches_with};
pub use shape::{Literal, Modifier, Primitive, Shape};
pub use value::{ClassRef, FunctionRef, Instance, Record, Symbol, Value};
