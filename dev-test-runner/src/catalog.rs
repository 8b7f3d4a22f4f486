//! Shapes that fixtures can refer to by name.
//!
//! Shapes live in code, not in the fixture files: fixtures only carry data.
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use shape_diff::shape::{array, nullable, object, optional, literal, BOOLEAN, NUMBER, STRING};
use shape_diff::{Shape, ClassRef};

pub static CATALOG: Lazy<IndexMap<&'static str, Shape>> = Lazy::new(|| {
    let pet = object([("name", STRING), ("weight", NUMBER)]);
    let mut out = IndexMap::new();
    out.insert("record", object([("id", NUMBER)]));
    out.insert("named", object([("name", STRING)]));
    out.insert("flags", array(BOOLEAN));
    out.insert("pet", pet.clone());
    out.insert("owner", object([("name", STRING), ("pets", array(pet))]));
    out.insert("user", object([
        ("id", NUMBER),
        ("name", STRING),
        ("email", optional(STRING)),
        ("manager", nullable(NUMBER)),
    ]));
    out.insert("event", object([
        ("kind", literal("event")),
        ("payload", Shape::Any),
        ("at", nullable(NUMBER)),
    ]));
    out.insert("money", Shape::Class(ClassRef::new("Money")));
    out
});

pub fn lookup(name: &str) -> Option<&'static Shape> {
    CATALOG.get(name)
}
