use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::value::Value;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(located)
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize::<_, T>(de).map_err(located)
}

/// Parse JSON text straight into a runtime [`Value`].
pub fn value_from_str(src: &str) -> Result<Value> {
    from_str_with_path::<serde_json::Value>(src).map(Value::from)
}

fn located(err: serde_path_to_error::Error<serde_json::Error>) -> Error {
    let path = err.path().to_string();
    Error::Json { path, source: err.into_inner() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Pet {
        name: String,
        weight: u32,
    }

    #[test]
    fn errors_name_the_json_path() {
        let err = from_str_with_path::<Vec<Pet>>(r#"[{"name": "Odie", "weight": "17"}]"#).unwrap_err();
        match err {
            Error::Json { path, .. } => assert_eq!(path, "[0].weight"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parses_values() {
        let v = value_from_str(r#"{"a": [1, null]}"#).unwrap();
        assert_eq!(v.get("a"), &Value::Array(vec![Value::Number(1.0), Value::Null]));
        assert!(value_from_str("{").is_err());
    }
}
