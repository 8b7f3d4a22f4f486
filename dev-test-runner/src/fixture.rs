use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use shape_diff::{Diff, Options, Value};

/// One case in a fixture file. A file holds a JSON array of these.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub name: String,
    /// catalog entry to check against
    pub shape: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub subset: bool,
    /// expected JSON report, `null` when the value should conform
    pub expect: serde_json::Value,
}

#[derive(Debug)]
pub enum Outcome {
    Pass,
    Fail { actual: serde_json::Value, diff: Option<Diff> },
    Error(String),
}

pub fn load(path: &std::path::Path) -> Result<Vec<Fixture>> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    shape_diff::path_de::from_slice_with_path::<Vec<Fixture>>(&bytes)
        .with_context(|| format!("failed to parse fixture file {}", path.display()))
}

impl Fixture {
    pub fn run(&self, base: &Options) -> Outcome {
        match self.check(base) {
            Ok(outcome) => outcome,
            Err(error) => Outcome::Error(format!("{error:#}")),
        }
    }

    fn check(&self, base: &Options) -> Result<Outcome> {
        let shape = crate::catalog::lookup(&self.shape)
            .ok_or_else(|| anyhow!("unknown shape `{}`", self.shape))?;
        let options = Options { subset: base.subset || self.subset, ..*base };
        let value = Value::from(self.value.clone());
        let diff = shape_diff::diff_with(shape, &value, &options)?;
        let actual = serde_json::to_value(&diff)?;
        if actual == self.expect {
            Ok(Outcome::Pass)
        } else {
            Ok(Outcome::Fail { actual, diff })
        }
    }
}
