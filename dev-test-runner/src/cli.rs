//! Minimal CLI: load fixtures → check against catalog shapes → report
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use rayon::prelude::*;
use shape_diff::Options;

use crate::fixture::{Fixture, Outcome};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// run shape-diff fixture files and report which cases produce the expected diff
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// One or more fixture files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required_unless_present = "list")]
    input: Vec<String>,

    /// only run cases whose name contains this substring
    #[arg(long)]
    filter: Option<String>,

    /// tolerate extra keys in every case, not just those marked `subset`
    #[arg(long, default_value_t = false)]
    subset: bool,

    /// fail a case once nesting goes deeper than this
    #[arg(long)]
    max_depth: Option<usize>,

    /// plain output
    #[arg(long)]
    no_color: bool,

    /// print the shape catalog and exit
    #[arg(long)]
    list: bool,
}

#[derive(Debug, Default)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<Summary> {
        if self.list {
            for (name, shape) in crate::catalog::CATALOG.iter() {
                println!("{name}: {shape:?}");
            }
            return Ok(Summary::default());
        }

        let mut cases: Vec<Fixture> = Vec::new();
        for path in resolve_file_path_patterns(&self.input)? {
            let loaded = crate::fixture::load(&path)?;
            tracing::debug!(path = %path.display(), cases = loaded.len(), "loaded fixtures");
            cases.extend(loaded);
        }
        if let Some(filter) = self.filter.as_deref() {
            cases.retain(|case| case.name.contains(filter));
        }

        let options = Options { subset: self.subset, max_depth: self.max_depth };
        // shapes and the primitive registry are shared read-only across workers
        let outcomes: Vec<Outcome> = cases.par_iter().map(|case| case.run(&options)).collect();

        let mut summary = Summary::default();
        for (case, outcome) in cases.iter().zip(&outcomes) {
            match outcome {
                Outcome::Pass => {
                    summary.passed += 1;
                    println!("{} {}", self.paint_ok("✅"), case.name);
                }
                Outcome::Fail { actual, diff } => {
                    summary.failed += 1;
                    println!("{} {}", self.paint_err("❌"), case.name);
                    println!("   expected: {}", case.expect);
                    println!("   actual:   {actual}");
                    if let Some(diff) = diff {
                        for line in shape_diff::assert::render_paths(diff, !self.no_color).lines() {
                            println!("     {line}");
                        }
                    }
                }
                Outcome::Error(message) => {
                    summary.failed += 1;
                    println!("{} {}: {message}", self.paint_err("❌"), case.name);
                }
            }
        }
        println!("{} passed, {} failed", summary.passed, summary.failed);
        Ok(summary)
    }

    fn paint_ok(&self, s: &str) -> String {
        if self.no_color { s.to_string() } else { s.green().to_string() }
    }

    fn paint_err(&self, s: &str) -> String {
        if self.no_color { s.to_string() } else { s.red().bold().to_string() }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let before = out.len();
            for entry in glob::glob(pattern)? {
                out.push(entry?);
            }
            if out.len() == before {
                // explicit glob that matched nothing is a mistake, not an empty run
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
