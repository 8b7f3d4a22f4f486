//! Depth accounting shared by the diff and match traversals.
//!
//! Both walkers are generic over a [`Guard`]. Without a limit the guard is
//! [`Unbounded`], whose error type is uninhabited, so the unlimited entry
//! points (`diff`, `matches`) have no failure path at all.
use std::convert::Infallible;

use crate::error::Error;

pub trait Guard {
    type Error;
    /// Step into the child at `key`.
    fn enter(&mut self, key: &str) -> Result<(), Self::Error>;
    fn leave(&mut self);
}

/// No limit, no bookkeeping.
pub struct Unbounded;

impl Guard for Unbounded {
    type Error = Infallible;
    fn enter(&mut self, _key: &str) -> Result<(), Infallible> { Ok(()) }
    fn leave(&mut self) {}
}

/// Fails with [`Error::DepthExceeded`] once the key path grows past `limit`.
pub struct Bounded {
    limit: usize,
    path: Vec<String>,
}

impl Bounded {
    pub fn new(limit: usize) -> Self {
        Self { limit, path: Vec::new() }
    }
}

impl Guard for Bounded {
    type Error = Error;

    fn enter(&mut self, key: &str) -> Result<(), Error> {
        if self.path.len() >= self.limit {
            let mut path = self.path.join(".");
            if !path.is_empty() { path.push('.'); }
            path.push_str(key);
            tracing::trace!(limit = self.limit, %path, "depth limit reached");
            return Err(Error::DepthExceeded { limit: self.limit, path });
        }
        self.path.push(key.to_string());
        Ok(())
    }

    fn leave(&mut self) {
        self.path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_reports_full_path() {
        let mut guard = Bounded::new(2);
        guard.enter("a").unwrap();
        guard.enter("0").unwrap();
        let err = guard.enter("b").unwrap_err();
        match err {
            Error::DepthExceeded { limit, path } => {
                assert_eq!(limit, 2);
                assert_eq!(path, "a.0.b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn leave_frees_a_level() {
        let mut guard = Bounded::new(1);
        guard.enter("a").unwrap();
        guard.leave();
        guard.enter("b").unwrap();
    }

    #[test]
    fn zero_limit_rejects_any_child() {
        assert!(Bounded::new(0).enter("x").is_err());
    }
}
