//! Regex-based exclusion of target addresses
//!
//! Patterns are compiled once, up front, so a bad pattern fails the request
//! before any traversal work. An address is dropped when ANY pattern finds a
//! match anywhere in the address string (unanchored search, not full-match).
//!
//! Exclusion is strictly a post-filter on the closure result. It never
//! removes a node from traversal: excluding target X does not stop X's
//! dependees from being included, because the closure is computed first.

use crate::core::error::{ScopeError, ScopeResult};
use regex::Regex;
use std::collections::HashSet;

/// A precompiled set of exclusion patterns.
#[derive(Debug)]
pub struct ExcludeFilter {
  patterns: Vec<Regex>,
}

impl ExcludeFilter {
  /// Compile all patterns, failing fast on the first invalid one.
  pub fn compile(patterns: &[String]) -> ScopeResult<Self> {
    let mut compiled = Vec::with_capacity(patterns.len());

    for pattern in patterns {
      let regex = Regex::new(pattern).map_err(|e| ScopeError::InvalidPattern {
        pattern: pattern.clone(),
        message: e.to_string(),
      })?;
      compiled.push(regex);
    }

    Ok(Self { patterns: compiled })
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }

  /// Whether an address matches any pattern. Pattern order is irrelevant.
  pub fn excludes(&self, address: &str) -> bool {
    self.patterns.iter().any(|p| p.is_match(address))
  }

  /// Project a result set down to the non-excluded addresses.
  pub fn apply(&self, addresses: HashSet<String>) -> HashSet<String> {
    if self.is_empty() {
      return addresses;
    }

    addresses.into_iter().filter(|a| !self.excludes(a)).collect()
  }
}
