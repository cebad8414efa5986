
use crate::units::node::UnitNode;
use crate::units::power::ParsePowerError;

use thiserror::Error;

use std::collections::{HashMap, BTreeMap};

/// Read access to previously defined units, consulted while parsing
/// unit expressions. A symbol which does not resolve is not an
/// error; the parser introduces it as a new atomic unit.
pub trait SymbolLookup {
  fn try_resolve(&self, symbol: &str) -> Option<UnitNode>;
}

/// Lookup which knows no symbols, so every symbol parses as a leaf.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLookup;

/// A malformed unit definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
  #[error("Can't have multiple equal signs in statement '{line}'")]
  MultipleEquals { line: String },
  #[error("Failed to parse the power of '{factor}'")]
  InvalidPower {
    factor: String,
    #[source]
    source: ParsePowerError,
  },
  #[error("Factor '{factor}' has more than one '^'")]
  MultipleCarets { factor: String },
}

impl SymbolLookup for NullLookup {
  fn try_resolve(&self, _symbol: &str) -> Option<UnitNode> {
    None
  }
}

impl SymbolLookup for HashMap<String, UnitNode> {
  fn try_resolve(&self, symbol: &str) -> Option<UnitNode> {
    self.get(symbol).cloned()
  }
}

impl SymbolLookup for BTreeMap<String, UnitNode> {
  fn try_resolve(&self, symbol: &str) -> Option<UnitNode> {
    self.get(symbol).cloned()
  }
}

impl<'a, L> SymbolLookup for &'a L
where L: SymbolLookup + ?Sized {
  fn try_resolve(&self, symbol: &str) -> Option<UnitNode> {
    (**self).try_resolve(symbol)
  }
}
