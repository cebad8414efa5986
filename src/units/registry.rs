
//! A table of named units, loaded from definition lines.

use super::node::UnitNode;
use super::parsing::{SymbolLookup, parse_line};
use super::display::UnitDisplayFormat;
use crate::error::Error;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::Path;

/// Named units, keyed by symbol.
///
/// Definitions are loaded in a single pass. Each line is parsed
/// against the units defined before it, so a definition may refer to
/// earlier definitions but not to later ones.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
  units: HashMap<String, UnitNode>,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
  #[error("Unit '{symbol}' is already defined")]
  DuplicateSymbol { symbol: String },
}

impl UnitRegistry {
  /// The SI base units and a selection of derived units.
  pub const DEFAULT_LINES: [&'static str; 19] = [
    "", "kg", "m", "s", "A", "K", "mol", "Hz = 1/s",
    "N = kg*m/s^2", "J = N*m", "W = J/s", "C = A*s",
    "V = W/A", "F = C/V", "Ω = V/A", "Wb = J/A",
    "S = 1/Ω", "Pa = N/(m^2)", "Pas = Pa*s",
  ];

  /// An empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// A registry holding [`UnitRegistry::DEFAULT_LINES`].
  pub fn with_defaults() -> Self {
    let mut registry = Self::new();
    registry.load_from_lines(Self::DEFAULT_LINES)
      .unwrap_or_else(|err| unreachable!("default unit definitions are well-formed: {err}"));
    registry
  }

  pub fn get(&self, symbol: &str) -> Option<&UnitNode> {
    self.units.get(symbol)
  }

  pub fn contains(&self, symbol: &str) -> bool {
    self.units.contains_key(symbol)
  }

  pub fn len(&self) -> usize {
    self.units.len()
  }

  pub fn is_empty(&self) -> bool {
    self.units.is_empty()
  }

  pub fn symbols(&self) -> impl Iterator<Item = &str> {
    self.units.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &UnitNode)> {
    self.units.iter().map(|(symbol, unit)| (symbol.as_str(), unit))
  }

  /// Stores `unit` under its own symbol. Fails if the symbol is taken.
  pub fn insert(&mut self, unit: UnitNode) -> Result<(), RegistryError> {
    match self.units.entry(unit.symbol().to_owned()) {
      Entry::Occupied(entry) => Err(RegistryError::DuplicateSymbol { symbol: entry.key().clone() }),
      Entry::Vacant(entry) => {
        tracing::debug!(
          symbol = unit.symbol(),
          definition = %unit.render(UnitDisplayFormat::FirstChildren),
          "defined unit",
        );
        entry.insert(unit);
        Ok(())
      }
    }
  }

  /// Stores `unit` under its own symbol, returning the unit it
  /// replaced, if any.
  pub fn insert_or_replace(&mut self, unit: UnitNode) -> Option<UnitNode> {
    self.units.insert(unit.symbol().to_owned(), unit)
  }

  /// Parses one definition line against the current table and
  /// stores the result.
  pub fn define(&mut self, line: &str) -> Result<&UnitNode, Error> {
    let unit = parse_line(line, &*self)?;
    let symbol = unit.symbol().to_owned();
    self.insert(unit)?;
    Ok(&self.units[&symbol])
  }

  /// Defines each line in order. The first failing line aborts the
  /// load; the lines before it stay defined.
  pub fn load_from_lines<I>(&mut self, lines: I) -> Result<(), Error>
  where I: IntoIterator,
        I::Item: AsRef<str> {
    for (index, line) in lines.into_iter().enumerate() {
      self.define(line.as_ref()).map_err(|err| {
        Error::Definition { line: index + 1, source: Box::new(err) }
      })?;
    }
    Ok(())
  }

  pub fn load_from_str(&mut self, text: &str) -> Result<(), Error> {
    self.load_from_lines(text.lines())
  }

  pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "loading unit definitions");
    self.load_from_str(&text)
  }
}

impl SymbolLookup for UnitRegistry {
  fn try_resolve(&self, symbol: &str) -> Option<UnitNode> {
    self.units.get(symbol).cloned()
  }
}
