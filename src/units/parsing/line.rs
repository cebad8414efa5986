
use super::base::{SymbolLookup, ParseError};
use crate::units::node::UnitNode;
use crate::units::power::Power;
use crate::units::display::UnitDisplayFormat;

use once_cell::sync::Lazy;
use regex::Regex;
use num::One;

use std::borrow::Cow;

static COSMETIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s()]").unwrap());

/// Removes whitespace and parentheses from a unit expression.
/// Parentheses never group anything; `N/(m^2*s)` reads exactly like
/// `N/m^2*s`.
pub fn strip_cosmetic(text: &str) -> Cow<'_, str> {
  COSMETIC_RE.replace_all(text, "")
}

/// Parses a single factor, `SYMBOL` or `SYMBOL^POWER`. The symbol `1`
/// stands for the empty symbol.
///
/// A symbol known to `lookup` produces the defined unit raised to
/// the given power (see [`UnitNode::change_power`]). Any other symbol
/// produces a new leaf.
pub fn parse_factor<L>(text: &str, lookup: &L) -> Result<UnitNode, ParseError>
where L: SymbolLookup + ?Sized {
  let text = text.trim();
  let (symbol, power) = match text.split('^').collect::<Vec<_>>().as_slice() {
    [symbol] => (*symbol, Power::one()),
    [symbol, power] => {
      let power = power.trim().parse::<Power>().map_err(|source| {
        ParseError::InvalidPower { factor: text.to_owned(), source }
      })?;
      (*symbol, power)
    }
    _ => return Err(ParseError::MultipleCarets { factor: text.to_owned() }),
  };
  let symbol = match symbol.trim() {
    "1" => "",
    symbol => symbol,
  };
  match lookup.try_resolve(symbol) {
    Some(unit) => Ok(unit.change_power(power)),
    None => Ok(UnitNode::leaf(symbol, power)),
  }
}

/// Parses `a*b/c*d` into the flat factor list `[a, b, c^-1, d^-1]`.
///
/// The expression is split on the first `/` only. Any segment after
/// a second `/` is read as more numerator factors. Factors with an
/// empty symbol (such as the `1` in `1/s`) are dropped.
pub fn parse_units<L>(text: &str, lookup: &L) -> Result<Vec<UnitNode>, ParseError>
where L: SymbolLookup + ?Sized {
  let text = strip_cosmetic(text);
  let segments: Vec<&str> = text.split('/').collect();
  if segments.len() > 2 {
    tracing::warn!(expression = %text, "expression has more than one '/'; trailing segments are not divided");
  }
  let mut units = Vec::new();
  for (index, segment) in segments.into_iter().enumerate() {
    for factor in segment.split('*') {
      let unit = parse_factor(factor, lookup)?;
      units.push(if index == 1 { unit.invert() } else { unit });
    }
  }
  units.retain(|u| !u.symbol().is_empty());
  Ok(units)
}

/// Parses one definition line.
///
/// * `SYMBOL = EXPRESSION` defines `SYMBOL` (with power one) as the
///   factors of the expression.
/// * A bare expression containing `*` or `/` produces an anonymous
///   unit, labeled with its own (stripped) text.
/// * Anything else is a single factor, as per [`parse_factor`].
pub fn parse_line<L>(line: &str, lookup: &L) -> Result<UnitNode, ParseError>
where L: SymbolLookup + ?Sized {
  let parts: Vec<&str> = line.split('=').map(str::trim).collect();
  let unit = match parts.as_slice() {
    [symbol, expression] => UnitNode::new(*symbol, 1, parse_units(expression, lookup)?),
    [expression] if expression.contains(['*', '/']) => {
      UnitNode::new(strip_cosmetic(expression), 1, parse_units(expression, lookup)?)
    }
    [symbol] => parse_factor(symbol, lookup)?,
    _ => return Err(ParseError::MultipleEquals { line: line.to_owned() }),
  };
  tracing::trace!(line, unit = %unit.render(UnitDisplayFormat::FlattenedAndSimplified), "parsed unit");
  Ok(unit)
}
