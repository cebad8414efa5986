
use super::node::UnitNode;
use super::common::get_common;
use super::display::UnitDisplayFormat;

use approx::{AbsDiffEq, RelativeEq};
use thiserror::Error;
use num::One;

use std::cmp::Ordering;
use std::fmt::{self, Formatter, Display};
use std::ops::{Add, Sub, Mul, Div};

/// A scalar quantity, tagged with a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity<S> {
  pub value: S,
  pub unit: UnitNode,
}

/// Addition or subtraction of quantities whose units have no common
/// unit. Both operands are handed back.
#[derive(Clone, Debug, Error)]
#[error(
  "Incompatible units '{}' and '{}'",
  .lhs.unit.render(UnitDisplayFormat::FlattenedAndSimplified),
  .rhs.unit.render(UnitDisplayFormat::FlattenedAndSimplified),
)]
pub struct IncompatibleUnitsError<S> {
  pub lhs: Quantity<S>,
  pub rhs: Quantity<S>,
}

impl<S> Quantity<S> {
  pub fn new(value: S, unit: UnitNode) -> Self {
    Self { value, unit }
  }

  pub fn unitless(value: S) -> Self {
    Self::new(value, UnitNode::unitless())
  }

  pub fn into_parts(self) -> (S, UnitNode) {
    (self.value, self.unit)
  }

  /// The unit both quantities can be expressed in, if any.
  pub fn common_unit(&self, other: &Quantity<S>) -> Option<UnitNode> {
    get_common(&self.unit, &other.unit)
  }

  /// Adds two quantities. The result is tagged with the common unit
  /// of the operands.
  pub fn try_add(self, rhs: Quantity<S>) -> Result<Quantity<S>, IncompatibleUnitsError<S>>
  where S: Add<Output = S> {
    match self.common_unit(&rhs) {
      Some(unit) => Ok(Quantity::new(self.value + rhs.value, unit)),
      None => Err(IncompatibleUnitsError { lhs: self, rhs }),
    }
  }

  /// Subtracts two quantities. The result is tagged with the common
  /// unit of the operands.
  pub fn try_sub(self, rhs: Quantity<S>) -> Result<Quantity<S>, IncompatibleUnitsError<S>>
  where S: Sub<Output = S> {
    match self.common_unit(&rhs) {
      Some(unit) => Ok(Quantity::new(self.value - rhs.value, unit)),
      None => Err(IncompatibleUnitsError { lhs: self, rhs }),
    }
  }

  /// Compares the values of two quantities with a common unit.
  /// Returns `None` if the units are incompatible or the values are
  /// unordered.
  pub fn try_cmp(&self, other: &Quantity<S>) -> Option<Ordering>
  where S: PartialOrd {
    self.common_unit(other)?;
    self.value.partial_cmp(&other.value)
  }

  pub fn recip(self) -> Quantity<S>
  where S: One + Div<Output = S> {
    Quantity::new(S::one() / self.value, self.unit.invert())
  }
}

impl<S: Display> Display for Quantity<S> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let unit = self.unit.render(UnitDisplayFormat::FlattenedAndSimplified);
    if unit.is_empty() {
      write!(f, "{}", self.value)
    } else {
      write!(f, "{} {}", self.value, unit)
    }
  }
}

impl<S: Mul<Output = S>> Mul for Quantity<S> {
  type Output = Quantity<S>;

  fn mul(self, rhs: Quantity<S>) -> Quantity<S> {
    Quantity::new(self.value * rhs.value, &self.unit * &rhs.unit)
  }
}

impl<'a, S> Mul for &'a Quantity<S>
where &'a S: Mul<&'a S, Output = S> {
  type Output = Quantity<S>;

  fn mul(self, rhs: &'a Quantity<S>) -> Quantity<S> {
    Quantity::new(&self.value * &rhs.value, &self.unit * &rhs.unit)
  }
}

impl<S: Div<Output = S>> Div for Quantity<S> {
  type Output = Quantity<S>;

  fn div(self, rhs: Quantity<S>) -> Quantity<S> {
    Quantity::new(self.value / rhs.value, &self.unit / &rhs.unit)
  }
}

impl<'a, S> Div for &'a Quantity<S>
where &'a S: Div<&'a S, Output = S> {
  type Output = Quantity<S>;

  fn div(self, rhs: &'a Quantity<S>) -> Quantity<S> {
    Quantity::new(&self.value / &rhs.value, &self.unit / &rhs.unit)
  }
}

/// Units must be equal; values are compared approximately.
impl<S: AbsDiffEq> AbsDiffEq for Quantity<S> {
  type Epsilon = S::Epsilon;

  fn default_epsilon() -> S::Epsilon {
    S::default_epsilon()
  }

  fn abs_diff_eq(&self, other: &Quantity<S>, epsilon: S::Epsilon) -> bool {
    self.unit == other.unit && self.value.abs_diff_eq(&other.value, epsilon)
  }
}

impl<S: RelativeEq> RelativeEq for Quantity<S> {
  fn default_max_relative() -> S::Epsilon {
    S::default_max_relative()
  }

  fn relative_eq(&self, other: &Quantity<S>, epsilon: S::Epsilon, max_relative: S::Epsilon) -> bool {
    self.unit == other.unit && self.value.relative_eq(&other.value, epsilon, max_relative)
  }
}
