
use num::{BigInt, BigRational, Zero, One, Signed};
use num::integer::Integer;
use thiserror::Error;
use once_cell::sync::Lazy;
use regex::Regex;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::iter::Sum;
use std::ops;

/// An exact rational exponent attached to a unit.
///
/// Exponents are always stored as arbitrary-precision rationals, so
/// summing and scaling them never loses precision.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Power(BigRational);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to parse '{input}' as a power")]
pub struct ParsePowerError {
  pub input: String,
}

impl Power {
  /// Produces the rational power `numer / denom`.
  ///
  /// Panics if `denom == 0`.
  pub fn ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Power {
    Power(BigRational::new(numer.into(), denom.into()))
  }

  pub fn as_ratio(&self) -> &BigRational {
    &self.0
  }

  pub fn into_ratio(self) -> BigRational {
    self.0
  }

  pub fn is_integer(&self) -> bool {
    self.0.is_integer()
  }

  pub fn is_positive(&self) -> bool {
    self.0.is_positive()
  }

  pub fn is_negative(&self) -> bool {
    self.0.is_negative()
  }

  /// If the power has a finite decimal expansion, returns that
  /// expansion with the minimal number of fractional digits.
  fn decimal_expansion(&self) -> Option<String> {
    let two = BigInt::from(2);
    let five = BigInt::from(5);
    let mut denom = self.0.denom().clone();
    let (mut twos, mut fives) = (0usize, 0usize);
    while denom.is_multiple_of(&two) {
      denom /= &two;
      twos += 1;
    }
    while denom.is_multiple_of(&five) {
      denom /= &five;
      fives += 1;
    }
    if !denom.is_one() {
      return None;
    }
    let digits = twos.max(fives);
    let scale = num::pow(BigInt::from(10), digits);
    let scaled = (self.0.numer() * scale) / self.0.denom();
    let mut text = scaled.abs().to_string();
    if text.len() <= digits {
      text = format!("{}{}", "0".repeat(digits + 1 - text.len()), text);
    }
    let (whole, frac) = text.split_at(text.len() - digits);
    let sign = if self.0.is_negative() { "-" } else { "" };
    if digits == 0 {
      Some(format!("{sign}{whole}"))
    } else {
      Some(format!("{sign}{whole}.{frac}"))
    }
  }
}

impl ParsePowerError {
  pub fn new(input: impl Into<String>) -> Self {
    Self { input: input.into() }
  }
}

impl From<i32> for Power {
  fn from(i: i32) -> Power {
    Power(BigRational::from_integer(i.into()))
  }
}

impl From<i64> for Power {
  fn from(i: i64) -> Power {
    Power(BigRational::from_integer(i.into()))
  }
}

impl From<BigInt> for Power {
  fn from(i: BigInt) -> Power {
    Power(BigRational::from_integer(i))
  }
}

impl From<BigRational> for Power {
  fn from(r: BigRational) -> Power {
    Power(r)
  }
}

/// Integers print bare, terminating fractions print as decimals, and
/// everything else prints in `n:d` ratio form. The output always
/// parses back to the same value.
impl Display for Power {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if self.0.is_integer() {
      return write!(f, "{}", self.0.numer());
    }
    match self.decimal_expansion() {
      Some(text) => f.write_str(&text),
      None => write!(f, "{}:{}", self.0.numer(), self.0.denom()),
    }
  }
}

impl FromStr for Power {
  type Err = ParsePowerError;

  fn from_str(s: &str) -> Result<Power, ParsePowerError> {
    parse_decimal(s).or_else(|| {
      parse_ratio(s)
    }).ok_or_else(|| ParsePowerError::new(s))
  }
}

fn parse_decimal(s: &str) -> Option<Power> {
  static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([+-]?)(\d*)(?:\.(\d*))?$").unwrap());
  let caps = RE.captures(s)?;
  let whole = caps.get(2).map_or("", |m| m.as_str());
  let frac = caps.get(3).map_or("", |m| m.as_str());
  if whole.is_empty() && frac.is_empty() {
    return None;
  }
  let numer = BigInt::from_str(&format!("{whole}{frac}")).ok()?;
  let denom = num::pow(BigInt::from(10), frac.len());
  let value = BigRational::new(numer, denom);
  if caps.get(1).is_some_and(|m| m.as_str() == "-") {
    Some(Power(-value))
  } else {
    Some(Power(value))
  }
}

fn parse_ratio(s: &str) -> Option<Power> {
  static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([+-]?\d+):([+-]?\d+)$").unwrap());
  let caps = RE.captures(s)?;
  let numer = BigInt::from_str(caps.get(1)?.as_str()).ok()?;
  let denom = BigInt::from_str(caps.get(2)?.as_str()).ok()?;
  if denom.is_zero() {
    return None;
  }
  Some(Power(BigRational::new(numer, denom)))
}

impl Zero for Power {
  fn zero() -> Power {
    Power(BigRational::zero())
  }

  fn is_zero(&self) -> bool {
    self.0.is_zero()
  }
}

impl One for Power {
  fn one() -> Power {
    Power(BigRational::one())
  }

  fn is_one(&self) -> bool {
    self.0.is_one()
  }
}

impl ops::Neg for Power {
  type Output = Power;

  fn neg(self) -> Power {
    Power(- self.0)
  }
}

impl ops::Neg for &Power {
  type Output = Power;

  fn neg(self) -> Power {
    Power(- &self.0)
  }
}

macro_rules! forward_binop {
  ($trait_name:ident, $method:ident) => {
    impl ops::$trait_name for Power {
      type Output = Power;

      fn $method(self, other: Power) -> Power {
        Power(ops::$trait_name::$method(self.0, other.0))
      }
    }

    impl ops::$trait_name for &Power {
      type Output = Power;

      fn $method(self, other: &Power) -> Power {
        Power(ops::$trait_name::$method(&self.0, &other.0))
      }
    }
  }
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
// Division panics on a zero divisor, like the underlying rationals.
forward_binop!(Div, div);

impl Sum for Power {
  fn sum<I: Iterator<Item = Power>>(iter: I) -> Power {
    iter.fold(Power::zero(), |acc, p| acc + p)
  }
}

impl<'a> Sum<&'a Power> for Power {
  fn sum<I: Iterator<Item = &'a Power>>(iter: I) -> Power {
    iter.fold(Power::zero(), |acc, p| acc + p.clone())
  }
}
