
//! Textual renderings of unit trees.

use super::node::UnitNode;

use itertools::Itertools;
use num::{Zero, One};
use thiserror::Error;

use std::fmt::{self, Formatter, Display};
use std::str::FromStr;

/// The ways a [`UnitNode`] can be rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitDisplayFormat {
  /// The root symbol and power only, e.g. `N` or `m^2`.
  RootTree,
  /// The direct children, as a product over a quotient.
  FirstChildren,
  /// The leaves of the tree, as a product over a quotient.
  Flattened,
  /// The direct children with repeated symbols combined.
  Simplified,
  /// The leaves of the tree with repeated symbols combined. This is
  /// the fully reduced form.
  FlattenedAndSimplified,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown display format '{input}'")]
pub struct ParseDisplayFormatError {
  pub input: String,
}

impl UnitDisplayFormat {
  pub const ALL: [UnitDisplayFormat; 5] = [
    UnitDisplayFormat::RootTree,
    UnitDisplayFormat::FirstChildren,
    UnitDisplayFormat::Flattened,
    UnitDisplayFormat::Simplified,
    UnitDisplayFormat::FlattenedAndSimplified,
  ];

  pub fn name(self) -> &'static str {
    match self {
      UnitDisplayFormat::RootTree => "root-tree",
      UnitDisplayFormat::FirstChildren => "first-children",
      UnitDisplayFormat::Flattened => "flattened",
      UnitDisplayFormat::Simplified => "simplified",
      UnitDisplayFormat::FlattenedAndSimplified => "flattened-and-simplified",
    }
  }
}

impl Display for UnitDisplayFormat {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Accepts the kebab-case names from [`UnitDisplayFormat::name`] as
/// well as the variant names, case-insensitively.
impl FromStr for UnitDisplayFormat {
  type Err = ParseDisplayFormatError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized: String = s.chars()
      .filter(|c| c.is_alphanumeric())
      .flat_map(char::to_lowercase)
      .collect();
    match normalized.as_str() {
      "roottree" => Ok(UnitDisplayFormat::RootTree),
      "firstchildren" => Ok(UnitDisplayFormat::FirstChildren),
      "flattened" => Ok(UnitDisplayFormat::Flattened),
      "simplified" => Ok(UnitDisplayFormat::Simplified),
      "flattenedandsimplified" => Ok(UnitDisplayFormat::FlattenedAndSimplified),
      _ => Err(ParseDisplayFormatError { input: s.to_owned() }),
    }
  }
}

impl UnitNode {
  pub fn render(&self, format: UnitDisplayFormat) -> String {
    match format {
      UnitDisplayFormat::RootTree => root_tree(self),
      UnitDisplayFormat::FirstChildren => first_children(self),
      UnitDisplayFormat::Flattened => first_children(&self.flattened()),
      UnitDisplayFormat::Simplified => first_children(&self.simplified()),
      UnitDisplayFormat::FlattenedAndSimplified => first_children(&self.flattened().simplified()),
    }
  }
}

/// Displays as [`UnitDisplayFormat::RootTree`].
impl Display for UnitNode {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(&root_tree(self))
  }
}

/// `symbol^power`, omitting a power of one. A zero power renders as
/// the empty string.
pub fn root_tree(unit: &UnitNode) -> String {
  if unit.power().is_zero() {
    String::new()
  } else if unit.power().is_one() {
    unit.symbol().to_owned()
  } else {
    format!("{}^{}", unit.symbol(), unit.power())
  }
}

/// Renders each unit as a root tree and joins them with `*`.
pub fn aggregate<'a>(units: impl IntoIterator<Item = &'a UnitNode>) -> String {
  units.into_iter().map(root_tree).join("*")
}

/// Renders the direct children of `unit` as `pos/neg`. Zero powers
/// are omitted, and the denominator is parenthesized when it holds
/// more than one factor. A leaf renders as its root tree.
pub fn first_children(unit: &UnitNode) -> String {
  if unit.is_leaf() {
    return root_tree(unit);
  }

  let positive = aggregate(
    unit.children().iter()
      .filter(|u| u.power().is_positive())
      .sorted_by(|a, b| b.power().cmp(a.power())),
  );

  let negative_units: Vec<UnitNode> = unit.children().iter()
    .filter(|u| u.power().is_negative())
    .sorted_by(|a, b| a.power().cmp(b.power()))
    .map(UnitNode::invert)
    .collect();
  let mut negative = aggregate(&negative_units);
  if negative_units.len() > 1 {
    negative = format!("({negative})");
  }

  match (positive.is_empty(), negative.is_empty()) {
    (false, true) => positive,
    (true, false) => format!("1/{negative}"),
    (false, false) => format!("{positive}/{negative}"),
    (true, true) => String::new(),
  }
}
