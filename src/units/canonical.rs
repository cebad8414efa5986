
//! Normal forms for unit trees, and multiplication and division.

use super::node::UnitNode;
use super::power::Power;
use super::display::aggregate;

use itertools::Itertools;
use num::Zero;

use std::cmp::Ordering;
use std::ops::{Mul, Div};
use std::sync::Arc;

/// The canonical ordering of sibling units: descending by power,
/// then ascending by symbol.
pub fn default_order(a: &UnitNode, b: &UnitNode) -> Ordering {
  b.power().cmp(a.power()).then_with(|| a.symbol().cmp(b.symbol()))
}

/// Sorts a sequence of units into [`default_order`].
pub fn default_ordered(units: impl IntoIterator<Item = UnitNode>) -> Vec<UnitNode> {
  units.into_iter().sorted_by(default_order).collect()
}

/// Negates the power of each unit and of every descendant. Order and
/// symbols are left alone.
pub fn invert_all(units: &[UnitNode]) -> Vec<UnitNode> {
  units.iter().map(UnitNode::invert).collect()
}

/// The leaves of `unit`, depth-first and left to right. A leaf
/// flattens to itself.
pub fn flatten(unit: &UnitNode) -> Vec<UnitNode> {
  let mut leaves = Vec::new();
  let mut stack = vec![unit];
  while let Some(node) = stack.pop() {
    if node.is_leaf() {
      leaves.push(node.clone());
    } else {
      stack.extend(node.children().iter().rev());
    }
  }
  leaves
}

/// Groups `units` by symbol. Each group becomes one unit whose power
/// is the sum of the group's powers and whose children are the
/// recursively multiplied children of the group. The result is in
/// [`default_order`].
pub fn multiply<'a>(units: impl IntoIterator<Item = &'a UnitNode>) -> Vec<UnitNode> {
  multiply_refs(units.into_iter().collect())
}

fn multiply_refs(units: Vec<&UnitNode>) -> Vec<UnitNode> {
  let groups = units.into_iter().into_group_map_by(|u| u.symbol_arc().clone());
  let reduced = groups.into_iter()
    .map(|(symbol, group)| {
      let power: Power = group.iter().map(|u| u.power()).sum();
      let children = multiply_refs(group.iter().flat_map(|u| u.children()).collect());
      UnitNode::from_parts(symbol, power, children.into())
    });
  default_ordered(reduced)
}

impl UnitNode {
  pub fn invert(&self) -> UnitNode {
    let children: Arc<[UnitNode]> = self.children().iter().map(UnitNode::invert).collect();
    UnitNode::from_parts(self.symbol_arc().clone(), - self.power(), children)
  }

  /// The same root over the leaves of this tree. A leaf is
  /// returned unchanged.
  pub fn flattened(&self) -> UnitNode {
    if self.is_leaf() {
      return self.clone();
    }
    UnitNode::from_parts(self.symbol_arc().clone(), self.power().clone(), flatten(self).into())
  }

  /// The same root over the [`multiply`] of the direct children.
  /// Nested composites are not expanded.
  pub fn simplified(&self) -> UnitNode {
    let children = multiply(self.children());
    UnitNode::from_parts(self.symbol_arc().clone(), self.power().clone(), children.into())
  }

  /// The fully reduced form: one level, one entry per symbol.
  pub fn canonical(&self) -> UnitNode {
    self.flattened().simplified()
  }

  /// Product of two units, as described in the [`Mul`] impl.
  pub fn mul_unit(&self, rhs: &UnitNode) -> UnitNode {
    let factors = self.factors().iter().chain(rhs.factors())
      .filter(|u| !u.symbol().is_empty());
    let children = multiply(factors);
    if self.symbol() != rhs.symbol() {
      return UnitNode::composite(children);
    }
    let power = self.power() + rhs.power();
    if self.is_leaf() && rhs.is_leaf() {
      UnitNode::from_parts(self.symbol_arc().clone(), power, Arc::from(Vec::new()))
    } else {
      UnitNode::from_parts(self.symbol_arc().clone(), power, children.into())
    }
  }

  pub fn div_unit(&self, rhs: &UnitNode) -> UnitNode {
    self.mul_unit(&rhs.invert())
  }

  /// An anonymous unit over the given factors, with power one. The
  /// symbol is the `*`-joined rendering of the non-zero factors.
  pub fn composite(children: impl IntoIterator<Item = UnitNode>) -> UnitNode {
    let children: Vec<UnitNode> = children.into_iter().collect();
    let symbol = aggregate(children.iter().filter(|u| !u.power().is_zero()));
    UnitNode::new(symbol, 1, children)
  }
}

/// The factors of both sides (children, or the unit itself for a
/// leaf) are [`multiply`]'d together. Unitless factors (empty symbol)
/// are dropped. Two units with the same symbol
/// keep that symbol, with the powers added; two leaves stay a leaf.
/// Units with different symbols produce an anonymous
/// [`UnitNode::composite`].
impl Mul for &UnitNode {
  type Output = UnitNode;

  fn mul(self, rhs: &UnitNode) -> UnitNode {
    self.mul_unit(rhs)
  }
}

impl Mul for UnitNode {
  type Output = UnitNode;

  fn mul(self, rhs: UnitNode) -> UnitNode {
    self.mul_unit(&rhs)
  }
}

impl Div for &UnitNode {
  type Output = UnitNode;

  fn div(self, rhs: &UnitNode) -> UnitNode {
    self.div_unit(rhs)
  }
}

impl Div for UnitNode {
  type Output = UnitNode;

  fn div(self, rhs: UnitNode) -> UnitNode {
    self.div_unit(&rhs)
  }
}
