
use super::power::Power;
use crate::util::stricteq::StrictEq;

use num::{Zero, One};

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

const CHILD_FACTOR: u64 = 31;
const SYMBOL_FACTOR: u64 = 1_000_000_007;
const POWER_FACTOR: u64 = 1_000_000_009;

/// An immutable unit tree.
///
/// A node is a symbol raised to a power, together with an ordered
/// list of multiplicative sub-factors. A node with no children is a
/// leaf (an atomic unit like `kg`). A node with children is a derived
/// unit, where each child carries its own absolute power (so the
/// children of `N^2` are `kg^2`, `m^2`, and `s^-4`).
///
/// Nodes are never mutated. Every transformation builds a new tree,
/// sharing untouched subtrees.
///
/// Two nodes are equal under `==` iff their structural hashes are
/// equal. The hash is computed once at construction and is a pure
/// function of the symbol, the power, and the children in order. Use
/// [`StrictEq::strict_eq`] for an exact structural comparison. With
/// the `structural-eq` feature enabled, `==` checks both.
#[derive(Debug, Clone)]
pub struct UnitNode {
  symbol: Arc<str>,
  power: Power,
  children: Arc<[UnitNode]>,
  hash: u64,
}

impl UnitNode {
  pub fn new(
    symbol: impl Into<Arc<str>>,
    power: impl Into<Power>,
    children: impl IntoIterator<Item = UnitNode>,
  ) -> Self {
    Self::from_parts(symbol.into(), power.into(), children.into_iter().collect())
  }

  /// An atomic unit with no sub-factors.
  pub fn leaf(symbol: impl Into<Arc<str>>, power: impl Into<Power>) -> Self {
    Self::new(symbol, power, [])
  }

  /// The unitless node: empty symbol, power one, no children.
  pub fn unitless() -> Self {
    Self::leaf("", Power::one())
  }

  pub(crate) fn from_parts(symbol: Arc<str>, power: Power, children: Arc<[UnitNode]>) -> Self {
    let hash = structural_hash(&symbol, &power, &children);
    Self { symbol, power, children, hash }
  }

  pub fn symbol(&self) -> &str {
    &self.symbol
  }

  pub(crate) fn symbol_arc(&self) -> &Arc<str> {
    &self.symbol
  }

  pub fn power(&self) -> &Power {
    &self.power
  }

  pub fn children(&self) -> &[UnitNode] {
    &self.children
  }

  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }

  /// The cached structural hash of this tree.
  pub fn structural_hash(&self) -> u64 {
    self.hash
  }

  /// The multiplicative factors of this node: its children if it has
  /// any, or else the node itself.
  pub fn factors(&self) -> &[UnitNode] {
    if self.is_leaf() {
      std::slice::from_ref(self)
    } else {
      &self.children
    }
  }

  /// Replaces the power of this node, scaling every descendant's
  /// power by `new_power / old_power` so that the subtree keeps its
  /// proportions. `m^2` where `m = a*b` becomes `(a*b)^2 = a^2*b^2`.
  ///
  /// A node whose current power is zero has no defined scale factor;
  /// in that case only the root power changes.
  pub fn change_power(&self, new_power: impl Into<Power>) -> UnitNode {
    let new_power = new_power.into();
    if self.power.is_zero() {
      return Self::from_parts(self.symbol.clone(), new_power, self.children.clone());
    }
    let scale = &new_power / &self.power;
    Self::from_parts(self.symbol.clone(), new_power, scale_children(&self.children, &scale))
  }

  /// Same symbol and power, ignoring children.
  pub fn shallow_eq(&self, other: &UnitNode) -> bool {
    self.symbol == other.symbol && self.power == other.power
  }
}

fn scale_children(children: &[UnitNode], scale: &Power) -> Arc<[UnitNode]> {
  children.iter()
    .map(|child| {
      UnitNode::from_parts(
        child.symbol.clone(),
        &child.power * scale,
        scale_children(&child.children, scale),
      )
    })
    .collect()
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
  let mut hasher = DefaultHasher::new();
  value.hash(&mut hasher);
  hasher.finish()
}

/// Order-dependent fold over the children's hashes, plus weighted
/// hashes of the symbol and power. All arithmetic wraps.
fn structural_hash(symbol: &str, power: &Power, children: &[UnitNode]) -> u64 {
  let mut hash = children.iter()
    .fold(1u64, |acc, child| acc.wrapping_mul(CHILD_FACTOR).wrapping_add(child.hash));
  hash = hash.wrapping_add(SYMBOL_FACTOR.wrapping_mul(hash_of(symbol)));
  hash = hash.wrapping_add(POWER_FACTOR.wrapping_mul(hash_of(power)));
  hash
}

impl PartialEq for UnitNode {
  #[cfg(not(feature = "structural-eq"))]
  fn eq(&self, other: &UnitNode) -> bool {
    self.hash == other.hash
  }

  #[cfg(feature = "structural-eq")]
  fn eq(&self, other: &UnitNode) -> bool {
    self.hash == other.hash && self.strict_eq(other)
  }
}

impl Eq for UnitNode {}

impl Hash for UnitNode {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_u64(self.hash);
  }
}

impl StrictEq for UnitNode {
  fn strict_eq(&self, other: &UnitNode) -> bool {
    if Arc::ptr_eq(&self.children, &other.children) {
      return self.shallow_eq(other);
    }
    self.shallow_eq(other) &&
      self.children.len() == other.children.len() &&
      self.children.iter().zip(other.children.iter()).all(|(a, b)| a.strict_eq(b))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_strict_eq;

  fn newton() -> UnitNode {
    UnitNode::new("N", 1, [
      UnitNode::leaf("kg", 1),
      UnitNode::leaf("m", 1),
      UnitNode::leaf("s", -2),
    ])
  }

  #[test]
  fn test_leaf_construction() {
    let unit = UnitNode::leaf("m", 2);
    assert_eq!(unit.symbol(), "m");
    assert_eq!(unit.power(), &Power::from(2));
    assert!(unit.is_leaf());
    assert!(unit.children().is_empty());
  }

  #[test]
  fn test_unitless() {
    let unit = UnitNode::unitless();
    assert_eq!(unit.symbol(), "");
    assert!(unit.power().is_one());
    assert!(unit.is_leaf());
  }

  #[test]
  fn test_equal_trees_hash_equal() {
    assert_eq!(newton(), newton());
    assert_eq!(newton().structural_hash(), newton().structural_hash());
    assert_strict_eq!(newton(), newton());
  }

  #[test]
  fn test_hash_depends_on_every_field() {
    assert_ne!(UnitNode::leaf("m", 1), UnitNode::leaf("s", 1));
    assert_ne!(UnitNode::leaf("m", 1), UnitNode::leaf("m", 2));
    assert_ne!(UnitNode::leaf("N", 1), newton());
    assert_ne!(newton(), newton().change_power(2));
  }

  #[test]
  fn test_hash_is_order_dependent() {
    let a = UnitNode::new("x", 1, [UnitNode::leaf("a", 1), UnitNode::leaf("b", 1)]);
    let b = UnitNode::new("x", 1, [UnitNode::leaf("b", 1), UnitNode::leaf("a", 1)]);
    assert_ne!(a, b);
  }

  #[test]
  fn test_equal_rational_powers_hash_equal() {
    let a = UnitNode::leaf("m", Power::ratio(2, 4));
    let b = UnitNode::leaf("m", Power::ratio(1, 2));
    assert_eq!(a, b);
  }

  #[test]
  fn test_change_power_scales_descendants() {
    let squared = newton().change_power(2);
    assert_strict_eq!(squared, UnitNode::new("N", 2, [
      UnitNode::leaf("kg", 2),
      UnitNode::leaf("m", 2),
      UnitNode::leaf("s", -4),
    ]));
  }

  #[test]
  fn test_change_power_scales_nested_descendants() {
    let joule = UnitNode::new("J", 1, [newton(), UnitNode::leaf("m", 1)]);
    let halved = joule.change_power(Power::ratio(1, 2));
    assert_eq!(halved.power(), &Power::ratio(1, 2));
    assert_eq!(halved.children()[0].power(), &Power::ratio(1, 2));
    assert_eq!(halved.children()[0].children()[2].power(), &Power::from(-1));
    assert_eq!(halved.children()[1].power(), &Power::ratio(1, 2));
  }

  #[test]
  fn test_change_power_of_leaf() {
    assert_strict_eq!(UnitNode::leaf("m", 1).change_power(3), UnitNode::leaf("m", 3));
  }

  #[test]
  fn test_change_power_from_zero_keeps_children() {
    let zero = UnitNode::new("x", 0, [UnitNode::leaf("a", 1)]);
    assert_strict_eq!(zero.change_power(2), UnitNode::new("x", 2, [UnitNode::leaf("a", 1)]));
  }

  #[test]
  fn test_factors() {
    let leaf = UnitNode::leaf("m", 1);
    assert_eq!(leaf.factors(), &[leaf.clone()]);
    assert_eq!(newton().factors(), newton().children());
  }

  #[test]
  fn test_shallow_eq_ignores_children() {
    assert!(newton().shallow_eq(&UnitNode::leaf("N", 1)));
    assert!(!newton().shallow_eq(&UnitNode::leaf("N", 2)));
  }

  #[test]
  fn test_usable_as_hash_key() {
    let mut set = std::collections::HashSet::new();
    set.insert(newton());
    set.insert(newton());
    set.insert(UnitNode::leaf("m", 1));
    assert_eq!(set.len(), 2);
  }
}
