
//! Reconciling two units which measure the same dimension but are
//! expressed differently.

use super::node::UnitNode;
use super::canonical::{flatten, multiply, default_ordered};
use super::display::UnitDisplayFormat;

use itertools::Itertools;
use num::Zero;

/// Finds a unit that both `a` and `b` can be expressed in, or `None`
/// if the two units have different dimensions.
///
/// Equal units are returned as-is. Otherwise both units are
/// flattened into default-ordered leaves. If the leaves agree, they
/// form the common unit. Failing that, the leaves are reduced
/// (dimensionless and unitless terms dropped) and compared; units
/// which still differ are incompatible. Compatible units produce the
/// leaves they literally share, followed by the reduced remainder.
/// The remainders of both sides reduce to the same terms, so the
/// remainder of `a` stands for both.
pub fn get_common(a: &UnitNode, b: &UnitNode) -> Option<UnitNode> {
  if a == b {
    return Some(a.clone());
  }

  let a_leaves = default_ordered(flatten(a));
  let b_leaves = default_ordered(flatten(b));
  if a_leaves == b_leaves {
    return Some(UnitNode::composite(a_leaves));
  }

  if reduce(&a_leaves) != reduce(&b_leaves) {
    tracing::debug!(
      lhs = %a.render(UnitDisplayFormat::FlattenedAndSimplified),
      rhs = %b.render(UnitDisplayFormat::FlattenedAndSimplified),
      "no common unit",
    );
    return None;
  }

  let (shared, residue) = partition_shared(&a_leaves, &b_leaves);
  tracing::trace!(
    shared = shared.len(),
    residue = residue.len(),
    "reconciled units with common terms",
  );
  let mut terms = shared;
  terms.extend(reduce(&residue));
  Some(UnitNode::composite(default_ordered(terms)))
}

/// Whether `a` and `b` have a common unit.
pub fn is_compatible(a: &UnitNode, b: &UnitNode) -> bool {
  get_common(a, b).is_some()
}

fn reduce(leaves: &[UnitNode]) -> Vec<UnitNode> {
  multiply(leaves).into_iter()
    .filter(|u| !u.power().is_zero() && !u.symbol().is_empty())
    .collect()
}

/// Multiset intersection of the two leaf sequences, followed by what
/// is left over of `a`.
fn partition_shared(a: &[UnitNode], b: &[UnitNode]) -> (Vec<UnitNode>, Vec<UnitNode>) {
  let mut unmatched = b.iter().counts();
  let mut shared = Vec::new();
  let mut residue = Vec::new();
  for leaf in a {
    match unmatched.get_mut(leaf) {
      Some(count) if *count > 0 => {
        *count -= 1;
        shared.push(leaf.clone());
      }
      _ => {
        residue.push(leaf.clone());
      }
    }
  }
  (shared, residue)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_strict_eq;

  fn leaf(symbol: &str, power: i64) -> UnitNode {
    UnitNode::leaf(symbol, power)
  }

  fn newton() -> UnitNode {
    UnitNode::new("N", 1, [leaf("kg", 1), leaf("m", 1), leaf("s", -2)])
  }

  #[test]
  fn test_equal_units_are_returned_directly() {
    assert_strict_eq!(get_common(&newton(), &newton()), Some(newton()));
    assert_strict_eq!(get_common(&leaf("m", 1), &leaf("m", 1)), Some(leaf("m", 1)));
  }

  #[test]
  fn test_same_leaves_in_different_nesting() {
    let anonymous = UnitNode::new("kg*m/s^2", 1, [leaf("s", -2), leaf("kg", 1), leaf("m", 1)]);
    let common = get_common(&anonymous, &newton()).unwrap();
    assert_strict_eq!(common.children(), &[leaf("kg", 1), leaf("m", 1), leaf("s", -2)][..]);
    assert_eq!(common.render(UnitDisplayFormat::FirstChildren), "kg*m/s^2");
  }

  #[test]
  fn test_same_dimension_after_reduction() {
    let split = UnitNode::new("x", 1, [leaf("kg", 1), leaf("m", 1), leaf("s", -1), leaf("s", -1)]);
    let common = get_common(&split, &newton()).unwrap();
    assert_strict_eq!(common.children(), &[leaf("kg", 1), leaf("m", 1), leaf("s", -2)][..]);
  }

  #[test]
  fn test_dimensionless_terms_are_ignored() {
    let padded = UnitNode::new("x", 1, [leaf("kg", 1), leaf("A", 1), leaf("A", -1)]);
    let common = get_common(&padded, &leaf("kg", 1)).unwrap();
    assert_strict_eq!(common.children(), &[leaf("kg", 1)][..]);
  }

  #[test]
  fn test_different_dimensions() {
    assert_eq!(get_common(&leaf("kg", 1), &leaf("m", 1)), None);
    assert_eq!(get_common(&leaf("m", 1), &leaf("m", 2)), None);
    assert_eq!(get_common(&newton(), &newton().change_power(2)), None);
    assert!(!is_compatible(&newton(), &leaf("kg", 1)));
  }

  #[test]
  fn test_is_compatible() {
    assert!(is_compatible(&newton(), &(&(&leaf("kg", 1) * &leaf("m", 1)) / &leaf("s", 2))));
  }

  #[test]
  fn test_partition_shared() {
    let a = [leaf("kg", 1), leaf("m", 1), leaf("s", -1), leaf("s", -1)];
    let b = [leaf("kg", 1), leaf("m", 1), leaf("s", -2)];
    let (shared, residue) = partition_shared(&a, &b);
    assert_strict_eq!(shared, vec![leaf("kg", 1), leaf("m", 1)]);
    assert_strict_eq!(residue, vec![leaf("s", -1), leaf("s", -1)]);
    assert_eq!(reduce(&residue), reduce(&[leaf("s", -2)]));
  }

  #[test]
  fn test_partition_shared_respects_multiplicity() {
    let a = [leaf("m", 1), leaf("m", 1)];
    let b = [leaf("m", 1), leaf("m", 2)];
    let (shared, residue) = partition_shared(&a, &b);
    assert_strict_eq!(shared, vec![leaf("m", 1)]);
    assert_strict_eq!(residue, vec![leaf("m", 1)]);
  }

  #[test]
  fn test_unitless_terms_are_ignored() {
    let padded = UnitNode::new("x", 1, [UnitNode::unitless(), leaf("kg", 1)]);
    let common = get_common(&padded, &leaf("kg", 1)).unwrap();
    assert_strict_eq!(common.children(), &[leaf("kg", 1)][..]);
    let common = get_common(&UnitNode::unitless(), &leaf("m", 0)).unwrap();
    assert!(common.children().is_empty());
    assert_eq!(common.render(UnitDisplayFormat::FlattenedAndSimplified), "");
  }
}
