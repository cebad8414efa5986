
//! Property-based tests for unit tree algebra.

use super::canonical::{flatten, multiply};
use super::display::UnitDisplayFormat;
use super::node::UnitNode;
use super::parsing::{NullLookup, parse_factor};
use super::registry::UnitRegistry;

use num::Zero;
use once_cell::sync::Lazy;
use proptest::prelude::*;

static REGISTRY: Lazy<UnitRegistry> = Lazy::new(UnitRegistry::with_defaults);

const SYMBOLS: [&str; 21] = [
  "", "kg", "m", "s", "A", "K", "mol", "Hz", "N", "J", "W",
  "C", "V", "F", "Ω", "Wb", "S", "Pa", "Pas", "x", "y",
];

/// Leaves of `unit`, one entry per symbol, with dimensionless terms
/// dropped.
fn reduced(unit: &UnitNode) -> Vec<UnitNode> {
  multiply(&flatten(unit)).into_iter()
    .filter(|u| !u.power().is_zero())
    .collect()
}

fn dimension(unit: &UnitNode) -> Vec<UnitNode> {
  reduced(unit).into_iter()
    .filter(|u| !u.symbol().is_empty())
    .collect()
}

// A registry unit (the unitless one included) or a free leaf, raised
// to a small power and possibly inverted.
fn atom() -> impl Strategy<Value = UnitNode> {
  (0..SYMBOLS.len(), -3i64..=3i64, any::<bool>()).prop_map(|(index, power, invert)| {
    let symbol = SYMBOLS[index];
    let unit = match REGISTRY.get(symbol) {
      Some(unit) => unit.change_power(power),
      None => UnitNode::leaf(symbol, power),
    };
    if invert { unit.invert() } else { unit }
  })
}

fn operand() -> impl Strategy<Value = UnitNode> {
  prop_oneof![
    atom(),
    (atom(), atom()).prop_map(|(a, b)| &a * &b),
    (atom(), atom()).prop_map(|(a, b)| &a / &b),
  ]
}

fn leaf_symbol() -> impl Strategy<Value = String> {
  "[a-zA-Z]{1,4}"
}

proptest! {
  #[test]
  fn mul_commutative(a in operand(), b in operand()) {
    prop_assert_eq!(&a * &b, &b * &a);
  }

  #[test]
  fn mul_associative(a in operand(), b in operand(), c in operand()) {
    let lhs = (&(&a * &b) * &c).canonical();
    let rhs = (&a * &(&b * &c)).canonical();
    prop_assert_eq!(lhs.children(), rhs.children());
  }

  #[test]
  fn mul_by_unitless_keeps_dimension(a in operand(), power in -3i64..=3i64) {
    let unitless = UnitNode::unitless().change_power(power);
    let scaled = &unitless * &a;
    prop_assert!(scaled.children().iter().all(|u| !u.symbol().is_empty()));
    prop_assert_eq!(dimension(&scaled), dimension(&a));
  }

  #[test]
  fn mul_by_inverse_cancels(a in operand()) {
    let product = &a * &a.invert();
    prop_assert!(multiply(&flatten(&product)).iter().all(|u| u.power().is_zero()));
  }

  #[test]
  fn div_is_mul_by_inverse(a in operand(), b in operand()) {
    prop_assert_eq!(&a / &b, &a * &b.invert());
  }

  #[test]
  fn double_invert_is_identity(a in operand()) {
    prop_assert_eq!(a.invert().invert(), a);
  }

  #[test]
  fn flatten_is_idempotent(a in operand()) {
    prop_assert_eq!(flatten(&a.flattened()), flatten(&a));
    prop_assert_eq!(a.flattened().flattened(), a.flattened());
  }

  #[test]
  fn canonical_preserves_dimension(a in operand()) {
    prop_assert_eq!(reduced(&a.canonical()), reduced(&a));
  }

  #[test]
  fn parse_factor_roundtrips_root_tree(symbol in leaf_symbol(), power in -9i64..=9i64) {
    prop_assume!(power != 0);
    let unit = UnitNode::leaf(symbol, power);
    let text = unit.render(UnitDisplayFormat::RootTree);
    let parsed = parse_factor(&text, &NullLookup).unwrap();
    prop_assert_eq!(parsed, unit);
  }
}
