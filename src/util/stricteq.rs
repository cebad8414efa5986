
use std::fmt::{self, Debug, Formatter};

/// An equality relation at least as fine as [`PartialEq`].
///
/// `UnitNode` compares by cached hash under `==`. `strict_eq` walks
/// the whole structure instead, so `a.strict_eq(b)` must always imply
/// `a == b` (but not the other way around).
pub trait StrictEq: PartialEq {
  fn strict_eq(&self, other: &Self) -> bool;
}

/// Wrapper which compares with [`StrictEq`] under `==`, so that
/// structural comparisons can go through `assert_eq!`.
///
/// Debug-prints as the wrapped value.
pub struct Strictly<'a, T: ?Sized>(pub &'a T);

impl<'a, T: StrictEq + ?Sized> PartialEq for Strictly<'a, T> {
  fn eq(&self, other: &Self) -> bool {
    self.0.strict_eq(other.0)
  }
}

impl<'a, T: Debug + ?Sized> Debug for Strictly<'a, T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    Debug::fmt(self.0, f)
  }
}

impl<T: StrictEq + ?Sized> StrictEq for &T {
  fn strict_eq(&self, other: &Self) -> bool {
    (**self).strict_eq(*other)
  }
}

impl<T: StrictEq> StrictEq for [T] {
  fn strict_eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.strict_eq(b))
  }
}

impl<T: StrictEq> StrictEq for Vec<T> {
  fn strict_eq(&self, other: &Self) -> bool {
    self.as_slice().strict_eq(other.as_slice())
  }
}

impl<T: StrictEq> StrictEq for Option<T> {
  fn strict_eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Some(a), Some(b)) => a.strict_eq(b),
      (None, None) => true,
      _ => false,
    }
  }
}

/// `assert_eq!`, but comparing with [`StrictEq::strict_eq`].
#[macro_export]
macro_rules! assert_strict_eq {
  ($left:expr, $right:expr $(,)?) => {
    match (&$left, &$right) {
      (left_val, right_val) => {
        assert_eq!(
          $crate::util::stricteq::Strictly(left_val),
          $crate::util::stricteq::Strictly(right_val),
        )
      }
    }
  }
}

/// `assert_ne!`, but comparing with [`StrictEq::strict_eq`].
#[macro_export]
macro_rules! assert_strict_ne {
  ($left:expr, $right:expr $(,)?) => {
    match (&$left, &$right) {
      (left_val, right_val) => {
        assert_ne!(
          $crate::util::stricteq::Strictly(left_val),
          $crate::util::stricteq::Strictly(right_val),
        )
      }
    }
  }
}
