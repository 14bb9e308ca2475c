// querypipe/src/stage/sort.rs

//! The `Sort` stage and the `SortOrder` it carries.
//!
//! A sort's comparator is written against the destination's sort key
//! (`Destination::SortKey<T>`): the source element for sequence destinations,
//! the set element or map key for ordered associative destinations. In the
//! latter case the executor does not sort the working data at all; the order
//! becomes the destination's own ordering instead.

use std::cmp::Ordering;
use std::fmt;

pub type Comparator<'a, K> = Box<dyn Fn(&K, &K) -> Ordering + 'a>;

/// A total order over `K`.
pub enum SortOrder<'a, K> {
  /// The type's own `Ord`.
  Natural(fn(&K, &K) -> Ordering),
  /// A caller supplied comparator.
  By(Comparator<'a, K>),
}

impl<'a, K> SortOrder<'a, K> {
  pub fn natural() -> Self
  where
    K: Ord,
  {
    SortOrder::Natural(<K as Ord>::cmp)
  }

  pub fn by(comparator: impl Fn(&K, &K) -> Ordering + 'a) -> Self {
    SortOrder::By(Box::new(comparator))
  }

  /// Orders by the natural order of a derived key.
  pub fn by_key<X>(key: impl Fn(&K) -> X + 'a) -> Self
  where
    K: 'a,
    X: Ord,
  {
    SortOrder::By(Box::new(move |lhs: &K, rhs: &K| key(lhs).cmp(&key(rhs))))
  }

  pub fn is_natural(&self) -> bool {
    matches!(self, SortOrder::Natural(_))
  }

  #[inline]
  pub fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
    match self {
      SortOrder::Natural(cmp) => cmp(lhs, rhs),
      SortOrder::By(cmp) => cmp(lhs, rhs),
    }
  }

  /// Sorts `data` in place. The natural order uses an unstable sort, a
  /// custom comparator a stable one.
  pub fn sort(&self, data: &mut [K]) {
    match self {
      SortOrder::Natural(cmp) => data.sort_unstable_by(*cmp),
      SortOrder::By(cmp) => data.sort_by(|lhs, rhs| cmp(lhs, rhs)),
    }
  }
}

impl<K> fmt::Debug for SortOrder<'_, K> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SortOrder::Natural(_) => f.write_str("Natural"),
      SortOrder::By(_) => f.write_str("By(<comparator>)"),
    }
  }
}

/// Orders the query's results.
pub struct Sort<'a, K> {
  order: SortOrder<'a, K>,
}

impl<'a, K> Sort<'a, K> {
  pub fn new(order: SortOrder<'a, K>) -> Self {
    Self { order }
  }

  pub fn order(&self) -> &SortOrder<'a, K> {
    &self.order
  }

  pub(crate) fn into_order(self) -> SortOrder<'a, K> {
    self.order
  }
}

impl<K> fmt::Debug for Sort<'_, K> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Sort").field("order", &self.order).finish()
  }
}
