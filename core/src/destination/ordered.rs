// querypipe/src/destination/ordered.rs

//! Ordered set and map that can be ordered by a comparator.
//!
//! `BTreeSet`/`BTreeMap` only order by `Ord`, which rules out ordering a
//! query's results by anything else. These keep their elements in a sorted
//! `Vec` under an arbitrary [`SortOrder`] and insert by binary search.

use std::fmt;

use super::{Destination, Family, Insertion};
use crate::error::QueryResult;
use crate::stage::SortOrder;

/// A set kept sorted under a [`SortOrder`]. Elements the order deems equal are
/// duplicates.
pub struct OrderedSet<'a, T> {
  items: Vec<T>,
  order: SortOrder<'a, T>,
}

impl<'a, T> OrderedSet<'a, T> {
  /// An empty set in the natural order of `T`.
  pub fn new() -> Self
  where
    T: Ord,
  {
    Self::with_order(SortOrder::natural())
  }

  pub fn with_order(order: SortOrder<'a, T>) -> Self {
    Self {
      items: Vec::new(),
      order,
    }
  }

  pub fn with_comparator(comparator: impl Fn(&T, &T) -> std::cmp::Ordering + 'a) -> Self {
    Self::with_order(SortOrder::by(comparator))
  }

  fn search(&self, item: &T) -> Result<usize, usize> {
    self.items.binary_search_by(|held| self.order.compare(held, item))
  }

  /// Inserts `item`, returning false (and dropping it) when an equal element
  /// is already present.
  pub fn insert(&mut self, item: T) -> bool {
    match self.search(&item) {
      Ok(_) => false,
      Err(slot) => {
        self.items.insert(slot, item);
        true
      }
    }
  }

  pub fn contains(&self, item: &T) -> bool {
    self.search(item).is_ok()
  }

  pub fn remove(&mut self, item: &T) -> Option<T> {
    self.search(item).ok().map(|idx| self.items.remove(idx))
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn first(&self) -> Option<&T> {
    self.items.first()
  }

  pub fn last(&self) -> Option<&T> {
    self.items.last()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, T> {
    self.items.iter()
  }

  pub fn order(&self) -> &SortOrder<'a, T> {
    &self.order
  }

  /// The elements in order.
  pub fn into_vec(self) -> Vec<T> {
    self.items
  }
}

impl<T: Ord> Default for OrderedSet<'_, T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.items.iter()).finish()
  }
}

impl<T> IntoIterator for OrderedSet<'_, T> {
  type Item = T;
  type IntoIter = std::vec::IntoIter<T>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.into_iter()
  }
}

impl<'b, T> IntoIterator for &'b OrderedSet<'_, T> {
  type Item = &'b T;
  type IntoIter = std::slice::Iter<'b, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.iter()
  }
}

impl<'a, R: Ord> Destination<'a> for OrderedSet<'a, R> {
  type Item = R;
  type SortKey<T> = R;

  const FAMILY: Family = Family::OrderedSet;
  const INSERTION: Option<Insertion> = Some(Insertion::Insert);

  fn create<T>(order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self> {
    Ok(Self::with_order(order.unwrap_or_else(SortOrder::natural)))
  }

  // The order was taken over in `create`.
  fn sort_working<T>(_data: &mut Vec<T>, _order: &SortOrder<'a, Self::SortKey<T>>) {}

  fn reserve(&mut self, additional: usize) {
    self.items.reserve(additional);
  }

  fn insert_one(&mut self, item: R) -> bool {
    self.insert(item)
  }

  fn len(&self) -> usize {
    self.items.len()
  }
}

/// A map kept sorted by key under a [`SortOrder`].
pub struct OrderedMap<'a, K, V> {
  entries: Vec<(K, V)>,
  order: SortOrder<'a, K>,
}

impl<'a, K, V> OrderedMap<'a, K, V> {
  /// An empty map in the natural order of `K`.
  pub fn new() -> Self
  where
    K: Ord,
  {
    Self::with_order(SortOrder::natural())
  }

  pub fn with_order(order: SortOrder<'a, K>) -> Self {
    Self {
      entries: Vec::new(),
      order,
    }
  }

  pub fn with_comparator(comparator: impl Fn(&K, &K) -> std::cmp::Ordering + 'a) -> Self {
    Self::with_order(SortOrder::by(comparator))
  }

  fn search(&self, key: &K) -> Result<usize, usize> {
    self.entries.binary_search_by(|(held, _)| self.order.compare(held, key))
  }

  /// Inserts or replaces the value for `key`, returning the previous value.
  pub fn insert(&mut self, key: K, value: V) -> Option<V> {
    match self.search(&key) {
      Ok(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
      Err(slot) => {
        self.entries.insert(slot, (key, value));
        None
      }
    }
  }

  /// Inserts only when `key` is absent. Returns false if it was present.
  pub fn insert_new(&mut self, key: K, value: V) -> bool {
    match self.search(&key) {
      Ok(_) => false,
      Err(slot) => {
        self.entries.insert(slot, (key, value));
        true
      }
    }
  }

  pub fn get(&self, key: &K) -> Option<&V> {
    self.search(key).ok().map(|idx| &self.entries[idx].1)
  }

  pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
    match self.search(key) {
      Ok(idx) => Some(&mut self.entries[idx].1),
      Err(_) => None,
    }
  }

  pub fn contains_key(&self, key: &K) -> bool {
    self.search(key).is_ok()
  }

  pub fn remove(&mut self, key: &K) -> Option<V> {
    self.search(key).ok().map(|idx| self.entries.remove(idx).1)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn first_key_value(&self) -> Option<(&K, &V)> {
    self.entries.first().map(|(k, v)| (k, v))
  }

  pub fn last_key_value(&self) -> Option<(&K, &V)> {
    self.entries.last().map(|(k, v)| (k, v))
  }

  pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator {
    self.entries.iter().map(|(k, v)| (k, v))
  }

  pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
    self.entries.iter().map(|(k, _)| k)
  }

  pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
    self.entries.iter().map(|(_, v)| v)
  }

  pub fn order(&self) -> &SortOrder<'a, K> {
    &self.order
  }

  /// The entries in key order.
  pub fn into_vec(self) -> Vec<(K, V)> {
    self.entries
  }
}

impl<K: Ord, V> Default for OrderedMap<'_, K, V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<'_, K, V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
  }
}

impl<K, V> IntoIterator for OrderedMap<'_, K, V> {
  type Item = (K, V);
  type IntoIter = std::vec::IntoIter<(K, V)>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.into_iter()
  }
}

impl<'a, K: Ord, V> Destination<'a> for OrderedMap<'a, K, V> {
  type Item = (K, V);
  type SortKey<T> = K;

  const FAMILY: Family = Family::OrderedMap;
  const INSERTION: Option<Insertion> = Some(Insertion::Insert);

  fn create<T>(order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self> {
    Ok(Self::with_order(order.unwrap_or_else(SortOrder::natural)))
  }

  fn sort_working<T>(_data: &mut Vec<T>, _order: &SortOrder<'a, Self::SortKey<T>>) {}

  fn reserve(&mut self, additional: usize) {
    self.entries.reserve(additional);
  }

  fn insert_one(&mut self, (key, value): (K, V)) -> bool {
    self.insert_new(key, value)
  }

  fn len(&self) -> usize {
    self.entries.len()
  }
}
