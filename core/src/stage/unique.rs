// querypipe/src/stage/unique.rs

//! De-duplication stages.
//!
//! `StableUnique` works on any input and keeps first occurrences in their
//! original order. `PreSortedUnique` is the cheaper variant for data whose
//! duplicates are already adjacent (e.g. after a `Sort`).

use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;

use super::{StageKind, Transform};

/// How two elements are judged equivalent.
pub enum Equivalence<'a, T> {
  /// The element type's own `PartialEq`.
  Natural(fn(&T, &T) -> bool),
  /// A caller supplied predicate.
  By(Box<dyn Fn(&T, &T) -> bool + 'a>),
}

impl<'a, T> Equivalence<'a, T> {
  pub fn natural() -> Self
  where
    T: PartialEq,
  {
    Equivalence::Natural(<T as PartialEq>::eq)
  }

  pub fn by(predicate: impl Fn(&T, &T) -> bool + 'a) -> Self {
    Equivalence::By(Box::new(predicate))
  }

  pub fn is_natural(&self) -> bool {
    matches!(self, Equivalence::Natural(_))
  }

  #[inline]
  pub fn test(&self, lhs: &T, rhs: &T) -> bool {
    match self {
      Equivalence::Natural(eq) => eq(lhs, rhs),
      Equivalence::By(eq) => eq(lhs, rhs),
    }
  }
}

impl<T> fmt::Debug for Equivalence<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Equivalence::Natural(_) => f.write_str("Natural"),
      Equivalence::By(_) => f.write_str("By(<predicate>)"),
    }
  }
}

enum Hashing<'a, T> {
  Natural(fn(&RandomState, &T) -> u64),
  Keyed(Box<dyn Fn(&RandomState, &T) -> u64 + 'a>),
}

impl<T> Hashing<'_, T> {
  #[inline]
  fn hash(&self, state: &RandomState, item: &T) -> u64 {
    match self {
      Hashing::Natural(hash) => hash(state, item),
      Hashing::Keyed(hash) => hash(state, item),
    }
  }
}

fn natural_hash<T: Hash>(state: &RandomState, item: &T) -> u64 {
  state.hash_one(item)
}

/// Removes duplicates in a single pass, keeping the first occurrence of each
/// element and the relative order of the survivors.
///
/// Membership is tracked in a table of hash buckets. Two elements are only
/// compared with the equivalence when they land in the same bucket, so a
/// custom predicate must not consider elements equivalent unless they also
/// hash equally (use [`StableUnique::by_key`] when that does not hold).
pub struct StableUnique<'a, T> {
  hashing: Hashing<'a, T>,
  equivalence: Equivalence<'a, T>,
}

impl<'a, T> StableUnique<'a, T> {
  /// Natural `Eq + Hash` uniqueness.
  pub fn new() -> Self
  where
    T: Hash + Eq,
  {
    Self {
      hashing: Hashing::Natural(natural_hash::<T>),
      equivalence: Equivalence::natural(),
    }
  }

  /// Natural hash, caller supplied equivalence.
  pub fn by(predicate: impl Fn(&T, &T) -> bool + 'a) -> Self
  where
    T: Hash,
  {
    Self {
      hashing: Hashing::Natural(natural_hash::<T>),
      equivalence: Equivalence::by(predicate),
    }
  }

  /// Elements are equivalent when `key` maps them to equal values.
  pub fn by_key<K>(key: impl Fn(&T) -> K + 'a) -> Self
  where
    T: 'a,
    K: Hash + Eq + 'a,
  {
    let key = Rc::new(key);
    let hash_key = Rc::clone(&key);
    Self {
      hashing: Hashing::Keyed(Box::new(move |state: &RandomState, item: &T| state.hash_one(hash_key(item)))),
      equivalence: Equivalence::by(move |lhs: &T, rhs: &T| key(lhs) == key(rhs)),
    }
  }

  pub fn equivalence(&self) -> &Equivalence<'a, T> {
    &self.equivalence
  }
}

impl<T: Hash + Eq> Default for StableUnique<'_, T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Transform<T> for StableUnique<'_, T> {
  fn kind(&self) -> StageKind {
    StageKind::StableUnique
  }

  fn apply(&self, data: Vec<T>) -> Vec<T> {
    let state = RandomState::new();
    // hash -> indices into `kept` of the survivors sharing that hash
    let mut buckets: HashMap<u64, Vec<usize>> = HashMap::with_capacity(data.len());
    let mut kept: Vec<T> = Vec::with_capacity(data.len());

    for item in data {
      let bucket = buckets.entry(self.hashing.hash(&state, &item)).or_default();
      if bucket.iter().any(|&idx| self.equivalence.test(&kept[idx], &item)) {
        continue;
      }
      bucket.push(kept.len());
      kept.push(item);
    }

    kept
  }
}

impl<T> fmt::Debug for StableUnique<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StableUnique")
      .field("equivalence", &self.equivalence)
      .finish_non_exhaustive()
  }
}

/// Collapses each run of adjacent equivalent elements into its first element.
///
/// The input is expected to be sorted so that duplicates are adjacent. This is
/// not checked: unsorted input is only partially de-duplicated.
pub struct PreSortedUnique<'a, T> {
  equivalence: Equivalence<'a, T>,
}

impl<'a, T> PreSortedUnique<'a, T> {
  pub fn new() -> Self
  where
    T: PartialEq,
  {
    Self {
      equivalence: Equivalence::natural(),
    }
  }

  pub fn by(predicate: impl Fn(&T, &T) -> bool + 'a) -> Self {
    Self {
      equivalence: Equivalence::by(predicate),
    }
  }

  pub fn equivalence(&self) -> &Equivalence<'a, T> {
    &self.equivalence
  }
}

impl<T: PartialEq> Default for PreSortedUnique<'_, T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Transform<T> for PreSortedUnique<'_, T> {
  fn kind(&self) -> StageKind {
    StageKind::PreSortedUnique
  }

  fn apply(&self, mut data: Vec<T>) -> Vec<T> {
    // dedup_by hands us (candidate, last kept); the kept one comes first.
    data.dedup_by(|candidate, kept| self.equivalence.test(kept, candidate));
    data
  }
}

impl<T> fmt::Debug for PreSortedUnique<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PreSortedUnique")
      .field("equivalence", &self.equivalence)
      .finish()
  }
}
