// querypipe/src/destination/std_impls.rs

//! `Destination` for the std collections.

use std::any::type_name;
use std::collections::btree_map;
use std::collections::hash_map;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};

use super::{Destination, Family, Insertion};
use crate::error::{QueryError, QueryResult};
use crate::stage::SortOrder;

// B-tree collections order by `Ord` only.
fn natural_only<K, D>(order: &Option<SortOrder<'_, K>>) -> QueryResult<()> {
  match order {
    Some(SortOrder::By(_)) => Err(QueryError::CustomOrderUnsupported {
      destination: type_name::<D>().to_string(),
    }),
    _ => Ok(()),
  }
}

// --- Sequences ---

impl<'a, R> Destination<'a> for Vec<R> {
  type Item = R;
  type SortKey<T> = T;

  const FAMILY: Family = Family::Sequence;
  const INSERTION: Option<Insertion> = Some(Insertion::Append);

  fn create<T>(_order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self> {
    Ok(Vec::new())
  }

  fn sort_working<T>(data: &mut Vec<T>, order: &SortOrder<'a, Self::SortKey<T>>) {
    order.sort(data);
  }

  fn reserve(&mut self, additional: usize) {
    Vec::reserve(self, additional);
  }

  fn append_one(&mut self, item: R) {
    self.push(item);
  }

  fn absorb(&mut self, mut items: Vec<R>, _insertion: Insertion) -> usize {
    if self.is_empty() {
      // Take the working buffer as is.
      std::mem::swap(self, &mut items);
    } else {
      self.extend(items);
    }
    0
  }

  fn len(&self) -> usize {
    Vec::len(self)
  }
}

impl<'a, R> Destination<'a> for VecDeque<R> {
  type Item = R;
  type SortKey<T> = T;

  const FAMILY: Family = Family::Deque;
  const INSERTION: Option<Insertion> = Some(Insertion::Append);

  fn create<T>(_order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self> {
    Ok(VecDeque::new())
  }

  fn sort_working<T>(data: &mut Vec<T>, order: &SortOrder<'a, Self::SortKey<T>>) {
    order.sort(data);
  }

  fn reserve(&mut self, additional: usize) {
    VecDeque::reserve(self, additional);
  }

  fn append_one(&mut self, item: R) {
    self.push_back(item);
  }

  fn absorb(&mut self, items: Vec<R>, _insertion: Insertion) -> usize {
    if self.is_empty() {
      *self = VecDeque::from(items);
    } else {
      self.extend(items);
    }
    0
  }

  fn len(&self) -> usize {
    VecDeque::len(self)
  }
}

impl<'a, R> Destination<'a> for LinkedList<R> {
  type Item = R;
  type SortKey<T> = T;

  const FAMILY: Family = Family::LinkedList;
  const INSERTION: Option<Insertion> = Some(Insertion::Append);

  fn create<T>(_order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self> {
    Ok(LinkedList::new())
  }

  fn sort_working<T>(data: &mut Vec<T>, order: &SortOrder<'a, Self::SortKey<T>>) {
    order.sort(data);
  }

  fn append_one(&mut self, item: R) {
    self.push_back(item);
  }

  fn len(&self) -> usize {
    LinkedList::len(self)
  }
}

// --- Hashed ---

impl<'a, R, S> Destination<'a> for HashSet<R, S>
where
  R: Eq + Hash,
  S: BuildHasher + Default,
{
  type Item = R;
  // Never used to order anything: a Sort against a hashed family is rejected.
  type SortKey<T> = T;

  const FAMILY: Family = Family::HashSet;
  const INSERTION: Option<Insertion> = Some(Insertion::Insert);

  fn create<T>(_order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self> {
    Ok(HashSet::with_hasher(S::default()))
  }

  fn sort_working<T>(_data: &mut Vec<T>, _order: &SortOrder<'a, Self::SortKey<T>>) {}

  fn reserve(&mut self, additional: usize) {
    HashSet::reserve(self, additional);
  }

  fn insert_one(&mut self, item: R) -> bool {
    self.insert(item)
  }

  fn len(&self) -> usize {
    HashSet::len(self)
  }
}

impl<'a, K, V, S> Destination<'a> for HashMap<K, V, S>
where
  K: Eq + Hash,
  S: BuildHasher + Default,
{
  type Item = (K, V);
  type SortKey<T> = T;

  const FAMILY: Family = Family::HashMap;
  const INSERTION: Option<Insertion> = Some(Insertion::Insert);

  fn create<T>(_order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self> {
    Ok(HashMap::with_hasher(S::default()))
  }

  fn sort_working<T>(_data: &mut Vec<T>, _order: &SortOrder<'a, Self::SortKey<T>>) {}

  fn reserve(&mut self, additional: usize) {
    HashMap::reserve(self, additional);
  }

  fn insert_one(&mut self, (key, value): (K, V)) -> bool {
    match self.entry(key) {
      hash_map::Entry::Vacant(slot) => {
        slot.insert(value);
        true
      }
      hash_map::Entry::Occupied(_) => false,
    }
  }

  fn len(&self) -> usize {
    HashMap::len(self)
  }
}

// --- Ordered ---

impl<'a, R: Ord> Destination<'a> for BTreeSet<R> {
  type Item = R;
  type SortKey<T> = R;

  const FAMILY: Family = Family::OrderedSet;
  const INSERTION: Option<Insertion> = Some(Insertion::Insert);
  const CUSTOM_ORDER: bool = false;

  fn create<T>(order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self> {
    natural_only::<R, Self>(&order)?;
    Ok(BTreeSet::new())
  }

  // Orders itself on insert.
  fn sort_working<T>(_data: &mut Vec<T>, _order: &SortOrder<'a, Self::SortKey<T>>) {}

  fn insert_one(&mut self, item: R) -> bool {
    self.insert(item)
  }

  fn len(&self) -> usize {
    BTreeSet::len(self)
  }
}

impl<'a, K: Ord, V> Destination<'a> for BTreeMap<K, V> {
  type Item = (K, V);
  type SortKey<T> = K;

  const FAMILY: Family = Family::OrderedMap;
  const INSERTION: Option<Insertion> = Some(Insertion::Insert);
  const CUSTOM_ORDER: bool = false;

  fn create<T>(order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self> {
    natural_only::<K, Self>(&order)?;
    Ok(BTreeMap::new())
  }

  fn sort_working<T>(_data: &mut Vec<T>, _order: &SortOrder<'a, Self::SortKey<T>>) {}

  fn insert_one(&mut self, (key, value): (K, V)) -> bool {
    match self.entry(key) {
      btree_map::Entry::Vacant(slot) => {
        slot.insert(value);
        true
      }
      btree_map::Entry::Occupied(_) => false,
    }
  }

  fn len(&self) -> usize {
    BTreeMap::len(self)
  }
}
