// querypipe/src/destination/mod.rs

//! The collection adapter contract implemented by every query destination.
//!
//! A destination declares its family (which decides how `Sort` behaves), how
//! it accepts elements (append or insert), and how to create an empty instance
//! given the ordering a `Sort` stage handed over. Implementations are provided
//! for the std collections and for the comparator-aware [`OrderedSet`] and
//! [`OrderedMap`]. User types can implement it too.

use std::any::type_name;
use std::fmt;

use crate::error::QueryResult;
use crate::stage::SortOrder;

pub mod ordered;
mod std_impls;

pub use ordered::{OrderedMap, OrderedSet};

/// The category of collection a query materializes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
  /// Append-ordered sequence (`Vec`). The default destination.
  Sequence,
  /// Double-ended sequence (`VecDeque`).
  Deque,
  /// Linked sequence (`LinkedList`).
  LinkedList,
  HashSet,
  /// Set kept in sorted order (`BTreeSet`, `OrderedSet`).
  OrderedSet,
  HashMap,
  /// Map kept in key order (`BTreeMap`, `OrderedMap`).
  OrderedMap,
}

impl Family {
  pub const fn name(self) -> &'static str {
    match self {
      Family::Sequence => "sequence",
      Family::Deque => "deque",
      Family::LinkedList => "linked list",
      Family::HashSet => "hash set",
      Family::OrderedSet => "ordered set",
      Family::HashMap => "hash map",
      Family::OrderedMap => "ordered map",
    }
  }

  /// Families whose layout is the working data's order.
  pub const fn is_sequence(self) -> bool {
    matches!(self, Family::Sequence | Family::Deque | Family::LinkedList)
  }

  /// Families with no meaningful iteration order.
  pub const fn is_hashed(self) -> bool {
    matches!(self, Family::HashSet | Family::HashMap)
  }

  /// Families that keep themselves ordered, so a `Sort` becomes their comparator.
  pub const fn is_ordered_associative(self) -> bool {
    matches!(self, Family::OrderedSet | Family::OrderedMap)
  }
}

impl fmt::Display for Family {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// How a destination accepts new elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
  /// Every element is pushed at the end.
  Append,
  /// Elements are inserted by key; an element whose key is already present is rejected.
  Insert,
}

/// A collection a query can materialize its results into.
///
/// `'a` is the lifetime of the query's callbacks, which an ordered destination
/// may keep as its comparator.
///
/// `sort_working` has no default: a sequence destination has to sort the
/// working data it is handed, so forgetting it is a compile error.
///
/// ```compile_fail
/// use querypipe::{Destination, Family, Insertion, QueryResult, SortOrder};
///
/// struct Lines(Vec<String>);
///
/// impl<'a> Destination<'a> for Lines {
///   type Item = String;
///   type SortKey<T> = T;
///
///   const FAMILY: Family = Family::Sequence;
///   const INSERTION: Option<Insertion> = Some(Insertion::Append);
///
///   fn create<T>(_order: Option<SortOrder<'a, T>>) -> QueryResult<Self> {
///     Ok(Lines(Vec::new()))
///   }
///
///   fn append_one(&mut self, item: String) {
///     self.0.push(item);
///   }
///
///   fn len(&self) -> usize {
///     self.0.len()
///   }
/// }
/// ```
pub trait Destination<'a>: Sized {
  /// The element type stored, i.e. what a `Project` stage must produce.
  /// Map destinations use `(K, V)` pairs.
  type Item;

  /// The type a `Sort` comparator is written against when the source yields `T`.
  ///
  /// Sequence destinations sort the working data, so this is `T`. Ordered
  /// associative destinations order themselves, so this is their key.
  type SortKey<T>;

  const FAMILY: Family;

  /// `None` when the destination supports neither `append_one` nor `insert_one`.
  /// Such a destination is rejected when the query is declared.
  const INSERTION: Option<Insertion>;

  /// Whether an ordered destination can be ordered by a custom comparator.
  const CUSTOM_ORDER: bool = true;

  /// Creates an empty destination.
  ///
  /// `order` is the ordering handed over by a `Sort` stage and is only ever
  /// given to ordered associative families.
  fn create<T>(order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self>;

  /// Sorts the working data ahead of projection.
  ///
  /// Called for sequence families only. They sort `data` with `order`
  /// (usually `order.sort(data)`); other families leave the body empty.
  fn sort_working<T>(data: &mut Vec<T>, order: &SortOrder<'a, Self::SortKey<T>>);

  /// Makes room for `additional` more elements. A hint, the default ignores it.
  fn reserve(&mut self, additional: usize) {
    let _ = additional;
  }

  /// Pushes `item` at the end.
  fn append_one(&mut self, item: Self::Item) {
    let _ = item;
    panic!(
      "querypipe setup error: destination '{}' declares {:?} but does not implement append_one",
      type_name::<Self>(),
      Self::INSERTION
    );
  }

  /// Inserts `item`, returning false when its key was already present.
  fn insert_one(&mut self, item: Self::Item) -> bool {
    let _ = item;
    panic!(
      "querypipe setup error: destination '{}' declares {:?} but does not implement insert_one",
      type_name::<Self>(),
      Self::INSERTION
    );
  }

  /// Moves a batch of elements in, returning how many were rejected as duplicates.
  fn absorb(&mut self, items: Vec<Self::Item>, insertion: Insertion) -> usize {
    self.reserve(items.len());
    match insertion {
      Insertion::Append => {
        for item in items {
          self.append_one(item);
        }
        0
      }
      Insertion::Insert => {
        let mut rejected = 0;
        for item in items {
          if !self.insert_one(item) {
            rejected += 1;
          }
        }
        rejected
      }
    }
  }

  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
