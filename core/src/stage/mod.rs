// querypipe/src/stage/mod.rs

//! The stages a query is declared from.
//!
//! A query is an ordered `Vec<Stage<'a, T, D>>` where `T` is the source
//! element type and `D` the destination collection. Each variant carries its
//! own configuration. Callbacks may borrow from the caller for `'a`, and `T`
//! itself may be a borrowed type. Natural defaults (ordering, equality,
//! hashing) are captured by the constructors, so a stage never needs the
//! element type's traits at run time.

pub mod collect;
pub mod filter;
pub mod kind;
pub mod project;
pub mod sort;
pub mod source;
pub mod truncate;
pub mod unique;

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use crate::destination::Destination;

pub use collect::{Collect, DEFAULT_FAMILY};
pub use filter::Filter;
pub use kind::StageKind;
pub use project::Project;
pub use sort::{Comparator, Sort, SortOrder};
pub use source::Source;
pub use truncate::{Bottom, Top};
pub use unique::{Equivalence, PreSortedUnique, StableUnique};

/// A stage that maps the working data to new working data of the same element type.
pub trait Transform<T> {
  fn kind(&self) -> StageKind;

  fn apply(&self, data: Vec<T>) -> Vec<T>;
}

/// One stage of a query reading `T` and collecting into `D`.
pub enum Stage<'a, T, D: Destination<'a> = Vec<T>> {
  Source(Source<T>),
  Filter(Filter<'a, T>),
  Sort(Sort<'a, D::SortKey<T>>),
  StableUnique(StableUnique<'a, T>),
  PreSortedUnique(PreSortedUnique<'a, T>),
  Top(Top),
  Bottom(Bottom),
  Project(Project<'a, T, D::Item>),
  Collect(Collect<D>),
}

impl<'a, T, D: Destination<'a>> Stage<'a, T, D> {
  /// The query's input.
  pub fn source(data: impl IntoIterator<Item = T>) -> Self {
    Stage::Source(Source::new(data))
  }

  /// Keeps elements for which `predicate` holds.
  pub fn filter(predicate: impl Fn(&T) -> bool + 'a) -> Self {
    Stage::Filter(Filter::new(predicate))
  }

  /// Sorts by the natural order of the destination's sort key.
  pub fn sort() -> Self
  where
    D::SortKey<T>: Ord,
  {
    Stage::Sort(Sort::new(SortOrder::natural()))
  }

  /// Sorts with `comparator`. For sequence destinations it compares source
  /// elements; for ordered sets and maps it compares set elements or map keys
  /// and becomes the destination's ordering.
  pub fn sort_by(comparator: impl Fn(&D::SortKey<T>, &D::SortKey<T>) -> Ordering + 'a) -> Self {
    Stage::Sort(Sort::new(SortOrder::by(comparator)))
  }

  pub fn sort_by_key<X>(key: impl Fn(&D::SortKey<T>) -> X + 'a) -> Self
  where
    D::SortKey<T>: 'a,
    X: Ord,
  {
    Stage::Sort(Sort::new(SortOrder::by_key(key)))
  }

  pub fn stable_unique() -> Self
  where
    T: Hash + Eq,
  {
    Stage::StableUnique(StableUnique::new())
  }

  /// See [`StableUnique::by`] for how `predicate` interacts with hashing.
  pub fn stable_unique_by(predicate: impl Fn(&T, &T) -> bool + 'a) -> Self
  where
    T: Hash,
  {
    Stage::StableUnique(StableUnique::by(predicate))
  }

  pub fn stable_unique_by_key<K>(key: impl Fn(&T) -> K + 'a) -> Self
  where
    T: 'a,
    K: Hash + Eq + 'a,
  {
    Stage::StableUnique(StableUnique::by_key(key))
  }

  pub fn pre_sorted_unique() -> Self
  where
    T: PartialEq,
  {
    Stage::PreSortedUnique(PreSortedUnique::new())
  }

  pub fn pre_sorted_unique_by(predicate: impl Fn(&T, &T) -> bool + 'a) -> Self {
    Stage::PreSortedUnique(PreSortedUnique::by(predicate))
  }

  pub fn top(count: usize) -> Self {
    Stage::Top(Top::new(count))
  }

  pub fn bottom(count: usize) -> Self {
    Stage::Bottom(Bottom::new(count))
  }

  /// Transforms each element into the destination's element type.
  pub fn project(transform: impl Fn(T) -> D::Item + 'a) -> Self {
    Stage::Project(Project::new(transform))
  }

  /// Collects into `D` instead of the default sequence.
  pub fn collect() -> Self {
    Stage::Collect(Collect::new())
  }

  pub fn kind(&self) -> StageKind {
    match self {
      Stage::Source(_) => StageKind::Source,
      Stage::Filter(_) => StageKind::Filter,
      Stage::Sort(_) => StageKind::Sort,
      Stage::StableUnique(_) => StageKind::StableUnique,
      Stage::PreSortedUnique(_) => StageKind::PreSortedUnique,
      Stage::Top(_) => StageKind::Top,
      Stage::Bottom(_) => StageKind::Bottom,
      Stage::Project(_) => StageKind::Project,
      Stage::Collect(_) => StageKind::Collect,
    }
  }
}

impl<'a, T, D: Destination<'a>> fmt::Debug for Stage<'a, T, D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stage::Source(stage) => fmt::Debug::fmt(stage, f),
      Stage::Filter(stage) => fmt::Debug::fmt(stage, f),
      Stage::Sort(stage) => fmt::Debug::fmt(stage, f),
      Stage::StableUnique(stage) => fmt::Debug::fmt(stage, f),
      Stage::PreSortedUnique(stage) => fmt::Debug::fmt(stage, f),
      Stage::Top(stage) => fmt::Debug::fmt(stage, f),
      Stage::Bottom(stage) => fmt::Debug::fmt(stage, f),
      Stage::Project(stage) => fmt::Debug::fmt(stage, f),
      Stage::Collect(stage) => fmt::Debug::fmt(stage, f),
    }
  }
}
