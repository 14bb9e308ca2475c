// querypipe/src/stage/kind.rs

//! Tags identifying each stage of a query, used for lookup and cardinality checks.

use std::fmt;

/// The kind of a [`Stage`](crate::stage::Stage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
  /// Supplies the initial data. Exactly one per query.
  Source,
  /// Keeps elements matching a predicate.
  Filter,
  /// Orders the working data, or hands its ordering to an ordered destination.
  Sort,
  /// Removes duplicates, keeping first occurrences in order.
  StableUnique,
  /// Collapses adjacent duplicates of already sorted data.
  PreSortedUnique,
  /// Keeps the first `n` elements.
  Top,
  /// Keeps the last `n` elements.
  Bottom,
  /// Transforms each element into the destination's element type. Runs last.
  Project,
  /// Selects the destination collection family.
  Collect,
}

impl StageKind {
  pub const ALL: [StageKind; 9] = [
    StageKind::Source,
    StageKind::Filter,
    StageKind::Sort,
    StageKind::StableUnique,
    StageKind::PreSortedUnique,
    StageKind::Top,
    StageKind::Bottom,
    StageKind::Project,
    StageKind::Collect,
  ];

  pub const fn name(self) -> &'static str {
    match self {
      StageKind::Source => "source",
      StageKind::Filter => "filter",
      StageKind::Sort => "sort",
      StageKind::StableUnique => "stable_unique",
      StageKind::PreSortedUnique => "pre_sorted_unique",
      StageKind::Top => "top",
      StageKind::Bottom => "bottom",
      StageKind::Project => "project",
      StageKind::Collect => "collect",
    }
  }

  /// Whether a query may declare this stage at most once.
  ///
  /// Filter, Top and Bottom compose with themselves and may repeat.
  pub const fn is_singular(self) -> bool {
    !matches!(self, StageKind::Filter | StageKind::Top | StageKind::Bottom)
  }
}

impl fmt::Display for StageKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
