// querypipe/src/pipeline/definition.rs

//! Contains the `Query<'a, T, D>` struct and its construction.

use std::any::type_name;
use std::fmt;

use crate::destination::{Destination, Family};
use crate::error::QueryResult;
use crate::pipeline::validation::validate;
use crate::registry;
use crate::stage::{Stage, StageKind, DEFAULT_FAMILY};

/// A validated query reading `T` and collecting into `D`.
///
/// Built from an ordered list of stages. Construction checks the declaration
/// (see [`validate`]) so that [`Query::run`] only fails on errors raised by the
/// destination itself.
///
/// When `D` holds `T` itself, build with [`Query::new`]; a `Project` stage is
/// then optional. When `D` holds some other type, build with
/// [`Query::projected`], which requires a `Project` stage.
pub struct Query<'a, T, D: Destination<'a> = Vec<T>> {
  /// Stages in declaration order.
  pub(crate) stages: Vec<Stage<'a, T, D>>,
  /// Moves a working element into the destination when nothing projects.
  /// Only present when `D::Item` is `T`.
  pub(crate) identity: Option<fn(T) -> D::Item>,
}

impl<'a, T, D> Query<'a, T, D>
where
  D: Destination<'a, Item = T>,
{
  /// Validates `stages` and builds a query whose destination holds `T`.
  pub fn new(stages: Vec<Stage<'a, T, D>>) -> QueryResult<Self> {
    validate(&stages, false)?;
    let identity: fn(T) -> T = std::convert::identity;
    Ok(Self {
      stages,
      identity: Some(identity),
    })
  }
}

impl<'a, T, D: Destination<'a>> Query<'a, T, D> {
  /// Validates `stages` and builds a query that must project `T` into `D::Item`.
  pub fn projected(stages: Vec<Stage<'a, T, D>>) -> QueryResult<Self> {
    validate(&stages, true)?;
    Ok(Self { stages, identity: None })
  }

  pub fn stages(&self) -> &[Stage<'a, T, D>] {
    &self.stages
  }

  pub fn find(&self, kind: StageKind) -> Option<&Stage<'a, T, D>> {
    registry::find(kind, &self.stages)
  }

  pub fn count(&self, kind: StageKind) -> usize {
    registry::count(kind, &self.stages)
  }

  pub fn contains(&self, kind: StageKind) -> bool {
    registry::contains(kind, &self.stages)
  }

  /// The destination family results are collected into, as selected by the
  /// `Collect` stage.
  pub fn family(&self) -> Family {
    match registry::find(StageKind::Collect, &self.stages) {
      Some(Stage::Collect(collect)) => collect.family(),
      _ => DEFAULT_FAMILY,
    }
  }
}

impl<'a, T, D: Destination<'a>> fmt::Debug for Query<'a, T, D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Query")
      .field("source_type", &type_name::<T>())
      .field("destination", &type_name::<D>())
      .field("projected", &self.identity.is_none())
      .field("stages", &self.stages)
      .finish()
  }
}

/// Declares and runs a query whose destination holds the source element type.
///
/// ```
/// use querypipe::{run, Stage};
///
/// let evens: Vec<u32> = run(vec![
///   Stage::source(1..=10),
///   Stage::filter(|n: &u32| n % 2 == 0),
///   Stage::top(3),
/// ])?;
/// assert_eq!(evens, vec![2, 4, 6]);
/// # Ok::<(), querypipe::QueryError>(())
/// ```
pub fn run<'a, T, D>(stages: Vec<Stage<'a, T, D>>) -> QueryResult<D>
where
  D: Destination<'a, Item = T>,
{
  Query::new(stages)?.run()
}

/// Declares and runs a query that projects into another element type.
///
/// ```
/// use querypipe::{run_projected, Stage};
///
/// let labels: Vec<String> = run_projected(vec![
///   Stage::source([1u32, 2, 3]),
///   Stage::project(|n: u32| format!("#{n}")),
/// ])?;
/// assert_eq!(labels, vec!["#1", "#2", "#3"]);
/// # Ok::<(), querypipe::QueryError>(())
/// ```
pub fn run_projected<'a, T, D>(stages: Vec<Stage<'a, T, D>>) -> QueryResult<D>
where
  D: Destination<'a>,
{
  Query::projected(stages)?.run()
}
