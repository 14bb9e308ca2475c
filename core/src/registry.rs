// querypipe/src/registry.rs

//! Lookup of stages by kind within a declared stage list.
//!
//! Declaration order matters for execution but not for lookup: every function
//! here is a plain linear scan. Validation guarantees singular kinds appear at
//! most once, so the first match is the only one.

use crate::destination::Destination;
use crate::stage::{Stage, StageKind};
use tracing::{event, Level};

/// The first stage of `kind`, or `None` when the query does not declare one.
pub fn find<'a, 'b, T, D>(kind: StageKind, stages: &'b [Stage<'a, T, D>]) -> Option<&'b Stage<'a, T, D>>
where
  D: Destination<'a>,
{
  let found = stages.iter().find(|stage| stage.kind() == kind);
  if found.is_none() {
    event!(Level::TRACE, stage = %kind, "Stage not declared, defaults apply.");
  }
  found
}

/// Index of the first stage of `kind`.
pub fn position<'a, T, D: Destination<'a>>(kind: StageKind, stages: &[Stage<'a, T, D>]) -> Option<usize> {
  stages.iter().position(|stage| stage.kind() == kind)
}

/// Number of stages of `kind`.
pub fn count<'a, T, D: Destination<'a>>(kind: StageKind, stages: &[Stage<'a, T, D>]) -> usize {
  stages.iter().filter(|stage| stage.kind() == kind).count()
}

/// Whether a stage of `kind` is declared.
pub fn contains<'a, T, D: Destination<'a>>(kind: StageKind, stages: &[Stage<'a, T, D>]) -> bool {
  position(kind, stages).is_some()
}

/// Removes and returns the first stage of `kind`, keeping the others in order.
pub(crate) fn take<'a, T, D>(kind: StageKind, stages: &mut Vec<Stage<'a, T, D>>) -> Option<Stage<'a, T, D>>
where
  D: Destination<'a>,
{
  position(kind, stages).map(|idx| stages.remove(idx))
}
