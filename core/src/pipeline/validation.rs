// querypipe/src/pipeline/validation.rs

//! Declaration checks run when a `Query` is built, before any data is touched.

use std::any::type_name;

use tracing::{event, instrument, Level};

use crate::destination::Destination;
use crate::error::{QueryError, QueryResult};
use crate::registry;
use crate::stage::{Stage, StageKind, DEFAULT_FAMILY};

/// Checks a stage list against the cardinality and destination rules.
///
/// Fails when:
/// - there is no `Source`;
/// - a singular kind (everything but Filter, Top and Bottom) appears twice;
/// - the destination declares no insertion capability;
/// - there is no `Collect` but the destination is not the default sequence;
/// - a `Sort` targets a hashed destination, or a custom comparator targets an
///   ordered destination that only orders naturally;
/// - `projection_required` is set (the destination holds another element
///   type) and there is no `Project`.
#[instrument(
  name = "Query::validate",
  skip_all,
  fields(
    destination = %type_name::<D>(),
    family = %D::FAMILY,
    num_stages = stages.len(),
    projection_required = projection_required,
  ),
  err(Display)
)]
pub fn validate<'a, T, D>(stages: &[Stage<'a, T, D>], projection_required: bool) -> QueryResult<()>
where
  D: Destination<'a>,
{
  if !registry::contains(StageKind::Source, stages) {
    event!(Level::ERROR, "Query declared without a source stage.");
    return Err(QueryError::MissingSource);
  }

  for kind in StageKind::ALL.into_iter().filter(|kind| kind.is_singular()) {
    let count = registry::count(kind, stages);
    if count > 1 {
      event!(Level::ERROR, stage = %kind, count, "Singular stage declared more than once.");
      return Err(QueryError::DuplicateStage { kind, count });
    }
  }

  let family = D::FAMILY;

  if D::INSERTION.is_none() {
    event!(Level::ERROR, "Destination supports neither append nor insert.");
    return Err(QueryError::NoInsertion {
      family,
      destination: type_name::<D>().to_string(),
    });
  }

  if family != DEFAULT_FAMILY && !registry::contains(StageKind::Collect, stages) {
    event!(Level::ERROR, "Non-default destination without a collect stage.");
    return Err(QueryError::MissingCollect { family });
  }

  if let Some(Stage::Sort(sort)) = registry::find(StageKind::Sort, stages) {
    if family.is_hashed() {
      event!(Level::ERROR, "Sort declared for an unordered destination.");
      return Err(QueryError::UnorderedDestination { family });
    }
    if family.is_ordered_associative() && !D::CUSTOM_ORDER && !sort.order().is_natural() {
      event!(Level::ERROR, "Custom comparator declared for a naturally ordered destination.");
      return Err(QueryError::CustomOrderUnsupported {
        destination: type_name::<D>().to_string(),
      });
    }
  }

  if projection_required && !registry::contains(StageKind::Project, stages) {
    event!(Level::ERROR, "Destination holds another element type and nothing projects into it.");
    return Err(QueryError::MissingProject {
      destination: type_name::<D>().to_string(),
    });
  }

  event!(Level::TRACE, "Query declaration is valid.");
  Ok(())
}
