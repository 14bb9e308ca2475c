// querypipe/src/pipeline/execution.rs

//! Contains the `Query::run()` method, which threads the working data through
//! the declared stages and materializes the destination.

use std::any::type_name;

use tracing::{event, instrument, span, Level};

use crate::destination::{Destination, Insertion};
use crate::error::{QueryError, QueryResult};
use crate::pipeline::definition::Query;
use crate::registry;
use crate::stage::{Project, SortOrder, Stage, StageKind, Transform};

impl<'a, T, D: Destination<'a>> Query<'a, T, D> {
  /// Executes the query, consuming it.
  ///
  /// The source data becomes the working data. Every other stage except
  /// `Project` is then applied in declaration order. `Project`, if declared,
  /// runs last while the results are moved into a fresh `D`.
  ///
  /// A `Sort` feeding an ordered set or map leaves the working data alone and
  /// hands its ordering to the destination instead.
  #[instrument(
    name = "Query::run",
    skip_all,
    fields(
      source_type = %type_name::<T>(),
      destination = %type_name::<D>(),
      family = %D::FAMILY,
      num_stages = self.stages.len(),
    ),
    err(Display)
  )]
  pub fn run(self) -> QueryResult<D> {
    let Query { mut stages, identity } = self;

    let mut working = match registry::take(StageKind::Source, &mut stages) {
      Some(Stage::Source(source)) => source.into_data(),
      _ => {
        event!(Level::ERROR, "Query reached execution without a source stage.");
        return Err(QueryError::MissingSource);
      }
    };
    event!(Level::DEBUG, source_len = working.len(), "Query execution starting.");

    let family = D::FAMILY;
    let mut destination_order: Option<SortOrder<'a, D::SortKey<T>>> = None;
    let mut project: Option<Project<'a, T, D::Item>> = None;

    for (stage_idx, stage) in stages.into_iter().enumerate() {
      let stage_span = span!(
        Level::DEBUG,
        "query_stage",
        stage = %stage.kind(),
        stage_index = stage_idx,
        input_len = working.len()
      );
      let _stage_span_guard = stage_span.enter();

      match stage {
        Stage::Filter(filter) => working = apply(&filter, working),
        Stage::StableUnique(unique) => {
          event!(Level::TRACE, natural = unique.equivalence().is_natural(), "Removing duplicates.");
          working = apply(&unique, working);
        }
        Stage::PreSortedUnique(unique) => {
          event!(Level::TRACE, natural = unique.equivalence().is_natural(), "Collapsing adjacent duplicates.");
          working = apply(&unique, working);
        }
        Stage::Top(top) => working = apply(&top, working),
        Stage::Bottom(bottom) => working = apply(&bottom, working),
        Stage::Sort(sort) => {
          if family.is_ordered_associative() {
            event!(Level::TRACE, "Ordering handed to the destination.");
            destination_order = Some(sort.into_order());
          } else if family.is_sequence() {
            D::sort_working(&mut working, sort.order());
          } else if family.is_hashed() {
            event!(Level::ERROR, "Sort reached execution for an unordered destination.");
            return Err(QueryError::UnorderedDestination { family });
          } else {
            return Err(QueryError::Internal(format!("no sort strategy for the {family} family")));
          }
        }
        Stage::Project(stage) => {
          event!(Level::TRACE, "Projection deferred until materialization.");
          project = Some(stage);
        }
        Stage::Collect(collect) => {
          event!(
            Level::TRACE,
            family = %collect.family(),
            insertion = ?collect.insertion(),
            "Destination selected."
          );
        }
        Stage::Source(_) => {
          return Err(QueryError::Internal(
            "a second source stage survived validation".to_string(),
          ));
        }
      }
    }

    let insertion = D::INSERTION.ok_or_else(|| QueryError::NoInsertion {
      family,
      destination: type_name::<D>().to_string(),
    })?;

    let mut destination = D::create::<T>(destination_order)?;
    let input_len = working.len();

    let rejected = match project {
      Some(project) => {
        event!(Level::DEBUG, input_len, ?insertion, "Projecting into destination.");
        project.project_into(working, &mut destination, insertion)
      }
      None => {
        event!(Level::DEBUG, input_len, ?insertion, "Collecting working data into destination.");
        let identity = identity.ok_or_else(|| {
          QueryError::Internal("a projected query reached execution without a project stage".to_string())
        })?;
        let items: Vec<D::Item> = working.into_iter().map(identity).collect();
        destination.absorb(items, insertion)
      }
    };

    if matches!(insertion, Insertion::Insert) && rejected > 0 {
      event!(Level::DEBUG, rejected, "Destination collapsed duplicate keys.");
    }
    event!(
      Level::DEBUG,
      result_len = destination.len(),
      "Query execution completed successfully."
    );
    Ok(destination)
  }
}

fn apply<T, S: Transform<T>>(stage: &S, working: Vec<T>) -> Vec<T> {
  let input_len = working.len();
  let output = stage.apply(working);
  event!(
    Level::TRACE,
    stage = %stage.kind(),
    input_len,
    output_len = output.len(),
    "Stage applied."
  );
  output
}
