// querypipe/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::destination::Family;
use crate::stage::StageKind;

/// Errors raised while declaring or running a query.
///
/// Everything except `Destination` and `Internal` is a declaration error: it is
/// detected by `Query::new` or `Query::projected` before a single element is processed.
#[derive(Debug, Error)]
pub enum QueryError {
  #[error("Query has no '{}' stage", StageKind::Source)]
  MissingSource,

  #[error("Only one '{kind}' stage can be declared per query, found {count}")]
  DuplicateStage { kind: StageKind, count: usize },

  #[error("Cannot order results collected into an unordered {family} destination")]
  UnorderedDestination { family: Family },

  #[error("Destination '{destination}' only supports natural ordering, a custom comparator was given")]
  CustomOrderUnsupported { destination: String },

  #[error("Destination '{destination}' ({family}) supports neither append nor insert")]
  NoInsertion { family: Family, destination: String },

  #[error("Destination family '{family}' requires a '{}' stage", StageKind::Collect)]
  MissingCollect { family: Family },

  #[error("Destination '{destination}' holds a different element type, a '{}' stage is required", StageKind::Project)]
  MissingProject { destination: String },

  #[error("Destination adapter failed. Source: {source}")]
  Destination {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal querypipe error: {0}")]
  Internal(String),
}

impl QueryError {
  /// True for errors that describe a malformed query rather than a failure
  /// while materializing results.
  pub fn is_declaration_error(&self) -> bool {
    !matches!(self, QueryError::Destination { .. } | QueryError::Internal(_))
  }
}

// User-implemented destinations report their own failures through anyhow.
impl From<AnyhowError> for QueryError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<QueryError>() {
      Ok(query_err) => query_err,
      Err(source) => QueryError::Destination { source },
    }
  }
}

pub type QueryResult<T, E = QueryError> = std::result::Result<T, E>;
