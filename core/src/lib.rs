// src/lib.rs

//! querypipe: a declarative, in-memory query pipeline for Rust collections.
//!
//! A query is an ordered list of stages drawn from a fixed vocabulary:
//!  - `Source` supplies the input elements (exactly one per query).
//!  - `Filter` keeps elements matching a predicate.
//!  - `Sort` orders the working data, or hands its ordering to an ordered set or map.
//!  - `StableUnique` and `PreSortedUnique` remove duplicates.
//!  - `Top` and `Bottom` truncate to the first or last `n` elements.
//!  - `Project` maps each element into the destination's element type. It always runs last.
//!  - `Collect` picks the destination collection (a `Vec` when omitted).
//!
//! Stages run in declaration order, each fully materializing its output
//! before the next begins. The declaration is validated up front so that a
//! malformed query fails before any element is processed.
//!
//! A query whose destination holds the source element type is built with
//! [`Query::new`] (or run with [`run`]). One that projects into another
//! element type is built with [`Query::projected`] (or [`run_projected`]).
//! Sources, predicates and comparators may all borrow from the caller.
//!
//! ```
//! use std::collections::BTreeSet;
//! use querypipe::{Query, Stage};
//!
//! let query = Query::<u32, BTreeSet<String>>::projected(vec![
//!   Stage::source([3, 1, 4, 1, 5, 9, 2, 6]),
//!   Stage::filter(|n: &u32| *n > 1),
//!   Stage::project(|n: u32| format!("#{n}")),
//!   Stage::collect(),
//! ])?;
//! let labels = query.run()?;
//! assert_eq!(labels.len(), 6);
//! # Ok::<(), querypipe::QueryError>(())
//! ```

pub mod destination;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod stage;

// --- Re-exports for the Public API ---

pub use crate::destination::{Destination, Family, Insertion, OrderedMap, OrderedSet};
pub use crate::error::{QueryError, QueryResult};
pub use crate::pipeline::{run, run_projected, Query};
pub use crate::stage::{
  Bottom, Collect, Comparator, Equivalence, Filter, PreSortedUnique, Project, Sort, SortOrder, Source, Stage,
  StageKind, StableUnique, Top, Transform,
};
