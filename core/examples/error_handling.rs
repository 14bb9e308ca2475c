// querypipe/examples/error_handling.rs

use std::collections::HashSet;

use querypipe::{Query, QueryError, Stage};
use tracing::{error, info};

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Error Handling Example ---");

  // Ordering a hash set is meaningless, so the declaration is rejected
  // before any element is looked at.
  let unordered = Query::<u32, HashSet<u32>>::new(vec![Stage::source(1..=10), Stage::sort(), Stage::collect()]);
  report("sort into a hash set", unordered.map(|_| ()));

  // Two sorts.
  let duplicated = Query::<u32>::new(vec![Stage::source(1..=10), Stage::sort(), Stage::sort()]);
  report("two sort stages", duplicated.map(|_| ()));

  // Source elements are u32 but the destination holds Strings, and nothing projects.
  let mismatched = Query::<u32, Vec<String>>::projected(vec![Stage::source(1..=10)]);
  report("missing projection", mismatched.map(|_| ()));

  // The fix: project between the two types.
  let fixed = Query::<u32, Vec<String>>::projected(vec![
    Stage::source(1..=10),
    Stage::project(|n: u32| n.to_string()),
  ])
  .and_then(|query| query.run());
  match fixed {
    Ok(labels) => info!(?labels, "Projected query ran."),
    Err(e) => error!(error = %e, "Projected query failed."),
  }
}

fn report(label: &str, outcome: Result<(), QueryError>) {
  match outcome {
    Ok(()) => info!(label, "Query accepted."),
    Err(e) if e.is_declaration_error() => error!(label, error = %e, "Query declaration rejected."),
    Err(e) => error!(label, error = %e, "Query failed while running."),
  }
}
