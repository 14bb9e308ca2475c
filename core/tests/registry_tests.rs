// tests/registry_tests.rs
mod common;

use common::*;
use querypipe::{registry, Family, OrderedMap, Query, Stage, StageKind};

fn stages() -> Vec<Stage<'static, Person, Vec<String>>> {
  vec![
    Stage::project(|p: Person| p.first_name),
    Stage::source(people()),
    Stage::filter(|p: &Person| p.age > 20),
    Stage::top(10),
    Stage::filter(|p: &Person| p.salary > 20000.0),
    Stage::top(5),
  ]
}

#[test]
fn test_find_returns_first_stage_of_kind() {
  setup_tracing();
  let stages = stages();

  match registry::find(StageKind::Source, &stages) {
    Some(Stage::Source(source)) => assert_eq!(source.len(), 20),
    other => panic!("expected the source stage, got {other:?}"),
  }
  match registry::find(StageKind::Top, &stages) {
    Some(Stage::Top(top)) => assert_eq!(top.count, 10),
    other => panic!("expected the first top stage, got {other:?}"),
  }
  assert!(registry::find(StageKind::Sort, &stages).is_none());
}

#[test]
fn test_count_and_position() {
  setup_tracing();
  let stages = stages();

  assert_eq!(registry::count(StageKind::Filter, &stages), 2);
  assert_eq!(registry::count(StageKind::Top, &stages), 2);
  assert_eq!(registry::count(StageKind::Collect, &stages), 0);

  assert_eq!(registry::position(StageKind::Project, &stages), Some(0));
  assert_eq!(registry::position(StageKind::Source, &stages), Some(1));
  assert_eq!(registry::position(StageKind::Bottom, &stages), None);

  assert!(registry::contains(StageKind::Filter, &stages));
  assert!(!registry::contains(StageKind::StableUnique, &stages));
}

#[test]
fn test_query_exposes_its_declaration() {
  setup_tracing();
  let query = Query::projected(stages()).expect("query should be valid");

  assert_eq!(query.stages().len(), 6);
  assert_eq!(query.count(StageKind::Filter), 2);
  assert!(query.contains(StageKind::Project));
  assert!(query.find(StageKind::Sort).is_none());
  assert_eq!(query.family(), Family::Sequence);

  let result = query.run().expect("query should run");
  assert_eq!(result, vec!["John", "Ned", "Daenerys", "Tyrion", "Sandor"]);
}

#[test]
fn test_family_follows_destination() {
  setup_tracing();
  let query = Query::<Person, OrderedMap<String, u32>>::projected(vec![
    Stage::source(people()),
    Stage::project(|p: Person| (p.last_name, p.age)),
    Stage::collect(),
  ])
  .expect("query should be valid");

  assert_eq!(query.family(), Family::OrderedMap);
  assert!(query.family().is_ordered_associative());
  assert!(!query.family().is_hashed());
}

#[test]
fn test_stage_kind_names_and_cardinality() {
  let names: Vec<&str> = StageKind::ALL.iter().map(|kind| kind.name()).collect();
  assert_eq!(
    names,
    vec!["source", "filter", "sort", "stable_unique", "pre_sorted_unique", "top", "bottom", "project", "collect"]
  );

  let repeatable: Vec<StageKind> = StageKind::ALL.into_iter().filter(|kind| !kind.is_singular()).collect();
  assert_eq!(repeatable, vec![StageKind::Filter, StageKind::Top, StageKind::Bottom]);

  let stage: Stage<u32> = Stage::bottom(2);
  assert_eq!(stage.kind(), StageKind::Bottom);
  assert_eq!(stage.kind().to_string(), "bottom");
}
