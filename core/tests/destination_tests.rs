// tests/destination_tests.rs
mod common;

use common::*;
use querypipe::{
  run, run_projected, Collect, Destination, Family, Insertion, OrderedMap, OrderedSet, Query, QueryError, QueryResult,
  SortOrder, Stage,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

// --- User destinations ---

// Appends formatted lines, like a report buffer.
#[derive(Debug, Default)]
struct Ledger {
  lines: Vec<String>,
  reserved: usize,
}

impl<'a> Destination<'a> for Ledger {
  type Item = String;
  type SortKey<T> = T;

  const FAMILY: Family = Family::Sequence;
  const INSERTION: Option<Insertion> = Some(Insertion::Append);

  fn create<T>(_order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self> {
    Ok(Ledger::default())
  }

  fn sort_working<T>(data: &mut Vec<T>, order: &SortOrder<'a, Self::SortKey<T>>) {
    order.sort(data);
  }

  fn reserve(&mut self, additional: usize) {
    self.reserved += additional;
    self.lines.reserve(additional);
  }

  fn append_one(&mut self, item: String) {
    self.lines.push(item);
  }

  fn len(&self) -> usize {
    self.lines.len()
  }
}

// Keeps raw readings in arrival order.
#[derive(Debug, Default)]
struct Readings {
  values: Vec<u32>,
}

impl<'a> Destination<'a> for Readings {
  type Item = u32;
  type SortKey<T> = T;

  const FAMILY: Family = Family::Sequence;
  const INSERTION: Option<Insertion> = Some(Insertion::Append);

  fn create<T>(_order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self> {
    Ok(Readings::default())
  }

  fn sort_working<T>(data: &mut Vec<T>, order: &SortOrder<'a, Self::SortKey<T>>) {
    order.sort(data);
  }

  fn append_one(&mut self, item: u32) {
    self.values.push(item);
  }

  fn len(&self) -> usize {
    self.values.len()
  }
}

// Refuses to be created.
#[derive(Debug)]
struct ReadOnly;

impl<'a> Destination<'a> for ReadOnly {
  type Item = u32;
  type SortKey<T> = T;

  const FAMILY: Family = Family::Sequence;
  const INSERTION: Option<Insertion> = Some(Insertion::Append);

  fn create<T>(_order: Option<SortOrder<'a, Self::SortKey<T>>>) -> QueryResult<Self> {
    Err(anyhow::anyhow!("destination is read-only").into())
  }

  fn sort_working<T>(data: &mut Vec<T>, order: &SortOrder<'a, Self::SortKey<T>>) {
    order.sort(data);
  }

  fn len(&self) -> usize {
    0
  }
}

// --- Hashed families ---

#[test]
fn test_hash_set_collapses_duplicates() {
  setup_tracing();
  let result: HashSet<String> = run_projected(vec![
    Stage::source(people_twice()),
    Stage::project(|p: Person| p.last_name),
    Stage::collect(),
  ])
  .expect("query should run");

  assert_eq!(result.len(), 20);
  assert!(result.contains("Lannister"));
}

#[test]
fn test_hash_set_without_project() {
  setup_tracing();
  let result: HashSet<Person> = run(vec![Stage::source(people_twice()), Stage::collect()]).expect("query should run");
  assert_eq!(result.len(), 20);
}

#[test]
fn test_hash_map_keeps_first_value_per_key() {
  setup_tracing();
  let result: HashMap<u32, String> = run_projected(vec![
    Stage::source(people()),
    Stage::project(|p: Person| (p.age, p.first_name)),
    Stage::collect(),
  ])
  .expect("query should run");

  assert_eq!(result.len(), 19);
  assert_eq!(result.get(&23).map(String::as_str), Some("Samwell"));
  assert_eq!(result.get(&72).map(String::as_str), Some("Walder"));
}

// --- B-tree families ---

#[test]
fn test_btree_set_orders_naturally() {
  setup_tracing();
  let result: BTreeSet<u32> = run_projected(vec![
    Stage::source(people()),
    Stage::project(|p: Person| p.age),
    Stage::collect(),
  ])
  .expect("query should run");

  assert_eq!(result.len(), 19);
  assert_eq!(result.first(), Some(&5));
  assert_eq!(result.last(), Some(&72));
}

#[test]
fn test_btree_map_with_natural_sort_stage() {
  setup_tracing();
  let result: BTreeMap<String, u32> = run_projected(vec![
    Stage::source(people()),
    Stage::filter(|p: &Person| p.age > 50),
    Stage::sort(),
    Stage::project(|p: Person| (p.last_name, p.age)),
    Stage::collect(),
  ])
  .expect("query should run");

  let keys: Vec<&str> = result.keys().map(String::as_str).collect();
  assert_eq!(keys, vec!["Baelish", "Frey", "Mormont", "Seaworth", "Stark"]);
}

// --- Comparator-aware ordered families ---

#[test]
fn test_ordered_set_uses_sort_comparator() {
  setup_tracing();
  let result: OrderedSet<String> = run_projected(vec![
    Stage::source(people_twice()),
    Stage::sort_by(|lhs: &String, rhs: &String| rhs.cmp(lhs)),
    Stage::project(|p: Person| p.last_name),
    Stage::collect(),
  ])
  .expect("query should run");

  assert_eq!(result.len(), 20);
  assert_eq!(result.first().map(String::as_str), Some("Worm"));
  assert_eq!(result.last().map(String::as_str), Some("Baelish"));
  assert!(!result.order().is_natural());
}

#[test]
fn test_ordered_set_defaults_to_natural_order() {
  setup_tracing();
  let result: OrderedSet<String> = run_projected(vec![
    Stage::source(people()),
    Stage::project(|p: Person| p.last_name),
    Stage::collect(),
  ])
  .expect("query should run");

  assert!(result.order().is_natural());
  assert_eq!(result.first().map(String::as_str), Some("Baelish"));
  assert_eq!(result.last().map(String::as_str), Some("Worm"));
}

#[test]
fn test_ordered_map_orders_keys_by_comparator() {
  setup_tracing();
  let result: OrderedMap<u32, String> = run_projected(vec![
    Stage::source(people()),
    Stage::sort_by(|lhs: &u32, rhs: &u32| rhs.cmp(lhs)),
    Stage::project(|p: Person| (p.age, p.first_name)),
    Stage::collect(),
  ])
  .expect("query should run");

  assert_eq!(result.len(), 19);
  assert_eq!(result.first_key_value(), Some((&72, &"Walder".to_string())));
  assert_eq!(result.last_key_value(), Some((&5, &"Ser".to_string())));
  assert_eq!(result.get(&23).map(String::as_str), Some("Samwell"));

  let ages: Vec<u32> = result.keys().copied().take(3).collect();
  assert_eq!(ages, vec![72, 61, 58]);
}

#[test]
fn test_sort_for_ordered_destination_leaves_working_data_unsorted() {
  setup_tracing();
  // The sort becomes the set's ordering; `top` still sees source order.
  let result: OrderedSet<u32> = run_projected(vec![
    Stage::source(people()),
    Stage::sort_by(|lhs: &u32, rhs: &u32| rhs.cmp(lhs)),
    Stage::top(3),
    Stage::project(|p: Person| p.age),
    Stage::collect(),
  ])
  .expect("query should run");

  assert_eq!(result.into_vec(), vec![58, 32, 26]);
}

#[test]
fn test_ordered_set_direct_use() {
  let mut set = OrderedSet::with_comparator(|lhs: &i32, rhs: &i32| lhs.abs().cmp(&rhs.abs()));
  assert!(set.insert(3));
  assert!(set.insert(-1));
  assert!(!set.insert(-3));
  assert!(set.contains(&1));
  assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![-1, 3]);
  assert_eq!(set.remove(&-1), Some(-1));
  assert_eq!(set.len(), 1);
}

#[test]
fn test_ordered_map_direct_use() {
  let mut map = OrderedMap::new();
  assert_eq!(map.insert("b", 2), None);
  assert_eq!(map.insert("a", 1), None);
  assert_eq!(map.insert("b", 20), Some(2));
  assert!(!map.insert_new("a", 10));

  if let Some(value) = map.get_mut(&"a") {
    *value += 100;
  }
  assert_eq!(map.iter().collect::<Vec<_>>(), vec![(&"a", &101), (&"b", &20)]);
  assert_eq!(map.remove(&"a"), Some(101));
  assert!(!map.contains_key(&"a"));
}

// --- User destinations ---

#[test]
fn test_user_destination_receives_projected_items() {
  setup_tracing();
  let ledger = Query::<Person, Ledger>::projected(vec![
    Stage::source(people()),
    Stage::sort_by_key(|p: &Person| p.age),
    Stage::top(2),
    Stage::project(|p: Person| format!("{} {} ({})", p.first_name, p.last_name, p.age)),
    Stage::collect(),
  ])
  .and_then(|query| query.run())
  .expect("ledger query should run");

  assert_eq!(ledger.lines, vec!["Ser Pounce (5)", "Meera Reed (14)"]);
  assert_eq!(ledger.reserved, 2);
}

#[test]
fn test_user_sequence_destination_is_sorted() {
  setup_tracing();
  let readings: Readings = run(vec![Stage::source([3u32, 1, 2]), Stage::sort(), Stage::collect()])
    .expect("query should run");
  assert_eq!(readings.values, vec![1, 2, 3]);

  let descending: Readings = run(vec![
    Stage::source([3u32, 1, 2]),
    Stage::sort_by(|lhs: &u32, rhs: &u32| rhs.cmp(lhs)),
    Stage::collect(),
  ])
  .expect("query should run");
  assert_eq!(descending.values, vec![3, 2, 1]);
}

#[test]
fn test_user_destination_without_project_reserves_once() {
  setup_tracing();
  let ledger: Ledger = run(vec![
    Stage::source(["b", "c", "a"].map(String::from)),
    Stage::sort(),
    Stage::collect(),
  ])
  .expect("query should run");

  assert_eq!(ledger.lines, vec!["a", "b", "c"]);
  assert_eq!(ledger.reserved, 3);
}

#[test]
fn test_created_destinations_start_without_capacity() {
  let created = <Vec<u32> as Destination<'_>>::create::<u32>(None).expect("vec should be created");
  assert_eq!(created.capacity(), 0);

  let mut reserved = <Vec<u32> as Destination<'_>>::create::<u32>(None).expect("vec should be created");
  Destination::reserve(&mut reserved, 16);
  assert!(reserved.capacity() >= 16);
  assert!(reserved.is_empty());
}

#[test]
fn test_collect_stage_describes_destination() {
  let ordered = Collect::<OrderedSet<u32>>::new();
  assert_eq!(ordered.family(), Family::OrderedSet);
  assert_eq!(ordered.insertion(), Some(Insertion::Insert));

  let sequence = Collect::<Readings>::default();
  assert_eq!(sequence.family(), Family::Sequence);
  assert_eq!(sequence.insertion(), Some(Insertion::Append));
  assert!(sequence.family().is_sequence());
  assert!(!Family::HashMap.is_sequence());
}

#[test]
fn test_destination_failure_is_reported() {
  setup_tracing();
  let result: Result<ReadOnly, QueryError> = run(vec![Stage::source([1u32, 2, 3]), Stage::collect()]);

  match result {
    Err(err @ QueryError::Destination { .. }) => {
      assert!(!err.is_declaration_error());
      assert!(err.to_string().contains("destination is read-only"));
    }
    other => panic!("expected a destination error, got {other:?}"),
  }
}

#[test]
fn test_ordered_map_keyed_by_last_name_is_key_ordered() {
  setup_tracing();
  let result: OrderedMap<String, Person> = run_projected(vec![
    Stage::source(people()),
    Stage::project(|p: Person| (p.last_name.clone(), p)),
    Stage::collect(),
  ])
  .expect("query should run");

  assert_eq!(result.len(), 20);
  let keys: Vec<&String> = result.keys().collect();
  assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
  assert_eq!(result.get(&"Stark".to_string()).map(|p| p.age), Some(58));
}

#[test]
fn test_empty_source_yields_usable_empty_map() {
  setup_tracing();
  let mut result: BTreeMap<String, u32> = run_projected(vec![
    Stage::source(Vec::<Person>::new()),
    Stage::project(|p: Person| (p.last_name, p.age)),
    Stage::collect(),
  ])
  .expect("empty query should run");

  assert!(result.is_empty());
  result.insert("Snow".to_string(), 32);
  assert_eq!(result.len(), 1);

  let mut ordered: OrderedMap<String, u32> = run_projected(vec![
    Stage::source(Vec::<Person>::new()),
    Stage::sort_by(|lhs: &String, rhs: &String| rhs.cmp(lhs)),
    Stage::project(|p: Person| (p.last_name, p.age)),
    Stage::collect(),
  ])
  .expect("empty query should run");

  assert!(ordered.is_empty());
  ordered.insert("Arryn".to_string(), 40);
  ordered.insert("Tully".to_string(), 45);
  // The comparator handed over by the sort stage still applies.
  assert_eq!(ordered.first_key_value().map(|(k, _)| k.as_str()), Some("Tully"));
}
