// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::hash::{Hash, Hasher};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Record Type ---
#[derive(Clone, Debug)]
pub struct Person {
  pub first_name: String,
  pub last_name: String,
  pub age: u32,
  pub salary: f64,
}

impl Person {
  pub fn new(first_name: &str, last_name: &str, age: u32, salary: f64) -> Self {
    Self {
      first_name: first_name.to_string(),
      last_name: last_name.to_string(),
      age,
      salary,
    }
  }
}

// Identity is the full name, age and salary are payload.
impl PartialEq for Person {
  fn eq(&self, other: &Self) -> bool {
    self.first_name == other.first_name && self.last_name == other.last_name
  }
}

impl Eq for Person {}

impl Hash for Person {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.first_name.hash(state);
    self.last_name.hash(state);
  }
}

/// Twenty people, in a fixed order every test relies on.
pub fn people() -> Vec<Person> {
  vec![
    Person::new("John", "Snow", 32, 50000.00),
    Person::new("Ned", "Stark", 58, 65080.50),
    Person::new("Daenerys", "Targaryen", 26, 52090.90),
    Person::new("Tyrion", "Lannister", 38, 55000.00),
    Person::new("Sandor", "Clegane", 42, 42261.80),
    Person::new("Joffrey", "Baratheon", 19, 31092.60),
    Person::new("Petyr", "Baelish", 56, 48380.00),
    Person::new("Khal", "Drogo", 36, 41000.30),
    Person::new("Ramsay", "Bolton", 27, 27044.00),
    Person::new("Theon", "Greyjoy", 30, 21108.10),
    Person::new("Jorah", "Mormont", 51, 38036.00),
    Person::new("Margaery", "Tyrell", 24, 32000.00),
    Person::new("Samwell", "Tarly", 23, 18703.70),
    Person::new("Jagen", "H'ghar", 31, 15080.00),
    Person::new("Podrick", "Payne", 17, 12800.00),
    Person::new("Davos", "Seaworth", 61, 32650.00),
    Person::new("Grey", "Worm", 23, 27500.90),
    Person::new("Meera", "Reed", 14, 8042.32),
    Person::new("Ser", "Pounce", 5, 1010.00),
    Person::new("Walder", "Frey", 72, 35590.00),
  ]
}

/// `people()` twice over, so every person has exactly one duplicate.
pub fn people_twice() -> Vec<Person> {
  let mut data = people();
  data.extend(people());
  data
}

pub fn first_names<'a>(people: impl IntoIterator<Item = &'a Person>) -> Vec<&'a str> {
  people.into_iter().map(|p| p.first_name.as_str()).collect()
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking how often user callbacks run ---
pub static PREDICATE_CALLS: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static PROJECTION_CALLS: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  PREDICATE_CALLS.store(0, Ordering::SeqCst);
  PROJECTION_CALLS.store(0, Ordering::SeqCst);
}

pub fn predicate_calls() -> usize {
  PREDICATE_CALLS.load(Ordering::SeqCst)
}

pub fn projection_calls() -> usize {
  PROJECTION_CALLS.load(Ordering::SeqCst)
}

pub fn count_predicate_call() {
  PREDICATE_CALLS.fetch_add(1, Ordering::SeqCst);
}

pub fn count_projection_call() {
  PROJECTION_CALLS.fetch_add(1, Ordering::SeqCst);
}
