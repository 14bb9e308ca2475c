// querypipe/examples/basic_query.rs

use querypipe::{run, run_projected, QueryResult, Stage};
use tracing::info;

// 1. Define the record type flowing through the query
#[derive(Clone, Debug)]
struct Employee {
  name: String,
  department: String,
  salary: u32,
}

fn employee(name: &str, department: &str, salary: u32) -> Employee {
  Employee {
    name: name.to_string(),
    department: department.to_string(),
    salary,
  }
}

fn main() -> QueryResult<()> {
  // Initialize tracing (optional, for demonstration). DEBUG shows each stage.
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

  info!("--- Basic Query Example ---");

  let staff = vec![
    employee("Ada", "engineering", 128_000),
    employee("Brian", "sales", 71_000),
    employee("Chen", "engineering", 97_500),
    employee("Dana", "support", 54_000),
    employee("Eli", "engineering", 143_000),
    employee("Fay", "sales", 88_250),
  ];

  // 2. Declare and run: engineers by descending salary, top two, as "name: salary"
  let top_engineers: Vec<String> = run_projected(vec![
    Stage::source(staff.clone()),
    Stage::filter(|e: &Employee| e.department == "engineering"),
    Stage::sort_by(|lhs: &Employee, rhs: &Employee| rhs.salary.cmp(&lhs.salary)),
    Stage::top(2),
    Stage::project(|e: Employee| format!("{}: {}", e.name, e.salary)),
  ])?;

  for line in &top_engineers {
    info!("{}", line);
  }

  // 3. Callbacks and sources may borrow: well paid staff, without cloning
  let min_salary = 90_000;
  let well_paid: Vec<&Employee> = run(vec![
    Stage::source(staff.iter()),
    Stage::filter(|e: &&Employee| e.salary >= min_salary),
  ])?;
  info!(count = well_paid.len(), min_salary, "Well paid staff.");

  // 4. Departments in order of first appearance
  let departments: Vec<String> = run_projected(vec![
    Stage::source(staff),
    Stage::project(|e: Employee| e.department),
    Stage::stable_unique_by_key(|e: &Employee| e.department.clone()),
  ])?;
  info!(?departments, "Distinct departments.");

  Ok(())
}
