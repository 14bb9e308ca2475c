// querypipe/examples/ordered_results.rs

use std::collections::{BTreeSet, HashMap};

use querypipe::{run_projected, OrderedMap, OrderedSet, QueryResult, Stage};
use tracing::info;

#[derive(Clone, Debug)]
struct Reading {
  sensor: &'static str,
  celsius: i32,
}

fn main() -> QueryResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Ordered Results Example ---");

  let readings = vec![
    Reading { sensor: "boiler", celsius: 81 },
    Reading { sensor: "attic", celsius: 24 },
    Reading { sensor: "cellar", celsius: 12 },
    Reading { sensor: "attic", celsius: 27 },
    Reading { sensor: "boiler", celsius: 79 },
    Reading { sensor: "garage", celsius: 9 },
  ];

  // A sort in front of an ordered map orders its keys, here in reverse.
  // The first reading per sensor wins.
  let by_sensor: OrderedMap<&'static str, i32> = run_projected(vec![
    Stage::source(readings.clone()),
    Stage::sort_by(|lhs: &&'static str, rhs: &&'static str| rhs.cmp(lhs)),
    Stage::project(|r: Reading| (r.sensor, r.celsius)),
    Stage::collect(),
  ])?;
  for (sensor, celsius) in by_sensor.iter() {
    info!(sensor, celsius, "First reading.");
  }

  // Without a sort the ordered set falls back to natural order.
  let warm: OrderedSet<i32> = run_projected(vec![
    Stage::source(readings.clone()),
    Stage::filter(|r: &Reading| r.celsius > 20),
    Stage::project(|r: Reading| r.celsius),
    Stage::collect(),
  ])?;
  info!(warm = ?warm, "Warm readings, ascending.");

  // The std collections work as destinations too.
  let cold: BTreeSet<&'static str> = run_projected(vec![
    Stage::source(readings.clone()),
    Stage::filter(|r: &Reading| r.celsius < 15),
    Stage::project(|r: Reading| r.sensor),
    Stage::collect(),
  ])?;
  info!(cold = ?cold, "Cold sensors.");

  let latest: HashMap<&'static str, i32> = run_projected(vec![
    Stage::source(readings),
    Stage::bottom(3),
    Stage::project(|r: Reading| (r.sensor, r.celsius)),
    Stage::collect(),
  ])?;
  info!(count = latest.len(), "Sensors among the last three readings.");

  Ok(())
}
