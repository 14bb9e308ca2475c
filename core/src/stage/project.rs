// querypipe/src/stage/project.rs

use std::fmt;

use crate::destination::{Destination, Insertion};

/// Transforms every element into the destination's element type.
///
/// Always runs after every other stage, so filters, sorts and truncations see
/// complete source records.
pub struct Project<'a, T, R> {
  transform: Box<dyn Fn(T) -> R + 'a>,
}

impl<'a, T, R> Project<'a, T, R> {
  pub fn new(transform: impl Fn(T) -> R + 'a) -> Self {
    Self {
      transform: Box::new(transform),
    }
  }

  pub fn transform(&self, item: T) -> R {
    (self.transform)(item)
  }

  /// Projects `data` into `destination` using the destination's insertion
  /// strategy. Returns how many projected elements were rejected as duplicates.
  pub(crate) fn project_into<'d, D>(&self, data: Vec<T>, destination: &mut D, insertion: Insertion) -> usize
  where
    D: Destination<'d, Item = R>,
  {
    destination.reserve(data.len());
    let mut rejected = 0;
    match insertion {
      Insertion::Append => {
        for item in data {
          destination.append_one((self.transform)(item));
        }
      }
      Insertion::Insert => {
        for item in data {
          if !destination.insert_one((self.transform)(item)) {
            rejected += 1;
          }
        }
      }
    }
    rejected
  }
}

impl<T, R> fmt::Debug for Project<'_, T, R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Project")
      .field("output", &std::any::type_name::<R>())
      .finish_non_exhaustive()
  }
}
