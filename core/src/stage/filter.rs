// querypipe/src/stage/filter.rs

use std::fmt;

use super::{StageKind, Transform};

pub type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;

/// Keeps the elements matching `predicate`, preserving their relative order.
pub struct Filter<'a, T> {
  predicate: Predicate<'a, T>,
}

impl<'a, T> Filter<'a, T> {
  pub fn new(predicate: impl Fn(&T) -> bool + 'a) -> Self {
    Self {
      predicate: Box::new(predicate),
    }
  }
}

impl<T> Transform<T> for Filter<'_, T> {
  fn kind(&self) -> StageKind {
    StageKind::Filter
  }

  fn apply(&self, mut data: Vec<T>) -> Vec<T> {
    data.retain(|item| (self.predicate)(item));
    data
  }
}

impl<T> fmt::Debug for Filter<'_, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Filter").finish_non_exhaustive()
  }
}
