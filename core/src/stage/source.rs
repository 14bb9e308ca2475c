// querypipe/src/stage/source.rs

use std::fmt;

/// The stage supplying a query's initial data.
///
/// The data is taken by value: every downstream stage either shrinks or
/// reorders it, so the executor needs an owned buffer anyway.
pub struct Source<T> {
  data: Vec<T>,
}

impl<T> Source<T> {
  pub fn new(data: impl IntoIterator<Item = T>) -> Self {
    Self {
      data: data.into_iter().collect(),
    }
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub(crate) fn into_data(self) -> Vec<T> {
    self.data
  }
}

impl<T> fmt::Debug for Source<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Source").field("len", &self.data.len()).finish()
  }
}
