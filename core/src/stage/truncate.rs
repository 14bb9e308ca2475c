// querypipe/src/stage/truncate.rs

//! Truncation stages. Each one works on whatever the previous stage produced,
//! so `Top(5)` followed by `Bottom(3)` keeps positions 2..5 of the input.

use super::{StageKind, Transform};

/// Keeps the first `count` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Top {
  pub count: usize,
}

/// Keeps the last `count` elements, in their original order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bottom {
  pub count: usize,
}

impl Top {
  pub fn new(count: usize) -> Self {
    Self { count }
  }
}

impl Bottom {
  pub fn new(count: usize) -> Self {
    Self { count }
  }
}

impl<T> Transform<T> for Top {
  fn kind(&self) -> StageKind {
    StageKind::Top
  }

  fn apply(&self, mut data: Vec<T>) -> Vec<T> {
    if data.len() > self.count {
      data.truncate(self.count);
    }
    data
  }
}

impl<T> Transform<T> for Bottom {
  fn kind(&self) -> StageKind {
    StageKind::Bottom
  }

  fn apply(&self, mut data: Vec<T>) -> Vec<T> {
    if data.len() > self.count {
      let excess = data.len() - self.count;
      data.drain(..excess);
    }
    data
  }
}
