// querypipe/src/stage/collect.rs

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::destination::{Destination, Family, Insertion};

/// The family a query collects into when it declares no `Collect` stage.
pub const DEFAULT_FAMILY: Family = Family::Sequence;

/// Selects the destination collection `D`.
///
/// Collect does not touch the working data. It is the descriptor `Sort` and
/// `Project` consult to decide how to behave.
pub struct Collect<D> {
  _destination: PhantomData<fn() -> D>,
}

impl<'a, D: Destination<'a>> Collect<D> {
  pub fn new() -> Self {
    Self {
      _destination: PhantomData,
    }
  }

  pub fn family(&self) -> Family {
    D::FAMILY
  }

  pub fn insertion(&self) -> Option<Insertion> {
    D::INSERTION
  }
}

impl<'a, D: Destination<'a>> Default for Collect<D> {
  fn default() -> Self {
    Self::new()
  }
}

impl<'a, D: Destination<'a>> fmt::Debug for Collect<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Collect")
      .field("destination", &type_name::<D>())
      .field("family", &D::FAMILY)
      .finish()
  }
}
