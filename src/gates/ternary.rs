//! The ternary domain. Trits are typed and stored, but no gates are defined over them yet, so
//! every lookup in this domain fails with `UnknownOperation`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use super::{Domain, GateFn, Registry, Symbol};
use crate::state::Value;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Trit(u8);

impl Trit {
  pub const ZERO: Trit = Trit(0);
  pub const ONE : Trit = Trit(1);
  pub const TWO : Trit = Trit(2);
}

impl From<Trit> for Value {
  fn from(trit: Trit) -> Value {
    trit.0 as Value
  }
}

impl Symbol for Trit {
  const DOMAIN: Domain = Domain::Ternary;

  fn from_value(value: Value) -> Option<Trit> {
    match value {
      0..=2 => Some(Trit(value as u8)),
      _     => None
    }
  }
}

/// Uninhabited until the first ternary gate exists.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TernaryOp {}

impl FromStr for TernaryOp {
  type Err = ();

  fn from_str(_name: &str) -> Result<TernaryOp, ()> {
    Err(())
  }
}

impl Display for TernaryOp {
  fn fmt(&self, _f: &mut Formatter<'_>) -> std::fmt::Result {
    match *self {}
  }
}

pub struct TernaryGates;

impl Registry for TernaryGates {
  type Symbol = Trit;
  type Op     = TernaryOp;

  fn gate(op: TernaryOp) -> GateFn {
    match op {}
  }
}
