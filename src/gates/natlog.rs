//! The natlog domain, over unconstrained integer symbols. Reserved for weighted and
//! entropy-efficient reversible gates; for now the registry holds only the identity.

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};

use super::{Domain, Evaluator, GateFn, GateOp, Registry, Symbol};
use crate::error::Result;
use crate::state::{State, Value};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NatSymbol(pub Value);

impl From<NatSymbol> for Value {
  fn from(symbol: NatSymbol) -> Value {
    symbol.0
  }
}

impl Symbol for NatSymbol {
  const DOMAIN: Domain = Domain::Natlog;

  fn from_value(value: Value) -> Option<NatSymbol> {
    Some(NatSymbol(value))
  }
}

#[derive(
  StrumDisplay, IntoStaticStr, EnumString,
  Clone,        Copy,          Eq,         PartialEq, Debug, Hash
)]
#[strum(serialize_all = "lowercase")]
pub enum NatlogOp {
  Noop,
}

pub struct NatlogGates;

impl Registry for NatlogGates {
  type Symbol = NatSymbol;
  type Op     = NatlogOp;

  fn gate(op: NatlogOp) -> GateFn {
    match op {
      NatlogOp::Noop => noop,
    }
  }
}

fn noop(_step: &GateOp, _state: &mut State, _: &Evaluator) -> Result<()> {
  Ok(())
}
