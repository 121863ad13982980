//! The binary domain: bits, and the gates over them.

use std::ops::{BitXor, Not};

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};
use tracing::trace;

use super::{Domain, Evaluator, GateFn, GateOp, Registry, Symbol, Symbols};
use crate::error::{Error, Result};
use crate::state::{State, Value};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Bit(bool);

impl Bit {
  pub const ZERO: Bit = Bit(false);
  pub const ONE : Bit = Bit(true);
}

impl Not for Bit {
  type Output = Bit;
  fn not(self) -> Bit {
    Bit(!self.0)
  }
}

impl BitXor for Bit {
  type Output = Bit;
  fn bitxor(self, rhs: Bit) -> Bit {
    Bit(self.0 ^ rhs.0)
  }
}

impl From<Bit> for Value {
  fn from(bit: Bit) -> Value {
    bit.0 as Value
  }
}

impl Symbol for Bit {
  const DOMAIN: Domain = Domain::Binary;

  fn from_value(value: Value) -> Option<Bit> {
    match value {
      0 => Some(Bit::ZERO),
      1 => Some(Bit::ONE),
      _ => None
    }
  }
}

#[derive(
  StrumDisplay, IntoStaticStr, EnumString,
  Clone,        Copy,          Eq,         PartialEq, Debug, Hash
)]
#[strum(serialize_all = "lowercase")]
pub enum BinaryOp {
  Flip,   // target ^= 1
  Swap,   // targets[0] <-> targets[1]
  Xor,    // result = targets[0] ^ targets[1]
  Seq,    // steps, in order
}

pub struct BinaryGates;

impl Registry for BinaryGates {
  type Symbol = Bit;
  type Op     = BinaryOp;

  fn gate(op: BinaryOp) -> GateFn {
    match op {
      BinaryOp::Flip => flip,
      BinaryOp::Swap => swap,
      BinaryOp::Xor  => xor,
      BinaryOp::Seq  => seq,
    }
  }
}

fn flip(step: &GateOp, state: &mut State, _: &Evaluator) -> Result<()> {
  let target = step.require_target()?;
  let mut bits = Symbols::<Bit>::new(state);
  let bit = bits.read(target)?;
  bits.write(target, !bit)
}

fn swap(step: &GateOp, state: &mut State, _: &Evaluator) -> Result<()> {
  let (a, b) = step.require_target_pair()?;
  let mut bits = Symbols::<Bit>::new(state);
  let bit_a = bits.read(a)?;
  let bit_b = bits.read(b)?;
  bits.write(a, bit_b)?;
  bits.write(b, bit_a)
}

fn xor(step: &GateOp, state: &mut State, _: &Evaluator) -> Result<()> {
  let result = step.require_result()?;
  let (a, b) = step.require_target_pair()?;
  let mut bits = Symbols::<Bit>::new(state);
  let value = bits.read(a)? ^ bits.read(b)?;
  // The only write. The old value of `result` is not read, so it need not be a bit.
  bits.write(result, value)
}

/**
  Evaluates each sub-step in order through the same evaluator, so a sub-step without a domain
  gets the evaluator's default. The steps run against a scratch copy that replaces `state` only
  once all of them succeed.
*/
fn seq(step: &GateOp, state: &mut State, evaluator: &Evaluator) -> Result<()> {
  let steps = step.steps.as_deref().unwrap_or(&[]);
  if steps.is_empty() {
    return Ok(());
  }
  if !evaluator.seq_linked() {
    return Err(Error::NotImplemented("seq not yet linked to evaluator".to_string()));
  }

  let mut scratch = state.clone();
  for (index, sub_step) in steps.iter().enumerate() {
    trace!(index, op = %sub_step.op, "seq step");
    evaluator.evaluate(sub_step, &mut scratch)?;
  }
  *state = scratch;
  Ok(())
}
