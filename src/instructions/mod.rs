/*!
  The instruction set of the reversible machine. Every instruction has an `execute` and an
  `invert`, and for any state in which its operands exist, `invert` after `execute` restores the
  state exactly. Arithmetic wraps, so this holds at the edges of `Value` too.

  Instructions are stored as one enum variant per opcode so that adding an instruction cannot
  compile until every `match` over instructions handles it. The bare `Opcode` exists for the
  text and binary forms, where it is converted to and from names (via `strum`) and bytes (via
  `num_enum`).
*/

pub mod assembly;
pub mod binary;

use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::{Error, Result};
use crate::state::{State, Variable};

pub use assembly::{parse_assembly, to_assembly};
pub use binary::{decode_program, encode_program, EncodedInstruction, Word};

/**
  Opcodes of the machine.

  The order the opcodes are listed in is significant: binary opcodes come first, then unary, then
  nullary, so that an opcode's arity, and with it its encoded size, follows from a comparison.
  Order-dependencies:
      ```
      Opcode::arity()
      binary::instruction_size()
      binary::decode_program()
      ```
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,          Eq,         PartialEq,        Debug,         Hash
)]
#[repr(u8)]
pub enum Opcode {
  // Binary //
  Add,      // add( a, b )
  Sub,      // sub( a, b )
  Swap,     // swap( a, b )
  // Opcode 3

  // Unary //
  Negate,   // negate( a )
  // Opcode 4

  // Nullary //
  Noop,     // noop
}

pub const MAX_BINARY_OPCODE: u8 = 3u8;
pub const MAX_UNARY_OPCODE: u8 = 4u8;

impl Opcode {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  pub fn arity(&self) -> usize {
    match self.code() {
      value if value < MAX_BINARY_OPCODE => 2,
      value if value < MAX_UNARY_OPCODE  => 1,
      _value => 0
    }
  }

  pub fn name(&self) -> &'static str {
    self.into()
  }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// `a += b`
  Add(Variable, Variable),
  /// `a -= b`
  Sub(Variable, Variable),
  /// `a = -a`
  Negate(Variable),
  /// Exchanges `a` and `b`.
  Swap(Variable, Variable),
  Noop,
}

impl Instruction {

  // region Construction

  pub fn add<A: Into<Variable>, B: Into<Variable>>(a: A, b: B) -> Instruction {
    Instruction::Add(a.into(), b.into())
  }

  pub fn sub<A: Into<Variable>, B: Into<Variable>>(a: A, b: B) -> Instruction {
    Instruction::Sub(a.into(), b.into())
  }

  pub fn negate<A: Into<Variable>>(a: A) -> Instruction {
    Instruction::Negate(a.into())
  }

  pub fn swap<A: Into<Variable>, B: Into<Variable>>(a: A, b: B) -> Instruction {
    Instruction::Swap(a.into(), b.into())
  }

  /// Builds an instruction from an opcode and its operands, checking the operand count against
  /// the opcode's arity. `None` means the count was wrong.
  pub fn from_parts(opcode: Opcode, operands: Vec<Variable>) -> Option<Instruction> {
    if operands.len() != opcode.arity() {
      return None;
    }
    let mut operands = operands.into_iter();
    let mut next = || operands.next();

    let instruction =
      match opcode {
        Opcode::Add    => Instruction::Add(next()?, next()?),
        Opcode::Sub    => Instruction::Sub(next()?, next()?),
        Opcode::Swap   => Instruction::Swap(next()?, next()?),
        Opcode::Negate => Instruction::Negate(next()?),
        Opcode::Noop   => Instruction::Noop,
      };
    Some(instruction)
  }

  // endregion

  pub fn opcode(&self) -> Opcode {
    match self {
      Instruction::Add(..)    => Opcode::Add,
      Instruction::Sub(..)    => Opcode::Sub,
      Instruction::Negate(..) => Opcode::Negate,
      Instruction::Swap(..)   => Opcode::Swap,
      Instruction::Noop       => Opcode::Noop,
    }
  }

  pub fn operands(&self) -> Vec<&Variable> {
    match self {
      | Instruction::Add(a, b)
      | Instruction::Sub(a, b)
      | Instruction::Swap(a, b) => vec![a, b],
      Instruction::Negate(a)    => vec![a],
      Instruction::Noop         => vec![],
    }
  }

  /// The instruction whose `execute` is this instruction's `invert`.
  pub fn inverse(&self) -> Instruction {
    match self {
      Instruction::Add(a, b) => Instruction::Sub(a.clone(), b.clone()),
      Instruction::Sub(a, b) => Instruction::Add(a.clone(), b.clone()),
      // Negate and Swap are their own inverses.
      other                  => other.clone(),
    }
  }

  /**
    Applies the instruction to `state` in place. All operands are read, and checked to exist,
    before anything is written, so on failure the state is unchanged.
  */
  pub fn execute(&self, state: &mut State) -> Result<()> {
    match self {

      Instruction::Add(a, b) => {
        self.require_distinct(a, b)?;
        let sum = state.get(a)?.wrapping_add(state.get(b)?);
        state.set(a, sum)
      }

      Instruction::Sub(a, b) => {
        self.require_distinct(a, b)?;
        let difference = state.get(a)?.wrapping_sub(state.get(b)?);
        state.set(a, difference)
      }

      Instruction::Negate(a) => {
        let value = state.get(a)?;
        state.set(a, value.wrapping_neg())
      }

      Instruction::Swap(a, b) => {
        let value_a = state.get(a)?;
        let value_b = state.get(b)?;
        state.set(a, value_b)?;
        state.set(b, value_a)
      }

      Instruction::Noop => Ok(())

    }
  }

  /// Undoes `execute`. Same failure behavior as `execute`.
  pub fn invert(&self, state: &mut State) -> Result<()> {
    self.inverse().execute(state)
  }

  fn require_distinct(&self, a: &Variable, b: &Variable) -> Result<()> {
    match a == b {
      true  => Err(Error::AliasedOperands { opcode: self.opcode().name(), variable: a.clone() }),
      false => Ok(())
    }
  }

}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      Instruction::Noop => {
        write!(f, "{}", self.opcode())
      }

      _ => {
        write!(
          f,
          "{}({})",
          self.opcode(),
          self.operands()
              .iter()
              .map(|operand| assembly::operand_text(operand).into_owned())
              .collect::<Vec<String>>()
              .join(", ")
        )
      }

    }
  }
}
