//! Errors raised by the machine, the gate evaluator, and the program codecs. Every error is raised
//! at the point of the offending call and nothing is mutated when one is returned.

use thiserror::Error;

use crate::state::{Value, Variable};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  /// An operand names a variable that does not exist in the state.
  #[error("unknown variable: {0}")]
  UnknownVariable(Variable),

  /// `Add(a, a)` and `Sub(a, a)` have no inverse.
  #[error("{opcode} operands must be distinct, both are {variable}")]
  AliasedOperands { opcode: &'static str, variable: Variable },

  /// A gate step lacks its `target`, `targets` or `result`.
  #[error("missing {operand} for {op}")]
  MissingOperand { op: String, operand: &'static str },

  #[error("unknown logic domain: '{0}'")]
  UnknownDomain(String),

  #[error("unsupported operation '{op}' in domain '{domain}'")]
  UnknownOperation { domain: String, op: String },

  /// A declared capability that is switched off or not yet available.
  #[error("not implemented: {0}")]
  NotImplemented(String),

  /// A domain-typed read found a value outside the domain's symbol set.
  #[error("{variable} = {value} is not a valid {domain} symbol")]
  OutOfDomain { domain: &'static str, variable: Variable, value: Value },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("error on line {line}: {message}")]
  Assembly { line: u32, message: String },

  #[error("cannot encode program: {0}")]
  Encode(String),

  #[error("cannot decode program: {0}")]
  Decode(String),
}
