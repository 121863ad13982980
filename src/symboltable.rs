use bimap::BiMap;

use crate::instructions::Instruction;
use crate::state::Variable;

/// Register indices are 24 bits wide in the binary encoding.
pub type Register = u32;
pub const MAX_REGISTER: Register = 0xFF_FFFF;

/**
  A symbol table is a mapping between variable names and the register indices that stand for them
  in encoded programs. A symbol table is really just a convenience wrapper around a BiMap.
  Registers are handed out densely from 0 in the order variables are first seen.
*/
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
  table: BiMap<Variable, Register>
}

impl SymbolTable {

  pub fn new() -> SymbolTable {
    SymbolTable {
      table: BiMap::new()
    }
  }

  /// A table covering every operand of `program`.
  pub fn for_program(program: &[Instruction]) -> Option<SymbolTable> {
    let mut table = SymbolTable::new();
    for instruction in program {
      for operand in instruction.operands() {
        table.intern(operand.clone())?;
      }
    }
    Some(table)
  }

  pub fn get_variable(&self, register: Register) -> Option<&Variable> {
    self.table.get_by_right(&register)
  }

  pub fn get_register(&self, variable: &Variable) -> Option<Register> {
    self.table.get_by_left(variable).copied()
  }

  /// Returns the register for `variable`, assigning the next free one if it has none. `None`
  /// once the register space is exhausted.
  pub fn intern(&mut self, variable: Variable) -> Option<Register> {
    if let Some(register) = self.get_register(&variable) {
      return Some(register);
    }
    let register = self.table.len() as Register;
    if register > MAX_REGISTER {
      return None;
    }
    self.table.insert(variable, register);
    Some(register)
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }

}
