/*!
  This module is responsible for the encoding and decoding of binary programs. Variables do not
  appear in the words themselves; they are replaced by register indices from a `SymbolTable`,
  which must travel with the encoded program.

  Layouts, low bits first:

    Binary:  [OpCode:8][Register:24][Register:24][Reserved:8]   (two words)
    Unary:   [OpCode:8][Register:24]                            (one word)
    Nullary: [OpCode:8][Reserved:24]                            (one word)

  Reserved bits are written as zero, and a decoder that finds them set rejects the instruction.
*/

use std::convert::TryFrom;

use super::{Instruction, Opcode, MAX_BINARY_OPCODE};
use crate::error::{Error, Result};
use crate::symboltable::{Register, SymbolTable, MAX_REGISTER};

// If you change this you must also change `encode_instruction` and `try_decode_instruction`.
pub type Word = u32;
pub type DoubleWord = u64;

/// An `Either` type for an encoded instruction, allowing the instruction to be
/// either one word or two.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EncodedInstruction {
  Word(Word),
  DoubleWord(DoubleWord)
}

impl EncodedInstruction {
  /// The words in memory order, low word first.
  pub fn words(&self) -> Vec<Word> {
    match *self {
      EncodedInstruction::Word(word) => vec![word],
      EncodedInstruction::DoubleWord(double_word) => {
        vec![(double_word & 0xFFFF_FFFF) as Word, (double_word >> 32) as Word]
      }
    }
  }
}

/// Returns the size in WORDS of an instruction for the corresponding opcode.
pub fn instruction_size(opcode: Opcode) -> usize {
  match opcode.code() < MAX_BINARY_OPCODE {
    true  => 2, // Two words
    false => 1  // One Word
  }
}

/**
  Given the low word of an instruction, determines whether the entire instruction is two
  words. This is how to determine if a second word needs to be provided for decoding.

  Note that this function does not check if the input has a valid opcode.
*/
pub fn is_double_word_instruction(word: Word) -> bool {
  ((word & 0xFF) as u8) < MAX_BINARY_OPCODE
}

fn register_of(table: &mut SymbolTable, instruction: &Instruction, index: usize) -> Result<Register> {
  let operand = instruction.operands()[index].clone();
  table.intern(operand).ok_or_else(|| {
    Error::Encode(too_many_variables())
  })
}

fn too_many_variables() -> String {
  format!("more than {} variables in one program", MAX_REGISTER as u64 + 1)
}

/**
  Encodes the instruction, assigning registers to any operands `table` has not seen yet.
*/
pub fn encode_instruction(instruction: &Instruction, table: &mut SymbolTable) -> Result<EncodedInstruction> {
  let opcode = instruction.opcode();

  let encoded =
    match opcode.arity() {

      2 => {
        // [OpCode:8][Register:24][Register:24][Reserved:8]
        let first  = register_of(table, instruction, 0)?;
        let second = register_of(table, instruction, 1)?;
        EncodedInstruction::DoubleWord(
          ( opcode.code() as DoubleWord)         +
          ((first         as DoubleWord) << 8 )  +
          ((second        as DoubleWord) << 32)
        )
      }

      1 => {
        // [OpCode:8][Register:24]
        let register = register_of(table, instruction, 0)?;
        EncodedInstruction::Word(
          ( opcode.code() as Word)        +
          ((register      as Word) << 8 )
        )
      }

      _ => {
        // [OpCode:8]
        EncodedInstruction::Word(opcode.code() as Word)
      }

    };

  Ok(encoded)
}

/// Decodes one instruction whose words have been assembled into `instruction`, low word first.
pub fn try_decode_instruction(instruction: DoubleWord, table: &SymbolTable) -> Result<Instruction> {
  let opcode = Opcode::try_from((instruction & 0xFF) as u8)
    .map_err(|e| Error::Decode(e.to_string()))?;

  // Everything above the last field the opcode uses must be zero.
  let reserved =
    match opcode.arity() {
      2 => instruction >> 56,
      1 => instruction >> 32,
      _ => instruction >> 8
    };
  if reserved != 0 {
    return Err(Error::Decode(format!("reserved bits set in {} instruction {:#x}", opcode, instruction)));
  }

  let variable = |register: DoubleWord| {
    let register = (register & MAX_REGISTER as DoubleWord) as Register;
    table.get_variable(register)
         .cloned()
         .ok_or_else(|| Error::Decode(format!("register {} has no variable", register)))
  };

  let operands =
    match opcode.arity() {
      2 => vec![variable(instruction >> 8)?, variable(instruction >> 32)?],
      1 => vec![variable(instruction >> 8)?],
      _ => vec![]
    };

  Instruction::from_parts(opcode, operands)
    .ok_or_else(|| Error::Decode(format!("bad operands for {}", opcode)))
}

/// Encodes a whole program, returning the words and the symbol table they refer to.
pub fn encode_program(program: &[Instruction]) -> Result<(Vec<Word>, SymbolTable)> {
  let mut table = SymbolTable::for_program(program)
    .ok_or_else(|| Error::Encode(too_many_variables()))?;
  let mut words = Vec::with_capacity(program.len());
  for instruction in program {
    words.extend(encode_instruction(instruction, &mut table)?.words());
  }
  Ok((words, table))
}

pub fn decode_program(words: &[Word], table: &SymbolTable) -> Result<Vec<Instruction>> {
  let mut program = Vec::new();
  let mut cursor  = 0usize;

  while cursor < words.len() {
    let low = words[cursor];
    let instruction =
      match is_double_word_instruction(low) {

        true => {
          let high = *words.get(cursor + 1).ok_or_else(|| {
            Error::Decode(format!("truncated instruction at word {}", cursor))
          })?;
          cursor += 2;
          (low as DoubleWord) + ((high as DoubleWord) << 32)
        }

        false => {
          cursor += 1;
          low as DoubleWord
        }

      };
    program.push(try_decode_instruction(instruction, table)?);
  }

  Ok(program)
}
