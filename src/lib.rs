/*!
  A reversible execution engine.

  Two independent ways of changing a `State`:

   1. Build `Instruction`s and drive them through a `ReversibleVM`. Every instruction has an exact
      inverse, so the machine can `undo` its way back through history to the initial state.

   2. Build a tree of `GateOp`s and drive it through `evaluate`. Each step names an operation in a
      logic domain (binary, ternary, natlog), and compound `seq` steps recurse back into the
      evaluator.

  ```
  use revvm::{Domain, GateOp, Instruction, ReversibleVM, State, evaluate};

  let mut vm = ReversibleVM::new(State::create(vec!["a", "b"], 2));
  vm.run(Instruction::add("a", "b")).unwrap();
  vm.undo().unwrap();
  assert_eq!(vm.inspect(), &State::create(vec!["a", "b"], 2));

  let mut bits = State::create(vec!["bit"], 0);
  evaluate(&GateOp::new("flip").with_target("bit"), &mut bits, Domain::Binary).unwrap();
  assert_eq!(bits, State::create(vec!["bit"], 1));
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod error;
pub mod gates;
pub mod instructions;
pub mod puzzle;
pub mod state;
pub mod symboltable;
pub mod vm;

pub use error::{Error, Result};
pub use gates::{evaluate, Domain, Evaluator, GateOp};
pub use instructions::{Instruction, Opcode};
pub use puzzle::Puzzle;
pub use state::{State, Value, Variable};
pub use symboltable::SymbolTable;
pub use vm::ReversibleVM;
