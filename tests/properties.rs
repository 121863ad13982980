//! Property tests for the reversibility laws.
//!
//! Uses proptest to check the laws across randomly generated states and programs.

use proptest::prelude::*;

use revvm::instructions::{assembly::to_assembly, decode_program, encode_program, parse_assembly};
use revvm::{Instruction, ReversibleVM, State};

const NAMES: [&str; 4] = ["a", "b", "c", "d"];

fn arb_state() -> impl Strategy<Value = State> {
  prop::collection::vec(any::<i64>(), NAMES.len())
    .prop_map(|values| NAMES.iter().copied().zip(values).collect::<State>())
}

fn arb_name() -> impl Strategy<Value = &'static str> {
  prop::sample::select(NAMES.to_vec())
}

fn distinct_pair() -> impl Strategy<Value = (&'static str, &'static str)> {
  (arb_name(), arb_name()).prop_filter("Add and Sub operands must differ", |(a, b)| a != b)
}

/// Instructions over `NAMES` that are valid on any state built by `arb_state`.
fn arb_instruction() -> impl Strategy<Value = Instruction> {
  prop_oneof![
    distinct_pair().prop_map(|(a, b)| Instruction::add(a, b)),
    distinct_pair().prop_map(|(a, b)| Instruction::sub(a, b)),
    arb_name().prop_map(|a| Instruction::negate(a)),
    (arb_name(), arb_name()).prop_map(|(a, b)| Instruction::swap(a, b)),
    Just(Instruction::Noop),
  ]
}

fn arb_program() -> impl Strategy<Value = Vec<Instruction>> {
  prop::collection::vec(arb_instruction(), 0..24)
}

/// Any name a state will hold, including ones that are not identifiers.
fn arb_any_name() -> impl Strategy<Value = String> {
  prop_oneof![
    ".*",
    "[ -~\n\r\t]{0,6}",
  ]
}

fn any_distinct_pair() -> impl Strategy<Value = (String, String)> {
  (arb_any_name(), arb_any_name()).prop_filter("Add and Sub operands must differ", |(a, b)| a != b)
}

fn arb_any_instruction() -> impl Strategy<Value = Instruction> {
  prop_oneof![
    any_distinct_pair().prop_map(|(a, b)| Instruction::add(a, b)),
    any_distinct_pair().prop_map(|(a, b)| Instruction::sub(a, b)),
    arb_any_name().prop_map(|a| Instruction::negate(a)),
    (arb_any_name(), arb_any_name()).prop_map(|(a, b)| Instruction::swap(a, b)),
    Just(Instruction::Noop),
  ]
}

proptest! {
  /// invert(execute(s)) == s
  #[test]
  fn prop_inverse_law(state in arb_state(), instruction in arb_instruction()) {
    let mut working = state.clone();
    instruction.execute(&mut working).unwrap();
    instruction.invert(&mut working).unwrap();
    prop_assert_eq!(working, state);
  }

  /// Running a program and undoing it entirely returns to the start.
  #[test]
  fn prop_history_round_trip(state in arb_state(), program in arb_program()) {
    let mut vm = ReversibleVM::new(state.clone());
    vm.run_all(program.clone()).unwrap();
    for _ in 0..program.len() {
      prop_assert!(vm.undo().unwrap().is_some());
    }
    prop_assert!(vm.undo().unwrap().is_none());
    prop_assert_eq!(vm.inspect(), &state);
  }

  /// Undoing k of n instructions equals running only the first n - k.
  #[test]
  fn prop_partial_undo(state in arb_state(), program in arb_program(), k in 0usize..24) {
    let k = k.min(program.len());

    let mut full = ReversibleVM::new(state.clone());
    full.run_all(program.clone()).unwrap();
    for _ in 0..k {
      full.undo().unwrap();
    }

    let mut prefix = ReversibleVM::new(state);
    prefix.run_all(program[..program.len() - k].to_vec()).unwrap();

    prop_assert_eq!(full.inspect(), prefix.inspect());
    prop_assert_eq!(full.history(), prefix.history());
  }

  /// Swap and Negate undo themselves.
  #[test]
  fn prop_self_inverse(state in arb_state(), a in arb_name(), b in arb_name()) {
    for instruction in vec![Instruction::swap(a, b), Instruction::negate(a)] {
      let mut working = state.clone();
      instruction.execute(&mut working).unwrap();
      instruction.execute(&mut working).unwrap();
      prop_assert_eq!(&working, &state);
    }
  }

  #[test]
  fn prop_state_json_round_trip(values in prop::collection::hash_map("[a-z_][a-z0-9_]{0,8}", any::<i64>(), 0..16)) {
    let state: State = values.into_iter().collect();
    let text = state.to_json().unwrap();
    prop_assert_eq!(State::from_json(&text).unwrap(), state);
  }

  #[test]
  fn prop_create_json_round_trip(names in prop::collection::vec("[a-z]{1,6}", 0..10), initial in any::<i64>()) {
    let state = State::create(names, initial);
    prop_assert_eq!(State::from_json(&state.to_json().unwrap()).unwrap(), state);
  }

  #[test]
  fn prop_assembly_round_trip(program in arb_program()) {
    prop_assert_eq!(parse_assembly(&to_assembly(&program)).unwrap(), program);
  }

  #[test]
  fn prop_assembly_round_trip_any_names(program in prop::collection::vec(arb_any_instruction(), 0..12)) {
    let text = to_assembly(&program);
    prop_assert_eq!(text.lines().count(), program.len());
    prop_assert_eq!(parse_assembly(&text).unwrap(), program);
  }

  #[test]
  fn prop_binary_round_trip(program in arb_program()) {
    let (words, table) = encode_program(&program).unwrap();
    prop_assert_eq!(decode_program(&words, &table).unwrap(), program);
  }
}
