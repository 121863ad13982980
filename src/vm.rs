//! The reversible machine: a state store plus the stack of instructions that produced it. Every
//! instruction run can be undone, one at a time and in reverse order, back to the initial state.
//!
//! The machine is single-owner and synchronous. It holds no locks; share it behind one.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};
use tracing::{debug, trace};

use crate::error::Result;
use crate::instructions::Instruction;
use crate::state::State;

#[derive(Clone, Debug)]
pub struct ReversibleVM {
  state   : State,            // Current values
  history : Vec<Instruction>, // Applied instructions, most recent last
}

impl ReversibleVM {

  // region Display methods

  fn make_table<T, U>(
      name      : &str,
      entries   : &[(T, U)],
      highlight : Option<usize>,
    ) -> Table
    where T: Display,
          U: Display
  {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->name, ubl->"Contents"]);

    for (i, (key, value)) in entries.iter().enumerate() {
      match Some(i) == highlight {

        true  => {
          table.add_row(row![r->format!("* --> {} =", key), format!("{}", value)]);
        }

        false => {
          table.add_row(row![r->format!("{} =", key), format!("{}", value)]);
        }

      } // end match on highlight
    } // end for
    table
  }

  // endregion

  pub fn new(initial: State) -> ReversibleVM {
    ReversibleVM {
      state   : initial,
      history : vec![],
    }
  }

  /// Read-only view of the current state.
  pub fn inspect(&self) -> &State {
    &self.state
  }

  pub fn history(&self) -> &[Instruction] {
    &self.history
  }

  /// Number of instructions that can be undone.
  pub fn depth(&self) -> usize {
    self.history.len()
  }

  // region Run and undo

  /**
    Executes `instruction` and records it. On failure neither the state nor the history changes.
  */
  pub fn run(&mut self, instruction: Instruction) -> Result<()> {
    if let Err(error) = instruction.execute(&mut self.state) {
      debug!(%instruction, %error, "run failed");
      return Err(error);
    }
    trace!(%instruction, depth = self.history.len() + 1, "run");
    self.history.push(instruction);

    #[cfg(feature = "trace_computation")] trace!("\n{}", self);
    Ok(())
  }

  /**
    Runs every instruction of `program` in order. If one fails, the instructions of `program`
    already applied are undone before the error is returned, so the call is all-or-nothing.
  */
  pub fn run_all<I>(&mut self, program: I) -> Result<()>
    where I: IntoIterator<Item = Instruction>
  {
    let mut applied = 0usize;
    for instruction in program {
      if let Err(error) = self.run(instruction) {
        debug!(applied, "rolling back partial program");
        for _ in 0..applied {
          self.undo()?;
        }
        return Err(error);
      }
      applied += 1;
    }
    Ok(())
  }

  /**
    Inverts and forgets the most recently run instruction, returning it. With an empty history
    this is a no-op that returns `None`.
  */
  pub fn undo(&mut self) -> Result<Option<Instruction>> {
    let instruction =
      match self.history.pop() {
        Some(instruction) => instruction,
        None              => return Ok(None)
      };

    if let Err(error) = instruction.invert(&mut self.state) {
      // Not reachable for instructions that executed successfully, but keep the history intact.
      debug!(%instruction, %error, "undo failed");
      self.history.push(instruction);
      return Err(error);
    }
    trace!(%instruction, depth = self.history.len(), "undo");

    #[cfg(feature = "trace_computation")] trace!("\n{}", self);
    Ok(Some(instruction))
  }

  /// Undoes the whole history, returning how many instructions were undone.
  pub fn rewind(&mut self) -> Result<usize> {
    let mut undone = 0usize;
    while self.undo()?.is_some() {
      undone += 1;
    }
    debug!(undone, "rewound to initial state");
    Ok(undone)
  }

  // endregion

}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for ReversibleVM {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let state_entries = self.state.sorted();
    let history_entries: Vec<(usize, &Instruction)> = self.history.iter().enumerate().collect();

    let s_table = ReversibleVM::make_table("Variable", &state_entries, None);
    let h_table = ReversibleVM::make_table("#", &history_entries, self.history.len().checked_sub(1));

    let mut combined_table = table!([s_table, h_table]);

    combined_table.set_titles(row![ub->"State", ub->"History"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(f, "Depth: {}\n{}", self.history.len(), combined_table)
  }
}
