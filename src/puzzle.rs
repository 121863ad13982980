/*!
  A puzzle pairs a starting state with a goal and the steps a player submitted. Descriptions are
  written by external tools as JSON:

  ```json
  {
    "domain": "binary",
    "initial": {"a": 1, "b": 0},
    "goal": {"a": 0, "b": 1},
    "steps": [{"op": "swap", "targets": ["a", "b"]}]
  }
  ```

  `domain` is the default for steps that name none. Goals are compared with `State` equality, so
  a goal may leave out variables that must end at 0.
*/

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::gates::{Evaluator, GateOp};
use crate::state::State;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
  pub domain  : String,
  pub initial : State,
  pub goal    : State,
  #[serde(default)]
  pub steps   : Vec<GateOp>,
}

impl Puzzle {

  pub fn from_json(text: &str) -> Result<Puzzle> {
    Ok(serde_json::from_str(text)?)
  }

  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string(self)?)
  }

  pub fn evaluator(&self) -> Result<Evaluator> {
    Evaluator::for_domain(&self.domain)
  }

  /// Evaluates every step, in order, against a copy of the initial state.
  pub fn play(&self) -> Result<State> {
    let evaluator = self.evaluator()?;
    let mut state = self.initial.clone();
    for (index, step) in self.steps.iter().enumerate() {
      if let Err(error) = evaluator.evaluate(step, &mut state) {
        debug!(index, op = %step.op, %error, "puzzle step failed");
        return Err(error);
      }
    }
    Ok(state)
  }

  pub fn is_solved(&self, state: &State) -> bool {
    *state == self.goal
  }

  /// Plays the steps and reports whether they reach the goal.
  pub fn check(&self) -> Result<bool> {
    Ok(self.is_solved(&self.play()?))
  }

}
