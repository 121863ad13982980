/*!
  The state store: a mapping from variable name to integer value. Both the reversible machine and
  the gate evaluator work over this one shape. Domain-typed views of it live in `crate::gates`.

  Variables must exist before they are read or written. Only `create`, `insert`, and
  deserialization introduce names; every other accessor fails with `Error::UnknownVariable`
  rather than defaulting. Comparison is the one place absence has a meaning: a name present in
  only one of two states compares as if the other side held 0.
*/

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use string_cache::DefaultAtom;

use crate::error::{Error, Result};

/// Variable names are interned. Clones are cheap.
pub type Variable = DefaultAtom;
/// Values are two's complement and all arithmetic on them wraps.
pub type Value = i64;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
  values: HashMap<Variable, Value>,
}

impl State {

  pub fn new() -> State {
    State { values: HashMap::new() }
  }

  /// A state in which every named variable holds `initial`. Repeated names collapse.
  pub fn create<I, S>(variables: I, initial: Value) -> State
    where I: IntoIterator<Item = S>,
          S: Into<Variable>
  {
    variables.into_iter().map(|name| (name, initial)).collect()
  }

  // region Access

  pub fn get(&self, variable: &Variable) -> Result<Value> {
    self.values
        .get(variable)
        .copied()
        .ok_or_else(|| Error::UnknownVariable(variable.clone()))
  }

  /// Overwrites an existing variable. Fails, leaving the state untouched, if it does not exist.
  pub fn set(&mut self, variable: &Variable, value: Value) -> Result<()> {
    match self.values.get_mut(variable) {
      Some(slot) => {
        *slot = value;
        Ok(())
      }
      None => Err(Error::UnknownVariable(variable.clone()))
    }
  }

  /// Defines or overwrites a variable, returning its previous value.
  pub fn insert<S: Into<Variable>>(&mut self, variable: S, value: Value) -> Option<Value> {
    self.values.insert(variable.into(), value)
  }

  pub fn contains(&self, variable: &Variable) -> bool {
    self.values.contains_key(variable)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&Variable, Value)> {
    self.values.iter().map(|(name, value)| (name, *value))
  }

  /// The entries ordered by name, for stable display.
  pub fn sorted(&self) -> Vec<(&Variable, Value)> {
    let mut entries: Vec<(&Variable, Value)> = self.iter().collect();
    entries.sort_by(|a, b| (&**a.0).cmp(&**b.0));
    entries
  }

  // endregion

  // region Serialization

  /// Encodes the state as a JSON object of name to number.
  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string(self)?)
  }

  pub fn from_json(text: &str) -> Result<State> {
    Ok(serde_json::from_str(text)?)
  }

  // endregion

  fn value_or_zero(&self, variable: &Variable) -> Value {
    self.values.get(variable).copied().unwrap_or(0)
  }

}

/// Two states are equal when every name in either of them has the same value in both, an absent
/// name reading as 0.
impl PartialEq for State {
  fn eq(&self, other: &State) -> bool {
    self.values
        .keys()
        .chain(other.values.keys())
        .all(|name| self.value_or_zero(name) == other.value_or_zero(name))
  }
}

impl Eq for State {}

impl<S: Into<Variable>> FromIterator<(S, Value)> for State {
  fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> State {
    State {
      values: iter.into_iter().map(|(name, value)| (name.into(), value)).collect()
    }
  }
}

impl Display for State {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{{{}}}",
      self.sorted()
          .iter()
          .map(|(name, value)| format!("{}: {}", name, value))
          .collect::<Vec<String>>()
          .join(", ")
    )
  }
}
