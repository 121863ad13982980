/*!
  Declarative logic steps and the domains that interpret them.

  A `GateOp` names an operation, its operands, and optionally a domain and sub-steps. It arrives
  from outside, usually deserialized from a puzzle description, so its domain and operation are
  plain strings. Those strings are parsed exactly once, into `Domain` and into the domain's
  operation enum, when the `Evaluator` looks the step up. From there dispatch is a `match`.

  Every domain reads and writes the same `State`, through a `Symbols` view typed by the domain's
  symbol: `Bit` for binary, `Trit` for ternary, `NatSymbol` for natlog. A value outside the symbol
  set is an error at the read, before the gate writes anything.
*/

pub mod binary;
pub mod evaluator;
pub mod natlog;
pub mod ternary;

use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};

use crate::error::{Error, Result};
use crate::state::{State, Value, Variable};

pub use binary::{Bit, BinaryGates, BinaryOp};
pub use evaluator::{evaluate, Evaluator};
pub use natlog::{NatSymbol, NatlogGates, NatlogOp};
pub use ternary::{TernaryGates, TernaryOp, Trit};

/// The logic families a step or puzzle can name.
#[derive(
  StrumDisplay, IntoStaticStr, EnumString,
  Clone,        Copy,          Eq,         PartialEq, Debug, Hash
)]
#[strum(serialize_all = "lowercase")]
pub enum Domain {
  Binary,
  Ternary,
  Natlog,
}

impl Domain {
  pub fn name(&self) -> &'static str {
    self.into()
  }

  /// Parses a domain name, failing with `UnknownDomain`.
  pub fn parse(name: &str) -> Result<Domain> {
    Domain::from_str(name).map_err(|_| Error::UnknownDomain(name.to_string()))
  }
}

/// A single logic step: atomic (`flip`) or compound (`seq`). Never mutated once built.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GateOp {
  /// Falls back to the evaluator's default domain.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub domain  : Option<String>,
  pub op      : String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target  : Option<Variable>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub targets : Option<Vec<Variable>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub result  : Option<Variable>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub steps   : Option<Vec<GateOp>>,
}

impl GateOp {

  pub fn new<S: Into<String>>(op: S) -> GateOp {
    GateOp { op: op.into(), ..GateOp::default() }
  }

  pub fn in_domain<S: Into<String>>(mut self, domain: S) -> GateOp {
    self.domain = Some(domain.into());
    self
  }

  pub fn with_target<S: Into<Variable>>(mut self, target: S) -> GateOp {
    self.target = Some(target.into());
    self
  }

  pub fn with_targets<I, S>(mut self, targets: I) -> GateOp
    where I: IntoIterator<Item = S>,
          S: Into<Variable>
  {
    self.targets = Some(targets.into_iter().map(Into::into).collect());
    self
  }

  pub fn with_result<S: Into<Variable>>(mut self, result: S) -> GateOp {
    self.result = Some(result.into());
    self
  }

  pub fn with_steps(mut self, steps: Vec<GateOp>) -> GateOp {
    self.steps = Some(steps);
    self
  }

  // region Operand access for gate functions

  pub fn require_target(&self) -> Result<&Variable> {
    self.target.as_ref().ok_or_else(|| self.missing("target"))
  }

  /// The first two `targets`. Further entries are ignored.
  pub fn require_target_pair(&self) -> Result<(&Variable, &Variable)> {
    match self.targets.as_deref() {
      Some([first, second, ..]) => Ok((first, second)),
      _                         => Err(self.missing("targets"))
    }
  }

  pub fn require_result(&self) -> Result<&Variable> {
    self.result.as_ref().ok_or_else(|| self.missing("result"))
  }

  fn missing(&self, operand: &'static str) -> Error {
    Error::MissingOperand { op: self.op.clone(), operand }
  }

  // endregion

}

/// A value of some domain, stored in a `State` as a `Value`.
pub trait Symbol: Copy + Into<Value> {
  const DOMAIN: Domain;

  /// `None` if `value` is not in the domain.
  fn from_value(value: Value) -> Option<Self>;
}

/// A view of a `State` that reads and writes the symbols of one domain.
pub struct Symbols<'s, S: Symbol> {
  state   : &'s mut State,
  _symbol : PhantomData<S>,
}

impl<'s, S: Symbol> Symbols<'s, S> {

  pub fn new(state: &'s mut State) -> Symbols<'s, S> {
    Symbols { state, _symbol: PhantomData }
  }

  pub fn read(&self, variable: &Variable) -> Result<S> {
    let value = self.state.get(variable)?;
    S::from_value(value).ok_or_else(|| Error::OutOfDomain {
      domain: S::DOMAIN.name(),
      variable: variable.clone(),
      value
    })
  }

  /// Overwrites an existing variable.
  pub fn write(&mut self, variable: &Variable, symbol: S) -> Result<()> {
    self.state.set(variable, symbol.into())
  }

}

/// A gate applies one step to the state in place. The evaluator is passed along so compound gates
/// can dispatch their sub-steps.
pub type GateFn = fn(&GateOp, &mut State, &Evaluator) -> Result<()>;

/// The fixed table of one domain, from operation to gate function.
pub trait Registry {
  type Symbol: Symbol;
  type Op: FromStr + Copy + Display;

  fn gate(op: Self::Op) -> GateFn;

  /// Parses `name` into an operation of this domain and returns its gate.
  fn lookup(name: &str) -> Result<GateFn> {
    match Self::Op::from_str(name) {
      Ok(op) => Ok(Self::gate(op)),
      Err(_) => Err(Error::UnknownOperation {
        domain: <Self::Symbol as Symbol>::DOMAIN.to_string(),
        op: name.to_string()
      })
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn domain_names_are_lowercase() {
    assert_eq!(Domain::parse("binary").unwrap(), Domain::Binary);
    assert_eq!(Domain::parse("natlog").unwrap(), Domain::Natlog);
    assert_eq!(Domain::Ternary.to_string(), "ternary");
    assert!(matches!(Domain::parse("quantum"), Err(Error::UnknownDomain(ref d)) if d == "quantum"));
  }

  #[test]
  fn gate_op_deserializes_sparse_json() {
    let step: GateOp = serde_json::from_str(
      r#"{"op": "seq", "steps": [{"op": "flip", "target": "bit"}, {"domain": "natlog", "op": "noop"}]}"#
    ).unwrap();
    assert_eq!(
      step,
      GateOp::new("seq").with_steps(vec![
        GateOp::new("flip").with_target("bit"),
        GateOp::new("noop").in_domain("natlog"),
      ])
    );
  }

  #[test]
  fn gate_op_serializes_only_present_fields() {
    let json = serde_json::to_value(GateOp::new("flip").with_target("b")).unwrap();
    assert_eq!(json, serde_json::json!({"op": "flip", "target": "b"}));
  }

  #[test]
  fn target_pair_needs_two() {
    let step = GateOp::new("swap").with_targets(vec!["a"]);
    assert!(matches!(
      step.require_target_pair(),
      Err(Error::MissingOperand { operand: "targets", .. })
    ));
    let step = GateOp::new("swap").with_targets(vec!["a", "b", "c"]);
    let (a, b) = step.require_target_pair().unwrap();
    assert_eq!((&**a, &**b), ("a", "b"));
  }

  #[test]
  fn symbols_view_checks_domain() {
    let mut state: State = vec![("ok", 1), ("bad", 5)].into_iter().collect();
    let mut bits = Symbols::<Bit>::new(&mut state);
    assert_eq!(bits.read(&Variable::from("ok")).unwrap(), Bit::ONE);
    assert!(matches!(
      bits.read(&Variable::from("bad")),
      Err(Error::OutOfDomain { domain: "binary", value: 5, .. })
    ));
    bits.write(&Variable::from("ok"), Bit::ZERO).unwrap();
    assert!(bits.write(&Variable::from("nope"), Bit::ONE).is_err());
    assert_eq!(state.get(&Variable::from("ok")).unwrap(), 0);
  }
}
