use tracing::{debug, trace};

use super::{BinaryGates, Domain, GateFn, GateOp, NatlogGates, Registry, TernaryGates};
use crate::error::Result;
use crate::state::State;

/**
  Routes steps to their domain's gates. A step that names no domain gets the evaluator's default,
  and the default is handed unchanged to every nested step.

  `seq` is linked back into the evaluator unless `with_linked_seq(false)` is used, in which case
  a non-empty `seq` fails with `NotImplemented`.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Evaluator {
  default_domain : Domain,
  link_seq       : bool,
}

impl Evaluator {

  pub fn new(default_domain: Domain) -> Evaluator {
    Evaluator {
      default_domain,
      link_seq: true,
    }
  }

  /// An evaluator whose default domain is given by name.
  pub fn for_domain(name: &str) -> Result<Evaluator> {
    Ok(Evaluator::new(Domain::parse(name)?))
  }

  pub fn with_linked_seq(mut self, link_seq: bool) -> Evaluator {
    self.link_seq = link_seq;
    self
  }

  pub fn default_domain(&self) -> Domain {
    self.default_domain
  }

  pub fn seq_linked(&self) -> bool {
    self.link_seq
  }

  /// The step's own domain if it names one, otherwise the default.
  pub fn resolve_domain(&self, step: &GateOp) -> Result<Domain> {
    match &step.domain {
      Some(name) => Domain::parse(name),
      None       => Ok(self.default_domain)
    }
  }

  /// Finds the gate for `step`, failing with `UnknownDomain` or `UnknownOperation`.
  pub fn lookup(&self, step: &GateOp) -> Result<(Domain, GateFn)> {
    let domain = self.resolve_domain(step)?;
    let gate =
      match domain {
        Domain::Binary  => BinaryGates::lookup(&step.op)?,
        Domain::Ternary => TernaryGates::lookup(&step.op)?,
        Domain::Natlog  => NatlogGates::lookup(&step.op)?,
      };
    Ok((domain, gate))
  }

  /// Applies `step` to `state` in place. On failure `state` is unchanged.
  pub fn evaluate(&self, step: &GateOp, state: &mut State) -> Result<()> {
    let (domain, gate) =
      self.lookup(step).map_err(|error| {
        debug!(op = %step.op, %error, "gate lookup failed");
        error
      })?;
    trace!(%domain, op = %step.op, "evaluate");
    gate(step, state, self)
  }

}

/// Evaluates one step with a linked evaluator over `default_domain`.
pub fn evaluate(step: &GateOp, state: &mut State, default_domain: Domain) -> Result<()> {
  Evaluator::new(default_domain).evaluate(step, state)
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::Error;
  use crate::state::Variable;

  #[test]
  fn unknown_operation_in_binary() {
    let mut state = State::new();
    let result = evaluate(&GateOp::new("bogus"), &mut state, Domain::Binary);
    assert!(matches!(
      result,
      Err(Error::UnknownOperation { ref domain, ref op }) if domain == "binary" && op == "bogus"
    ));
  }

  #[test]
  fn unknown_domain() {
    let mut state = State::create(vec!["bit"], 0);
    let step = GateOp::new("flip").with_target("bit").in_domain("quantum");
    assert!(matches!(evaluate(&step, &mut state, Domain::Binary), Err(Error::UnknownDomain(_))));
    assert!(matches!(Evaluator::for_domain("quantum"), Err(Error::UnknownDomain(_))));
  }

  #[test]
  fn step_domain_overrides_default() {
    let mut state = State::create(vec!["bit"], 0);
    let natlog_noop = GateOp::new("noop").in_domain("natlog");
    evaluate(&natlog_noop, &mut state, Domain::Binary).unwrap();

    let binary_flip = GateOp::new("flip").with_target("bit").in_domain("binary");
    evaluate(&binary_flip, &mut state, Domain::Natlog).unwrap();
    assert_eq!(state.get(&Variable::from("bit")).unwrap(), 1);

    // `flip` is not a natlog operation.
    let flip = GateOp::new("flip").with_target("bit");
    assert!(matches!(evaluate(&flip, &mut state, Domain::Natlog), Err(Error::UnknownOperation { .. })));
  }

  #[test]
  fn nested_steps_inherit_the_default_not_the_parent() {
    // The parent is explicitly binary; the child names no domain and so runs in the natlog
    // default, where `flip` does not exist.
    let mut state = State::create(vec!["bit"], 0);
    let step = GateOp::new("seq")
      .in_domain("binary")
      .with_steps(vec![GateOp::new("flip").with_target("bit")]);
    assert!(matches!(evaluate(&step, &mut state, Domain::Natlog), Err(Error::UnknownOperation { .. })));

    let step = GateOp::new("seq")
      .in_domain("binary")
      .with_steps(vec![GateOp::new("noop"), GateOp::new("flip").with_target("bit").in_domain("binary")]);
    evaluate(&step, &mut state, Domain::Natlog).unwrap();
    assert_eq!(state.get(&Variable::from("bit")).unwrap(), 1);
  }

  #[test]
  fn lookup_reports_resolved_domain() {
    let evaluator = Evaluator::new(Domain::Ternary);
    let (domain, _) = evaluator.lookup(&GateOp::new("noop").in_domain("natlog")).unwrap();
    assert_eq!(domain, Domain::Natlog);
    assert_eq!(evaluator.default_domain(), Domain::Ternary);
    assert!(evaluator.seq_linked());
  }
}
