use crate::data::Telemetry;
use crate::error::ConditionError;
use crate::trace::ReasoningStep;
use crate::tree::{FaultTreeNode, GateState, GateType, LogicGate};

mod condition;

pub use condition::{Comparison, ComparisonOp, ConditionEvaluator, format_number};

/// Summary of one evaluation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationReport {
    /// One step per gate that was visited, in visiting order.
    pub steps: Vec<ReasoningStep>,
    /// Gates whose condition could not be evaluated. They keep their previous state.
    pub degraded: Vec<String>,
}

impl EvaluationReport {
    pub fn count(&self, state: GateState) -> usize {
        self.steps.iter().filter(|s| s.state == state).count()
    }
}

/// Drives gate state updates from telemetry.
///
/// Only `state` fields are touched. A gate whose condition fails to evaluate keeps its
/// current state and is logged; the pass continues with the remaining gates.
pub struct Evaluator<'a> {
    telemetry: &'a Telemetry,
}

impl<'a> Evaluator<'a> {
    pub fn new(telemetry: &'a Telemetry) -> Self {
        Self { telemetry }
    }

    /// State a gate with the given condition resolves to.
    pub fn gate_state(&self, gate_id: &str, condition: Option<&str>) -> GateState {
        self.evaluate_condition(gate_id, condition, GateState::Unknown).state
    }

    /// Evaluates `condition` for a gate currently in state `previous`.
    ///
    /// A failure leaves an unresolved gate `unknown` and keeps a resolved gate where it
    /// is. Only an explicit reset moves a gate back to `unknown`.
    fn evaluate_condition(
        &self,
        gate_id: &str,
        condition: Option<&str>,
        previous: GateState,
    ) -> Outcome {
        let Some(condition) = condition.filter(|c| !c.is_empty()) else {
            return Outcome {
                state: previous,
                resolved: None,
                degraded: false,
            };
        };
        match ConditionEvaluator::resolve(condition, self.telemetry) {
            Ok(comparison) => Outcome {
                state: comparison.holds().into(),
                resolved: Some(comparison.to_string()),
                degraded: false,
            },
            Err(err) => {
                log_degraded(gate_id, condition, previous, &err);
                Outcome {
                    state: previous,
                    resolved: None,
                    degraded: true,
                }
            }
        }
    }

    /// Re-evaluates every logic gate in the tree in place.
    pub fn evaluate_tree(&self, root: &mut FaultTreeNode) -> EvaluationReport {
        let mut report = EvaluationReport::default();
        root.for_each_mut(&mut |node| {
            if !node.is_logic_gate() {
                return;
            }
            let outcome =
                self.evaluate_condition(&node.id, node.condition.as_deref(), node.gate_state());
            node.state = Some(outcome.state);
            let condition = node.condition.as_deref().unwrap_or_default();
            record(&mut report, &node.id, node.gate_type, condition, outcome);
        });
        tracing::debug!(
            gates = report.steps.len(),
            degraded = report.degraded.len(),
            "evaluated fault tree gates"
        );
        report
    }

    /// Re-evaluates a flat list of gates in place.
    pub fn evaluate_gates(&self, gates: &mut [LogicGate]) -> EvaluationReport {
        let mut report = EvaluationReport::default();
        for gate in gates.iter_mut() {
            let outcome =
                self.evaluate_condition(&gate.id, Some(gate.condition.as_str()), gate.state);
            gate.state = outcome.state;
            record(&mut report, &gate.id, Some(gate.gate_type), &gate.condition, outcome);
        }
        report
    }
}

struct Outcome {
    state: GateState,
    resolved: Option<String>,
    degraded: bool,
}

fn record(
    report: &mut EvaluationReport,
    gate_id: &str,
    gate_type: Option<GateType>,
    condition: &str,
    outcome: Outcome,
) {
    if outcome.degraded {
        report.degraded.push(gate_id.to_string());
    }
    report.steps.push(ReasoningStep::new(
        gate_id,
        gate_type,
        condition,
        outcome.resolved,
        outcome.state,
    ));
}

fn log_degraded(gate_id: &str, condition: &str, kept: GateState, err: &ConditionError) {
    tracing::warn!(gate = gate_id, condition, %kept, error = %err, "condition evaluation failed, gate state kept");
}
