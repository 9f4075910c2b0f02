pub mod formatter;

pub use formatter::*;

use crate::tree::{GateState, GateType};
use serde::Serialize;

/// Record of how one gate reached its state during an evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasoningStep {
    pub step_id: String,
    pub gate_id: String,
    pub gate_type: Option<GateType>,
    pub condition: String,
    /// The condition with telemetry substituted, when substitution succeeded.
    pub resolved: Option<String>,
    pub state: GateState,
    pub reasoning: String,
}

impl ReasoningStep {
    pub fn new(
        gate_id: &str,
        gate_type: Option<GateType>,
        condition: &str,
        resolved: Option<String>,
        state: GateState,
    ) -> Self {
        let gate_label = gate_type
            .map(|g| g.to_string())
            .unwrap_or_else(|| "?".to_string());
        let verdict = match state {
            GateState::True => "真",
            GateState::False => "假",
            GateState::Unknown => "未知",
        };
        Self {
            step_id: format!("step_{}_1", gate_id),
            gate_id: gate_id.to_string(),
            gate_type,
            condition: condition.to_string(),
            resolved,
            state,
            reasoning: format!("根据输入条件判断，{}门的输出为{}", gate_label, verdict),
        }
    }

    /// Whether the gate evaluated to `true`.
    pub fn output(&self) -> bool {
        self.state == GateState::True
    }
}
