use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean combinator carried by a logic-gate node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateType {
    And,
    Or,
    Not,
}

impl GateType {
    /// Compact symbol drawn on connectors leaving the gate.
    pub fn symbol(&self) -> &'static str {
        match self {
            GateType::And => "&",
            GateType::Or => "∨",
            GateType::Not => "¬",
        }
    }

    /// Legend color of the gate family.
    pub fn color(&self) -> &'static str {
        match self {
            GateType::And => "#409EFF",
            GateType::Or => "#67C23A",
            GateType::Not => "#E6A23C",
        }
    }

    /// Parses the upper-case tag used in serialized trees. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "AND" => Some(GateType::And),
            "OR" => Some(GateType::Or),
            "NOT" => Some(GateType::Not),
            _ => None,
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateType::And => write!(f, "AND"),
            GateType::Or => write!(f, "OR"),
            GateType::Not => write!(f, "NOT"),
        }
    }
}

/// Truth state of a gate. Starts as `Unknown` and only returns there through an
/// explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    #[default]
    Unknown,
    True,
    False,
}

impl From<bool> for GateState {
    fn from(value: bool) -> Self {
        if value {
            GateState::True
        } else {
            GateState::False
        }
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateState::Unknown => write!(f, "unknown"),
            GateState::True => write!(f, "true"),
            GateState::False => write!(f, "false"),
        }
    }
}

/// A gate synthesized from a condition-bearing workflow node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicGate {
    pub id: String,
    pub gate_type: GateType,
    pub name: String,
    pub description: String,
    pub condition: String,
    pub state: GateState,
    pub input_nodes: Vec<String>,
    pub output_nodes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionHint>,
}

impl LogicGate {
    /// Id of the gate synthesized for a workflow node.
    pub fn id_for(source_node_id: &str) -> String {
        format!("gate_{}", source_node_id)
    }

    /// Id of the workflow node this gate was synthesized from.
    pub fn source_node_id(&self) -> &str {
        self.id.strip_prefix("gate_").unwrap_or(&self.id)
    }
}

/// Editor position carried through from the workflow document. Unrelated to the
/// computed layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionHint {
    pub x: f64,
    pub y: f64,
}
