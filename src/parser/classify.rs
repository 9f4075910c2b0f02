use super::graph::Adjacency;
use crate::tree::{GateState, GateType, LogicGate, PositionHint};
use crate::workflow::{ConditionLeaf, WorkflowNode};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Name marker of question-style condition nodes, e.g. `是否过热？`.
pub const QUESTION_MARKER: &str = "是否";
/// Name prefix of if-style condition nodes, e.g. `If：温度过高`.
pub const IF_PREFIX: &str = "If：";
/// Trailing full-width question mark stripped from display names.
pub const QUESTION_SUFFIX: &str = "？";

static QUESTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"是否(.+?)？?$").expect("question pattern is valid"));
static ORDINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("ordinal pattern is valid"));

/// Marker sets deciding which workflow nodes become gates and which can be roots.
#[derive(Debug, Clone)]
pub struct ParserMarkers {
    /// Substrings of a node name that mark it as a condition node.
    pub condition_name_markers: Vec<String>,
    /// Exact node type of if-style nodes.
    pub condition_node_type: String,
    /// Substrings of a node type that mark it as a preferred root.
    pub trigger_type_markers: Vec<String>,
}

impl Default for ParserMarkers {
    fn default() -> Self {
        Self {
            condition_name_markers: vec![IF_PREFIX.to_string(), QUESTION_MARKER.to_string()],
            condition_node_type: "n8n-nodes-base.if".to_string(),
            trigger_type_markers: vec!["webhook".to_string(), "manualTrigger".to_string()],
        }
    }
}

/// Functional role of a workflow node, derived from its type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Webhook,
    ManualTrigger,
    Condition,
    Switch,
    Code,
    Processing,
}

impl NodeRole {
    /// Substring checks in priority order: `webhook`, `manualTrigger`, `if`, `switch`,
    /// `code`.
    pub fn of(node_type: &str) -> Self {
        if node_type.contains("webhook") {
            NodeRole::Webhook
        } else if node_type.contains("manualTrigger") {
            NodeRole::ManualTrigger
        } else if node_type.contains("if") {
            NodeRole::Condition
        } else if node_type.contains("switch") {
            NodeRole::Switch
        } else if node_type.contains("code") {
            NodeRole::Code
        } else {
            NodeRole::Processing
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            NodeRole::Webhook => "数据输入入口",
            NodeRole::ManualTrigger => "手动触发器",
            NodeRole::Condition => "条件判断节点",
            NodeRole::Switch => "分支选择节点",
            NodeRole::Code => "代码执行节点",
            NodeRole::Processing => "处理节点",
        }
    }
}

/// Why a node was classified as a condition node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionMarker {
    /// The name contains one of the condition markers.
    Name,
    /// The node type is the if-node type.
    NodeType,
    /// The parameter map carries a `conditions` entry.
    Parameters,
}

impl ParserMarkers {
    /// Classifies a node as a condition node, checking name, then type, then parameters.
    pub fn condition_marker(&self, node: &WorkflowNode) -> Option<ConditionMarker> {
        if self
            .condition_name_markers
            .iter()
            .any(|m| node.name.contains(m.as_str()))
        {
            Some(ConditionMarker::Name)
        } else if node.node_type == self.condition_node_type {
            Some(ConditionMarker::NodeType)
        } else if node.has_conditions_parameter() {
            Some(ConditionMarker::Parameters)
        } else {
            None
        }
    }

    /// Whether a node type marks a trigger source preferred as tree root.
    pub fn is_trigger(&self, node_type: &str) -> bool {
        self.trigger_type_markers
            .iter()
            .any(|m| node_type.contains(m.as_str()))
    }
}

/// Builds the gate for a condition node.
///
/// The gate is `OR` unless a non-empty `parameters.conditions.conditions` list declares
/// the `and` combinator. A question-style name provides the condition text, which a
/// parameter condition list then overrides.
pub fn synthesize_gate(node: &WorkflowNode, adjacency: &Adjacency) -> LogicGate {
    let mut gate_type = GateType::Or;
    let mut condition = String::new();

    if node.name.contains(QUESTION_MARKER) {
        condition = extract_condition_from_name(&node.name);
    }
    if let Some(set) = node.condition_set() {
        if let Some(leaves) = set.conditions.filter(|l| !l.is_empty()) {
            gate_type = if set.combinator.as_deref() == Some("and") {
                GateType::And
            } else {
                GateType::Or
            };
            condition = build_condition_expression(&leaves);
        }
    }

    LogicGate {
        id: LogicGate::id_for(&node.id),
        gate_type,
        name: clean_node_name(&node.name),
        description: format!("逻辑判断: {}", condition),
        condition,
        state: GateState::Unknown,
        input_nodes: adjacency
            .sources_of(&node.id)
            .into_iter()
            .map(str::to_string)
            .collect(),
        output_nodes: adjacency.targets(&node.id).to_vec(),
        position: node.position.map(|[x, y]| PositionHint { x, y }),
    }
}

/// Human-readable form of a leaf list.
///
/// Leaves are always joined with `" AND "`, even when the node's combinator is `or`;
/// the gate type is the authoritative combinator.
pub fn build_condition_expression(leaves: &[ConditionLeaf]) -> String {
    leaves
        .iter()
        .map(|leaf| {
            let operation = leaf
                .operator
                .as_ref()
                .and_then(|o| o.operation.as_deref())
                .unwrap_or("equals");
            format!(
                "{} {} {}",
                value_text(&leaf.left_value),
                operator_symbol(operation),
                value_text(&leaf.right_value)
            )
        })
        .join(" AND ")
}

/// Symbol for a workflow comparison operation. Unknown operations pass through.
pub fn operator_symbol(operation: &str) -> &str {
    match operation {
        "equals" => "==",
        "notEquals" => "!=",
        "larger" => ">",
        "largerEqual" => "≥",
        "smaller" => "<",
        "smallerEqual" => "≤",
        "contains" => "contains",
        "notContains" => "not contains",
        other => other,
    }
}

/// `0` and `false` render as written. Only a missing operand is empty.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Text after `是否`, without a trailing `？`. The whole name when there is no match.
pub fn extract_condition_from_name(name: &str) -> String {
    QUESTION_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Strips a leading `If：` and a trailing `？`.
pub fn clean_node_name(name: &str) -> String {
    let name = name.strip_prefix(IF_PREFIX).unwrap_or(name);
    name.strip_suffix(QUESTION_SUFFIX).unwrap_or(name).to_string()
}

/// Name shown on a tree node: cleaned, without a leading ordinal such as `3. `.
/// Falls back to `节点_` plus the first eight characters of the id.
pub fn display_name(node: &WorkflowNode) -> String {
    let cleaned = clean_node_name(&node.name);
    let name = ORDINAL_RE.replace(&cleaned, "");
    if name.is_empty() {
        let short_id: String = node.id.chars().take(8).collect();
        format!("节点_{}", short_id)
    } else {
        name.into_owned()
    }
}
