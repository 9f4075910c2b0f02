use super::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A workflow automation document: nodes plus fan-out connections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowDocument {
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    /// `sourceId -> { "main": [[{ "node": targetId }]] }`, kept in document order.
    #[serde(default)]
    pub connections: Map<String, Value>,
}

/// A single workflow node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,
}

impl WorkflowNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type: node_type.into(),
            parameters: None,
            position: None,
        }
    }

    /// Whether the parameter map declares a `conditions` entry at all.
    pub fn has_conditions_parameter(&self) -> bool {
        self.parameters
            .as_ref()
            .is_some_and(|p| p.get("conditions").is_some_and(|c| !c.is_null()))
    }

    /// Typed view of `parameters.conditions`. Malformed structures read as `None`.
    pub fn condition_set(&self) -> Option<ConditionSet> {
        let raw = self.parameters.as_ref()?.get("conditions")?;
        ConditionSet::deserialize(raw).ok()
    }
}

/// `parameters.conditions` of an if-style node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionSet {
    #[serde(default)]
    pub combinator: Option<String>,
    #[serde(default)]
    pub conditions: Option<Vec<ConditionLeaf>>,
}

/// One leaf comparison inside a condition set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionLeaf {
    #[serde(default, alias = "leftValue")]
    pub left_value: Value,
    #[serde(default)]
    pub operator: Option<ConditionOperator>,
    #[serde(default, alias = "rightValue")]
    pub right_value: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionOperator {
    #[serde(default)]
    pub operation: Option<String>,
}

/// Connection entry of one source node.
///
/// Output slots and targets of the wrong shape are skipped one by one, so a single bad
/// entry does not cost the source its other edges.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConnections {
    #[serde(default, deserialize_with = "lenient::list")]
    pub main: Option<Vec<OutputSlot>>,
}

/// One output slot: a list of targets, or `null` for an unconnected output.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct OutputSlot {
    #[serde(deserialize_with = "lenient::list")]
    pub targets: Option<Vec<ConnectionTarget>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionTarget {
    #[serde(default, deserialize_with = "lenient::text")]
    pub node: Option<String>,
}

impl NodeConnections {
    /// All targets of every output slot, flattened in slot order.
    pub fn targets(&self) -> Vec<String> {
        self.main
            .iter()
            .flatten()
            .filter_map(|slot| slot.targets.as_ref())
            .flatten()
            .filter_map(|t| t.node.clone())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

impl WorkflowDocument {
    /// Ordered `(source, targets)` pairs. A source whose entry is not an object gets no
    /// targets.
    pub fn adjacency(&self) -> Vec<(String, Vec<String>)> {
        self.connections
            .iter()
            .map(|(source, raw)| {
                let targets = match NodeConnections::deserialize(raw) {
                    Ok(entry) => entry.targets(),
                    Err(err) => {
                        tracing::debug!(source = %source, error = %err, "ignoring unreadable connections");
                        Vec::new()
                    }
                };
                (source.clone(), targets)
            })
            .collect()
    }
}
