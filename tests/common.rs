//! Common test utilities for building workflow documents and fault trees.
use serde_json::{Map, Value, json};
use shindan::prelude::*;
use shindan::workflow::WorkflowNode;

/// A bare workflow node.
#[allow(dead_code)]
pub fn node(id: &str, name: &str, node_type: &str) -> WorkflowNode {
    WorkflowNode::new(id, name, node_type)
}

/// An if-node whose parameters carry the given leaves as `(left, operation, right)`.
#[allow(dead_code)]
pub fn condition_node(
    id: &str,
    name: &str,
    combinator: &str,
    leaves: &[(&str, &str, Value)],
) -> WorkflowNode {
    let conditions: Vec<Value> = leaves
        .iter()
        .map(|(left, operation, right)| {
            json!({
                "leftValue": left,
                "rightValue": right,
                "operator": { "type": "number", "operation": operation },
            })
        })
        .collect();
    let mut parameters = Map::new();
    parameters.insert(
        "conditions".to_string(),
        json!({ "combinator": combinator, "conditions": conditions }),
    );
    WorkflowNode {
        parameters: Some(parameters),
        ..WorkflowNode::new(id, name, "n8n-nodes-base.if")
    }
}

/// Builds a document from nodes and `(source, targets)` pairs. Each target lands in its
/// own output slot.
#[allow(dead_code)]
pub fn workflow(nodes: Vec<WorkflowNode>, edges: &[(&str, &[&str])]) -> WorkflowDocument {
    let mut connections = Map::new();
    for (source, targets) in edges {
        let slots: Vec<Value> = targets
            .iter()
            .map(|t| json!([{ "node": t, "type": "main", "index": 0 }]))
            .collect();
        connections.insert(source.to_string(), json!({ "main": slots }));
    }
    WorkflowDocument { nodes, connections }
}

/// A dissolved-gas diagnosis workflow.
///
/// ```text
/// trigger (webhook)
/// └── check_h2      AND  ${h2} > 100
///     ├── check_c2h2 OR  $json.c2h2 ≥ 200
///     │   └── alarm
///     └── record
/// ```
#[allow(dead_code)]
pub fn dga_workflow() -> WorkflowDocument {
    workflow(
        vec![
            node("trigger", "数据接收", "n8n-nodes-base.webhook"),
            condition_node(
                "check_h2",
                "If：氢气超标",
                "and",
                &[("${h2}", "larger", json!(100))],
            ),
            condition_node(
                "check_c2h2",
                "是否乙炔过高？",
                "or",
                &[("$json.c2h2", "largerEqual", json!(200))],
            ),
            node("record", "2. 记录故障", "n8n-nodes-base.code"),
            node("alarm", "发出告警", "n8n-nodes-base.set"),
        ],
        &[
            ("trigger", &["check_h2"]),
            ("check_h2", &["check_c2h2", "record"]),
            ("check_c2h2", &["alarm"]),
        ],
    )
}

/// The same workflow as raw JSON, the way an editor exports it.
#[allow(dead_code)]
pub fn dga_workflow_json() -> String {
    serde_json::to_string(&dga_workflow()).unwrap()
}

/// `A -> B -> C`, no trigger types.
#[allow(dead_code)]
pub fn chain_workflow() -> WorkflowDocument {
    workflow(
        vec![
            node("A", "Alpha", "n8n-nodes-base.set"),
            node("B", "Beta", "n8n-nodes-base.set"),
            node("C", "Gamma", "n8n-nodes-base.set"),
        ],
        &[("A", &["B"]), ("B", &["C"])],
    )
}

/// A fault node with children, for layout tests.
#[allow(dead_code)]
pub fn fault(id: &str, children: Vec<FaultTreeNode>) -> FaultTreeNode {
    FaultTreeNode::fault_node(id, id).with_children(children)
}

/// A resolved gate node with children.
#[allow(dead_code)]
pub fn gate(id: &str, gate_type: GateType, state: GateState, children: Vec<FaultTreeNode>) -> FaultTreeNode {
    let mut node = FaultTreeNode::logic_gate(id, id, gate_type, None).with_children(children);
    node.state = Some(state);
    node
}

/// Telemetry from `(name, value)` pairs.
#[allow(dead_code)]
pub fn telemetry(readings: &[(&str, f64)]) -> Telemetry {
    readings.iter().map(|(k, v)| (*k, *v)).collect()
}

#[allow(dead_code)]
pub fn wide_viewport() -> ViewportConfig {
    ViewportConfig::new(1920.0)
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} but got {}",
        expected,
        actual
    );
}
