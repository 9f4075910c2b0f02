use crate::data::Telemetry;
use crate::error::ParseError;
use crate::evaluator::{EvaluationReport, Evaluator};
use crate::tree::{FaultTreeNode, LogicGate};
use crate::workflow::{WorkflowDocument, WorkflowNode};
use ahash::AHashSet;
use serde::Serialize;

mod builder;
pub mod classify;
pub mod graph;

use builder::TreeBuilder;
pub use classify::{ConditionMarker, NodeRole, ParserMarkers};
pub use graph::Adjacency;
use graph::NodeIndex;

/// Everything derived from one workflow document.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedWorkflow {
    pub nodes: Vec<WorkflowNode>,
    pub connections: Adjacency,
    pub logic_gates: Vec<LogicGate>,
    pub fault_tree: FaultTreeNode,
}

/// Turns workflow documents into fault trees.
///
/// The parser holds configuration only; every call to [`WorkflowParser::parse`] works on
/// fresh state.
#[derive(Debug, Clone, Default)]
pub struct WorkflowParser {
    markers: ParserMarkers,
}

pub struct WorkflowParserBuilder {
    markers: ParserMarkers,
}

impl WorkflowParserBuilder {
    pub fn new() -> Self {
        Self {
            markers: ParserMarkers::default(),
        }
    }
    /// Adds a name substring that marks condition nodes.
    pub fn with_condition_marker(mut self, marker: &str) -> Self {
        self.markers.condition_name_markers.push(marker.to_string());
        self
    }
    pub fn with_condition_node_type(mut self, node_type: &str) -> Self {
        self.markers.condition_node_type = node_type.to_string();
        self
    }
    /// Adds a type substring that marks trigger nodes preferred as root.
    pub fn with_trigger_marker(mut self, marker: &str) -> Self {
        self.markers.trigger_type_markers.push(marker.to_string());
        self
    }
    pub fn build(self) -> WorkflowParser {
        WorkflowParser {
            markers: self.markers,
        }
    }
}

impl Default for WorkflowParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowParser {
    pub fn builder() -> WorkflowParserBuilder {
        WorkflowParserBuilder::new()
    }

    pub fn markers(&self) -> &ParserMarkers {
        &self.markers
    }

    /// Parses a workflow JSON string.
    pub fn parse_json(&self, json: &str) -> Result<ParsedWorkflow, ParseError> {
        let document: WorkflowDocument = serde_json::from_str(json)?;
        self.parse(&document)
    }

    /// Builds gates, detects the root and materializes the fault tree.
    pub fn parse(&self, document: &WorkflowDocument) -> Result<ParsedWorkflow, ParseError> {
        let nodes = NodeIndex::new(&document.nodes);
        let adjacency = Adjacency::from_document(document);

        let logic_gates: Vec<LogicGate> = nodes
            .iter()
            .filter(|node| self.markers.condition_marker(node).is_some())
            .map(|node| classify::synthesize_gate(node, &adjacency))
            .collect();

        let root = self.find_root(&nodes, &adjacency)?;
        let fault_tree = TreeBuilder::new(&nodes, &adjacency, &logic_gates).build(root);

        tracing::debug!(
            nodes = nodes.len(),
            gates = logic_gates.len(),
            root = %root.id,
            tree_size = fault_tree.node_count(),
            "parsed workflow into fault tree"
        );

        Ok(ParsedWorkflow {
            nodes: nodes.iter().cloned().collect(),
            connections: adjacency,
            logic_gates,
            fault_tree,
        })
    }

    /// Picks the root: a never-targeted node, preferring trigger types, otherwise the
    /// first candidate in document order.
    fn find_root<'a>(
        &self,
        nodes: &NodeIndex<'a>,
        adjacency: &Adjacency,
    ) -> Result<&'a WorkflowNode, ParseError> {
        let targeted = adjacency.targeted();
        let candidates: Vec<&'a WorkflowNode> = nodes
            .iter()
            .filter(|node| !targeted.contains(node.id.as_str()))
            .collect();

        candidates
            .iter()
            .find(|node| self.markers.is_trigger(&node.node_type))
            .or_else(|| candidates.first())
            .copied()
            .ok_or(ParseError::NoRootFound {
                node_count: nodes.len(),
            })
    }
}

impl ParsedWorkflow {
    /// Evaluates every gate against telemetry, updating both the gate list and the
    /// gate nodes of the tree.
    pub fn evaluate_logic_gates(&mut self, telemetry: &Telemetry) -> EvaluationReport {
        let evaluator = Evaluator::new(telemetry);
        let report = evaluator.evaluate_gates(&mut self.logic_gates);
        evaluator.evaluate_tree(&mut self.fault_tree);
        report
    }

    /// Returns every gate to `unknown`.
    pub fn reset_states(&mut self) {
        for gate in &mut self.logic_gates {
            gate.state = Default::default();
        }
        self.fault_tree.reset_states();
    }

    pub fn gate(&self, id: &str) -> Option<&LogicGate> {
        self.logic_gates.iter().find(|g| g.id == id)
    }

    /// Upstream chain of the first node matching `keyword`, root-most node first.
    ///
    /// A node matches when its name, or its serialized parameters, contain the keyword.
    /// Returns an empty path when nothing matches.
    pub fn diagnosis_path(&self, keyword: &str) -> Vec<String> {
        let target = self.nodes.iter().find(|node| {
            node.name.contains(keyword)
                || node.parameters.as_ref().is_some_and(|p| {
                    serde_json::to_string(p).is_ok_and(|s| s.contains(keyword))
                })
        });
        let Some(target) = target else {
            return Vec::new();
        };

        let mut path = Vec::new();
        let mut visited = AHashSet::new();
        self.trace_path(&target.id, &mut path, &mut visited);
        path.reverse();
        path
    }

    fn trace_path<'a>(
        &'a self,
        id: &'a str,
        path: &mut Vec<String>,
        visited: &mut AHashSet<&'a str>,
    ) {
        if !visited.insert(id) {
            return;
        }
        path.push(id.to_string());
        for source in self.connections.sources_of(id) {
            self.trace_path(source, path, visited);
        }
    }
}
