use super::classify::{NodeRole, display_name};
use super::graph::{Adjacency, NodeIndex};
use crate::tree::{FaultTreeNode, LogicGate, NodeKind, PositionHint};
use crate::workflow::WorkflowNode;
use ahash::{AHashMap, AHashSet};

/// Materializes the fault tree below a root by recursive descent.
///
/// Cycle handling uses a visited set local to the current path: each child receives its
/// own copy. A node already on the path becomes a bare leaf, while the same node may
/// still be unrolled again on a sibling branch.
pub(super) struct TreeBuilder<'a> {
    nodes: &'a NodeIndex<'a>,
    adjacency: &'a Adjacency,
    gates: AHashMap<&'a str, &'a LogicGate>,
}

impl<'a> TreeBuilder<'a> {
    pub(super) fn new(
        nodes: &'a NodeIndex<'a>,
        adjacency: &'a Adjacency,
        gates: &'a [LogicGate],
    ) -> Self {
        Self {
            nodes,
            adjacency,
            gates: gates.iter().map(|g| (g.id.as_str(), g)).collect(),
        }
    }

    pub(super) fn build(&self, root: &'a WorkflowNode) -> FaultTreeNode {
        self.build_tree_node(root, &AHashSet::new())
    }

    fn build_tree_node(&self, node: &'a WorkflowNode, visited: &AHashSet<&'a str>) -> FaultTreeNode {
        if visited.contains(node.id.as_str()) {
            return FaultTreeNode::fault_node(node.id.clone(), node.name.clone());
        }
        let mut path = visited.clone();
        path.insert(node.id.as_str());

        let mut tree = FaultTreeNode {
            description: Some(NodeRole::of(&node.node_type).description().to_string()),
            position_hint: node.position.map(|[x, y]| PositionHint { x, y }),
            ..FaultTreeNode::fault_node(node.id.clone(), display_name(node))
        };

        if let Some(gate) = self.gates.get(LogicGate::id_for(&node.id).as_str()) {
            tree.kind = NodeKind::LogicGate;
            tree.gate_type = Some(gate.gate_type);
            tree.state = Some(gate.state);
            tree.condition = Some(gate.condition.clone()).filter(|c| !c.is_empty());
        }

        // targets that are not workflow nodes are dropped
        tree.children = self
            .adjacency
            .targets(&node.id)
            .iter()
            .filter_map(|target| self.nodes.get(target))
            .map(|child| self.build_tree_node(child, &path))
            .collect();
        tree
    }
}
